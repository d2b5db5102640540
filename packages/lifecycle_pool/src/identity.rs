use std::ptr;
use std::rc::Rc;
use std::sync::Arc;

/// Opaque identity of a pooled instance, as reported by [`Identity::identity()`].
///
/// Two instances with the same identity are considered the same object by the pool, even if
/// they are distinct Rust values (e.g. two clones of the same [`Rc`]).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct InstanceId(usize);

impl InstanceId {
    /// Creates an identity from a raw value, for handle types that carry their own
    /// identifier (e.g. an entity index).
    #[must_use]
    pub const fn from_raw(value: usize) -> Self {
        Self(value)
    }

    /// Creates an identity from the address of an object.
    #[must_use]
    pub fn from_ptr<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>().addr())
    }
}

/// Types whose values have an identity that survives being moved around by value.
///
/// An [`ObjectPool`][crate::ObjectPool] tracks idle instances by identity, not by value, to
/// detect an instance being released twice. The pooled type is therefore a handle to some
/// object (a box, a reference-counted pointer, an entity ID) rather than the object itself.
///
/// # Examples
///
/// ```
/// use lifecycle_pool::{Identity, InstanceId};
///
/// #[derive(Clone, Copy)]
/// struct EntityHandle(u32);
///
/// impl Identity for EntityHandle {
///     fn identity(&self) -> InstanceId {
///         InstanceId::from_raw(self.0 as usize)
///     }
/// }
///
/// assert_eq!(EntityHandle(7).identity(), EntityHandle(7).identity());
/// assert_ne!(EntityHandle(7).identity(), EntityHandle(8).identity());
/// ```
pub trait Identity {
    /// Returns the identity of the object this value refers to.
    fn identity(&self) -> InstanceId;
}

/// The identity is the address of the heap allocation.
///
/// Boxes of zero-sized types do not allocate and therefore all share one identity. Pool them
/// with the collection check disabled or give them a field.
impl<T: ?Sized> Identity for Box<T> {
    fn identity(&self) -> InstanceId {
        InstanceId::from_ptr(ptr::from_ref::<T>(&**self))
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn identity(&self) -> InstanceId {
        InstanceId::from_ptr(Rc::as_ptr(self))
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn identity(&self) -> InstanceId {
        InstanceId::from_ptr(Arc::as_ptr(self))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn box_identity_follows_allocation() {
        let a = Box::new(1_u32);
        let b = Box::new(1_u32);

        let id_a = a.identity();
        assert_ne!(id_a, b.identity());

        // Moving the box does not move the allocation.
        let moved = a;
        assert_eq!(moved.identity(), id_a);
    }

    #[test]
    fn rc_clones_share_identity() {
        let a = Rc::new(String::from("castle"));
        let b = Rc::clone(&a);
        let c = Rc::new(String::from("castle"));

        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
    }

    #[test]
    fn arc_clones_share_identity() {
        let a = Arc::new(5_u64);
        let b = Arc::clone(&a);

        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn unsized_box_identity() {
        let a: Box<[u8]> = vec![1, 2, 3].into_boxed_slice();
        let b: Box<[u8]> = vec![1, 2, 3].into_boxed_slice();

        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn raw_identity_round_trips() {
        assert_eq!(InstanceId::from_raw(42), InstanceId::from_raw(42));
        assert_ne!(InstanceId::from_raw(42), InstanceId::from_raw(43));
    }
}
