use std::any::type_name;
use std::ops::{Deref, DerefMut};

use log::error;

use crate::{Identity, ObjectPool};

/// An active instance that returns itself to its [`ObjectPool`] when dropped.
///
/// Returned by [`ObjectPool::get_pooled()`]. The guard borrows the pool exclusively, so it fits
/// short-lived scratch usage within one scope. For instances that outlive the scope, use
/// [`ObjectPool::get()`] and [`ObjectPool::release()`] directly or detach the instance with
/// [`into_inner()`][Self::into_inner].
pub struct Pooled<'a, T: Identity> {
    pool: &'a mut ObjectPool<T>,

    /// Only `None` after `into_inner()` took the instance out.
    instance: Option<T>,
}

impl<'a, T: Identity> Pooled<'a, T> {
    pub(crate) fn new(pool: &'a mut ObjectPool<T>, instance: T) -> Self {
        Self {
            pool,
            instance: Some(instance),
        }
    }

    /// Detaches the instance from the guard. It stays active and is not released on drop.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifecycle_pool::ObjectPool;
    ///
    /// let mut pool = ObjectPool::new(|| Box::new(7_u8));
    ///
    /// let kept = pool.get_pooled().into_inner();
    /// assert_eq!(pool.count_active(), 1);
    ///
    /// pool.release(kept).unwrap();
    /// assert_eq!(pool.count_active(), 0);
    /// ```
    #[must_use]
    pub fn into_inner(mut self) -> T {
        self.instance
            .take()
            .expect("the instance is only taken out once, by into_inner() or drop()")
    }
}

impl<T: Identity> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.instance
            .as_ref()
            .expect("the instance is present for as long as the guard can be used")
    }
}

impl<T: Identity> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.instance
            .as_mut()
            .expect("the instance is present for as long as the guard can be used")
    }
}

impl<T: Identity> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        let Some(instance) = self.instance.take() else {
            return;
        };

        // Drop cannot report errors, so the best we can do is make noise.
        if let Err(e) = self.pool.release(instance) {
            error!(
                "scoped {} could not be returned to its pool: {e}",
                type_name::<T>()
            );
        }
    }
}

impl<T: Identity> std::fmt::Debug for Pooled<'_, T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pooled")
            .field("item_type", &std::format_args!("{}", type_name::<T>()))
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
