use std::any::type_name;

use crate::{Identity, ObjectPool, PoolConfig, Result};

pub(crate) type CreateFn<T> = Box<dyn FnMut() -> T>;
pub(crate) type HookFn<T> = Box<dyn FnMut(&mut T)>;
pub(crate) type DestroyFn<T> = Box<dyn FnMut(T)>;

/// Builder for creating an instance of [`ObjectPool`].
///
/// The function that creates new instances is mandatory and given up front. The lifecycle
/// hooks are optional: by default nothing happens when an instance is handed out or returned,
/// and destroyed instances are simply dropped.
///
/// # Examples
///
/// ```
/// use lifecycle_pool::ObjectPool;
///
/// let pool = ObjectPool::builder(|| Box::new(Vec::<u8>::with_capacity(1024)))
///     .on_release(|buffer| buffer.clear())
///     .collection_check(true)
///     .default_capacity(4)
///     .max_size(16)
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.max_size(), 16);
/// ```
#[must_use]
pub struct ObjectPoolBuilder<T> {
    create: CreateFn<T>,
    on_get: Option<HookFn<T>>,
    on_release: Option<HookFn<T>>,
    on_destroy: Option<DestroyFn<T>>,
    config: PoolConfig,
}

impl<T> std::fmt::Debug for ObjectPoolBuilder<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectPoolBuilder")
            .field("item_type", &std::format_args!("{}", type_name::<T>()))
            .field("has_on_get", &self.on_get.is_some())
            .field("has_on_release", &self.on_release.is_some())
            .field("has_on_destroy", &self.on_destroy.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Identity> ObjectPoolBuilder<T> {
    pub(crate) fn new(create: impl FnMut() -> T + 'static) -> Self {
        Self {
            create: Box::new(create),
            on_get: None,
            on_release: None,
            on_destroy: None,
            config: PoolConfig::default(),
        }
    }

    /// Sets the hook invoked on an instance right before [`get()`][ObjectPool::get] hands it
    /// out, whether it was recycled or freshly created.
    pub fn on_get(mut self, hook: impl FnMut(&mut T) + 'static) -> Self {
        self.on_get = Some(Box::new(hook));
        self
    }

    /// Sets the hook invoked on an instance when it is released and the pool has room to keep
    /// it idle. Typically resets the instance to a reusable state.
    pub fn on_release(mut self, hook: impl FnMut(&mut T) + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }

    /// Sets the hook that disposes of an instance the pool will not keep, either because it was
    /// released into a full pool or because the pool is being cleared.
    ///
    /// The instance is not tracked anywhere afterwards, so the hook must fully dispose of it.
    pub fn on_destroy(mut self, hook: impl FnMut(T) + 'static) -> Self {
        self.on_destroy = Some(Box::new(hook));
        self
    }

    /// Enables or disables detection of instances being released while already idle.
    pub fn collection_check(mut self, enabled: bool) -> Self {
        self.config.collection_check = enabled;
        self
    }

    /// Sets the number of idle instances to reserve storage for up front.
    pub fn default_capacity(mut self, capacity: usize) -> Self {
        self.config.default_capacity = capacity;
        self
    }

    /// Sets the maximum number of idle instances the pool keeps.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.config.max_size = max_size;
        self
    }

    /// Replaces all capacity and safety settings at once, e.g. with values from a settings file.
    pub fn config(mut self, config: PoolConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the pool with the specified configuration.
    ///
    /// No instances are created here. Use [`ObjectPool::prewarm()`] to populate the pool
    /// ahead of first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`][crate::Error::InvalidConfiguration] if
    /// `max_size` is less than `default_capacity`.
    pub fn build(self) -> Result<ObjectPool<T>> {
        self.config.validate()?;

        Ok(ObjectPool::new_inner(
            self.create,
            self.on_get,
            self.on_release,
            self.on_destroy,
            self.config,
        ))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn defaults_come_from_pool_config() {
        let pool = ObjectPool::builder(|| Box::new(1_u32)).build().unwrap();

        assert_eq!(pool.collection_check(), PoolConfig::DEFAULT_COLLECTION_CHECK);
        assert_eq!(pool.default_capacity(), PoolConfig::DEFAULT_CAPACITY);
        assert_eq!(pool.max_size(), PoolConfig::DEFAULT_MAX_SIZE);
    }

    #[test]
    fn setters_override_defaults() {
        let pool = ObjectPool::builder(|| Box::new(1_u32))
            .collection_check(false)
            .default_capacity(3)
            .max_size(7)
            .build()
            .unwrap();

        assert!(!pool.collection_check());
        assert_eq!(pool.default_capacity(), 3);
        assert_eq!(pool.max_size(), 7);
    }

    #[test]
    fn config_replaces_settings() {
        let config = PoolConfig {
            collection_check: false,
            default_capacity: 20,
            max_size: 100,
        };

        let pool = ObjectPool::builder(|| Box::new(1_u32))
            .max_size(5)
            .config(config)
            .build()
            .unwrap();

        assert!(!pool.collection_check());
        assert_eq!(pool.default_capacity(), 20);
        assert_eq!(pool.max_size(), 100);
    }

    #[test]
    fn contradictory_capacity_fails() {
        let result = ObjectPool::builder(|| Box::new(1_u32))
            .default_capacity(20)
            .max_size(10)
            .build();

        assert_eq!(
            result.err(),
            Some(Error::InvalidConfiguration {
                default_capacity: 20,
                max_size: 10,
            })
        );
    }

    #[test]
    fn debug_names_item_type() {
        let builder = ObjectPool::builder(|| Box::new(1_u32)).on_get(|_| {});

        let debug = format!("{builder:?}");
        assert!(debug.contains("u32"));
        assert!(debug.contains("has_on_get: true"));
    }
}
