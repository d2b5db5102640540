use std::any::type_name;
use std::mem;

use foldhash::{HashSet, HashSetExt};
use log::{debug, trace, warn};

use crate::{
    CreateFn, DestroyFn, Error, HookFn, Identity, InstanceId, ObjectPoolBuilder, PoolConfig,
    Pooled, Result,
};

/// A single-threaded pool of reusable instances of `T` with lifecycle hooks.
///
/// The pool hands out instances with [`get()`][1] and takes them back with [`release()`][2].
/// Instances the pool holds are *idle*; instances handed out are *active* and owned by the
/// caller. The most recently released instance is the first one to be reused.
///
/// Four callbacks drive the lifecycle of instances:
///
/// * `create` makes a new instance when demand exceeds the idle supply.
/// * `on_get` runs whenever an instance transitions from idle (or brand new) to active.
/// * `on_release` runs whenever an active instance is returned and kept idle.
/// * `on_destroy` disposes of an instance the pool will not keep, because it was released
///   while the pool already held [`max_size()`][3] idle instances, or because the pool was
///   cleared or dropped.
///
/// # Identity
///
/// With the collection check enabled, the pool remembers the [identity][Identity] of every idle
/// instance and rejects releasing an instance that is already idle. This is why the pooled type
/// is a handle such as a [`Box`] or an [`Rc`][std::rc::Rc] rather than a plain value.
///
/// # Pre-warming
///
/// Creating instances is typically expensive, which is the reason to pool them in the first
/// place. Use [`prewarm()`][4] to pay that cost up front instead of on the first calls to
/// [`get()`][1].
///
/// # Thread safety
///
/// The pool is neither [`Send`] nor [`Sync`]. It is owned by the client that uses it and
/// operated from one thread.
///
/// # Examples
///
/// ```
/// use lifecycle_pool::ObjectPool;
///
/// let mut pool = ObjectPool::builder(|| Box::new(String::with_capacity(64)))
///     .on_release(|text| text.clear())
///     .max_size(2)
///     .build()
///     .unwrap();
///
/// let mut greeting = pool.get();
/// greeting.push_str("hello");
/// pool.release(greeting).unwrap();
///
/// // The same allocation comes back, reset by the release hook.
/// let reused = pool.get();
/// assert!(reused.is_empty());
/// assert!(reused.capacity() >= 64);
/// # pool.release(reused).unwrap();
/// ```
///
/// [1]: Self::get
/// [2]: Self::release
/// [3]: Self::max_size
/// [4]: Self::prewarm
pub struct ObjectPool<T> {
    /// Idle instances. The top of the stack is the most recently released instance.
    available: Vec<T>,

    /// Identities of the idle instances. Only maintained if the collection check is enabled,
    /// in which case it always describes exactly the contents of `available`.
    idle_ids: HashSet<InstanceId>,

    /// Number of `get()` calls minus number of accepted `release()` calls. Goes negative if
    /// instances that did not come from `get()` are released, e.g. when a client pre-warms the
    /// pool by releasing freshly created instances.
    active: isize,

    create: CreateFn<T>,
    on_get: Option<HookFn<T>>,
    on_release: Option<HookFn<T>>,
    on_destroy: Option<DestroyFn<T>>,

    config: PoolConfig,
}

impl<T: Identity> ObjectPool<T> {
    /// Creates a new pool with the default configuration and no lifecycle hooks.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifecycle_pool::ObjectPool;
    ///
    /// let pool = ObjectPool::new(|| Box::new([0_u8; 256]));
    ///
    /// assert_eq!(pool.count_inactive(), 0);
    /// assert_eq!(pool.count_active(), 0);
    /// ```
    #[must_use]
    pub fn new(create: impl FnMut() -> T + 'static) -> Self {
        Self::new_inner(
            Box::new(create),
            None,
            None,
            None,
            PoolConfig::default(),
        )
    }

    /// Starts building a new [`ObjectPool`] that uses `create` to make new instances.
    ///
    /// Use this when you need lifecycle hooks or a non-default configuration.
    pub fn builder(create: impl FnMut() -> T + 'static) -> ObjectPoolBuilder<T> {
        ObjectPoolBuilder::new(create)
    }

    pub(crate) fn new_inner(
        create: CreateFn<T>,
        on_get: Option<HookFn<T>>,
        on_release: Option<HookFn<T>>,
        on_destroy: Option<DestroyFn<T>>,
        config: PoolConfig,
    ) -> Self {
        debug!(
            "creating pool of {} (collection_check: {}, default_capacity: {}, max_size: {})",
            type_name::<T>(),
            config.collection_check,
            config.default_capacity,
            config.max_size
        );

        let idle_ids = if config.collection_check {
            HashSet::with_capacity(config.default_capacity)
        } else {
            HashSet::new()
        };

        Self {
            available: Vec::with_capacity(config.default_capacity),
            idle_ids,
            active: 0,
            create,
            on_get,
            on_release,
            on_destroy,
            config,
        }
    }

    /// Hands out an instance, reusing the most recently released idle instance if there is one
    /// and creating a new one otherwise.
    ///
    /// The `on_get` hook runs on the instance before it is returned. A panic in `create` or
    /// `on_get` propagates to the caller and the instance involved is lost to the pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifecycle_pool::ObjectPool;
    ///
    /// let mut pool = ObjectPool::new(|| Box::new(0_u32));
    ///
    /// let first = pool.get();
    /// assert_eq!(pool.count_active(), 1);
    ///
    /// pool.release(first).unwrap();
    /// assert_eq!(pool.count_active(), 0);
    /// assert_eq!(pool.count_inactive(), 1);
    /// ```
    pub fn get(&mut self) -> T {
        let mut instance = if let Some(instance) = self.available.pop() {
            if self.config.collection_check {
                self.idle_ids.remove(&instance.identity());
            }

            instance
        } else {
            trace!("no idle {} in pool, creating one", type_name::<T>());
            (self.create)()
        };

        if let Some(on_get) = &mut self.on_get {
            on_get(&mut instance);
        }

        self.active = self
            .active
            .checked_add(1)
            .expect("more active instances than fit in memory is impossible");

        instance
    }

    /// Hands out an instance wrapped in a guard that releases it back to the pool when dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifecycle_pool::ObjectPool;
    ///
    /// let mut pool = ObjectPool::new(|| Box::new(Vec::<u32>::new()));
    ///
    /// {
    ///     let mut scratch = pool.get_pooled();
    ///     scratch.push(42);
    /// }
    ///
    /// assert_eq!(pool.count_inactive(), 1);
    /// assert_eq!(pool.count_active(), 0);
    /// ```
    pub fn get_pooled(&mut self) -> Pooled<'_, T> {
        let instance = self.get();
        Pooled::new(self, instance)
    }

    /// Returns an instance to the pool.
    ///
    /// If the pool holds fewer than [`max_size()`][Self::max_size] idle instances, the
    /// `on_release` hook runs and the instance becomes idle, to be handed out by the next
    /// [`get()`][Self::get]. Otherwise the instance is handed to `on_destroy` and forgotten.
    ///
    /// The pool does not verify that the instance was obtained from it. Releasing a freshly
    /// created instance is a valid way to pre-warm the pool from the outside.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleRelease`] if the collection check is enabled and an instance with
    /// the same identity is already idle in the pool. The rejected value is dropped without
    /// invoking any hook and the pool is left unchanged.
    pub fn release(&mut self, mut instance: T) -> Result<()> {
        let identity = self.config.collection_check.then(|| instance.identity());

        if identity.is_some_and(|identity| self.idle_ids.contains(&identity)) {
            warn!(
                "{} released to pool while already idle in it, rejecting",
                type_name::<T>()
            );
            return Err(Error::DoubleRelease);
        }

        if self.available.len() < self.config.max_size {
            if let Some(on_release) = &mut self.on_release {
                on_release(&mut instance);
            }

            if let Some(identity) = identity {
                self.idle_ids.insert(identity);
            }

            self.available.push(instance);
        } else {
            trace!(
                "pool of {} is full ({} idle), destroying released instance",
                type_name::<T>(),
                self.available.len()
            );
            self.destroy(instance);
        }

        self.active = self
            .active
            .checked_sub(1)
            .expect("more released instances than fit in memory is impossible");

        Ok(())
    }

    /// Creates up to `count` instances and adds them to the idle set, so that the cost of
    /// creating them is not paid by later calls to [`get()`][Self::get].
    ///
    /// Each new instance goes through `on_release`, exactly as if it had been released. The
    /// number of instances created is limited by the free room below
    /// [`max_size()`][Self::max_size], so no instance is created only to be destroyed. Unlike
    /// releasing freshly created instances, this does not change
    /// [`count_active()`][Self::count_active].
    ///
    /// Returns the number of instances created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleRelease`] if the collection check is enabled and `create`
    /// returns an instance with the identity of an instance that is already idle. That
    /// instance is dropped and no more instances are created.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifecycle_pool::ObjectPool;
    ///
    /// let mut pool = ObjectPool::builder(|| Box::new([0_u8; 64]))
    ///     .default_capacity(20)
    ///     .max_size(100)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(pool.prewarm(20).unwrap(), 20);
    /// assert_eq!(pool.count_inactive(), 20);
    /// assert_eq!(pool.count_active(), 0);
    /// ```
    pub fn prewarm(&mut self, count: usize) -> Result<usize> {
        let room = self.config.max_size.saturating_sub(self.available.len());
        let count = count.min(room);

        self.available.reserve(count);

        for _ in 0..count {
            let mut instance = (self.create)();
            let identity = self.config.collection_check.then(|| instance.identity());

            if identity.is_some_and(|identity| self.idle_ids.contains(&identity)) {
                warn!(
                    "create function of {} returned an instance that is already idle",
                    type_name::<T>()
                );
                return Err(Error::DoubleRelease);
            }

            if let Some(on_release) = &mut self.on_release {
                on_release(&mut instance);
            }

            // Only recorded once the hook has returned, so a panicking hook leaves no trace.
            if let Some(identity) = identity {
                self.idle_ids.insert(identity);
            }

            self.available.push(instance);
        }

        debug!("pre-warmed pool of {} with {count} instances", type_name::<T>());

        Ok(count)
    }
}

impl<T> ObjectPool<T> {
    /// Destroys all idle instances via `on_destroy`.
    ///
    /// Active instances are owned by their holders and are not affected. They may still be
    /// released back into the pool afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// use lifecycle_pool::ObjectPool;
    ///
    /// let destroyed = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&destroyed);
    ///
    /// let mut pool = ObjectPool::builder(|| Box::new(0_u64))
    ///     .on_destroy(move |_| counter.set(counter.get() + 1))
    ///     .build()
    ///     .unwrap();
    ///
    /// pool.prewarm(3).unwrap();
    /// pool.clear();
    ///
    /// assert_eq!(destroyed.get(), 3);
    /// assert!(pool.is_empty());
    /// ```
    pub fn clear(&mut self) {
        let idle = mem::take(&mut self.available);
        let count = idle.len();

        // Forget the instances before destroying them, in case `on_destroy` panics.
        self.idle_ids.clear();

        for instance in idle {
            self.destroy(instance);
        }

        if count > 0 {
            debug!("cleared {count} idle {} from pool", type_name::<T>());
        }
    }

    fn destroy(&mut self, instance: T) {
        match &mut self.on_destroy {
            Some(on_destroy) => on_destroy(instance),
            None => drop(instance),
        }
    }

    /// The number of idle instances held by the pool.
    #[must_use]
    pub fn count_inactive(&self) -> usize {
        self.available.len()
    }

    /// The number of instances handed out by [`get()`][Self::get] minus the number of
    /// instances accepted by [`release()`][Self::release].
    ///
    /// This is negative if more instances were released than were ever handed out, which is
    /// what happens when a client pre-warms the pool by releasing freshly created instances.
    #[must_use]
    pub fn count_active(&self) -> isize {
        self.active
    }

    /// Whether the pool holds no idle instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Whether double release detection is enabled.
    #[must_use]
    pub fn collection_check(&self) -> bool {
        self.config.collection_check
    }

    /// The number of idle instances the pool reserved storage for on creation.
    #[must_use]
    pub fn default_capacity(&self) -> usize {
        self.config.default_capacity
    }

    /// The maximum number of idle instances the pool keeps.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.config.max_size
    }
}

impl<T> std::fmt::Debug for ObjectPool<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectPool")
            .field("item_type", &std::format_args!("{}", type_name::<T>()))
            .field("idle", &self.available.len())
            .field("active", &self.active)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T> Drop for ObjectPool<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
