#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A single-threaded object pool that recycles instances instead of constructing and destroying
//! them on hot paths, driving a lifecycle of hooks as instances move in and out of the pool.
//!
//! This crate provides [`ObjectPool`], which hands out instances with [`get()`][1] and takes
//! them back with [`release()`][2]. An instance is always in one of three states:
//!
//! * **idle** - held by the pool, ready to be handed out again;
//! * **active** - handed out and owned by the caller, unknown to the pool;
//! * **destroyed** - disposed of by the pool because it was released while the pool already held
//!   as many idle instances as it is allowed to.
//!
//! ```text
//! (create) --> idle --(get / on_get)--> active --(release / on_release)--> idle
//!                                          |
//!                                          +--(release into full pool / on_destroy)--> destroyed
//! ```
//!
//! # Key Features
//!
//! - **Lifecycle hooks**: create, get, release and destroy callbacks supplied at construction
//! - **LIFO reuse**: the most recently released instance is handed out next, while it is still
//!   warm in caches
//! - **Capacity ceiling**: the pool never holds more than `max_size` idle instances
//! - **Double release detection**: optional identity-based check that rejects releasing an
//!   instance that is already idle
//! - **Pre-warming**: populate the pool up front so expensive construction happens before
//!   latency-sensitive work starts
//! - **Scoped access**: [`Pooled`] guards that return their instance when dropped
//!
//! # Examples
//!
//! ```rust
//! use lifecycle_pool::{Error, ObjectPool};
//!
//! struct Projectile {
//!     active: bool,
//!     traveled: f32,
//! }
//!
//! let mut pool = ObjectPool::builder(|| {
//!     Box::new(Projectile {
//!         active: false,
//!         traveled: 0.0,
//!     })
//! })
//! .on_get(|p| p.active = true)
//! .on_release(|p| {
//!     p.active = false;
//!     p.traveled = 0.0;
//! })
//! .collection_check(true)
//! .default_capacity(20)
//! .max_size(100)
//! .build()?;
//!
//! // Pay the construction cost before the game loop starts.
//! pool.prewarm(20)?;
//!
//! let mut shot = pool.get();
//! assert!(shot.active);
//! shot.traveled += 1.5;
//!
//! pool.release(shot)?;
//! assert_eq!(pool.count_inactive(), 20);
//! # Ok::<(), Error>(())
//! ```
//!
//! [1]: ObjectPool::get
//! [2]: ObjectPool::release

mod builder;
mod config;
mod error;
mod identity;
mod pool;
mod pooled;

pub use builder::ObjectPoolBuilder;
pub(crate) use builder::{CreateFn, DestroyFn, HookFn};
pub use config::*;
pub use error::*;
pub use identity::*;
pub use pool::ObjectPool;
pub use pooled::Pooled;
