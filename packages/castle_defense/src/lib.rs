#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A headless castle defense game built around [`lifecycle_pool`].
//!
//! A castle in the middle of the field shoots at the nearest enemy within reach while a spawner
//! drops ever larger waves of enemies around it. Both clients own an
//! [`ObjectPool`][lifecycle_pool::ObjectPool] and recycle their objects through it:
//!
//! * the [`Castle`] takes a [`Projectile`] from its pool every time it fires, and returns it
//!   when it hits an enemy or has flown for ten seconds;
//! * the [`EnemySpawner`] takes an [`Enemy`] from its pool for every enemy it spawns, and gets
//!   it back when the enemy is hit.
//!
//! Creating a projectile is deliberately slow (see [`Settings::projectile_setup_ms`]), standing
//! in for the cost of setting up a complex game object. Both pools are pre-warmed when the
//! [`Simulation`] is created, so that cost is paid before the first frame rather than whenever
//! the castle fires.
//!
//! # Example
//!
//! ```
//! use castle_defense::{Settings, Simulation};
//!
//! let settings = Settings {
//!     projectile_setup_ms: 0,
//!     ..Settings::default()
//! };
//!
//! let mut simulation = Simulation::new(&settings)?;
//! let stats = simulation.run_for(10.0)?;
//!
//! assert_eq!(stats.frames, 500);
//! # Ok::<(), castle_defense::Error>(())
//! ```

mod arena;
mod castle;
mod enemy;
mod error;
mod math;
mod projectile;
mod settings;
mod simulation;
mod spawner;

pub use arena::Arena;
pub use castle::*;
pub use enemy::*;
pub use error::*;
pub use math::*;
pub use projectile::*;
pub use settings::*;
pub use simulation::*;
pub use spawner::*;
