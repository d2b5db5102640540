use std::thread;
use std::time::Duration;

use log::trace;

use crate::Vec2;

/// How far a projectile travels per second.
pub const PROJECTILE_SPEED: f32 = 1.0;

/// How long a projectile flies before it is returned to the pool, in seconds.
pub const PROJECTILE_LIFETIME: f32 = 10.0;

/// What happens to a projectile during one frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flight {
    /// Still flying.
    InFlight,

    /// Flew for longer than [`PROJECTILE_LIFETIME`] without hitting anything.
    Expired,
}

/// A projectile fired by the castle.
///
/// Creating a projectile stands in for setting up a complex object with models, sprites and
/// materials, which is slow. The castle recycles projectiles through a pool so that this cost
/// is paid before the game starts rather than every time it fires.
#[derive(Debug)]
pub struct Projectile {
    position: Vec2,
    heading: Vec2,
    total_time: f32,
    visible: bool,
}

impl Projectile {
    /// Creates a projectile, blocking for `setup_cost` to simulate expensive initialization.
    #[must_use]
    pub fn new(setup_cost: Duration) -> Self {
        if !setup_cost.is_zero() {
            trace!("initializing projectile, this takes {setup_cost:?}");
            thread::sleep(setup_cost);
        }

        Self {
            position: Vec2::ZERO,
            heading: Vec2::new(0.0, 1.0),
            total_time: 0.0,
            visible: false,
        }
    }

    /// Where the projectile is.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// The unit direction the projectile travels in.
    #[must_use]
    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    /// Seconds the projectile has been flying since it was last fired.
    #[must_use]
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Whether the projectile is on the field.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Puts the projectile at `position`, facing `heading` (a unit vector).
    pub(crate) fn launch(&mut self, position: Vec2, heading: Vec2) {
        self.position = position;
        self.heading = heading;
    }

    /// Forgets the flight time so the projectile can be fired again.
    pub(crate) fn reset(&mut self) {
        self.total_time = 0.0;
    }

    /// Advances the projectile by `delta_time` seconds.
    pub(crate) fn advance(&mut self, delta_time: f32) -> Flight {
        self.total_time += delta_time;
        self.position += self.heading * (PROJECTILE_SPEED * delta_time);

        if self.total_time > PROJECTILE_LIFETIME {
            Flight::Expired
        } else {
            Flight::InFlight
        }
    }
}
