use std::time::Duration;

use lifecycle_pool::{ObjectPool, PoolConfig};
use log::{debug, trace};

use crate::{Arena, EnemyId, Flight, Projectile, Result, Vec2};

/// Enemies further away than this are out of the castle's reach.
pub const TARGETING_RADIUS: f32 = 5.0;

/// Seconds the castle needs to reload after firing.
pub const ATTACK_COOLDOWN: f32 = 0.8;

/// A projectile closer than this to an enemy collides with it.
pub const HIT_RADIUS: f32 = 0.25;

/// What the castle did during one frame.
#[derive(Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Whether the castle fired a projectile.
    pub fired: bool,

    /// Enemies hit by a projectile, each listed once.
    pub hits: Vec<EnemyId>,

    /// Number of projectiles that flew their full lifetime without hitting anything.
    pub expired: usize,
}

/// A castle that shoots at the nearest enemy in reach, recycling its projectiles through a
/// pool it owns.
#[derive(Debug)]
pub struct Castle {
    position: Vec2,
    pool: ObjectPool<Box<Projectile>>,

    /// Projectiles currently flying, in no particular order.
    in_flight: Vec<Box<Projectile>>,

    target: Option<EnemyId>,
    cooldown: f32,
}

impl Castle {
    /// Creates a castle at `position` whose pool uses `config` and starts out with `prewarm`
    /// idle projectiles, each of which takes `projectile_setup` to create.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is not a valid pool configuration.
    pub fn new(
        position: Vec2,
        config: PoolConfig,
        prewarm: usize,
        projectile_setup: Duration,
    ) -> Result<Self> {
        let mut pool = ObjectPool::builder(move || Box::new(Projectile::new(projectile_setup)))
            .on_get(|projectile| projectile.set_visible(true))
            .on_release(|projectile| {
                projectile.set_visible(false);
                projectile.reset();
            })
            .on_destroy(|projectile| trace!("destroying projectile at {:?}", projectile.position()))
            .config(config)
            .build()?;

        let prewarmed = pool.prewarm(prewarm)?;
        debug!("castle at {position:?} ready with {prewarmed} projectiles");

        Ok(Self {
            position,
            pool,
            in_flight: Vec::new(),
            target: None,
            cooldown: 0.0,
        })
    }

    /// Runs one frame: picks a target if needed, fires when reloaded and moves projectiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool detects that a projectile was returned to it twice.
    pub fn update(&mut self, delta_time: f32, arena: &impl Arena) -> Result<FrameReport> {
        self.acquire_target_if_necessary(arena);

        let fired = self.try_attack(delta_time, arena);
        let (hits, expired) = self.advance_projectiles(delta_time, arena)?;

        Ok(FrameReport {
            fired,
            hits,
            expired,
        })
    }

    fn acquire_target_if_necessary(&mut self, arena: &impl Arena) {
        // Enemies are recycled under the same id, so a live target may have reappeared
        // anywhere on the field.
        let target_in_reach = self.target.is_some_and(|id| {
            arena
                .position_of(id)
                .is_some_and(|position| position.distance(self.position) <= TARGETING_RADIUS)
        });

        if !target_in_reach {
            self.target = arena
                .overlap_circle(self.position, TARGETING_RADIUS)
                .map(|(id, _)| id);
        }
    }

    fn try_attack(&mut self, delta_time: f32, arena: &impl Arena) -> bool {
        self.cooldown -= delta_time;

        let Some(target) = self.target.and_then(|id| arena.position_of(id)) else {
            return false;
        };

        if self.cooldown > 0.0 {
            return false;
        }

        self.cooldown = ATTACK_COOLDOWN;
        self.attack(target);

        true
    }

    fn attack(&mut self, target: Vec2) {
        let heading = (target - self.position)
            .normalized()
            .unwrap_or(Vec2::new(0.0, 1.0));

        let mut projectile = self.pool.get();
        projectile.launch(self.position, heading);
        trace!("fired projectile toward {target:?}");

        self.in_flight.push(projectile);
    }

    fn advance_projectiles(
        &mut self,
        delta_time: f32,
        arena: &impl Arena,
    ) -> Result<(Vec<EnemyId>, usize)> {
        let mut hits = Vec::new();
        let mut expired = 0_usize;
        let mut index = 0;

        while let Some(projectile) = self.in_flight.get_mut(index) {
            let flight = projectile.advance(delta_time);

            if flight == Flight::Expired {
                expired = expired.wrapping_add(1);
            } else if let Some((enemy, _)) = arena.overlap_circle(projectile.position(), HIT_RADIUS)
            {
                debug!("projectile hit enemy {enemy:?}");

                if !hits.contains(&enemy) {
                    hits.push(enemy);
                }
            } else {
                index = index.wrapping_add(1);
                continue;
            }

            let done = self.in_flight.swap_remove(index);
            self.pool.release(done)?;
        }

        Ok((hits, expired))
    }

    /// Where the castle stands.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// The enemy the castle is aiming at, if any.
    #[must_use]
    pub fn target(&self) -> Option<EnemyId> {
        self.target
    }

    /// The projectiles currently flying.
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.in_flight.iter().map(|projectile| &**projectile)
    }

    /// The pool the castle takes its projectiles from.
    #[must_use]
    pub fn pool(&self) -> &ObjectPool<Box<Projectile>> {
        &self.pool
    }
}
