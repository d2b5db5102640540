use lifecycle_pool::{ObjectPool, PoolConfig};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arena::nearest_within;
use crate::{Arena, Enemy, EnemyId, Result, Vec2};

/// Seconds between two waves of enemies.
pub const SPAWN_INTERVAL: f32 = 2.0;

/// Enemies appear at uniformly random coordinates in `[-SPAWN_EXTENT, SPAWN_EXTENT]`.
pub const SPAWN_EXTENT: f32 = 6.0;

/// Every this many seconds, the smallest possible wave grows by one enemy.
pub const DIFFICULTY_RAMP: f32 = 7.0;

/// Spawns ever larger waves of enemies, recycling them through a pool it owns.
#[derive(Debug)]
pub struct EnemySpawner {
    pool: ObjectPool<Box<Enemy>>,

    /// Enemies currently on the field, in no particular order.
    active: Vec<Box<Enemy>>,

    cooldown: f32,
    rng: StdRng,
    spawned: u64,
}

impl EnemySpawner {
    /// Creates a spawner whose pool uses `config` and starts out with `prewarm` idle enemies.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is not a valid pool configuration.
    pub fn new(config: PoolConfig, prewarm: usize, seed: u64) -> Result<Self> {
        let mut next_id: u64 = 0;

        let mut pool = ObjectPool::builder(move || {
            next_id = next_id.wrapping_add(1);
            Box::new(Enemy::new(EnemyId(next_id)))
        })
        .on_get(|enemy| enemy.set_active(true))
        .on_release(|enemy| enemy.set_active(false))
        .on_destroy(|enemy| trace!("destroying enemy {:?}", enemy.id()))
        .config(config)
        .build()?;

        pool.prewarm(prewarm)?;

        Ok(Self {
            pool,
            active: Vec::new(),
            cooldown: 0.0,
            rng: StdRng::seed_from_u64(seed),
            spawned: 0,
        })
    }

    /// Advances the spawn timer and spawns a wave when it runs out.
    ///
    /// `elapsed` is the total time since the simulation started, which determines the wave size.
    /// Returns the number of enemies spawned.
    pub fn fixed_update(&mut self, delta_time: f32, elapsed: f32) -> usize {
        self.cooldown -= delta_time;

        if self.cooldown > 0.0 {
            return 0;
        }

        self.cooldown += SPAWN_INTERVAL;
        self.spawn_wave(elapsed)
    }

    fn spawn_wave(&mut self, elapsed: f32) -> usize {
        let minimum = wave_minimum(elapsed);
        let amount = self.rng.random_range(minimum..minimum.saturating_add(3));

        debug!("spawning wave of {amount} enemies at {elapsed:.1}s");

        for _ in 0..amount {
            self.spawn_enemy();
        }

        amount
    }

    fn spawn_enemy(&mut self) {
        let position = Vec2::new(
            self.rng.random_range(-SPAWN_EXTENT..=SPAWN_EXTENT),
            self.rng.random_range(-SPAWN_EXTENT..=SPAWN_EXTENT),
        );

        let mut enemy = self.pool.get();
        enemy.place(position);
        trace!("enemy {:?} spawned at {position:?}", enemy.id());

        self.active.push(enemy);
        self.spawned = self.spawned.wrapping_add(1);
    }

    /// Takes an enemy off the field and returns it to the pool.
    ///
    /// Returns `false` if the enemy was not on the field, e.g. because two projectiles hit it
    /// in the same frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool detects that the enemy was already returned to it.
    pub fn despawn(&mut self, id: EnemyId) -> Result<bool> {
        let Some(index) = self.active.iter().position(|enemy| enemy.id() == id) else {
            return Ok(false);
        };

        let enemy = self.active.swap_remove(index);
        self.pool.release(enemy)?;

        Ok(true)
    }

    /// The enemies currently on the field.
    pub fn active_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.active.iter().map(|enemy| &**enemy)
    }

    /// Total number of enemies spawned so far.
    #[must_use]
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// The pool the spawner takes its enemies from.
    #[must_use]
    pub fn pool(&self) -> &ObjectPool<Box<Enemy>> {
        &self.pool
    }
}

impl Arena for EnemySpawner {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> Option<(EnemyId, Vec2)> {
        nearest_within(
            self.active_enemies()
                .map(|enemy| (enemy.id(), enemy.position())),
            center,
            radius,
        )
    }

    fn position_of(&self, id: EnemyId) -> Option<Vec2> {
        self.active_enemies()
            .find(|enemy| enemy.id() == id)
            .map(Enemy::position)
    }
}

/// The smallest wave size at `elapsed` seconds into the simulation.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "elapsed time is non-negative and nowhere near usize::MAX ramp steps"
)]
fn wave_minimum(elapsed: f32) -> usize {
    (elapsed.max(0.0) / DIFFICULTY_RAMP).ceil() as usize
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(
        clippy::arithmetic_side_effects,
        reason = "we do not need to worry about these things when writing test code"
    )]

    use super::*;

    fn spawner(prewarm: usize) -> EnemySpawner {
        let config = PoolConfig {
            collection_check: true,
            default_capacity: 20,
            max_size: 100,
        };

        EnemySpawner::new(config, prewarm, 42).unwrap()
    }

    #[test]
    fn wave_minimum_ramps_up() {
        assert_eq!(wave_minimum(0.0), 0);
        assert_eq!(wave_minimum(0.1), 1);
        assert_eq!(wave_minimum(7.0), 1);
        assert_eq!(wave_minimum(7.5), 2);
        assert_eq!(wave_minimum(70.0), 10);
    }

    #[test]
    fn prewarmed_pool_serves_first_waves() {
        let spawner = spawner(20);

        assert_eq!(spawner.pool().count_inactive(), 20);
        assert_eq!(spawner.active_enemies().count(), 0);
    }

    #[test]
    fn spawns_on_interval() {
        let mut spawner = spawner(20);

        // A late start guarantees a non-empty wave.
        let first = spawner.fixed_update(0.02, 30.0);
        assert!(first >= 5);

        // Nothing until the interval has passed.
        let mut quiet = 0;
        for _ in 0..90 {
            quiet += spawner.fixed_update(0.02, 30.0);
        }
        assert_eq!(quiet, 0);

        let second = spawner.fixed_update(0.5, 32.0);
        assert!(second >= 5);

        assert_eq!(spawner.active_enemies().count(), first + second);
        assert!(spawner.active_enemies().all(Enemy::is_active));
    }

    #[test]
    fn enemies_spawn_inside_field() {
        let mut spawner = spawner(0);
        spawner.fixed_update(1.0, 60.0);

        for enemy in spawner.active_enemies() {
            assert!(enemy.position().x.abs() <= SPAWN_EXTENT);
            assert!(enemy.position().y.abs() <= SPAWN_EXTENT);
        }
    }

    #[test]
    fn despawn_returns_enemy_to_pool() {
        let mut spawner = spawner(20);
        let spawned = spawner.fixed_update(1.0, 30.0);

        let id = spawner.active_enemies().next().unwrap().id();
        assert!(spawner.position_of(id).is_some());

        assert!(spawner.despawn(id).unwrap());
        assert!(!spawner.despawn(id).unwrap());

        assert_eq!(spawner.position_of(id), None);
        assert_eq!(spawner.active_enemies().count(), spawned - 1);
        assert_eq!(spawner.pool().count_inactive(), 20 - spawned + 1);
    }

    #[test]
    fn same_seed_same_waves() {
        let mut a = spawner(0);
        let mut b = spawner(0);

        assert_eq!(a.fixed_update(1.0, 50.0), b.fixed_update(1.0, 50.0));

        let positions_a: Vec<_> = a.active_enemies().map(Enemy::position).collect();
        let positions_b: Vec<_> = b.active_enemies().map(Enemy::position).collect();
        assert_eq!(positions_a, positions_b);
    }
}
