use log::{debug, info};

use crate::{Castle, EnemySpawner, Result, Settings, Vec2};

/// Running totals of a simulation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Frames simulated so far.
    pub frames: u64,

    /// Projectiles fired by the castle.
    pub shots_fired: u64,

    /// Enemies taken off the field by a projectile.
    pub hits: u64,

    /// Projectiles that flew their full lifetime without hitting anything.
    pub expired: u64,

    /// Enemies spawned.
    pub enemies_spawned: u64,
}

/// One castle defending against one enemy spawner, advanced frame by frame.
#[derive(Debug)]
pub struct Simulation {
    castle: Castle,
    spawner: EnemySpawner,
    delta_time: f32,
    elapsed: f32,
    stats: Stats,
}

impl Simulation {
    /// Sets up the castle and the spawner, pre-warming both pools.
    ///
    /// This is where the expensive object creation happens, so it may take a while.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let castle = Castle::new(
            Vec2::ZERO,
            settings.castle_pool,
            settings.prewarm,
            settings.projectile_setup(),
        )?;

        let spawner = EnemySpawner::new(settings.enemy_pool, settings.prewarm, settings.seed)?;

        Ok(Self {
            castle,
            spawner,
            delta_time: settings.delta_time(),
            elapsed: 0.0,
            stats: Stats::default(),
        })
    }

    /// Simulates one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if a pool detects an object being returned to it twice.
    pub fn step(&mut self) -> Result<()> {
        self.elapsed += self.delta_time;

        let spawned = self.spawner.fixed_update(self.delta_time, self.elapsed);
        let report = self.castle.update(self.delta_time, &self.spawner)?;

        for enemy in &report.hits {
            if self.spawner.despawn(*enemy)? {
                self.stats.hits = self.stats.hits.wrapping_add(1);
            }
        }

        self.stats.frames = self.stats.frames.wrapping_add(1);
        self.stats.enemies_spawned = self.stats.enemies_spawned.wrapping_add(spawned as u64);
        self.stats.expired = self.stats.expired.wrapping_add(report.expired as u64);

        if report.fired {
            self.stats.shots_fired = self.stats.shots_fired.wrapping_add(1);
        }

        Ok(())
    }

    /// Simulates frames until `seconds` of game time have passed.
    ///
    /// # Errors
    ///
    /// Returns an error if a pool detects an object being returned to it twice.
    pub fn run_for(&mut self, seconds: f32) -> Result<Stats> {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "settings validation keeps durations non-negative and of sane length"
        )]
        let frames = (seconds.max(0.0) / self.delta_time).round() as u64;

        debug!("simulating {seconds}s of game time in {frames} frames");

        for _ in 0..frames {
            self.step()?;
        }

        info!(
            "simulated {:.1}s: {} shots, {} hits, {} expired, {} enemies on the field",
            self.elapsed,
            self.stats.shots_fired,
            self.stats.hits,
            self.stats.expired,
            self.spawner.active_enemies().count()
        );

        Ok(self.stats)
    }

    /// Totals so far.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Game time simulated so far, in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The castle.
    #[must_use]
    pub fn castle(&self) -> &Castle {
        &self.castle
    }

    /// The enemy spawner.
    #[must_use]
    pub fn spawner(&self) -> &EnemySpawner {
        &self.spawner
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn quick_settings() -> Settings {
        Settings {
            tick_rate: 20,
            projectile_setup_ms: 0,
            seed: 3,
            ..Settings::default()
        }
    }

    #[test]
    fn new_prewarms_both_pools() {
        let simulation = Simulation::new(&quick_settings()).unwrap();

        assert_eq!(simulation.castle().pool().count_inactive(), 20);
        assert_eq!(simulation.spawner().pool().count_inactive(), 20);
        assert_eq!(simulation.stats(), Stats::default());
    }

    #[test]
    fn step_counts_frames() {
        let mut simulation = Simulation::new(&quick_settings()).unwrap();

        simulation.step().unwrap();
        simulation.step().unwrap();

        assert_eq!(simulation.stats().frames, 2);
        assert!((simulation.elapsed() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn run_for_covers_requested_time() {
        let mut simulation = Simulation::new(&quick_settings()).unwrap();

        let stats = simulation.run_for(3.0).unwrap();

        assert_eq!(stats.frames, 60);
        assert!(stats.enemies_spawned > 0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = Settings {
            tick_rate: 0,
            ..quick_settings()
        };

        assert!(Simulation::new(&settings).is_err());
    }
}
