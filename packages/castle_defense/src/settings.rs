use std::fs;
use std::path::Path;
use std::time::Duration;

use lifecycle_pool::PoolConfig;
use serde::Deserialize;

use crate::{Error, Result};

/// Everything that can be tuned about a simulation run, typically loaded from a TOML file.
///
/// Every field is optional in the file and falls back to the value in [`Settings::default()`].
///
/// ```toml
/// tick_rate = 50
/// seconds = 60.0
/// seed = 7
/// prewarm = 20
/// projectile_setup_ms = 100
///
/// [castle_pool]
/// collection_check = true
/// default_capacity = 20
/// max_size = 100
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
#[allow(
    clippy::exhaustive_structs,
    reason = "plain settings record, constructed with struct update syntax by callers"
)]
pub struct Settings {
    /// Frames simulated per second of game time.
    pub tick_rate: u32,

    /// Length of the simulation in seconds of game time.
    pub seconds: f32,

    /// Seed for the enemy spawner's random number generator.
    pub seed: u64,

    /// Number of idle instances each pool is populated with before the first frame.
    pub prewarm: usize,

    /// How long creating one projectile takes, in milliseconds. Simulates the setup cost of a
    /// complex game object.
    pub projectile_setup_ms: u64,

    /// Pool settings of the castle's projectiles.
    pub castle_pool: PoolConfig,

    /// Pool settings of the spawner's enemies.
    pub enemy_pool: PoolConfig,
}

impl Settings {
    /// Parses settings from the contents of a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML, contains unknown keys or describes
    /// settings that [`validate()`][Self::validate] rejects.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Reads and parses a TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`from_toml()`][Self::from_toml] rejects
    /// its contents.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&text)
    }

    /// Checks that the settings describe a simulation that can run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] for a zero tick rate or a negative or non-finite
    /// duration, and passes through pool configuration errors.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            return Err(Error::InvalidSettings {
                problem: "tick_rate must be at least 1".to_string(),
            });
        }

        if !self.seconds.is_finite() || self.seconds < 0.0 {
            return Err(Error::InvalidSettings {
                problem: format!(
                    "seconds must be a non-negative number, got {}",
                    self.seconds
                ),
            });
        }

        self.castle_pool.validate()?;
        self.enemy_pool.validate()?;

        Ok(())
    }

    /// Game time covered by one frame, in seconds.
    #[must_use]
    pub fn delta_time(&self) -> f32 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "tick rates are small numbers, exactly representable as f32"
        )]
        let rate = self.tick_rate as f32;

        rate.recip()
    }

    /// How long creating one projectile takes.
    #[must_use]
    pub fn projectile_setup(&self) -> Duration {
        Duration::from_millis(self.projectile_setup_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        let pool = PoolConfig {
            collection_check: true,
            default_capacity: 20,
            max_size: 100,
        };

        Self {
            tick_rate: 50,
            seconds: 60.0,
            seed: 0,
            prewarm: 20,
            projectile_setup_ms: 100,
            castle_pool: pool,
            enemy_pool: pool,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let settings = Settings::from_toml(
            "
            seed = 99
            projectile_setup_ms = 0

            [enemy_pool]
            collection_check = false
            default_capacity = 5
            max_size = 5
            ",
        )
        .unwrap();

        assert_eq!(settings.seed, 99);
        assert_eq!(settings.projectile_setup(), Duration::ZERO);
        assert_eq!(settings.tick_rate, 50);
        assert!(!settings.enemy_pool.collection_check);
        assert_eq!(settings.enemy_pool.max_size, 5);
        assert_eq!(settings.castle_pool, Settings::default().castle_pool);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = Settings::from_toml("tick_rat = 50");

        assert!(matches!(result, Err(Error::ParseSettings(_))));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let result = Settings::from_toml("tick_rate = 0");

        assert!(matches!(result, Err(Error::InvalidSettings { .. })));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let result = Settings::from_toml("seconds = -1.0");

        assert!(matches!(result, Err(Error::InvalidSettings { .. })));
    }

    #[test]
    fn contradictory_pool_is_rejected() {
        let result = Settings::from_toml(
            "
            [castle_pool]
            default_capacity = 50
            max_size = 10
            ",
        );

        assert!(matches!(
            result,
            Err(Error::Pool(
                lifecycle_pool::Error::InvalidConfiguration { .. }
            ))
        ));
    }

    #[test]
    fn delta_time_follows_tick_rate() {
        let settings = Settings {
            tick_rate: 4,
            ..Settings::default()
        };

        assert!((settings.delta_time() - 0.25).abs() < f32::EPSILON);
    }
}
