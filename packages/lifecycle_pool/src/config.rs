use crate::{Error, Result};

/// Capacity and safety settings of an [`ObjectPool`][crate::ObjectPool].
///
/// This is the plain-data part of the pool configuration, separated from the lifecycle
/// callbacks so it can be stored in settings files. With the `serde` feature enabled, it can be
/// deserialized and any missing field takes its default value.
///
/// # Examples
///
/// ```
/// use lifecycle_pool::PoolConfig;
///
/// let config = PoolConfig {
///     default_capacity: 20,
///     max_size: 100,
///     ..PoolConfig::default()
/// };
///
/// assert!(config.collection_check);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(
    clippy::exhaustive_structs,
    reason = "plain settings record, constructed with struct update syntax by callers"
)]
pub struct PoolConfig {
    /// Whether releasing an instance that is already idle is reported as
    /// [`Error::DoubleRelease`]. Costs an identity lookup on every release.
    pub collection_check: bool,

    /// Number of idle instances the pool reserves storage for up front.
    pub default_capacity: usize,

    /// Maximum number of idle instances. Instances released while the pool already holds this
    /// many idle instances are destroyed.
    pub max_size: usize,
}

impl PoolConfig {
    /// Default value of [`collection_check`][Self::collection_check].
    pub const DEFAULT_COLLECTION_CHECK: bool = true;

    /// Default value of [`default_capacity`][Self::default_capacity].
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Default value of [`max_size`][Self::max_size].
    pub const DEFAULT_MAX_SIZE: usize = 10_000;

    /// Checks that the settings do not contradict each other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `max_size` is less than `default_capacity`.
    pub fn validate(&self) -> Result<()> {
        if self.max_size < self.default_capacity {
            return Err(Error::InvalidConfiguration {
                default_capacity: self.default_capacity,
                max_size: self.max_size,
            });
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            collection_check: Self::DEFAULT_COLLECTION_CHECK,
            default_capacity: Self::DEFAULT_CAPACITY,
            max_size: Self::DEFAULT_MAX_SIZE,
        }
    }
}
