use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when setting up or running the simulation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The settings file could not be read.
    #[error("cannot read settings file '{}': {source}", .path.display())]
    ReadSettings {
        /// The file we tried to read.
        path: PathBuf,

        /// What went wrong while reading it.
        source: io::Error,
    },

    /// The settings file is not valid TOML or does not match the expected structure.
    #[error("cannot parse settings: {0}")]
    ParseSettings(#[from] toml::de::Error),

    /// The settings parsed fine but describe a simulation that cannot run.
    #[error("invalid settings: {problem}")]
    InvalidSettings {
        /// A human-readable description of the problem.
        problem: String,
    },

    /// One of the object pools rejected its configuration or detected a lifecycle bug.
    #[error(transparent)]
    Pool(#[from] lifecycle_pool::Error),
}

/// A specialized `Result` type for simulation operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
