use thiserror::Error;

/// Errors that can occur when constructing or using an [`ObjectPool`][crate::ObjectPool].
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The capacity settings of the pool contradict each other.
    #[error(
        "invalid pool configuration: max_size ({max_size}) must be at least default_capacity ({default_capacity})"
    )]
    InvalidConfiguration {
        /// The requested initial capacity of the idle set.
        default_capacity: usize,

        /// The requested ceiling on the number of idle instances.
        max_size: usize,
    },

    /// An instance was released while it was already idle in the pool.
    ///
    /// This is only detected if the pool was built with the collection check enabled and always
    /// indicates a bug in the lifecycle management of the caller.
    #[error("instance released to the pool while it was already idle in the pool")]
    DoubleRelease,
}

/// A specialized `Result` type for pool operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
