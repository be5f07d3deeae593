//! Error type shared by every fallible operation of the crate.

/// Errors raised by event construction, grid access and nearest queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// A ticket price was zero, negative or NaN.
    #[error("all ticket prices must be greater than 0, got {price}")]
    InvalidPrice {
        /// The first offending price.
        price: f64,
    },

    /// A coordinate fell outside the inclusive `[min, max]` range of the space it was given in.
    #[error("out of bounds coordinates: {x}, {y} (allowed range [{min}, {max}])")]
    OutOfBounds {
        /// Offending x coordinate.
        x: i32,
        /// Offending y coordinate.
        y: i32,
        /// Lowest valid coordinate on both axes.
        min: i32,
        /// Highest valid coordinate on both axes.
        max: i32,
    },

    /// An identifier was placed twice by a collaborator enforcing uniqueness.
    /// The grid itself never raises this, it silently overwrites.
    #[error("duplicate event identifier: {0}")]
    DuplicateIdentifier(u64),

    /// A grid was asked to be populated while already holding events.
    #[error("grid already holds {occupied} events")]
    GridNotEmpty {
        /// Number of occupied cells.
        occupied: usize,
    },

    /// Stored grid data is inconsistent.
    #[error("invalid grid data: {0}")]
    InvalidGrid(&'static str),

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
