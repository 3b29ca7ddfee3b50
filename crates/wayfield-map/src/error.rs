//! Error types for map construction.

use std::error::Error;
use std::fmt;

/// Errors detected while constructing a [`CoordinateWindow`](crate::CoordinateWindow).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapError {
    /// One of the map dimensions is zero.
    EmptyWindow,
    /// A dimension exceeds what the 8-bit wire coordinate fields can address.
    DimensionTooLarge {
        /// Which dimension ("width" or "height").
        name: &'static str,
        /// The offending value.
        value: u32,
        /// The maximum supported value.
        max: u32,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWindow => write!(f, "map dimensions must be non-zero"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum of {max}")
            }
        }
    }
}

impl Error for MapError {}
