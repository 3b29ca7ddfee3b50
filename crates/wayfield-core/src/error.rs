//! Error types for the shared-channel host primitives.

use std::error::Error;
use std::fmt;

/// Errors from the host's shared-channel cell primitives.
///
/// Both reads and writes are fallible under heavy per-tick usage. These
/// are transient conditions: callers log, abandon the operation for
/// this tick, and retry naturally next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelError {
    /// The host's per-tick channel-operation allowance is spent.
    Exhausted,
    /// The cell index is outside the channel.
    OutOfRange {
        /// The requested cell index.
        index: usize,
        /// Number of cells in the channel.
        capacity: usize,
    },
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "shared channel allowance exhausted"),
            Self::OutOfRange { index, capacity } => {
                write!(f, "cell index {index} out of range (capacity {capacity})")
            }
        }
    }
}

impl Error for ChannelError {}
