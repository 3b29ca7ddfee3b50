//! Core types and traits for the Wayfield navigation subsystem.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Wayfield workspace:
//! tiles and directions, terrain classes, type IDs, channel error types,
//! and the traits through which the host game is consumed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod terrain;
pub mod tile;
pub mod traits;

pub use error::ChannelError;
pub use id::{PageId, Priority, TickId};
pub use terrain::TerrainClass;
pub use tile::{Direction, Tile};
pub use traits::{HostClock, Landmarks, SharedChannel, Structures, TerrainSensor};
