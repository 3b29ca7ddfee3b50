//! Wayfield: cooperative incremental pathfinding for tick-scheduled
//! grid agents.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Wayfield sub-crates. For most users, adding `wayfield` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use wayfield::prelude::*;
//! use wayfield_test_utils::{ArrayChannel, AsciiMap, FakeClock, FixedLandmarks};
//!
//! // Terrain as the host would let an agent sense it.
//! let map = AsciiMap::parse(
//!     "
//!     .....
//!     .##..
//!     .....
//!     .....
//!     ",
//! );
//!
//! // One shared channel for the whole team, partitioned into pages.
//! let capacity = (map.width() * map.height()) as usize * 5 + 5;
//! let layout = ChannelLayout::new(map.width(), map.height(), capacity).unwrap();
//! let mut channel = ArrayChannel::new(capacity);
//!
//! // Base and structure locations seed the coordinate window and the
//! // symmetry model.
//! let landmarks = FixedLandmarks {
//!     own_base: Tile::new(0, 0),
//!     enemy_base: Tile::new(4, 3),
//!     own_structures: vec![Tile::new(1, 0)],
//!     enemy_structures: vec![Tile::new(2, 2)],
//! };
//! let oracle = TerrainOracle::from_landmarks(map.width(), map.height(), &landmarks).unwrap();
//! let mut engine = NavEngine::new(layout, oracle).unwrap();
//!
//! // One tick's slice of pathfinding toward a destination tile.
//! let clock = FakeClock::new(1);
//! let dest = Tile::new(4, 0);
//! let status = engine.advance(
//!     &mut channel,
//!     &clock,
//!     &map,
//!     &landmarks,
//!     &AdvanceRequest::new(NavTarget::Tile(dest)),
//! );
//! assert_eq!(status, AdvanceStatus::Done);
//!
//! // Any teammate can now look up its next hop.
//! let next = engine.reader().lookup(&channel, Tile::new(0, 3), dest);
//! assert!(next.is_some());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `wayfield-core` | Tiles, directions, IDs, terrain classes, host traits |
//! | [`map`] | `wayfield-map` | Coordinate wrapping, symmetry inference, terrain oracle |
//! | [`channel`] | `wayfield-channel` | Channel layout, wire words, page leases, result I/O |
//! | [`nav`] | `wayfield-nav` | The incremental BFS engine and frontier queues |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`wayfield-core`).
///
/// Contains [`types::Tile`], [`types::Direction`], terrain classes, and
/// the host traits ([`types::SharedChannel`], [`types::HostClock`],
/// [`types::TerrainSensor`], [`types::Landmarks`]).
pub use wayfield_core as types;

/// Map knowledge (`wayfield-map`).
///
/// Provides [`map::CoordinateWindow`] for toroidal wrapping,
/// [`map::SymmetryModel`] for mirror inference, and the cached
/// [`map::TerrainOracle`].
pub use wayfield_map as map;

/// Shared-channel paging and wire formats (`wayfield-channel`).
///
/// Provides [`channel::ChannelLayout`], the packed
/// [`channel::PageMetadata`] and [`channel::PathRecord`] words, the
/// implicit-lease [`channel::PageAllocator`], and
/// [`channel::ResultPublisher`] / [`channel::ResultReader`].
pub use wayfield_channel as channel;

/// The incremental pathfinding engine (`wayfield-nav`).
///
/// [`nav::NavEngine`] runs one budget-bounded expansion slice per tick;
/// [`nav::FrontierRings`] is the two-bucket queue underneath it.
pub use wayfield_nav as nav;

/// Common imports for typical Wayfield usage.
///
/// ```rust
/// use wayfield::prelude::*;
/// ```
///
/// This imports the most frequently used types: tiles and directions,
/// the host traits, the channel layout, the engine, and its per-tick
/// request/status contract.
pub mod prelude {
    // Core types and host traits
    pub use wayfield_core::{
        ChannelError, Direction, HostClock, Landmarks, PageId, Priority, SharedChannel,
        TerrainClass, TerrainSensor, TickId, Tile,
    };

    // Map knowledge
    pub use wayfield_map::{CoordinateWindow, SymmetryModel, TerrainOracle};

    // Channel layout and result I/O
    pub use wayfield_channel::{ChannelLayout, ResultPublisher, ResultReader};

    // Engine
    pub use wayfield_nav::{AdvanceRequest, AdvanceStatus, NavEngine, NavTarget};
}
