//! Traits through which the host game is consumed.
//!
//! Everything the navigation subsystem needs from the excluded host —
//! terrain sensing, the tick clock and compute budget, base and
//! structure locations, and the shared broadcast channel — arrives
//! through these seams. Engine code takes them as `&dyn` references so
//! tests can substitute the mocks in `wayfield-test-utils`.

use smallvec::SmallVec;

use crate::error::ChannelError;
use crate::id::TickId;
use crate::terrain::TerrainClass;
use crate::tile::Tile;

/// A list of structure locations.
///
/// Inline storage for the common case: maps carry at most a handful of
/// towers per side, so landmark queries on the hot path stay off the
/// heap.
pub type Structures = SmallVec<[Tile; 4]>;

/// Raw terrain sensing.
///
/// May return [`TerrainClass::Unknown`] for tiles outside current sensor
/// range. Raw queries are not expected to fail.
pub trait TerrainSensor {
    /// Sense the terrain at `tile`.
    fn sense(&self, tile: Tile) -> TerrainClass;
}

/// The host scheduler's clock and per-tick compute budget.
pub trait HostClock {
    /// The current game tick. Monotonic across the run.
    fn current_tick(&self) -> TickId;

    /// Compute budget remaining in the current tick. Monotonically
    /// decreasing within a tick; resets when the tick advances.
    fn remaining_budget(&self) -> u32;
}

/// The team-wide shared integer channel.
///
/// A process-wide fixed-size array of cells visible to every agent of
/// the same team. Writes become visible to readers on later ticks; there
/// is no atomicity across a read-then-write performed by different
/// agents. Both primitives are fallible under heavy per-tick usage.
pub trait SharedChannel {
    /// Number of addressable cells.
    fn capacity(&self) -> usize;

    /// Read one cell.
    fn read_cell(&self, index: usize) -> Result<u32, ChannelError>;

    /// Overwrite one cell.
    fn write_cell(&mut self, index: usize, value: u32) -> Result<(), ChannelError>;
}

/// Locations of the bases and known structures, used to seed the
/// symmetry model and multi-source destinations.
pub trait Landmarks {
    /// Our own base.
    fn own_base(&self) -> Tile;

    /// The enemy base.
    fn enemy_base(&self) -> Tile;

    /// Our own secondary structures (towers), if any.
    fn own_structures(&self) -> Structures;

    /// Known enemy secondary structures (towers), if any.
    fn enemy_structures(&self) -> Structures;
}
