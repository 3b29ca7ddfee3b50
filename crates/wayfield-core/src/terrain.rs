//! Terrain classification as reported by the host's sensors.

/// What the host knows about a tile's terrain.
///
/// Once a tile is reported as something other than `Unknown`, that
/// classification is immutable for the remainder of the run; only
/// `Unknown` results are worth re-sensing later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainClass {
    /// Ordinary traversable ground.
    Normal,
    /// Impassable void inside the map.
    Void,
    /// Outside the playable area.
    OffMap,
    /// Not yet sensed, or out of current sensor range.
    Unknown,
}

impl TerrainClass {
    /// Whether an agent can stand on this tile. `Unknown` is treated as
    /// not traversable until proven otherwise.
    pub fn is_traversable(self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Whether this is a definite classification that can be cached
    /// permanently.
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}
