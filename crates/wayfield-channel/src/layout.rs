//! Partitioning of the shared channel into pages and metadata.

use std::error::Error;
use std::fmt;

use wayfield_core::{PageId, Tile};

/// Upper bound on the page pool, regardless of channel capacity.
pub const MAX_PAGES: u8 = 5;

/// Largest map dimension the 8-bit wire coordinate fields can address.
const MAX_DIM: u32 = 256;

/// Errors detected while constructing a [`ChannelLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// One of the map dimensions is zero.
    EmptyMap,
    /// A map dimension exceeds the 8-bit wire coordinate range.
    DimensionTooLarge {
        /// Which dimension ("map_width" or "map_height").
        name: &'static str,
        /// The offending value.
        value: u32,
        /// The maximum supported value.
        max: u32,
    },
    /// The channel cannot hold even one page plus the metadata tail.
    ChannelTooSmall {
        /// The configured channel capacity in cells.
        capacity: usize,
        /// The minimum capacity for one page and the metadata tail.
        required: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMap => write!(f, "map dimensions must be non-zero"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum of {max}")
            }
            Self::ChannelTooSmall { capacity, required } => {
                write!(
                    f,
                    "channel capacity {capacity} below minimum of {required} cells"
                )
            }
        }
    }
}

impl Error for LayoutError {}

/// The fixed partition of the shared channel.
///
/// The channel prefix is carved into `page_count` pages of
/// `map_width * map_height` cells each — one cell per tile per page —
/// and the last [`MAX_PAGES`] cells form the metadata tail, one word per
/// page. The page count is derived from whatever capacity remains:
/// `min(paging_capacity / page_size, MAX_PAGES)`, never zero.
///
/// All agents of a team must construct identical layouts (same map
/// dimensions, same capacity) or they will read each other's cells at
/// the wrong offsets; the layout itself carries no runtime identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelLayout {
    map_width: u32,
    map_height: u32,
    capacity: usize,
    page_count: u8,
}

impl ChannelLayout {
    /// Derive the layout for a `map_width x map_height` torus over a
    /// channel of `capacity` cells.
    pub fn new(map_width: u32, map_height: u32, capacity: usize) -> Result<Self, LayoutError> {
        if map_width == 0 || map_height == 0 {
            return Err(LayoutError::EmptyMap);
        }
        if map_width > MAX_DIM {
            return Err(LayoutError::DimensionTooLarge {
                name: "map_width",
                value: map_width,
                max: MAX_DIM,
            });
        }
        if map_height > MAX_DIM {
            return Err(LayoutError::DimensionTooLarge {
                name: "map_height",
                value: map_height,
                max: MAX_DIM,
            });
        }

        let page_size = map_width as usize * map_height as usize;
        let required = page_size + MAX_PAGES as usize;
        if capacity < required {
            return Err(LayoutError::ChannelTooSmall { capacity, required });
        }

        let paging_capacity = capacity - MAX_PAGES as usize;
        let page_count = (paging_capacity / page_size).min(MAX_PAGES as usize) as u8;

        Ok(Self {
            map_width,
            map_height,
            capacity,
            page_count,
        })
    }

    /// Map width in tiles.
    pub fn map_width(&self) -> u32 {
        self.map_width
    }

    /// Map height in tiles.
    pub fn map_height(&self) -> u32 {
        self.map_height
    }

    /// Cells per page (`map_width * map_height`).
    pub fn page_size(&self) -> usize {
        self.map_width as usize * self.map_height as usize
    }

    /// Number of pages in the pool.
    pub fn page_count(&self) -> u8 {
        self.page_count
    }

    /// Iterate over the page pool.
    pub fn pages(&self) -> impl Iterator<Item = PageId> {
        (0..self.page_count).map(PageId)
    }

    /// Wrap a logical tile into 8-bit wire coordinates.
    pub fn wire_coords(&self, tile: Tile) -> (u8, u8) {
        let x = tile.x.rem_euclid(self.map_width as i32) as u8;
        let y = tile.y.rem_euclid(self.map_height as i32) as u8;
        (x, y)
    }

    /// Channel index of the result cell for wrapped coordinates `(x, y)`
    /// on `page`. Column-major within the page: `x * map_height + y`.
    pub fn cell_index(&self, page: PageId, x: u32, y: u32) -> usize {
        self.page_size() * page.0 as usize + self.map_height as usize * x as usize + y as usize
    }

    /// Channel index of `page`'s metadata word, in the reserved tail.
    pub fn metadata_index(&self, page: PageId) -> usize {
        self.capacity - MAX_PAGES as usize + page.0 as usize
    }
}
