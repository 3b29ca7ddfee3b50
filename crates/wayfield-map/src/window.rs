//! The toroidal coordinate window.

use crate::error::MapError;
use wayfield_core::Tile;

/// Maximum supported map dimension. Wrapped coordinates travel in 8-bit
/// wire fields, so each axis must fit in one byte's worth of cells.
pub const MAX_DIM: u32 = 256;

/// Wrap/translate between logical coordinates and toroidal storage.
///
/// Logical coordinates arrive from the host offset by an undisclosed
/// per-run amount and may be negative; storage coordinates are the
/// canonical `[0, width) x [0, height)` window used for cache and
/// channel indexing. The window also tracks the known logical bounding
/// box of on-map tiles, seeded from landmark locations and widened as
/// terrain is discovered, which is what lets
/// [`translate`](CoordinateWindow::translate) place a storage coordinate
/// back into the logical frame.
#[derive(Clone, Debug)]
pub struct CoordinateWindow {
    width: u32,
    height: u32,
    anchor: Tile,
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl CoordinateWindow {
    /// Create a window with the given dimensions, anchored at a known
    /// on-map tile (typically our own base). The bounding box starts as
    /// the anchor alone; call [`extend`](Self::extend) with further
    /// landmarks to widen it.
    ///
    /// Returns [`MapError::EmptyWindow`] if either dimension is zero, or
    /// [`MapError::DimensionTooLarge`] if either exceeds [`MAX_DIM`].
    pub fn new(width: u32, height: u32, anchor: Tile) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::EmptyWindow);
        }
        if width > MAX_DIM {
            return Err(MapError::DimensionTooLarge {
                name: "width",
                value: width,
                max: MAX_DIM,
            });
        }
        if height > MAX_DIM {
            return Err(MapError::DimensionTooLarge {
                name: "height",
                value: height,
                max: MAX_DIM,
            });
        }
        Ok(Self {
            width,
            height,
            anchor,
            min_x: anchor.x,
            max_x: anchor.x,
            min_y: anchor.y,
            max_y: anchor.y,
        })
    }

    /// Window width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Window height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Wrap a logical x coordinate into `[0, width)`.
    pub fn wrap_x(&self, x: i32) -> u32 {
        wrap_axis(x, self.width)
    }

    /// Wrap a logical y coordinate into `[0, height)`.
    pub fn wrap_y(&self, y: i32) -> u32 {
        wrap_axis(y, self.height)
    }

    /// Wrap a tile into storage coordinates.
    pub fn wrap(&self, tile: Tile) -> (u32, u32) {
        (self.wrap_x(tile.x), self.wrap_y(tile.y))
    }

    /// Column-major storage index of a tile: `x * height + y`.
    pub fn index(&self, tile: Tile) -> usize {
        let (x, y) = self.wrap(tile);
        x as usize * self.height as usize + y as usize
    }

    /// Whether two logical tiles denote the same storage cell.
    pub fn same_cell(&self, a: Tile, b: Tile) -> bool {
        self.wrap(a) == self.wrap(b)
    }

    /// Widen the known bounding box to include `tile`.
    pub fn extend(&mut self, tile: Tile) {
        self.min_x = self.min_x.min(tile.x);
        self.max_x = self.max_x.max(tile.x);
        self.min_y = self.min_y.min(tile.y);
        self.max_y = self.max_y.max(tile.y);
    }

    /// Known logical bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Translate a storage coordinate back into the logical frame.
    ///
    /// Picks the logical representative in the anchor's period window,
    /// then shifts it by one period only when the shifted representative
    /// lands inside the known bounding box. Exact once the bounds have
    /// been discovered; a best-effort approximation before then.
    pub fn translate(&self, sx: u32, sy: u32) -> Tile {
        let w = self.width as i32;
        let h = self.height as i32;
        let mut x = sx as i32 + self.anchor.x.div_euclid(w) * w;
        let mut y = sy as i32 + self.anchor.y.div_euclid(h) * h;
        if x > self.max_x && x - w >= self.min_x {
            x -= w;
        } else if x < self.min_x && x + w <= self.max_x {
            x += w;
        }
        if y > self.max_y && y - h >= self.min_y {
            y -= h;
        } else if y < self.min_y && y + h <= self.max_y {
            y += h;
        }
        Tile::new(x, y)
    }
}

/// `((c % m) + m) % m` — Euclidean remainder onto `[0, m)`.
fn wrap_axis(c: i32, m: u32) -> u32 {
    c.rem_euclid(m as i32) as u32
}
