//! Publishing and reading per-tile path results.

use crate::layout::ChannelLayout;
use crate::record::PathRecord;
use wayfield_core::{Direction, PageId, SharedChannel, Tile};

/// Writes one path record per visited tile into a leased page.
///
/// A failed cell write is logged and swallowed: losing one tile's record
/// costs a reader a detour at worst, and the next expansion of this page
/// rewrites it. Nothing aborts the surrounding expansion.
pub struct ResultPublisher<'a> {
    layout: &'a ChannelLayout,
    page: PageId,
}

impl<'a> ResultPublisher<'a> {
    /// A publisher for the given leased page.
    pub fn new(layout: &'a ChannelLayout, page: PageId) -> Self {
        Self { layout, page }
    }

    /// Publish `record` for the tile at wrapped coordinates `(x, y)`.
    pub fn publish(&self, channel: &mut dyn SharedChannel, x: u32, y: u32, record: PathRecord) {
        let index = self.layout.cell_index(self.page, x, y);
        if let Err(err) = channel.write_cell(index, record.encode()) {
            log::warn!(
                "dropping path record for ({x}, {y}) on page {}: {err}",
                self.page
            );
        }
    }
}

/// Reads next-hop directions out of the page pool.
///
/// A pure read with no side effects, safe to call every tick from any
/// number of agents. Staleness is handled by construction: every record
/// carries its destination, so a record written for some other
/// destination can never be mistaken for ours — it is simply skipped.
pub struct ResultReader<'a> {
    layout: &'a ChannelLayout,
}

impl<'a> ResultReader<'a> {
    /// A reader over the full page pool.
    pub fn new(layout: &'a ChannelLayout) -> Self {
        Self { layout }
    }

    /// The next-hop direction from `here` toward `dest`, if any page
    /// currently holds a valid, destination-matching record for it.
    ///
    /// `None` means "no path data"; callers fall back to a straight-line
    /// heuristic. Channel read failures are logged and treated the same.
    pub fn lookup(&self, channel: &dyn SharedChannel, here: Tile, dest: Tile) -> Option<Direction> {
        let (hx, hy) = self.layout.wire_coords(here);
        let want = self.layout.wire_coords(dest);
        for page in self.layout.pages() {
            let index = self.layout.cell_index(page, u32::from(hx), u32::from(hy));
            let word = match channel.read_cell(index) {
                Ok(word) => word,
                Err(err) => {
                    log::warn!("lookup read failed on page {page}: {err}");
                    continue;
                }
            };
            if let Some(record) = PathRecord::decode(word) {
                if (record.dest_x, record.dest_y) == want {
                    return Some(record.direction);
                }
            }
        }
        None
    }
}
