//! The packed page-metadata word.

use wayfield_core::{Priority, TickId};

/// Decoded form of a page's metadata word.
///
/// Wire layout, most significant bit first:
///
/// ```text
/// u f pp tttttttttttt xxxxxxxx yyyyyyyy
/// u  = containsUnknowns (1 bit)
/// f  = finished         (1 bit)
/// pp = priority         (2 bits, never 00)
/// t  = lastUpdatedTick  (12 bits, wrapping)
/// x  = destination x    (8 bits, wrapped)
/// y  = destination y    (8 bits, wrapped)
/// ```
///
/// The all-zero word is reserved: it means the page has never been
/// touched. Every encoded word carries a non-zero priority field, so a
/// legitimate word can never collide with the sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageMetadata {
    /// The expansion touched terrain that was still unknown; the page
    /// needs a restart once more of the map has been sensed.
    pub contains_unknowns: bool,
    /// The expansion reached quiescence when this word was written.
    pub finished: bool,
    /// Priority of the request that produced this page.
    pub priority: Priority,
    /// 12-bit wrapped tick stamp of the last update.
    pub tick_stamp: u32,
    /// Wrapped x coordinate of the page's destination.
    pub dest_x: u8,
    /// Wrapped y coordinate of the page's destination.
    pub dest_y: u8,
}

/// The untouched-page sentinel.
pub const UNTOUCHED: u32 = 0;

impl PageMetadata {
    /// Build a metadata word for a commit at `now`.
    pub fn for_commit(
        now: TickId,
        dest: (u8, u8),
        priority: Priority,
        finished: bool,
        contains_unknowns: bool,
    ) -> Self {
        Self {
            contains_unknowns,
            finished,
            priority,
            tick_stamp: now.stamp(),
            dest_x: dest.0,
            dest_y: dest.1,
        }
    }

    /// A finished page with no unknowns holds a complete shortest-path
    /// map; nothing remains to compute for its destination.
    pub fn is_complete(&self) -> bool {
        self.finished && !self.contains_unknowns
    }

    /// The wrapped destination pair.
    pub fn dest(&self) -> (u8, u8) {
        (self.dest_x, self.dest_y)
    }

    /// Pack into the 32-bit wire word.
    pub fn encode(&self) -> u32 {
        (u32::from(self.contains_unknowns) << 31)
            | (u32::from(self.finished) << 30)
            | (self.priority.bits() << 28)
            | ((self.tick_stamp & TickId::WIRE_MASK) << 16)
            | (u32::from(self.dest_x) << 8)
            | u32::from(self.dest_y)
    }

    /// Unpack a wire word. Returns `None` for the untouched sentinel and
    /// for words whose priority field no writer produces.
    pub fn decode(word: u32) -> Option<Self> {
        if word == UNTOUCHED {
            return None;
        }
        let priority = Priority::from_bits((word >> 28) & 0x3)?;
        Some(Self {
            contains_unknowns: word & (1 << 31) != 0,
            finished: word & (1 << 30) != 0,
            priority,
            tick_stamp: (word >> 16) & TickId::WIRE_MASK,
            dest_x: ((word >> 8) & 0xff) as u8,
            dest_y: (word & 0xff) as u8,
        })
    }
}
