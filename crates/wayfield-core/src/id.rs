//! Strongly-typed identifiers shared across the Wayfield crates.

use std::fmt;

/// Monotonically increasing game-tick counter reported by the host.
///
/// The host scheduler advances this once per round; Wayfield never
/// generates ticks itself. Only the low 12 bits survive in the shared
/// page metadata, so all age comparisons use wrapping arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u32);

impl TickId {
    /// Width of the tick field in the page-metadata word.
    pub const WIRE_BITS: u32 = 12;

    /// Mask selecting the wire-visible portion of the tick.
    pub const WIRE_MASK: u32 = (1 << Self::WIRE_BITS) - 1;

    /// The 12-bit wrapped stamp stored in shared metadata.
    pub fn stamp(self) -> u32 {
        self.0 & Self::WIRE_MASK
    }

    /// Wrapping distance from `stamp` (a 12-bit stored value) to this tick.
    ///
    /// Returns how many ticks ago the stamp was written, assuming fewer
    /// than 4096 ticks have elapsed since.
    pub fn age_of(self, stamp: u32) -> u32 {
        self.stamp().wrapping_sub(stamp) & Self::WIRE_MASK
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TickId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of a page within the shared channel's fixed page pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u8);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for PageId {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

/// Priority of a pathfinding request, stored as a 2-bit wire field.
///
/// High priority may force-reclaim page 0 when the pool is exhausted;
/// low priority requests are silently declined instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    /// Background work; declined when no page is reclaimable.
    Low = 1,
    /// Urgent work; may seize page 0 as a last resort.
    High = 2,
}

impl Priority {
    /// The 2-bit wire encoding. Never zero, which keeps any encoded
    /// metadata word distinguishable from the untouched-page sentinel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Decode a 2-bit wire field. Returns `None` for the values 0 and 3,
    /// which no writer produces.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(Self::Low),
            2 => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_truncates_to_twelve_bits() {
        assert_eq!(TickId(0).stamp(), 0);
        assert_eq!(TickId(4095).stamp(), 4095);
        assert_eq!(TickId(4096).stamp(), 0);
        assert_eq!(TickId(0x1_2345).stamp(), 0x345);
    }

    #[test]
    fn age_wraps_across_stamp_boundary() {
        let now = TickId(4097); // stamp 1
        assert_eq!(now.age_of(TickId(4095).stamp()), 2);
        assert_eq!(now.age_of(TickId(4096).stamp()), 1);
        assert_eq!(now.age_of(now.stamp()), 0);
    }

    #[test]
    fn priority_bits_round_trip() {
        for p in [Priority::Low, Priority::High] {
            assert_eq!(Priority::from_bits(p.bits()), Some(p));
        }
        assert_eq!(Priority::from_bits(0), None);
        assert_eq!(Priority::from_bits(3), None);
    }
}
