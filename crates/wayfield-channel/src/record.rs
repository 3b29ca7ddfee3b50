//! The packed per-tile path record.

use wayfield_core::Direction;

/// Decoded form of one published result cell.
///
/// Wire layout, most significant bit first:
///
/// ```text
/// v 000 dddd aaaaaaaa xxxxxxxx yyyyyyyy
/// v = validity bit (always 1 in a written record)
/// d = direction to move (4 bits)
/// a = accumulated move cost in whole ticks (8 bits, saturating)
/// x = destination x (8 bits, wrapped)
/// y = destination y (8 bits, wrapped)
/// ```
///
/// The validity bit exists solely so a never-written cell (which reads
/// as zero) cannot be mistaken for a legitimate record whose fields all
/// happen to be zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathRecord {
    /// Next-hop direction toward the destination for an agent standing
    /// on this record's tile.
    pub direction: Direction,
    /// Accumulated move cost from this tile to the destination, in whole
    /// ticks, saturating at 255.
    pub cost: u8,
    /// Wrapped x coordinate of the destination this record serves.
    pub dest_x: u8,
    /// Wrapped y coordinate of the destination this record serves.
    pub dest_y: u8,
}

const VALID_BIT: u32 = 1 << 31;

impl PathRecord {
    /// Pack into the 32-bit wire word.
    pub fn encode(&self) -> u32 {
        VALID_BIT
            | (self.direction.wire() << 24)
            | (u32::from(self.cost) << 16)
            | (u32::from(self.dest_x) << 8)
            | u32::from(self.dest_y)
    }

    /// Unpack a wire word. Returns `None` when the validity bit is unset
    /// (never-written cell) or the direction field is out of range.
    pub fn decode(word: u32) -> Option<Self> {
        if word & VALID_BIT == 0 {
            return None;
        }
        let direction = Direction::from_wire((word >> 24) & 0xf)?;
        Some(Self {
            direction,
            cost: ((word >> 16) & 0xff) as u8,
            dest_x: ((word >> 8) & 0xff) as u8,
            dest_y: (word & 0xff) as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wayfield_core::tile::SCAN_ORDER;

    #[test]
    fn never_written_cell_is_invalid() {
        assert_eq!(PathRecord::decode(0), None);
    }

    #[test]
    fn zero_valued_fields_survive_round_trip() {
        // A record whose payload is all zeros must still read back,
        // which is the whole point of the validity bit.
        let record = PathRecord {
            direction: Direction::North,
            cost: 0,
            dest_x: 0,
            dest_y: 0,
        };
        assert_ne!(record.encode(), 0);
        assert_eq!(PathRecord::decode(record.encode()), Some(record));
    }

    #[test]
    fn north_east_record_round_trips() {
        let record = PathRecord {
            direction: Direction::NorthEast,
            cost: 7,
            dest_x: 12,
            dest_y: 200,
        };
        assert_eq!(PathRecord::decode(record.encode()), Some(record));
    }

    proptest! {
        #[test]
        fn round_trip_any_record(
            dir_idx in 0usize..8,
            cost in 0u8..=255,
            x in 0u8..=255,
            y in 0u8..=255,
        ) {
            let record = PathRecord {
                direction: SCAN_ORDER[dir_idx],
                cost,
                dest_x: x,
                dest_y: y,
            };
            prop_assert_eq!(PathRecord::decode(record.encode()), Some(record));
        }
    }
}
