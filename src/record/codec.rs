//! Record codec
//!
//! Packs a [`Record`] into two bytes and back. Decoding is total: every
//! byte pair maps to either a record or `None`.

use super::{NetworkSet, Record, StatusFlag};

/// Fill indicator in the first byte; clear means "no data"
pub const FILL_BIT: u8 = 0b1000_0000;

const PROVIDER_MASK: u8 = 0b0111_1100;
const PROVIDER_SHIFT: u8 = 2;
const SUB_TYPE_MASK: u8 = 0b0000_0011;
const STATUS_MASK: u8 = 0b0000_0001;

/// Decode a packed byte pair
///
/// Returns `None` when the fill bit of `b1` is clear.
pub fn decode(b1: u8, b2: u8) -> Option<Record> {
    if b1 & FILL_BIT == 0 {
        return None;
    }

    Some(Record {
        provider_code: (b1 & PROVIDER_MASK) >> PROVIDER_SHIFT,
        networks: NetworkSet::from_bits(b2),
        status: StatusFlag::from_bit(b2 & STATUS_MASK),
        sub_type: b1 & SUB_TYPE_MASK,
    })
}

/// Pack a record into its two data bytes (fill bit set)
///
/// Fields wider than their slots are masked; use [`Record::new`] to reject
/// them up front.
pub fn encode(record: &Record) -> [u8; 2] {
    let b1 = FILL_BIT
        | ((record.provider_code << PROVIDER_SHIFT) & PROVIDER_MASK)
        | (record.sub_type & SUB_TYPE_MASK);
    let b2 = record.networks.bits() | record.status.bit();

    [b1, b2]
}

