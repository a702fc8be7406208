//! Tests for the record codec and record types
//!
//! These tests verify:
//! - Decode is total over every byte pair
//! - The fill bit alone decides between a record and "no data"
//! - Network set rendering and parsing
//! - Encode inverts decode
//! - JSON shape of a record

use ncpr_index::record::{decode, encode, NetworkSet, Record, StatusFlag, FILL_BIT};
use ncpr_index::NcprError;

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn test_decode_is_total_and_well_formed() {
    for b1 in 0..=255u8 {
        for b2 in 0..=255u8 {
            if let Some(record) = decode(b1, b2) {
                assert!(record.provider_code <= 31);
                assert!(record.sub_type <= 3);
                assert!(matches!(record.status, StatusFlag::D | StatusFlag::A));
            }
        }
    }
}

#[test]
fn test_decode_absent_iff_top_bit_clear() {
    for b1 in 0..=255u8 {
        for b2 in [0x00u8, 0x01, 0x7F, 0xFE, 0xFF] {
            assert_eq!(decode(b1, b2).is_none(), b1 & 0x80 == 0, "b1={:#04x} b2={:#04x}", b1, b2);
        }
    }
}

#[test]
fn test_decode_network_set_against_bits() {
    for b2 in 0..=255u8 {
        let record = decode(0x80, b2).unwrap();
        let rendered = record.networks.to_string();

        if b2 & 0xFE == 0 {
            assert_eq!(rendered, "0");
        } else {
            let expected: Vec<String> = (1..=7)
                .filter(|bit| (b2 >> bit) & 1 == 1)
                .map(|bit| bit.to_string())
                .collect();
            assert_eq!(rendered, expected.join("#"));
        }
    }
}

#[test]
fn test_decode_worked_example() {
    // 0x94 = 0b1001_0100, 0x03 = 0b0000_0011
    let record = decode(0x94, 0x03).unwrap();

    assert_eq!(record.provider_code, 5);
    assert_eq!(record.networks.to_string(), "1");
    assert_eq!(record.status, StatusFlag::A);
    assert_eq!(record.sub_type, 0);
}

#[test]
fn test_decode_minimal_filled_entry() {
    let record = decode(0x80, 0x00).unwrap();

    assert_eq!(record.provider_code, 0);
    assert!(record.networks.is_empty());
    assert_eq!(record.networks.to_string(), "0");
    assert_eq!(record.status, StatusFlag::D);
    assert_eq!(record.sub_type, 0);
}

#[test]
fn test_decode_all_fields_max() {
    let record = decode(0xFF, 0xFF).unwrap();

    assert_eq!(record.provider_code, 31);
    assert_eq!(record.networks.to_string(), "1#2#3#4#5#6#7");
    assert_eq!(record.status, StatusFlag::A);
    assert_eq!(record.sub_type, 3);
}

#[test]
fn test_status_bit_does_not_leak_into_networks() {
    let record = decode(0x80, 0x01).unwrap();

    assert_eq!(record.networks.to_string(), "0");
    assert_eq!(record.status, StatusFlag::A);
}

// =============================================================================
// Encode Tests
// =============================================================================

#[test]
fn test_encode_inverts_decode_for_filled_pairs() {
    for b1 in FILL_BIT..=0xFF {
        for b2 in 0..=255u8 {
            let record = decode(b1, b2).unwrap();
            assert_eq!(encode(&record), [b1, b2]);
        }
    }
}

#[test]
fn test_encode_sets_fill_bit() {
    let record = Record::new(0, NetworkSet::EMPTY, StatusFlag::D, 0).unwrap();
    assert_eq!(encode(&record), [0x80, 0x00]);
}

#[test]
fn test_record_new_rejects_wide_fields() {
    assert!(matches!(
        Record::new(32, NetworkSet::EMPTY, StatusFlag::D, 0),
        Err(NcprError::InvalidRecord(_))
    ));
    assert!(matches!(
        Record::new(1, NetworkSet::EMPTY, StatusFlag::D, 4),
        Err(NcprError::InvalidRecord(_))
    ));
    assert!(Record::new(31, NetworkSet::EMPTY, StatusFlag::A, 3).is_ok());
}

// =============================================================================
// NetworkSet / StatusFlag Tests
// =============================================================================

#[test]
fn test_network_set_parse() {
    let set: NetworkSet = "1#3#7".parse().unwrap();
    assert!(set.contains(1));
    assert!(set.contains(3));
    assert!(set.contains(7));
    assert!(!set.contains(2));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 7]);
    assert_eq!(set.bits(), 0b1000_1010);
}

#[test]
fn test_network_set_parse_zero_marker() {
    let set: NetworkSet = "0".parse().unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_network_set_parse_skips_empty_segments() {
    let set: NetworkSet = "#2##5#".parse().unwrap();
    assert_eq!(set.to_string(), "2#5");
}

#[test]
fn test_network_set_parse_normalizes_order() {
    let set: NetworkSet = "6#2".parse().unwrap();
    assert_eq!(set.to_string(), "2#6");
}

#[test]
fn test_network_set_parse_rejects_out_of_range() {
    assert!("8".parse::<NetworkSet>().is_err());
    assert!("0#1".parse::<NetworkSet>().is_err());
    assert!("x".parse::<NetworkSet>().is_err());
}

#[test]
fn test_network_set_from_bits_masks_status() {
    assert_eq!(NetworkSet::from_bits(0xFF).bits(), 0xFE);
}

#[test]
fn test_status_flag_parse() {
    assert_eq!("D".parse::<StatusFlag>().unwrap(), StatusFlag::D);
    assert_eq!("A".parse::<StatusFlag>().unwrap(), StatusFlag::A);
    assert!("X".parse::<StatusFlag>().is_err());
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[test]
fn test_record_json_shape() {
    let record = decode(0x94, 0x03).unwrap();
    let json = serde_json::to_value(record).unwrap();

    assert_eq!(json, serde_json::json!([5, "1", "A", 0]));
}

#[test]
fn test_absent_record_json_is_null() {
    let json = serde_json::to_value(decode(0x00, 0x00)).unwrap();
    assert!(json.is_null());
}

#[test]
fn test_record_display() {
    let record = decode(0x94, 0x03).unwrap();
    assert_eq!(record.to_string(), "(5, \"1\", \"A\", 0)");
}
