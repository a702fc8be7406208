//! Record type definitions

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::error::{NcprError, Result};

/// Highest provider code that fits in the 5-bit field
pub const MAX_PROVIDER_CODE: u8 = 0b1_1111;

/// Highest sub-type that fits in the 2-bit field
pub const MAX_SUB_TYPE: u8 = 0b11;

/// Bits 1..=7 of the second data byte
const NETWORK_MASK: u8 = 0b1111_1110;

/// Rendering of an empty network set
const ZERO_MARKER: &str = "0";

// =============================================================================
// Record
// =============================================================================

/// Decoded metadata for one number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Record {
    /// Provider code (0..=31)
    pub provider_code: u8,

    /// Network identifiers set for this number
    pub networks: NetworkSet,

    /// Single-bit status
    pub status: StatusFlag,

    /// Sub-type code (0..=3)
    pub sub_type: u8,
}

impl Record {
    /// Create a record, rejecting fields that do not fit their bit widths
    pub fn new(
        provider_code: u8,
        networks: NetworkSet,
        status: StatusFlag,
        sub_type: u8,
    ) -> Result<Self> {
        if provider_code > MAX_PROVIDER_CODE {
            return Err(NcprError::InvalidRecord(format!(
                "provider code {} exceeds {}",
                provider_code, MAX_PROVIDER_CODE
            )));
        }
        if sub_type > MAX_SUB_TYPE {
            return Err(NcprError::InvalidRecord(format!(
                "sub-type {} exceeds {}",
                sub_type, MAX_SUB_TYPE
            )));
        }

        Ok(Self {
            provider_code,
            networks,
            status,
            sub_type,
        })
    }
}

/// Serialized as `[provider, "networks", "status", sub_type]`
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.provider_code)?;
        tuple.serialize_element(&self.networks.to_string())?;
        tuple.serialize_element(self.status.as_str())?;
        tuple.serialize_element(&self.sub_type)?;
        tuple.end()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, \"{}\", \"{}\", {})",
            self.provider_code, self.networks, self.status, self.sub_type
        )
    }
}

// =============================================================================
// NetworkSet
// =============================================================================

/// Set of network identifiers 1..=7, stored as bits 1..=7 of a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NetworkSet(u8);

impl NetworkSet {
    /// The empty set
    pub const EMPTY: NetworkSet = NetworkSet(0);

    /// Build from a packed byte; bit 0 is ignored
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & NETWORK_MASK)
    }

    /// Packed representation (bit 0 always clear)
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Add identifier `id` (1..=7)
    pub fn insert(&mut self, id: u8) -> Result<()> {
        if !(1..=7).contains(&id) {
            return Err(NcprError::InvalidRecord(format!(
                "network identifier {} outside 1..=7",
                id
            )));
        }
        self.0 |= 1 << id;
        Ok(())
    }

    pub fn contains(&self, id: u8) -> bool {
        (1..=7).contains(&id) && (self.0 >> id) & 1 == 1
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Identifiers in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=7u8).filter(move |&id| (self.0 >> id) & 1 == 1)
    }
}

impl fmt::Display for NetworkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(ZERO_MARKER);
        }

        let mut first = true;
        for id in self.iter() {
            if !first {
                f.write_str("#")?;
            }
            write!(f, "{}", id)?;
            first = false;
        }
        Ok(())
    }
}

/// Parses `"0"` or a `#`-separated list such as `"1#3#7"`; empty segments
/// are skipped, so `"#2#"` is the set `{2}`.
impl FromStr for NetworkSet {
    type Err = NcprError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut set = NetworkSet::EMPTY;
        if s == ZERO_MARKER {
            return Ok(set);
        }

        for part in s.split('#').filter(|p| !p.is_empty()) {
            let id: u8 = part.parse().map_err(|_| {
                NcprError::InvalidRecord(format!("bad network identifier {:?}", part))
            })?;
            set.insert(id)?;
        }

        Ok(set)
    }
}

// =============================================================================
// StatusFlag
// =============================================================================

/// Status bit of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFlag {
    /// Bit clear
    D,

    /// Bit set
    A,
}

impl StatusFlag {
    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            StatusFlag::D
        } else {
            StatusFlag::A
        }
    }

    pub fn bit(&self) -> u8 {
        match self {
            StatusFlag::D => 0,
            StatusFlag::A => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFlag::D => "D",
            StatusFlag::A => "A",
        }
    }
}

impl fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFlag {
    type Err = NcprError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "D" => Ok(StatusFlag::D),
            "A" => Ok(StatusFlag::A),
            other => Err(NcprError::InvalidRecord(format!(
                "status must be D or A, got {:?}",
                other
            ))),
        }
    }
}
