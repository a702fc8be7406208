//! Shard Module
//!
//! One immutable binary blob per four-digit prefix.
//!
//! ## File Format
//! ```text
//! ┌──────────┬──────────────────────────────────────────────┐
//! │ Mode (1) │ Payload                                      │
//! └──────────┴──────────────────────────────────────────────┘
//!
//! Mode 0 (direct): entry t at bytes [2t+1, 2t+2]
//! ┌────────┬────────┬────────┬────────┬─────
//! │ b1(t0) │ b2(t0) │ b1(t1) │ b2(t1) │ ...
//! └────────┴────────┴────────┴────────┴─────
//!
//! Mode != 0 (sorted): 5-byte records ascending by key
//! ┌───────────────────┬────────┬────────┐
//! │ Key: u24 BE (3)   │ b1 (1) │ b2 (1) │  ... repeated
//! └───────────────────┴────────┴────────┘
//! ```
//!
//! The two data bytes are decoded by [`crate::record::decode`].

mod builder;
mod iterator;
mod reader;

use std::fmt;

pub use builder::{ShardBuilder, DIRECT_FILL_THRESHOLD};
pub use iterator::ShardRecords;
pub use reader::Shard;

// =============================================================================
// Shared Constants (used by builder, reader, iterator)
// =============================================================================

/// Mode tag for the direct-indexed layout. Any other value means sorted.
pub const MODE_DIRECT: u8 = 0;

/// Mode tag written for the sorted layout
pub const MODE_SORTED: u8 = 1;

/// Size of the mode tag
pub(crate) const HEADER_SIZE: usize = 1;

/// Bytes per direct-mode entry
pub(crate) const DIRECT_ENTRY_SIZE: usize = 2;

/// Bytes per sorted-mode record: key (3) + data (2)
pub(crate) const SORTED_RECORD_SIZE: usize = 5;

/// Width of a sorted-mode key
pub(crate) const KEY_SIZE: usize = 3;

// =============================================================================
// Layout & Validation
// =============================================================================

/// How a shard's payload is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardLayout {
    /// Array indexed by suffix
    Direct,

    /// Binary-searchable records keyed by suffix
    Sorted,
}

impl ShardLayout {
    /// Layout selected by a mode tag
    pub fn from_mode(mode: u8) -> Self {
        if mode == MODE_DIRECT {
            ShardLayout::Direct
        } else {
            ShardLayout::Sorted
        }
    }

    pub fn mode_tag(&self) -> u8 {
        match self {
            ShardLayout::Direct => MODE_DIRECT,
            ShardLayout::Sorted => MODE_SORTED,
        }
    }
}

impl fmt::Display for ShardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShardLayout::Direct => f.write_str("direct"),
            ShardLayout::Sorted => f.write_str("sorted"),
        }
    }
}

/// Structural problem found by [`Shard::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShardDefect {
    /// Sorted payload is not a whole number of records
    TrailingBytes { extra: usize },

    /// Key at `index` is not greater than the key before it
    KeyOrder { index: usize, previous: u32, key: u32 },

    /// Key at `index` is not a valid suffix
    KeyOutOfRange { index: usize, key: u32 },
}

impl fmt::Display for ShardDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShardDefect::TrailingBytes { extra } => {
                write!(f, "{} trailing bytes after last whole record", extra)
            }
            ShardDefect::KeyOrder { index, previous, key } => write!(
                f,
                "record {} has key {} not above previous key {}",
                index, key, previous
            ),
            ShardDefect::KeyOutOfRange { index, key } => {
                write!(f, "record {} has out-of-range key {}", index, key)
            }
        }
    }
}
