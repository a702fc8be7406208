//! Shard Reader
//!
//! Holds one shard's bytes in memory and answers suffix lookups in O(1)
//! (direct layout) or O(log n) (sorted layout).

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;

use bytes::Bytes;

use crate::error::{NcprError, Result};
use crate::number::SUFFIX_SPACE;
use crate::record::{decode, Record};

use super::iterator::ShardRecords;
use super::{
    ShardDefect, ShardLayout, DIRECT_ENTRY_SIZE, HEADER_SIZE, KEY_SIZE, MODE_DIRECT,
    SORTED_RECORD_SIZE,
};

/// An immutable, fully resident shard
///
/// Cloning is cheap: the underlying buffer is reference counted.
#[derive(Clone)]
pub struct Shard {
    data: Bytes,
}

impl Shard {
    /// Wrap raw shard bytes (mode tag + payload)
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Read a whole shard file into memory
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|source| NcprError::ShardRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(data))
    }

    /// Look up the record stored for `suffix`
    ///
    /// Returns `None` if the suffix has no entry, or if its entry carries the
    /// "no data" sentinel. Never panics, whatever the shard contents.
    pub fn lookup(&self, suffix: u32) -> Option<Record> {
        match self.layout() {
            ShardLayout::Direct => self.lookup_direct(suffix),
            ShardLayout::Sorted => self.lookup_sorted(suffix),
        }
    }

    /// Layout announced by the mode tag
    ///
    /// An empty buffer reports `Direct` with no addressable entries.
    pub fn layout(&self) -> ShardLayout {
        ShardLayout::from_mode(self.data.first().copied().unwrap_or(MODE_DIRECT))
    }

    /// Number of entries (direct) or whole records (sorted) in the payload
    pub fn record_count(&self) -> usize {
        let payload = self.data.len().saturating_sub(HEADER_SIZE);
        match self.layout() {
            ShardLayout::Direct => payload / DIRECT_ENTRY_SIZE,
            ShardLayout::Sorted => payload / SORTED_RECORD_SIZE,
        }
    }

    /// Total size in bytes, including the mode tag
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterate over every filled entry in suffix order
    pub fn records(&self) -> ShardRecords<'_> {
        ShardRecords::new(self)
    }

    /// Structural checks on sorted shards: payload made of whole records,
    /// keys strictly ascending and below 1 000 000.
    ///
    /// Direct shards of any length are well formed, since an entry is only
    /// addressed when it lies wholly inside the payload. An empty file is a
    /// direct shard with no entries. Says nothing about whether the data
    /// itself is correct.
    pub fn validate(&self) -> std::result::Result<(), ShardDefect> {
        if self.layout() == ShardLayout::Direct {
            return Ok(());
        }

        let payload = self.data.len() - HEADER_SIZE;
        let extra = payload % SORTED_RECORD_SIZE;
        if extra != 0 {
            return Err(ShardDefect::TrailingBytes { extra });
        }

        let mut previous: Option<u32> = None;
        for index in 0..self.record_count() {
            let key = self.key_at(index);
            if key >= SUFFIX_SPACE {
                return Err(ShardDefect::KeyOutOfRange { index, key });
            }
            if let Some(previous) = previous {
                if key <= previous {
                    return Err(ShardDefect::KeyOrder {
                        index,
                        previous,
                        key,
                    });
                }
            }
            previous = Some(key);
        }

        Ok(())
    }

    // =========================================================================
    // Layout Helpers
    // =========================================================================

    fn lookup_direct(&self, suffix: u32) -> Option<Record> {
        let offset = (suffix as usize)
            .checked_mul(DIRECT_ENTRY_SIZE)?
            .checked_add(HEADER_SIZE)?;
        let end = offset.checked_add(DIRECT_ENTRY_SIZE)?;
        let entry = self.data.get(offset..end)?;
        decode(entry[0], entry[1])
    }

    fn lookup_sorted(&self, suffix: u32) -> Option<Record> {
        // Half-open [low, high); `high` never underflows
        let mut low = 0usize;
        let mut high = self.record_count();

        while low < high {
            // Same midpoint as inclusive bisection over [low, high - 1]
            let mid = low + (high - 1 - low) / 2;
            match suffix.cmp(&self.key_at(mid)) {
                Ordering::Less => high = mid,
                Ordering::Greater => low = mid + 1,
                Ordering::Equal => {
                    let (b1, b2) = self.data_at(mid);
                    return decode(b1, b2);
                }
            }
        }

        None
    }

    /// 24-bit big-endian key of sorted record `index` (< record_count)
    pub(super) fn key_at(&self, index: usize) -> u32 {
        let offset = HEADER_SIZE + index * SORTED_RECORD_SIZE;
        let key = &self.data[offset..offset + KEY_SIZE];
        (u32::from(key[0]) << 16) | (u32::from(key[1]) << 8) | u32::from(key[2])
    }

    /// Data bytes of sorted record `index` (< record_count)
    pub(super) fn data_at(&self, index: usize) -> (u8, u8) {
        let offset = HEADER_SIZE + index * SORTED_RECORD_SIZE + KEY_SIZE;
        (self.data[offset], self.data[offset + 1])
    }
}

impl fmt::Debug for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shard")
            .field("layout", &self.layout())
            .field("len", &self.data.len())
            .field("record_count", &self.record_count())
            .finish()
    }
}
