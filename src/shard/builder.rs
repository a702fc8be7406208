//! Shard Builder
//!
//! Offline construction of shard files. Works on a dense table of one
//! two-byte slot per suffix and picks the output layout when written:
//! direct once at least 40% of slots are filled, sorted otherwise.
//!
//! Never used by the query path; shards are read-only while served.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{NcprError, Result};
use crate::number::SUFFIX_SPACE;
use crate::record::{decode, encode, Record, FILL_BIT};

use super::{Shard, ShardLayout, DIRECT_ENTRY_SIZE, HEADER_SIZE, SORTED_RECORD_SIZE};

/// Filled slots at which the direct layout becomes the smaller encoding
pub const DIRECT_FILL_THRESHOLD: usize = 400_000;

/// Dense table size: two bytes for every possible suffix
const TABLE_SIZE: usize = SUFFIX_SPACE as usize * DIRECT_ENTRY_SIZE;

/// Mutable, dense view of one prefix's records
pub struct ShardBuilder {
    /// Slot t at [2t, 2t+1]
    table: Vec<u8>,
    /// Slots with the fill bit set
    filled: usize,
}

impl Default for ShardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardBuilder {
    /// Create an empty builder (no slot filled)
    pub fn new() -> Self {
        Self {
            table: vec![0u8; TABLE_SIZE],
            filled: 0,
        }
    }

    /// Unpack an existing shard of either layout
    pub fn from_shard(shard: &Shard) -> Self {
        let mut builder = Self::new();
        for (suffix, record) in shard.records() {
            if suffix >= SUFFIX_SPACE {
                tracing::warn!("Dropping out-of-range key {} while unpacking shard", suffix);
                continue;
            }
            builder.put(suffix, &record);
        }
        builder
    }

    /// Load the shard at `path`, or start empty if the file does not exist
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No shard at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let shard = Shard::open(path)?;
        Ok(Self::from_shard(&shard))
    }

    /// Store `record` for `suffix`, replacing any previous record
    pub fn set(&mut self, suffix: u32, record: &Record) -> Result<()> {
        if suffix >= SUFFIX_SPACE {
            return Err(NcprError::InvalidRecord(format!(
                "suffix {} outside 0..{}",
                suffix, SUFFIX_SPACE
            )));
        }
        self.put(suffix, record);
        Ok(())
    }

    /// Empty the slot for `suffix`, returning what was there
    pub fn clear(&mut self, suffix: u32) -> Option<Record> {
        let previous = self.get(suffix)?;
        let offset = suffix as usize * DIRECT_ENTRY_SIZE;
        self.table[offset] = 0;
        self.table[offset + 1] = 0;
        self.filled -= 1;
        Some(previous)
    }

    /// Record currently stored for `suffix`
    pub fn get(&self, suffix: u32) -> Option<Record> {
        if suffix >= SUFFIX_SPACE {
            return None;
        }
        let offset = suffix as usize * DIRECT_ENTRY_SIZE;
        decode(self.table[offset], self.table[offset + 1])
    }

    /// Number of filled slots
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    /// Layout that `to_bytes` / `write` will produce
    pub fn layout(&self) -> ShardLayout {
        if self.filled >= DIRECT_FILL_THRESHOLD {
            ShardLayout::Direct
        } else {
            ShardLayout::Sorted
        }
    }

    /// Encode the table in the chosen layout
    pub fn to_bytes(&self) -> Vec<u8> {
        let layout = self.layout();
        match layout {
            ShardLayout::Direct => {
                let mut out = Vec::with_capacity(HEADER_SIZE + TABLE_SIZE);
                out.push(layout.mode_tag());
                out.extend_from_slice(&self.table);
                out
            }
            ShardLayout::Sorted => {
                let mut out = Vec::with_capacity(HEADER_SIZE + self.filled * SORTED_RECORD_SIZE);
                out.push(layout.mode_tag());
                for (suffix, slot) in self.table.chunks_exact(DIRECT_ENTRY_SIZE).enumerate() {
                    if slot[0] & FILL_BIT == 0 {
                        continue;
                    }
                    // Suffix < 1 000 000 always fits in 24 bits
                    out.push(((suffix >> 16) & 0xFF) as u8);
                    out.push(((suffix >> 8) & 0xFF) as u8);
                    out.push((suffix & 0xFF) as u8);
                    out.push(slot[0]);
                    out.push(slot[1]);
                }
                out
            }
        }
    }

    /// Write the encoded shard to `path` (truncating) and fsync it
    ///
    /// Returns the written shard, ready for lookups.
    pub fn write(&self, path: &Path) -> Result<Shard> {
        let bytes = self.to_bytes();

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes)?;
        writer.flush()?;

        let file = writer
            .into_inner()
            .map_err(|e| NcprError::Io(e.into_error()))?;
        file.sync_all()?;

        tracing::debug!(
            "Wrote {} shard {} ({} records, {} bytes)",
            self.layout(),
            path.display(),
            self.filled,
            bytes.len()
        );

        Ok(Shard::from_bytes(bytes))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Store without the range check (caller guarantees suffix < SUFFIX_SPACE)
    fn put(&mut self, suffix: u32, record: &Record) {
        let offset = suffix as usize * DIRECT_ENTRY_SIZE;
        if self.table[offset] & FILL_BIT == 0 {
            self.filled += 1;
        }
        let [b1, b2] = encode(record);
        self.table[offset] = b1;
        self.table[offset + 1] = b2;
    }
}
