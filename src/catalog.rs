//! Shard Catalog
//!
//! Maps a four-digit prefix to its resident shard.
//!
//! ## Responsibilities
//! - Discover shard files on startup (`<prefix>.<ext>`, prefix of 1-4 digits)
//! - Read every shard fully into memory and validate its structure
//! - Route number lookups to the right shard
//!
//! The catalog is built once and never changes afterwards, so it can be
//! shared across request handlers behind an `Arc` without locking.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ValidationMode};
use crate::error::{NcprError, Result};
use crate::number::{SubscriberNumber, PREFIX_LEN};
use crate::record::Record;
use crate::shard::Shard;

/// Immutable prefix → shard map
#[derive(Debug, Default)]
pub struct ShardCatalog {
    shards: HashMap<u16, Shard>,
}

impl ShardCatalog {
    /// Scan `config.data_dir` and load every shard file it contains
    ///
    /// On startup:
    /// 1. List the directory (failure is fatal)
    /// 2. Keep files named `<1-4 digits>.<shard_extension>`, in name order
    /// 3. Read each fully (failure is fatal) and validate it
    /// 4. Register under the parsed prefix; a later file wins over an
    ///    earlier one with the same prefix
    pub fn load(config: &Config) -> Result<Self> {
        let dir = &config.data_dir;
        let candidates = Self::shard_files(config)?;

        let mut shards: HashMap<u16, Shard> = HashMap::with_capacity(candidates.len());
        for (prefix, path) in candidates {
            let shard = Shard::open(&path)?;

            if shard.is_empty() {
                tracing::warn!("Shard {} is empty; every lookup will miss", path.display());
            }

            if let Err(defect) = shard.validate() {
                match config.validation {
                    ValidationMode::Strict => {
                        return Err(NcprError::CorruptShard {
                            path,
                            reason: defect.to_string(),
                        });
                    }
                    ValidationMode::Lenient => {
                        tracing::warn!("Serving shard {} despite defect: {}", path.display(), defect);
                    }
                }
            }

            tracing::debug!(
                "Loaded shard {} for prefix {} ({}, {} bytes)",
                path.display(),
                prefix,
                shard.layout(),
                shard.len()
            );

            if shards.insert(prefix, shard).is_some() {
                tracing::warn!(
                    "Duplicate shard for prefix {}: {} replaces an earlier file",
                    prefix,
                    path.display()
                );
            }
        }

        tracing::info!("Loaded {} shards from {}", shards.len(), dir.display());

        Ok(Self { shards })
    }

    /// Shard files in `config.data_dir` with their prefixes, in name order
    ///
    /// When two files share a prefix the later one is the one that counts.
    pub fn shard_files(config: &Config) -> Result<Vec<(u16, PathBuf)>> {
        let mut candidates: Vec<(u16, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&config.data_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            match Self::parse_prefix(&path, &config.shard_extension) {
                Some(prefix) => candidates.push((prefix, path)),
                None => tracing::warn!("Ignoring {}: not a shard file name", path.display()),
            }
        }

        candidates.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(candidates)
    }

    /// Path of the shard file that serves `prefix`, if any
    pub fn shard_file(config: &Config, prefix: u16) -> Result<Option<PathBuf>> {
        Ok(Self::shard_files(config)?
            .into_iter()
            .filter(|(p, _)| *p == prefix)
            .map(|(_, path)| path)
            .last())
    }

    /// Load with default settings from `path` (convenience method)
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::load(&config)
    }

    /// Build a catalog from shards already in memory
    pub fn from_shards(shards: impl IntoIterator<Item = (u16, Shard)>) -> Self {
        Self {
            shards: shards.into_iter().collect(),
        }
    }

    /// Shard registered for `prefix`
    pub fn lookup(&self, prefix: u16) -> Option<&Shard> {
        self.shards.get(&prefix)
    }

    /// Full lookup: prefix selects the shard, suffix selects the record
    pub fn lookup_number(&self, number: &SubscriberNumber) -> Option<Record> {
        self.lookup(number.prefix())?.lookup(number.suffix())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of resident shards
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    /// Registered prefixes, ascending
    pub fn prefixes(&self) -> Vec<u16> {
        let mut prefixes: Vec<u16> = self.shards.keys().copied().collect();
        prefixes.sort_unstable();
        prefixes
    }

    /// Total bytes held by all shards
    pub fn resident_bytes(&self) -> usize {
        self.shards.values().map(Shard::len).sum()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Parse the prefix from a shard filename
    /// "9999.dat" → Some(9999), "0042.dat" → Some(42), "12345.dat" → None
    fn parse_prefix(path: &Path, extension: &str) -> Option<u16> {
        if path.extension()?.to_str()? != extension {
            return None;
        }

        let stem = path.file_stem()?.to_str()?;
        if stem.is_empty() || stem.len() > PREFIX_LEN || !stem.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        stem.parse().ok()
    }
}
