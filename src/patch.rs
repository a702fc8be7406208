//! Patch Tool
//!
//! Applies CSV updates to the shard files in a data directory.
//!
//! ## Input Format
//! A header row followed by one row per number:
//! ```text
//! provider,number,networks,status,subtype
//! 5,9999123456,1#3,A,2
//! 12,1000000000,0,D,1
//! ```
//! Rows with a malformed number or out-of-range fields are skipped and
//! counted. Valid rows are grouped by prefix, and each touched shard is
//! rewritten once.
//!
//! Must not run against a directory a live server is reading from.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;

use serde::Deserialize;

use crate::catalog::ShardCatalog;
use crate::config::Config;
use crate::error::{NcprError, Result};
use crate::number::SubscriberNumber;
use crate::record::{NetworkSet, Record, StatusFlag};
use crate::shard::ShardBuilder;

/// One CSV row, positional: provider, number, networks, status, subtype
#[derive(Debug, Deserialize)]
struct PatchRow(u8, String, String, String, u8);

/// Outcome of a patch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchSummary {
    /// Shard files rewritten
    pub files_written: usize,

    /// Records stored (later rows for the same number overwrite earlier ones)
    pub records_applied: usize,

    /// Rows rejected during parsing
    pub rows_skipped: usize,
}

/// Read CSV rows from `input` and rewrite the affected shards under
/// `config.data_dir`
pub fn apply<R: Read>(input: R, config: &Config) -> Result<PatchSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let mut summary = PatchSummary::default();
    let mut by_prefix: BTreeMap<u16, Vec<(u32, Record)>> = BTreeMap::new();

    for row in reader.records() {
        let row = row?;
        match parse_row(&row) {
            Ok((number, record)) => by_prefix
                .entry(number.prefix())
                .or_default()
                .push((number.suffix(), record)),
            Err(e) => {
                let line = row.position().map(|p| p.line()).unwrap_or(0);
                tracing::warn!("Skipping line {}: {}", line, e);
                summary.rows_skipped += 1;
            }
        }
    }

    tracing::info!("Patching {} shard files", by_prefix.len());
    fs::create_dir_all(&config.data_dir)?;

    for (prefix, updates) in by_prefix {
        // Rewrite the file the catalog serves for this prefix, if there is one
        let path = ShardCatalog::shard_file(config, prefix)?
            .unwrap_or_else(|| config.shard_path(prefix));
        let mut builder = ShardBuilder::open(&path)?;

        for (suffix, record) in &updates {
            builder.set(*suffix, record)?;
        }
        builder.write(&path)?;

        summary.files_written += 1;
        summary.records_applied += updates.len();
    }

    tracing::info!(
        "Patched {} records across {} files ({} rows skipped)",
        summary.records_applied,
        summary.files_written,
        summary.rows_skipped
    );

    Ok(summary)
}

/// Validate one row. Provider and sub-type must be non-zero in patch input.
fn parse_row(row: &csv::StringRecord) -> Result<(SubscriberNumber, Record)> {
    let PatchRow(provider, number, networks, status, sub_type) = row
        .deserialize(None)
        .map_err(|e| NcprError::InvalidRecord(e.to_string()))?;

    let number = SubscriberNumber::parse(&number)?;

    if provider == 0 {
        return Err(NcprError::InvalidRecord("provider code must be non-zero".to_string()));
    }
    if sub_type == 0 {
        return Err(NcprError::InvalidRecord("sub-type must be non-zero".to_string()));
    }

    let networks: NetworkSet = networks.parse()?;
    let status: StatusFlag = status.parse()?;
    let record = Record::new(provider, networks, status, sub_type)?;

    Ok((number, record))
}
