//! # ncpr-index
//!
//! Resolves ten-digit subscriber numbers to a small status record using a
//! sharded, read-only binary index:
//! - One shard file per four-digit prefix, fully resident in memory
//! - Two shard layouts: direct-indexed array or sorted records (binary search)
//! - Two-byte packed records decoded on demand
//! - HTTP/JSON lookup endpoint
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HTTP Query Service                        │
//! │              GET /api/v1/status?numbers=...                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ prefix (4 digits)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Shard Catalog                             │
//! │            (immutable, built once at startup)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ suffix (6 digits)
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Direct    │          │   Sorted    │
//!   │  (index)    │          │ (bisection) │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌──────────────┐
//!               │ Record Codec │
//!               └──────────────┘
//! ```
//!
//! Shard files are produced offline by [`patch`] / [`shard::ShardBuilder`].

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod number;
pub mod record;
pub mod shard;
pub mod catalog;
pub mod network;
pub mod patch;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NcprError, Result};
pub use config::{Config, ValidationMode};
pub use catalog::ShardCatalog;
pub use number::SubscriberNumber;
pub use record::Record;
pub use shard::Shard;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ncpr-index
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
