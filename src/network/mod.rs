//! Network Module
//!
//! HTTP query service in front of the shard catalog.
//!
//! ## Architecture
//! - tokio runtime, axum router
//! - Catalog shared read-only as `Arc<ShardCatalog>`, no locks
//! - Lookups are in-memory and cheap, so they run inline on the request task
//!
//! ## Endpoint
//! `GET /api/v1/status?numbers=9999123456,1000000000&numbers=...`
//!
//! Responds with a JSON object keyed by each valid ten-digit number. The
//! value is `[provider, "networks", "status", sub_type]` or `null`. Any
//! other request gets `{}`. Status is always 200.

mod handlers;
mod server;

pub use handlers::{resolve_numbers, STATUS_PATH};
pub use server::Server;
