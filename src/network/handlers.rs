//! Request handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::catalog::ShardCatalog;
use crate::number::SubscriberNumber;
use crate::record::Record;

/// Route of the status lookup
pub const STATUS_PATH: &str = "/api/v1/status";

/// Query key carrying the numbers
const NUMBERS_PARAM: &str = "numbers";

/// `GET /api/v1/status`
///
/// Accepts `numbers` repeated and/or comma separated. An unparsable query
/// string is treated like a missing one.
pub(super) async fn handle_status(
    State(catalog): State<Arc<ShardCatalog>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!("Unparsable query string: {}", rejection);
            return empty_object().into_response();
        }
    };

    let values: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == NUMBERS_PARAM)
        .map(|(_, value)| value.as_str())
        .collect();

    if values.is_empty() {
        return empty_object().into_response();
    }

    let results = resolve_numbers(&catalog, values.into_iter().flat_map(|v| v.split(',')));
    tracing::trace!("Resolved {} numbers", results.len());

    Json(results).into_response()
}

/// Every other method or path
pub(super) async fn handle_fallback() -> Json<Value> {
    empty_object()
}

/// Look up each candidate that is exactly ten digits; skip the rest
///
/// A missing shard, a missing suffix and the "no data" sentinel all map
/// to `None`.
pub fn resolve_numbers<'a>(
    catalog: &ShardCatalog,
    candidates: impl IntoIterator<Item = &'a str>,
) -> BTreeMap<String, Option<Record>> {
    candidates
        .into_iter()
        .filter_map(|candidate| SubscriberNumber::parse(candidate).ok())
        .map(|number| {
            let record = catalog.lookup_number(&number);
            (number.as_str().to_string(), record)
        })
        .collect()
}

fn empty_object() -> Json<Value> {
    Json(json!({}))
}
