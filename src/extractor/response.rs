//! Model response parsing
//!
//! Models asked for JSON still answer in several shapes: the requested
//! object, a bare array, or JSON wrapped in markdown fences with prose
//! around it. The cascade here accepts all of them before giving up.

use crate::extractor::ModuleRecord;
use crate::{ExtractError, ExtractResult};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

/// Keys checked, in order, for the module array inside an object response
const ARRAY_KEYS: [&str; 3] = ["modules", "data", "result"];

static FENCED_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\[.*?\])\s*```").expect("fenced array pattern is valid")
});

static BARE_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\[.*?\])").expect("bare array pattern is valid"));

/// Parses module records out of a model response
///
/// Accepted shapes, tried in order:
/// 1. A JSON object: the first of `modules`/`data`/`result` whose value is
///    an array wins; an object with none of them yields zero records.
/// 2. A bare JSON array.
/// 3. Any other valid JSON: zero records.
/// 4. Invalid JSON: salvage an array from a markdown code fence, then from
///    anywhere in the text; if the salvaged snippet is not valid JSON
///    either, the response is rejected.
///
/// Array entries that do not look like module records are skipped rather
/// than failing the whole extraction.
pub fn parse_modules(text: &str) -> ExtractResult<Vec<ModuleRecord>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => {
            for key in ARRAY_KEYS {
                if let Some(Value::Array(items)) = map.get(key) {
                    return Ok(records_from(items));
                }
            }
            Ok(Vec::new())
        }
        Ok(Value::Array(items)) => Ok(records_from(&items)),
        Ok(_) => Ok(Vec::new()),
        Err(_) => salvage_array(text),
    }
}

fn salvage_array(text: &str) -> ExtractResult<Vec<ModuleRecord>> {
    let capture = FENCED_ARRAY
        .captures(text)
        .or_else(|| BARE_ARRAY.captures(text))
        .and_then(|caps| caps.get(1));

    let matched = match capture {
        Some(matched) => matched,
        None => return Err(ExtractError::InvalidResponse),
    };

    match serde_json::from_str::<Value>(matched.as_str()) {
        Ok(Value::Array(items)) => Ok(records_from(&items)),
        _ => Err(ExtractError::InvalidResponse),
    }
}

fn records_from(items: &[Value]) -> Vec<ModuleRecord> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping malformed module record: {}", e);
                None
            }
        })
        .collect()
}
