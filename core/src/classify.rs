//! Response status classification and diagnostic JSON rendering.
//!
//! Every response the client consumes passes through `classify` first. A
//! status in 200..300 passes; any other status becomes
//! `ApiError::UnexpectedStatus` tagged with its `StatusClass`, so callers can
//! match on the category instead of parsing messages.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Category of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// Anything below 200, including codes that are not valid HTTP.
    Informational,
    Success,
    Redirect,
    ClientError,
    /// 500 and above.
    ServerError,
}

impl StatusClass {
    pub fn from_code(status: u16) -> Self {
        match status {
            0..=199 => StatusClass::Informational,
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirect,
            400..=499 => StatusClass::ClientError,
            _ => StatusClass::ServerError,
        }
    }

    pub fn is_success(self) -> bool {
        self == StatusClass::Success
    }

    pub fn description(self) -> &'static str {
        match self {
            StatusClass::Informational => "an informational response",
            StatusClass::Success => "a success",
            StatusClass::Redirect => "a redirect",
            StatusClass::ClientError => "a client error",
            StatusClass::ServerError => "an internal server error",
        }
    }
}

/// Pass 2xx statuses through; turn everything else into `UnexpectedStatus`.
///
/// With `verbose` set, a failing body is logged as pretty JSON (or verbatim
/// when it is not JSON) before the error is returned.
pub fn classify(status: u16, body: &str, verbose: bool) -> Result<(), ApiError> {
    let class = StatusClass::from_code(status);
    if class.is_success() {
        return Ok(());
    }
    if verbose {
        let rendered = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| pretty_json(&value).ok())
            .unwrap_or_else(|| body.to_string());
        tracing::warn!(status, category = class.description(), "request was not successful:\n{rendered}");
    }
    Err(ApiError::UnexpectedStatus {
        status,
        class,
        body: body.to_string(),
    })
}

/// Render `value` as JSON indented by four spaces with object keys sorted.
pub fn pretty_json(value: &Value) -> Result<String, ApiError> {
    let sorted = sort_keys(value);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    sorted
        .serialize(&mut ser)
        .map_err(|e| ApiError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ApiError::Serialization(e.to_string()))
}

// Key order must not depend on whether serde_json's `preserve_order` feature
// is enabled somewhere in the dependency graph.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
