//! Field extraction from heterogeneous provider responses.
//!
//! The operator API has been observed returning the same concept under
//! several different field names and nesting depths. Each concept gets an
//! ordered table of JSON-pointer rules; the first rule that yields a value
//! wins. Keeping the tables as data makes the ambiguity explicit and
//! testable instead of scattering conditional chains through the client.

use serde_json::Value;

/// Task identifier locations, in priority order.
pub const TASK_ID_PATHS: &[&str] = &["/task_id", "/taskId", "/data/task_id", "/data/id"];

/// Task status locations, in priority order.
pub const STATUS_PATHS: &[&str] = &["/status", "/data/status", "/result/status"];

/// Video URL locations, in priority order.
pub const VIDEO_URL_PATHS: &[&str] = &[
    "/result/url",
    "/data/video_url",
    "/video_url",
    "/data/content/video_url",
];

/// Status tokens that mean the task finished successfully.
const SUCCESS_TOKENS: &[&str] = &["succeeded", "success", "completed", "done"];

/// Status tokens that mean the task ended without a result.
const FAILURE_TOKENS: &[&str] = &["failed", "failure", "error", "canceled", "cancelled"];

/// Apply an ordered rule table to a response body; first match wins.
/// Null and empty-string values do not match, so later rules still apply.
pub fn probe<'a>(body: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| body.pointer(path))
        .find(|value| !value.is_null() && value.as_str() != Some(""))
}

/// Extract the task identifier from a creation response.
///
/// Providers have returned both string and integer identifiers; integers are
/// rendered to their decimal form.
pub fn extract_task_id(body: &Value) -> Option<String> {
    match probe(body, TASK_ID_PATHS)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Extract the raw status string from a status response.
pub fn extract_status(body: &Value) -> Option<String> {
    match probe(body, STATUS_PATHS)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Extract the generated video URL from a status response.
pub fn extract_video_url(body: &Value) -> Option<String> {
    match probe(body, VIDEO_URL_PATHS)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Whether a status token (any casing) signals successful completion.
pub fn is_success_status(status: &str) -> bool {
    SUCCESS_TOKENS.contains(&status.to_lowercase().as_str())
}

/// Whether a status token (any casing) signals a terminal failure.
pub fn is_failure_status(status: &str) -> bool {
    FAILURE_TOKENS.contains(&status.to_lowercase().as_str())
}
