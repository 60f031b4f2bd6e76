//! HTTP transport for the Seedance operator API.

use super::poll::StatusSource;
use super::probe;
use super::request::TaskPayload;
use crate::config::SeedanceSettings;
use crate::error::{Result, SkapeError};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

/// Handle to a submitted generation task: the provider's opaque identifier
/// plus the authorization needed for subsequent status checks. Created once
/// by [`SeedanceClient::submit`], read-only afterward, never persisted.
#[derive(Clone)]
pub struct TaskHandle {
    pub task_id: String,
    bearer: String,
}

impl TaskHandle {
    pub(crate) fn new(task_id: String, api_key: &str) -> Self {
        Self {
            task_id,
            bearer: format!("Bearer {api_key}"),
        }
    }

    /// The Authorization header value for polling requests.
    pub(crate) fn authorization(&self) -> &str {
        &self.bearer
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("task_id", &self.task_id)
            .field("bearer", &"Bearer ***")
            .finish()
    }
}

/// Client for the Seedance create/status endpoints.
///
/// Each instance owns its own connection pool with a per-request timeout far
/// below the overall polling deadline, so a single hung socket cannot consume
/// the whole budget.
pub struct SeedanceClient {
    http: reqwest::Client,
    settings: SeedanceSettings,
}

impl SeedanceClient {
    /// Create a client from provider settings.
    pub fn new(settings: SeedanceSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()
            .map_err(|e| SkapeError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, settings })
    }

    /// Submit a task payload to the creation endpoint.
    ///
    /// Fails with `Submission` on any transport error or when no task
    /// identifier can be extracted from the response. Never retried here;
    /// retry policy belongs to the caller.
    #[instrument(skip_all)]
    pub async fn submit(&self, payload: &TaskPayload, api_key: &str) -> Result<TaskHandle> {
        let response = self
            .http
            .post(&self.settings.create_url)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .json(payload)
            .send()
            .await
            .map_err(|e| SkapeError::Submission(format!("create request failed: {e}")))?;

        let http_status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SkapeError::Submission(format!("create response unreadable: {e}")))?;

        debug!(%http_status, bytes = text.len(), "create response received");
        let body = parse_lenient(&text);

        match probe::extract_task_id(&body) {
            Some(task_id) => {
                debug!(%task_id, "task created");
                Ok(TaskHandle::new(task_id, api_key))
            }
            None => Err(SkapeError::Submission(format!(
                "no task id in response (HTTP {http_status}): {}",
                preview(&text)
            ))),
        }
    }
}

#[async_trait]
impl StatusSource for SeedanceClient {
    /// Query the status endpoint once.
    ///
    /// Transport failures surface as errors (the poller absorbs them); a
    /// response that is not JSON is wrapped as `{"text": <raw>}` so the
    /// poller can still record it.
    #[instrument(skip_all, fields(task_id = %handle.task_id))]
    async fn fetch_status(&self, handle: &TaskHandle) -> Result<Value> {
        let response = self
            .http
            .post(&self.settings.status_url)
            .header(AUTHORIZATION, handle.authorization())
            .json(&json!({ "task_id": handle.task_id }))
            .send()
            .await?;

        let http_status = response.status();
        let text = response.text().await?;
        debug!(%http_status, bytes = text.len(), "status response received");

        Ok(parse_lenient(&text))
    }
}

/// Parse a response body as JSON, falling back to `{"text": <raw>}` when the
/// provider returns something unreadable.
fn parse_lenient(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "text": text }))
}

/// Bounded response excerpt for error messages.
fn preview(text: &str) -> String {
    const MAX: usize = 200;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_json() {
        let body = parse_lenient(r#"{"task_id": "T1"}"#);
        assert_eq!(body["task_id"], "T1");
    }

    #[test]
    fn test_parse_lenient_wraps_non_json() {
        let body = parse_lenient("<html>bad gateway</html>");
        assert_eq!(body["text"], "<html>bad gateway</html>");
    }

    #[test]
    fn test_task_handle_debug_redacts_credential() {
        let handle = TaskHandle::new("T1".to_string(), "super-secret-key");
        let rendered = format!("{handle:?}");
        assert!(rendered.contains("T1"));
        assert!(!rendered.contains("super-secret-key"));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(500);
        let p = preview(&long);
        assert!(p.len() < 250);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
