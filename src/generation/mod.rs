//! Video generation: payload building, task submission, and status polling.
//!
//! The flow is Request Builder → Task Submitter → Task Poller → Result
//! Normalizer. Submission-time problems (bad input, missing credential, no
//! task id) are errors; everything after submission is data — success,
//! failure, and timeout all come back as a [`PollResult`].

mod client;
mod outcome;
mod poll;
mod probe;
mod request;
mod storage;

pub use client::{SeedanceClient, TaskHandle};
pub use outcome::PollResult;
pub use poll::{poll_task, PollPolicy, StatusSource, TokioWait, WaitStrategy};
pub use request::{build_payload, ContentItem, GenerationRequest, ImageUrl, TaskPayload};
pub use storage::{resolve_reference, STORAGE_SCHEME};

use crate::config::SeedanceSettings;
use crate::error::Result;
use serde_json::json;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// End-to-end generator: one instance can serve many independent requests;
/// no state is shared between them beyond the HTTP connection pool.
pub struct VideoGenerator {
    client: SeedanceClient,
    settings: SeedanceSettings,
}

impl VideoGenerator {
    /// Create a generator from provider settings.
    pub fn new(settings: SeedanceSettings) -> Result<Self> {
        let client = SeedanceClient::new(settings.clone())?;
        Ok(Self { client, settings })
    }

    /// Submit a generation request and poll it to a terminal outcome.
    ///
    /// Errors are limited to the pre-submission phase (invalid input,
    /// missing credential, failed submission). Once a task id exists, the
    /// result is always `Ok` with one of the three [`PollResult`] variants.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<PollResult> {
        let request_id = Uuid::new_v4();
        let span = info_span!("generate", %request_id, operator_id = %self.settings.operator_id);

        async {
            let api_key = self.settings.require_api_key()?;
            let payload = build_payload(request, &self.settings)?;
            info!(
                images = payload.content.len(),
                region = %self.settings.region,
                "submitting video generation task"
            );

            let handle = self.client.submit(&payload, api_key).await?;
            info!(task_id = %handle.task_id, "task accepted, polling");

            let policy = PollPolicy::from(&self.settings);
            Ok(poll_task(&self.client, &handle, &policy, &TokioWait).await)
        }
        .instrument(span)
        .await
    }

    /// Never-throwing boundary for agent and HTTP callers.
    ///
    /// Every outcome, including pre-submission errors, comes back as a JSON
    /// string; errors are encoded as `{"error": "<message>"}`.
    pub async fn generate_json(&self, request: &GenerationRequest) -> String {
        match self.generate(request).await {
            Ok(result) => result.to_json().to_string(),
            Err(e) => json!({ "error": e.to_string() }).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_json_encodes_errors() {
        // No API key configured: the failure must surface as data, and no
        // network call is attempted before the credential check.
        let generator = VideoGenerator::new(SeedanceSettings::default()).unwrap();
        let request = GenerationRequest::from_images(vec!["https://e.com/a.png".to_string()]);

        let rendered = generator.generate_json(&request).await;
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value["error"].as_str().unwrap().contains("LAS API key"));
    }

    #[tokio::test]
    async fn test_empty_input_fails_before_any_network_call() {
        let settings = SeedanceSettings {
            api_key: Some("k".to_string()),
            // An unroutable endpoint: reaching the network would error
            // differently than InvalidInput.
            create_url: "http://127.0.0.1:1/generate".to_string(),
            ..SeedanceSettings::default()
        };
        let generator = VideoGenerator::new(settings).unwrap();

        let err = generator
            .generate(&GenerationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::SkapeError::InvalidInput(_)));
    }
}
