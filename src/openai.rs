//! OpenAI client construction for the agent loop.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for chat completion requests (2 minutes). The video
/// generation tool does its own, much longer waiting; the chat calls around
/// it should fail fast instead.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Create an OpenAI client with the default request timeout.
pub fn create_client() -> Client<OpenAIConfig> {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom request timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}
