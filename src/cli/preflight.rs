//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials are configured before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, SkapeError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Video generation requires the operator API key.
    Generate,
    /// The agent additionally requires an OpenAI API key for the LLM loop.
    Agent,
    /// Serving only needs credentials once a request arrives.
    Serve,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Generate => {
            check_las_api_key(settings)?;
        }
        Operation::Agent => {
            check_las_api_key(settings)?;
            check_openai_api_key()?;
        }
        Operation::Serve => {
            // Requests are answered with {"error": ...} when the key is
            // missing, so serving itself has no hard requirements.
        }
    }
    Ok(())
}

/// Check if the operator API key is configured.
fn check_las_api_key(settings: &Settings) -> Result<()> {
    settings.seedance.require_api_key().map(|_| ())
}

/// Check if the OpenAI API key is configured.
fn check_openai_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(SkapeError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(SkapeError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_serve_no_requirements() {
        // Serve should always pass pre-flight (errors surface per request)
        assert!(check(Operation::Serve, &Settings::default()).is_ok());
    }

    #[test]
    fn test_check_generate_requires_key() {
        let mut settings = Settings::default();
        assert!(check(Operation::Generate, &settings).is_err());

        settings.seedance.api_key = Some("key".to_string());
        assert!(check(Operation::Generate, &settings).is_ok());
    }
}
