//! Generation request validation and task payload assembly.

use super::storage;
use crate::config::SeedanceSettings;
use crate::error::{Result, SkapeError};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::warn;

/// A video generation request as accepted from the CLI, the HTTP API, or the
/// agent tool boundary. All options are defaulted so callers only have to
/// supply the image list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    /// Input images: HTTPS URLs or tos:// storage references, in order.
    pub image_urls: Vec<String>,
    /// Optional text prompt guiding the generation.
    pub prompt: String,
    /// Aspect ratio, e.g. "16:9".
    pub aspect_ratio: String,
    /// Clip duration in seconds.
    pub duration_seconds: u32,
    /// Frames per second.
    pub fps: u32,
    /// Output resolution, e.g. "720p".
    pub resolution: String,
    /// Whether to watermark the output.
    pub watermark: bool,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            image_urls: Vec::new(),
            prompt: String::new(),
            aspect_ratio: "16:9".to_string(),
            duration_seconds: 5,
            fps: 24,
            resolution: "720p".to_string(),
            watermark: false,
        }
    }
}

impl GenerationRequest {
    /// Build a request from an image list with default options.
    pub fn from_images(image_urls: Vec<String>) -> Self {
        Self {
            image_urls,
            ..Self::default()
        }
    }
}

/// One content item of the provider payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub image_url: ImageUrl,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

impl ContentItem {
    fn image(url: String) -> Self {
        Self {
            item_type: "image_url".to_string(),
            image_url: ImageUrl { url },
        }
    }
}

/// The provider-specific task payload. Immutable once built.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskPayload {
    pub model_name: String,
    pub content: Vec<ContentItem>,
    pub return_last_frame: bool,
}

/// Validate a request and assemble the task payload.
///
/// References that fail to resolve (malformed storage URI, or a resolved
/// value that is not an absolute http(s) URL) are skipped with a warning so
/// one bad reference does not block the rest. Fails with `InvalidInput` when
/// the list is empty, an option is out of shape, or nothing survives
/// resolution.
pub fn build_payload(
    request: &GenerationRequest,
    settings: &SeedanceSettings,
) -> Result<TaskPayload> {
    if request.image_urls.is_empty() {
        return Err(SkapeError::InvalidInput(
            "image_urls is empty; at least one image is required".to_string(),
        ));
    }

    validate_options(request)?;

    let mut content = Vec::with_capacity(request.image_urls.len());
    for reference in &request.image_urls {
        match resolve_and_check(reference, &settings.region) {
            Ok(url) => content.push(ContentItem::image(url)),
            Err(e) => warn!("Skipping image reference: {e}"),
        }
    }

    if content.is_empty() {
        return Err(SkapeError::InvalidInput(
            "no submittable content: every image reference failed to resolve".to_string(),
        ));
    }

    Ok(TaskPayload {
        model_name: settings.model.clone(),
        content,
        return_last_frame: settings.return_last_frame,
    })
}

/// Resolve one reference and verify the result is a fetchable URL.
fn resolve_and_check(reference: &str, region: &str) -> Result<String> {
    let resolved = storage::resolve_reference(reference, region)?;

    let parsed = url::Url::parse(&resolved)
        .map_err(|e| SkapeError::InvalidInput(format!("{reference}: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(SkapeError::InvalidInput(format!(
            "{reference}: unsupported scheme {}",
            parsed.scheme()
        )));
    }

    Ok(resolved)
}

fn validate_options(request: &GenerationRequest) -> Result<()> {
    static ASPECT_RATIO: OnceLock<regex::Regex> = OnceLock::new();
    static RESOLUTION: OnceLock<regex::Regex> = OnceLock::new();

    let aspect_ratio = ASPECT_RATIO.get_or_init(|| regex::Regex::new(r"^\d+:\d+$").unwrap());
    let resolution = RESOLUTION.get_or_init(|| regex::Regex::new(r"^\d+p$").unwrap());

    if !aspect_ratio.is_match(&request.aspect_ratio) {
        return Err(SkapeError::InvalidInput(format!(
            "aspect_ratio must look like W:H, got {:?}",
            request.aspect_ratio
        )));
    }
    if !resolution.is_match(&request.resolution) {
        return Err(SkapeError::InvalidInput(format!(
            "resolution must look like 720p, got {:?}",
            request.resolution
        )));
    }
    if request.duration_seconds == 0 {
        return Err(SkapeError::InvalidInput(
            "duration_seconds must be greater than zero".to_string(),
        ));
    }
    if request.fps == 0 {
        return Err(SkapeError::InvalidInput(
            "fps must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SeedanceSettings {
        SeedanceSettings::default()
    }

    #[test]
    fn test_empty_image_list_rejected() {
        let request = GenerationRequest::default();
        let err = build_payload(&request, &settings()).unwrap_err();
        assert!(matches!(err, SkapeError::InvalidInput(_)));
    }

    #[test]
    fn test_payload_shape() {
        let request = GenerationRequest::from_images(vec![
            "https://example.com/a.png".to_string(),
            "tos://bucket/b.png".to_string(),
        ]);
        let payload = build_payload(&request, &settings()).unwrap();

        assert_eq!(payload.model_name, "doubao-seedance-1.0-lite-i2v");
        assert!(!payload.return_last_frame);
        assert_eq!(payload.content.len(), 2);
        assert_eq!(payload.content[0].item_type, "image_url");
        assert_eq!(payload.content[0].image_url.url, "https://example.com/a.png");
        assert_eq!(
            payload.content[1].image_url.url,
            "https://bucket.tos-cn-beijing.volces.com/b.png"
        );
    }

    #[test]
    fn test_payload_serializes_to_provider_wire_format() {
        let request = GenerationRequest::from_images(vec!["https://example.com/a.png".to_string()]);
        let payload = build_payload(&request, &settings()).unwrap();

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model_name": "doubao-seedance-1.0-lite-i2v",
                "content": [
                    {"type": "image_url", "image_url": {"url": "https://example.com/a.png"}}
                ],
                "return_last_frame": false,
            })
        );
    }

    #[test]
    fn test_bad_reference_skipped_not_fatal() {
        let request = GenerationRequest::from_images(vec![
            "tos://no-separator".to_string(),
            "https://example.com/ok.png".to_string(),
        ]);
        let payload = build_payload(&request, &settings()).unwrap();
        assert_eq!(payload.content.len(), 1);
        assert_eq!(payload.content[0].image_url.url, "https://example.com/ok.png");
    }

    #[test]
    fn test_all_references_dropped_is_invalid_input() {
        let request = GenerationRequest::from_images(vec![
            "tos://no-separator".to_string(),
            "ftp://example.com/file.png".to_string(),
        ]);
        let err = build_payload(&request, &settings()).unwrap_err();
        assert!(matches!(err, SkapeError::InvalidInput(_)));
    }

    #[test]
    fn test_option_validation() {
        let mut request = GenerationRequest::from_images(vec!["https://e.com/a.png".to_string()]);
        request.aspect_ratio = "wide".to_string();
        assert!(build_payload(&request, &settings()).is_err());

        let mut request = GenerationRequest::from_images(vec!["https://e.com/a.png".to_string()]);
        request.resolution = "720".to_string();
        assert!(build_payload(&request, &settings()).is_err());

        let mut request = GenerationRequest::from_images(vec!["https://e.com/a.png".to_string()]);
        request.duration_seconds = 0;
        assert!(build_payload(&request, &settings()).is_err());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"image_urls": ["https://e.com/a.png"]}"#).unwrap();
        assert_eq!(request.aspect_ratio, "16:9");
        assert_eq!(request.duration_seconds, 5);
        assert_eq!(request.fps, 24);
        assert_eq!(request.resolution, "720p");
        assert!(!request.watermark);
        assert!(request.prompt.is_empty());
    }
}
