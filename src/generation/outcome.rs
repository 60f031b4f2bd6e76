//! Terminal outcomes of a generation task and their normalized JSON form.

use serde_json::{json, Value};

/// The terminal result of one submit-and-poll cycle. Exactly one variant is
/// produced per invocation; callers must handle all three.
#[derive(Debug, Clone, PartialEq)]
pub enum PollResult {
    /// The provider reported completion, or a video URL appeared.
    Succeeded {
        /// Normalized (lowercase) provider status, "succeeded" if none was
        /// reported alongside the URL.
        status: String,
        /// The generated video, when the provider included it.
        video_url: Option<String>,
    },
    /// The deadline passed without a terminal signal.
    TimedOut {
        task_id: String,
        /// Last response body observed before the deadline, for diagnostics.
        last_observed: Option<Value>,
    },
    /// The provider reported a terminal failure status.
    Failed {
        task_id: String,
        /// Normalized (lowercase) failure status token.
        status: String,
    },
}

impl PollResult {
    /// Render the outcome as one stable JSON object.
    ///
    /// `status` and `video_url` are always present so the calling agent can
    /// reason about every outcome uniformly; timeout and failure carry extra
    /// diagnostic fields. Pure: the same value always renders byte-identical
    /// JSON.
    pub fn to_json(&self) -> Value {
        match self {
            PollResult::Succeeded { status, video_url } => json!({
                "status": status,
                "video_url": video_url,
            }),
            PollResult::TimedOut {
                task_id,
                last_observed,
            } => json!({
                "status": "timeout",
                "video_url": Value::Null,
                "task_id": task_id,
                "raw": last_observed.clone().unwrap_or(Value::Null),
            }),
            PollResult::Failed { task_id, status } => json!({
                "status": status,
                "video_url": Value::Null,
                "task_id": task_id,
                "error": format!("task ended with status \"{status}\""),
            }),
        }
    }

    /// True only for the success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, PollResult::Succeeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_succeeded_shape() {
        let result = PollResult::Succeeded {
            status: "succeeded".to_string(),
            video_url: Some("http://x/v.mp4".to_string()),
        };
        assert_eq!(
            result.to_json(),
            json!({"status": "succeeded", "video_url": "http://x/v.mp4"})
        );
    }

    #[test]
    fn test_succeeded_without_url_keeps_key() {
        let result = PollResult::Succeeded {
            status: "done".to_string(),
            video_url: None,
        };
        assert_eq!(result.to_json(), json!({"status": "done", "video_url": null}));
    }

    #[test]
    fn test_timeout_shape() {
        let result = PollResult::TimedOut {
            task_id: "T1".to_string(),
            last_observed: Some(json!({"status": "running"})),
        };
        assert_eq!(
            result.to_json(),
            json!({
                "status": "timeout",
                "video_url": null,
                "task_id": "T1",
                "raw": {"status": "running"},
            })
        );
    }

    #[test]
    fn test_failed_shape() {
        let result = PollResult::Failed {
            task_id: "T1".to_string(),
            status: "failed".to_string(),
        };
        let value = result.to_json();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["video_url"], Value::Null);
        assert_eq!(value["task_id"], "T1");
        assert!(value["error"].as_str().unwrap().contains("failed"));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let result = PollResult::TimedOut {
            task_id: "T9".to_string(),
            last_observed: Some(json!({"data": {"status": "running"}, "text": "x"})),
        };
        assert_eq!(result.to_json().to_string(), result.to_json().to_string());
    }
}
