//! Task status polling.
//!
//! A submitted task moves through `Pending` until one of three terminal
//! outcomes: the provider reports completion (or a video URL appears, which
//! counts as completion on its own), the provider reports a failure status,
//! or the deadline passes. A single failed status request never aborts the
//! loop; a multi-minute generation job must survive transient network blips.

use super::client::TaskHandle;
use super::outcome::PollResult;
use super::probe;
use crate::config::SeedanceSettings;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One status fetch. Implemented by the HTTP client; tests substitute
/// scripted responses.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, handle: &TaskHandle) -> Result<Value>;
}

/// Suspends the poll loop between attempts. The suspension must yield to the
/// runtime (never spin) and abort when the surrounding future is dropped.
#[async_trait]
pub trait WaitStrategy: Send + Sync {
    async fn wait(&self, interval: Duration);
}

/// Production wait strategy backed by the tokio timer.
pub struct TokioWait;

#[async_trait]
impl WaitStrategy for TokioWait {
    async fn wait(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Deadline and interval for one polling run.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            interval: Duration::from_secs(3),
        }
    }
}

impl From<&SeedanceSettings> for PollPolicy {
    fn from(settings: &SeedanceSettings) -> Self {
        Self {
            timeout: Duration::from_secs(settings.poll_timeout_seconds),
            interval: Duration::from_secs_f64(settings.poll_interval_seconds),
        }
    }
}

/// Poll a task until a terminal outcome.
///
/// The deadline is measured from entry, i.e. from submission acceptance.
/// Always returns a [`PollResult`]; pending-forever and transport trouble
/// are data (timeout), not errors.
pub async fn poll_task<S: StatusSource + ?Sized>(
    source: &S,
    handle: &TaskHandle,
    policy: &PollPolicy,
    wait: &dyn WaitStrategy,
) -> PollResult {
    let deadline = tokio::time::Instant::now() + policy.timeout;
    let mut last_observed: Option<Value> = None;

    while tokio::time::Instant::now() < deadline {
        match source.fetch_status(handle).await {
            Ok(body) => {
                let status = probe::extract_status(&body);
                let video_url = probe::extract_video_url(&body);
                last_observed = Some(body);

                // A present URL is authoritative proof of completion even
                // when the status token never catches up.
                if video_url.is_some()
                    || status.as_deref().is_some_and(probe::is_success_status)
                {
                    let status = status
                        .map(|s| s.to_lowercase())
                        .unwrap_or_else(|| "succeeded".to_string());
                    info!(task_id = %handle.task_id, %status, "video generation finished");
                    return PollResult::Succeeded { status, video_url };
                }

                if let Some(status) = status.as_deref().filter(|s| probe::is_failure_status(s)) {
                    let status = status.to_lowercase();
                    warn!(task_id = %handle.task_id, %status, "video generation failed");
                    return PollResult::Failed {
                        task_id: handle.task_id.clone(),
                        status,
                    };
                }

                debug!(task_id = %handle.task_id, status = ?status, "task still pending");
            }
            Err(e) => {
                warn!(task_id = %handle.task_id, "poll attempt failed: {e}");
            }
        }

        wait.wait(policy.interval).await;
    }

    warn!(task_id = %handle.task_id, "polling deadline reached");
    PollResult::TimedOut {
        task_id: handle.task_id.clone(),
        last_observed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkapeError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn handle() -> TaskHandle {
        TaskHandle::new("T1".to_string(), "test-key")
    }

    fn policy(timeout_ms: u64, interval_ms: u64) -> PollPolicy {
        PollPolicy {
            timeout: Duration::from_millis(timeout_ms),
            interval: Duration::from_millis(interval_ms),
        }
    }

    /// Replays a fixed script of responses; repeats the last entry forever.
    struct ScriptedSource {
        script: Mutex<Vec<Result<Value>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Value>>) -> Self {
            let mut script = script;
            script.reverse();
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusSource for ScriptedSource {
        async fn fetch_status(&self, _handle: &TaskHandle) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            match script.len() {
                0 => Ok(json!({"status": "running"})),
                1 => match &script[0] {
                    Ok(v) => Ok(v.clone()),
                    Err(_) => Err(SkapeError::Submission("scripted".to_string())),
                },
                _ => match script.pop().unwrap() {
                    Ok(v) => Ok(v),
                    Err(_) => Err(SkapeError::Submission("scripted".to_string())),
                },
            }
        }
    }

    fn transport_error() -> Result<Value> {
        Err(SkapeError::Submission("connection reset".to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_n_running_polls() {
        let source = ScriptedSource::new(vec![
            Ok(json!({"status": "running"})),
            Ok(json!({"status": "running"})),
            Ok(json!({"status": "running"})),
            Ok(json!({"status": "succeeded", "result": {"url": "http://x/v.mp4"}})),
        ]);

        let result = poll_task(&source, &handle(), &policy(120_000, 3_000), &TokioWait).await;

        assert_eq!(source.calls(), 4);
        assert_eq!(
            result,
            PollResult::Succeeded {
                status: "succeeded".to_string(),
                video_url: Some("http://x/v.mp4".to_string()),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_url_presence_is_authoritative_without_status() {
        let source = ScriptedSource::new(vec![Ok(
            json!({"data": {"video_url": "http://y/v.mp4"}}),
        )]);

        let result = poll_task(&source, &handle(), &policy(120_000, 3_000), &TokioWait).await;

        assert_eq!(
            result,
            PollResult::Succeeded {
                status: "succeeded".to_string(),
                video_url: Some("http://y/v.mp4".to_string()),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_normalized_to_lowercase() {
        let source = ScriptedSource::new(vec![Ok(json!({"status": "Completed"}))]);

        let result = poll_task(&source, &handle(), &policy(120_000, 3_000), &TokioWait).await;

        assert_eq!(
            result,
            PollResult::Succeeded {
                status: "completed".to_string(),
                video_url: None,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_makes_every_attempt_that_fits() {
        // deadline 1s, interval 0.3s: attempts at 0, 0.3, 0.6, 0.9 = 4.
        let source = ScriptedSource::new(vec![Ok(json!({"status": "running"}))]);

        let result = poll_task(&source, &handle(), &policy(1_000, 300), &TokioWait).await;

        assert_eq!(source.calls(), 4);
        assert_eq!(
            result,
            PollResult::TimedOut {
                task_id: "T1".to_string(),
                last_observed: Some(json!({"status": "running"})),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_error_does_not_abort() {
        let source = ScriptedSource::new(vec![
            transport_error(),
            Ok(json!({"status": "succeeded", "result": {"url": "http://x/v.mp4"}})),
        ]);

        let result = poll_task(&source, &handle(), &policy(120_000, 3_000), &TokioWait).await;

        assert_eq!(source.calls(), 2);
        assert!(result.is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreadable_body_recorded_as_last_observed() {
        // The client wraps unparseable bodies as {"text": ...}; the poller
        // keeps going and reports the wrapper on timeout.
        let source = ScriptedSource::new(vec![Ok(json!({"text": "<html>502</html>"}))]);

        let result = poll_task(&source, &handle(), &policy(1_000, 300), &TokioWait).await;

        assert_eq!(
            result,
            PollResult::TimedOut {
                task_id: "T1".to_string(),
                last_observed: Some(json!({"text": "<html>502</html>"})),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_status_is_terminal() {
        let source = ScriptedSource::new(vec![
            Ok(json!({"status": "running"})),
            Ok(json!({"data": {"status": "Failed"}})),
        ]);

        let result = poll_task(&source, &handle(), &policy(120_000, 3_000), &TokioWait).await;

        assert_eq!(source.calls(), 2);
        assert_eq!(
            result,
            PollResult::Failed {
                task_id: "T1".to_string(),
                status: "failed".to_string(),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_polls_are_independent() {
        let fast = ScriptedSource::new(vec![Ok(
            json!({"status": "succeeded", "result": {"url": "http://fast/v.mp4"}}),
        )]);
        let slow = ScriptedSource::new(vec![
            Ok(json!({"status": "running"})),
            Ok(json!({"status": "running"})),
            Ok(json!({"status": "succeeded", "result": {"url": "http://slow/v.mp4"}})),
        ]);

        let fast_handle = TaskHandle::new("fast".to_string(), "k");
        let slow_handle = TaskHandle::new("slow".to_string(), "k");
        let policy = policy(120_000, 3_000);

        let (fast_result, slow_result) = futures::future::join(
            poll_task(&fast, &fast_handle, &policy, &TokioWait),
            poll_task(&slow, &slow_handle, &policy, &TokioWait),
        )
        .await;

        assert_eq!(fast.calls(), 1);
        assert_eq!(slow.calls(), 3);
        assert!(fast_result.is_success());
        assert!(slow_result.is_success());
    }
}
