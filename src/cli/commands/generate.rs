//! Generate command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::generation::{GenerationRequest, PollResult, VideoGenerator};
use anyhow::Result;

/// Run the generate command.
#[allow(clippy::too_many_arguments)]
pub async fn run_generate(
    images: &[String],
    prompt: &str,
    aspect_ratio: &str,
    duration: u32,
    fps: u32,
    resolution: &str,
    watermark: bool,
    json: bool,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'skape doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let request = GenerationRequest {
        image_urls: images.to_vec(),
        prompt: prompt.to_string(),
        aspect_ratio: aspect_ratio.to_string(),
        duration_seconds: duration,
        fps,
        resolution: resolution.to_string(),
        watermark,
    };

    let generator = VideoGenerator::new(settings.seedance.clone())?;

    if json {
        // Scripting mode: raw JSON only, every outcome included.
        println!("{}", generator.generate_json(&request).await);
        return Ok(());
    }

    Output::info(&format!(
        "Submitting {} image(s) to {} ({})",
        images.len(),
        settings.seedance.operator_id,
        settings.seedance.region
    ));

    let spinner = Output::spinner("Generating video...");
    let result = generator.generate(&request).await;
    spinner.finish_and_clear();

    match result {
        Ok(PollResult::Succeeded { status, video_url }) => {
            Output::success(&format!("Video generation finished ({status})."));
            match video_url {
                Some(url) => Output::kv("Video", &url),
                None => Output::warning("Provider reported success but returned no URL."),
            }
        }
        Ok(PollResult::TimedOut { task_id, .. }) => {
            Output::warning(&format!(
                "Timed out after {}s; the task may still be running remotely.",
                settings.seedance.poll_timeout_seconds
            ));
            Output::kv("Task ID", &task_id);
        }
        Ok(PollResult::Failed { task_id, status }) => {
            Output::error(&format!("Provider reported terminal status: {status}"));
            Output::kv("Task ID", &task_id);
        }
        Err(e) => {
            Output::error(&format!("Video generation failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
