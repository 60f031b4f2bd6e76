//! Skape CLI entry point.

use anyhow::Result;
use clap::Parser;
use skape::cli::{commands, Cli, Commands};
use skape::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("skape={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration; the environment is consulted here and nowhere else.
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };
    settings.apply_env();

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Generate {
            images,
            prompt,
            aspect_ratio,
            duration,
            fps,
            resolution,
            watermark,
            json,
        } => {
            commands::run_generate(
                images,
                prompt,
                aspect_ratio,
                *duration,
                *fps,
                resolution,
                *watermark,
                *json,
                settings,
            )
            .await?;
        }

        Commands::Agent { task, model } => {
            commands::run_agent(task, model.clone(), settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
