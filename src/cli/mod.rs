//! CLI module for Skape.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Skape - Image-to-Video Generation
///
/// A CLI tool for generating short videos from images with the LAS Seedance
/// operator API. The name "Skape" comes from the Norwegian/Scandinavian word
/// for "create."
#[derive(Parser, Debug)]
#[command(name = "skape")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Skape and write a default configuration file
    Init,

    /// Check configuration and API credentials
    Doctor,

    /// Generate a video from one or more images
    Generate {
        /// Input images: HTTPS URLs or tos://bucket/key references, in order
        #[arg(required = true)]
        images: Vec<String>,

        /// Text prompt guiding the generation
        #[arg(short, long, default_value = "")]
        prompt: String,

        /// Aspect ratio
        #[arg(long, default_value = "16:9")]
        aspect_ratio: String,

        /// Clip duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u32,

        /// Frames per second
        #[arg(long, default_value = "24")]
        fps: u32,

        /// Output resolution
        #[arg(short, long, default_value = "720p")]
        resolution: String,

        /// Watermark the output
        #[arg(long)]
        watermark: bool,

        /// Print only the raw JSON result (for scripting)
        #[arg(long)]
        json: bool,
    },

    /// Run an AI agent that can generate videos on request
    Agent {
        /// The task for the agent to perform (e.g., "Make a clip from these frames: ...")
        task: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
