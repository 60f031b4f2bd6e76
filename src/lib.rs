//! Skape - Image-to-Video Generation
//!
//! A CLI tool and agent toolkit for turning images into short videos with the
//! LAS Seedance operator API.
//!
//! The name "Skape" comes from the Norwegian/Scandinavian word for "create."
//!
//! # Overview
//!
//! Skape allows you to:
//! - Submit a set of images to the Seedance online API for video generation
//! - Poll the remote task until it finishes, fails, or the deadline passes
//! - Get back one uniformly-shaped JSON result for every outcome
//! - Expose the same operation as an LLM agent tool or a small HTTP API
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `generation` - Task payload building, submission, and polling
//! - `agent` - LLM agent loop and tool dispatch
//! - `cli` - Command-line interface and HTTP server
//!
//! # Example
//!
//! ```rust,no_run
//! use skape::config::Settings;
//! use skape::generation::{GenerationRequest, VideoGenerator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut settings = Settings::load()?;
//!     settings.apply_env();
//!
//!     let generator = VideoGenerator::new(settings.seedance)?;
//!     let request = GenerationRequest::from_images(vec![
//!         "tos://my-bucket/frames/0001.png".to_string(),
//!     ]);
//!
//!     let result = generator.generate(&request).await?;
//!     println!("{}", result.to_json());
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod openai;

pub use error::{Result, SkapeError};
