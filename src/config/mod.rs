//! Configuration module for Skape.
//!
//! Handles loading and managing application settings. Environment variables
//! are read once at the process boundary via [`Settings::apply_env`].

mod settings;

pub use settings::{AgentSettings, GeneralSettings, SeedanceSettings, Settings};
