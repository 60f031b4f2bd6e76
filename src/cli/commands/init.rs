//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Skape Setup");
    println!();
    println!("Welcome to Skape! Let's make sure everything is configured correctly.\n");

    // Step 1: Check API keys
    println!("{}", style("Step 1: Checking API configuration").bold().cyan());
    println!();

    if settings.seedance.api_key.is_none() {
        Output::warning("LAS_API_KEY environment variable is not set.");
        println!();
        println!("  Skape requires a LAS operator API key for video generation.");
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export LAS_API_KEY='...'").green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'skape init' again.");
            return Ok(());
        }
    } else {
        Output::success("LAS API key is configured!");
    }

    if std::env::var("OPENAI_API_KEY").is_err() {
        Output::info("OPENAI_API_KEY is not set (only needed for 'skape agent').");
    }

    println!();

    // Step 2: Create config file
    println!("{}", style("Step 2: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        // The key stays in the environment, never in the file.
        let mut on_disk = settings.clone();
        on_disk.seedance.api_key = None;
        on_disk.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!("  Edit your config with: {}", style("skape config edit").green());
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check configuration status", style("skape doctor").cyan());
    println!(
        "  {} Generate your first video",
        style("skape generate <image-url>...").cyan()
    );
    println!(
        "  {} Let an agent drive the tool",
        style("skape agent \"<task>\"").cyan()
    );
    println!();
    println!("For more help: {}", style("skape --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}
