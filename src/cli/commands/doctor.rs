//! Doctor command - verify configuration and credentials.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Skape Doctor");
    println!();
    println!("Checking configuration and credentials...\n");

    let mut checks = Vec::new();

    // Check API keys
    println!("{}", style("API Configuration").bold());
    let las_check = check_las_api_key(settings);
    las_check.print();
    checks.push(las_check);

    let openai_check = check_openai_api_key();
    openai_check.print();
    checks.push(openai_check);

    println!();

    // Check provider settings
    println!("{}", style("Provider").bold());
    let provider_checks = check_provider(settings);
    for check in &provider_checks {
        check.print();
    }
    checks.extend(provider_checks);

    println!();

    // Check configuration
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Skape.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!(
            "All checks passed with {} warning(s).",
            warnings
        ));
    } else {
        Output::success("All checks passed! Skape is ready to use.");
    }

    Ok(())
}

/// Check if the operator API key is configured, without printing it.
fn check_las_api_key(settings: &Settings) -> CheckResult {
    match settings.seedance.api_key.as_deref() {
        Some(key) if key.len() > 8 => {
            let masked = format!("{}...{}", &key[..4], &key[key.len() - 4..]);
            CheckResult::ok("LAS_API_KEY", &format!("configured ({})", masked))
        }
        Some(key) if !key.is_empty() => CheckResult::ok("LAS_API_KEY", "configured"),
        _ => CheckResult::error(
            "LAS_API_KEY",
            "not set",
            "Set with: export LAS_API_KEY='...'",
        ),
    }
}

/// Check if OpenAI API key is configured (only needed for the agent).
fn check_openai_api_key() -> CheckResult {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if key.starts_with("sk-") && key.len() > 20 => {
            let masked = format!("{}...{}", &key[..7], &key[key.len() - 4..]);
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", masked))
        }
        Ok(key) if !key.is_empty() => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        _ => CheckResult::warning(
            "OPENAI_API_KEY",
            "not set (only needed for 'skape agent')",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

/// Sanity-check the provider endpoints and polling settings.
fn check_provider(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let seedance = &settings.seedance;

    for (name, url) in [
        ("Create endpoint", &seedance.create_url),
        ("Status endpoint", &seedance.status_url),
    ] {
        match url::Url::parse(url) {
            Ok(parsed) if parsed.scheme() == "https" => {
                results.push(CheckResult::ok(name, url));
            }
            Ok(_) => results.push(CheckResult::warning(
                name,
                url,
                "Endpoint is not HTTPS; the API key would travel unencrypted",
            )),
            Err(e) => results.push(CheckResult::error(
                name,
                &format!("invalid URL: {e}"),
                "Fix the endpoint in the config file",
            )),
        }
    }

    if seedance.poll_interval_seconds as u64 >= seedance.poll_timeout_seconds {
        results.push(CheckResult::warning(
            "Polling",
            &format!(
                "interval {}s >= timeout {}s; only one attempt will be made",
                seedance.poll_interval_seconds, seedance.poll_timeout_seconds
            ),
            "Lower SEEDANCE_POLL_INTERVAL or raise SEEDANCE_POLL_TIMEOUT",
        ));
    } else {
        results.push(CheckResult::ok(
            "Polling",
            &format!(
                "every {}s for up to {}s (region {})",
                seedance.poll_interval_seconds, seedance.poll_timeout_seconds, seedance.region
            ),
        ));
    }

    results
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: skape init (or skape config edit)",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_las_key_masked_not_leaked() {
        let mut settings = Settings::default();
        settings.seedance.api_key = Some("abcd-secret-key-wxyz".to_string());
        let result = check_las_api_key(&settings);
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(!result.message.contains("secret"));
    }

    #[test]
    fn test_provider_check_flags_degenerate_polling() {
        let mut settings = Settings::default();
        settings.seedance.poll_interval_seconds = 300.0;
        let results = check_provider(&settings);
        assert!(results
            .iter()
            .any(|r| r.name == "Polling" && r.status == CheckStatus::Warning));
    }
}
