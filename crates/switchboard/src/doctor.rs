// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `switchboard doctor` command implementation.
//!
//! Runs diagnostic checks against the deployment to identify connectivity
//! problems and registry/host mismatches before they surface as silently
//! degraded routing.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use switchboard_config::SwitchboardConfig;
use switchboard_core::SwitchboardError;
use switchboard_ollama::OllamaProvider;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `switchboard doctor` command.
///
/// With `--plain`, disables colored output. Returns an error when any check
/// fails so the process can exit non-zero.
pub async fn run_doctor(config: &SwitchboardConfig, plain: bool) -> Result<(), SwitchboardError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut results = vec![check_config(config)];
    match check_host(config).await {
        (host_check, Some(available)) => {
            results.push(host_check);
            results.push(check_registry_coverage(config, &available));
        }
        (host_check, None) => results.push(host_check),
    }

    println!();
    println!("  switchboard doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    for result in &results {
        print_result(result, use_color);
        if result.status == CheckStatus::Fail {
            fail_count += 1;
        }
    }

    println!();
    if fail_count > 0 {
        Err(SwitchboardError::Internal(format!(
            "{fail_count} check(s) failed"
        )))
    } else {
        Ok(())
    }
}

fn print_result(result: &CheckResult, use_color: bool) {
    let duration_ms = result.duration.as_millis();
    let line = if use_color {
        use colored::Colorize;
        let symbol = match result.status {
            CheckStatus::Pass => "✓".green().to_string(),
            CheckStatus::Warn => "!".yellow().to_string(),
            CheckStatus::Fail => "✗".red().to_string(),
        };
        format!(
            "    {symbol} {:<16} {} ({duration_ms}ms)",
            result.name, result.message
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<16} {} ({duration_ms}ms)",
            result.name, result.message
        )
    };
    println!("{line}");
}

/// Re-validate the loaded configuration.
fn check_config(config: &SwitchboardConfig) -> CheckResult {
    let started = Instant::now();
    match switchboard_config::validation::validate_config(config) {
        Ok(()) => CheckResult {
            name: "config",
            status: CheckStatus::Pass,
            message: format!("{} registered models", config.models.known.len()),
            duration: started.elapsed(),
        },
        Err(errors) => CheckResult {
            name: "config",
            status: CheckStatus::Fail,
            message: format!("{} validation error(s)", errors.len()),
            duration: started.elapsed(),
        },
    }
}

/// Check Ollama connectivity and list the models it serves.
async fn check_host(config: &SwitchboardConfig) -> (CheckResult, Option<Vec<String>>) {
    let started = Instant::now();
    let provider = match OllamaProvider::new(config) {
        Ok(provider) => provider,
        Err(e) => {
            return (
                CheckResult {
                    name: "ollama",
                    status: CheckStatus::Fail,
                    message: e.to_string(),
                    duration: started.elapsed(),
                },
                None,
            );
        }
    };

    match provider.available_models().await {
        Ok(models) => (
            CheckResult {
                name: "ollama",
                status: CheckStatus::Pass,
                message: format!("{} with {} model(s)", config.ollama.host, models.len()),
                duration: started.elapsed(),
            },
            Some(models),
        ),
        Err(e) => (
            CheckResult {
                name: "ollama",
                status: CheckStatus::Fail,
                message: e.to_string(),
                duration: started.elapsed(),
            },
            None,
        ),
    }
}

/// Warn when registered or routed-to models are absent from the host.
fn check_registry_coverage(config: &SwitchboardConfig, available: &[String]) -> CheckResult {
    let started = Instant::now();

    let mut wanted: Vec<&str> = vec![
        config.routing.classifier_model.as_str(),
        config.models.default.as_str(),
    ];
    wanted.extend(config.models.known.iter().map(String::as_str));
    wanted.sort_unstable();
    wanted.dedup();

    let missing: Vec<&str> = wanted
        .into_iter()
        .filter(|model| !available.iter().any(|a| a == model))
        .collect();

    if missing.is_empty() {
        CheckResult {
            name: "models",
            status: CheckStatus::Pass,
            message: "all registered models are available".to_string(),
            duration: started.elapsed(),
        }
    } else {
        CheckResult {
            name: "models",
            status: CheckStatus::Warn,
            message: format!("not pulled on host: {}", missing.join(", ")),
            duration: started.elapsed(),
        }
    }
}
