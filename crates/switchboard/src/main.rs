// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Switchboard - routes natural-language requests to specialist models.
//!
//! This is the binary entry point: it wires configuration, the Ollama
//! provider, and the intent router together, and presents routing decisions
//! on the command line. Transport integrations hand their messages to the
//! same router this binary drives.

mod doctor;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use switchboard_config::SwitchboardConfig;
use switchboard_ollama::OllamaProvider;
use switchboard_router::{IntentRouter, RoutingDecision};

/// Switchboard - routes natural-language requests to specialist models.
#[derive(Parser, Debug)]
#[command(name = "switchboard", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a request and print the routing decision.
    Route {
        /// The request text to classify.
        text: Vec<String>,
        /// Print the full decision as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run diagnostic checks against the deployment.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the resolved configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match switchboard_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            switchboard_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let exit_code = match cli.command {
        Commands::Route { text, json } => run_route(&config, &text.join(" "), json).await,
        Commands::Doctor { plain } => match doctor::run_doctor(&config, plain).await {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("switchboard doctor: {e}");
                1
            }
        },
        Commands::Config => {
            match toml::to_string_pretty(&config) {
                Ok(rendered) => {
                    println!("{rendered}");
                    0
                }
                Err(e) => {
                    eprintln!("switchboard: failed to render config: {e}");
                    1
                }
            }
        }
    };

    std::process::exit(exit_code);
}

async fn run_route(config: &SwitchboardConfig, text: &str, json: bool) -> i32 {
    if text.trim().is_empty() {
        eprintln!("switchboard route: no request text given");
        return 2;
    }

    let provider = match OllamaProvider::new(config) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            eprintln!("switchboard: {e}");
            return 1;
        }
    };

    let router = IntentRouter::new(provider, config);
    let decision = router.classify(text, None).await;

    if json {
        match serde_json::to_string_pretty(&decision) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("switchboard: failed to render decision: {e}");
                return 1;
            }
        }
    } else {
        print_decision(&decision);
    }
    0
}

/// Present a decision the way the dispatch layer would: clarification
/// questions back to the user, or the dispatch tuple to a specialist.
fn print_decision(decision: &RoutingDecision) {
    if decision.requires_clarification {
        println!("Clarification needed before dispatch:");
        for question in &decision.suggested_questions {
            println!("  - {question}");
        }
        return;
    }

    println!(
        "dispatch -> {} (category: {}, priority: {}, complexity: {}, confidence: {:.2})",
        decision.specialist_model,
        decision.category,
        decision.priority,
        decision.complexity,
        decision.confidence
    );
    for entity in &decision.entities {
        println!("  entity: {} = {}", entity.entity_type, entity.value);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("switchboard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
