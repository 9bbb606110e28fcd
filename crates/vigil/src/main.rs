// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vigil - ask security analytics questions from the terminal.
//!
//! This is the binary entry point.

mod ask;
mod doctor;
mod render;
mod runtime;
mod shell;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use colored::Colorize;
use vigil_config::model::VigilConfig;
use vigil_core::TopicContext;
use vigil_router::example_questions;

/// Crates whose logs follow `app.log_level`; everything else stays at warn.
const LOG_TARGETS: &[&str] = &[
    "vigil",
    "vigil_agent",
    "vigil_analyst",
    "vigil_config",
    "vigil_router",
    "vigil_storage",
];

/// Vigil - ask security analytics questions from the terminal.
#[derive(Parser, Debug)]
#[command(name = "vigil", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer one question and exit.
    Ask {
        /// The question, in plain language.
        question: String,
        /// Topic context (general, incidents, users, vulnerabilities, threats, trends).
        #[arg(long, value_parser = parse_context)]
        context: Option<TopicContext>,
        /// Print the response as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Launch an interactive question session.
    Shell {
        /// Starting topic context.
        #[arg(long, value_parser = parse_context)]
        context: Option<TopicContext>,
    },
    /// List example questions.
    Examples {
        /// Topic context to show examples for.
        #[arg(long, value_parser = parse_context)]
        context: Option<TopicContext>,
    },
    /// Check the warehouse and analyst.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn parse_context(value: &str) -> Result<TopicContext, String> {
    TopicContext::from_str(value).map_err(|_| {
        let valid: Vec<String> = TopicContext::ALL.iter().map(|c| c.to_string()).collect();
        format!("unknown context '{value}', expected one of: {}", valid.join(", "))
    })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => vigil_config::load_and_validate_path(path),
        None => vigil_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            vigil_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    let result = match cli.command {
        Commands::Ask {
            question,
            context,
            json,
        } => ask::run_ask(&config, &question, context, json).await,
        Commands::Shell { context } => shell::run_shell(&config, context).await,
        Commands::Examples { context } => {
            print_examples(context);
            Ok(())
        }
        Commands::Doctor { plain } => {
            if !doctor::run_doctor(&config, plain).await {
                std::process::exit(1);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn print_examples(context: Option<TopicContext>) {
    let heading = context.unwrap_or(TopicContext::General);
    println!("{}", format!("Example {heading} questions:").bold());
    for example in example_questions(context) {
        println!("  - {example}");
    }
}

/// Installs the stderr subscriber. `RUST_LOG` overrides `app.log_level`.
fn init_tracing(config: &VigilConfig) {
    use tracing_subscriber::EnvFilter;

    let level = &config.app.log_level;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = LOG_TARGETS.iter().map(|t| format!("{t}={level}")).collect();
        EnvFilter::new(format!("{},warn", directives.join(",")))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ask_accepts_context_and_json() {
        let cli = Cli::try_parse_from([
            "vigil",
            "ask",
            "Which users have unusual login patterns?",
            "--context",
            "users",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask {
                question,
                context,
                json,
            } => {
                assert_eq!(question, "Which users have unusual login patterns?");
                assert_eq!(context, Some(TopicContext::Users));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_context_is_rejected() {
        let err = Cli::try_parse_from(["vigil", "examples", "--context", "weather"]).unwrap_err();
        assert!(err.to_string().contains("unknown context 'weather'"));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["vigil", "doctor", "--config", "/tmp/vigil.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/vigil.toml")));
    }
}
