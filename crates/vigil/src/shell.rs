// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vigil shell` command implementation.
//!
//! Launches an interactive REPL with colored prompt and readline history.
//! Every line is one question in a single session; the session's
//! conversation log backs `/history`.

use std::str::FromStr;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;
use vigil_agent::Session;
use vigil_config::model::VigilConfig;
use vigil_core::{TopicContext, VigilError};
use vigil_router::example_questions;

use crate::render;
use crate::runtime::Runtime;

/// A parsed line of shell input.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellInput<'a> {
    Quit,
    History,
    Help,
    Examples,
    /// `/context` with no argument clears the context.
    Context(Option<TopicContext>),
    Unknown(&'a str),
    Question(&'a str),
    Blank,
}

/// Classify one input line.
pub fn parse_input(line: &str) -> Result<ShellInput<'_>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ShellInput::Blank);
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Ok(ShellInput::Question(trimmed));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match name {
        "quit" | "exit" => Ok(ShellInput::Quit),
        "history" => Ok(ShellInput::History),
        "help" => Ok(ShellInput::Help),
        "examples" => Ok(ShellInput::Examples),
        "context" => match arg {
            None | Some("none") => Ok(ShellInput::Context(None)),
            Some(tag) => TopicContext::from_str(tag)
                .map(|c| ShellInput::Context(Some(c)))
                .map_err(|_| format!("unknown context '{tag}'")),
        },
        _ => Ok(ShellInput::Unknown(trimmed)),
    }
}

/// Runs the `vigil shell` interactive REPL.
pub async fn run_shell(
    config: &VigilConfig,
    context: Option<TopicContext>,
) -> Result<(), VigilError> {
    let runtime = Runtime::start(config).await?;
    let mut session = Session::new(runtime.pipeline.clone());
    session.set_context(context);

    let mut rl = DefaultEditor::new()
        .map_err(|e| VigilError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", format!("{} shell", config.app.name).bold().green());
    println!(
        "Ask a security question. Type {} for commands, {} to exit.\n",
        "/help".yellow(),
        "/quit".yellow()
    );

    loop {
        let prompt = match session.context() {
            Some(context) => format!("{}[{}]> ", config.app.name.green(), context),
            None => format!("{}> ", config.app.name.green()),
        };
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };

        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                eprintln!("{}", message.yellow());
                continue;
            }
        };
        if input != ShellInput::Blank {
            let _ = rl.add_history_entry(line.as_str());
        }

        match input {
            ShellInput::Blank => {}
            ShellInput::Quit => break,
            ShellInput::Help => print_help(),
            ShellInput::Examples => {
                for example in example_questions(session.context()) {
                    println!("  - {example}");
                }
            }
            ShellInput::History => print_history(&session),
            ShellInput::Context(context) => {
                session.set_context(context);
                match context {
                    Some(c) => println!("{}", format!("context set to {c}").dimmed()),
                    None => println!("{}", "context cleared".dimmed()),
                }
            }
            ShellInput::Unknown(command) => {
                eprintln!("{}", format!("unknown command {command}, try /help").yellow());
            }
            ShellInput::Question(text) => {
                let turn = session.ask(text).await;
                let response = turn.entry.response();
                let output = render::render_response(response, &turn.suggestions);
                if response.succeeded() {
                    println!("{output}");
                } else {
                    println!("{}", output.red());
                }
                debug!(sequence = turn.entry.sequence(), source = ?turn.source, "turn complete");
            }
        }
    }

    println!(
        "{}",
        format!("{} question(s) this session", session.log().len()).dimmed()
    );
    runtime.shutdown().await;
    Ok(())
}

fn print_help() {
    println!("  /context <tag>  set topic context (general, incidents, users, vulnerabilities, threats, trends)");
    println!("  /context        clear topic context");
    println!("  /examples       example questions for the current context");
    println!("  /history        questions asked this session");
    println!("  /quit           exit");
}

fn print_history(session: &Session) {
    if session.log().is_empty() {
        println!("{}", "no questions yet".dimmed());
        return;
    }
    for entry in session.log().all() {
        let response = entry.response();
        let outcome = match response.error() {
            Some(error) => format!("{}", error.reason).red(),
            None => {
                let rows = response.rows().map_or(0, |t| t.row_count());
                format!("{rows} row(s), {}", response.chart_hint()).green()
            }
        };
        let context = entry
            .question()
            .context()
            .map(|c| format!(" [{c}]"))
            .unwrap_or_default();
        println!(
            "  {:>3}. {}{} {} {}",
            entry.sequence(),
            entry.question().text(),
            context.dimmed(),
            "→".dimmed(),
            outcome
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_question() {
        assert_eq!(
            parse_input("  which users failed MFA?  "),
            Ok(ShellInput::Question("which users failed MFA?"))
        );
        assert_eq!(parse_input("   "), Ok(ShellInput::Blank));
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_input("/quit"), Ok(ShellInput::Quit));
        assert_eq!(parse_input("/exit"), Ok(ShellInput::Quit));
        assert_eq!(parse_input("/history"), Ok(ShellInput::History));
        assert_eq!(parse_input("/examples"), Ok(ShellInput::Examples));
        assert_eq!(parse_input("/frobnicate"), Ok(ShellInput::Unknown("/frobnicate")));
    }

    #[test]
    fn context_command_parses_tags() {
        assert_eq!(
            parse_input("/context Threats"),
            Ok(ShellInput::Context(Some(TopicContext::Threats)))
        );
        assert_eq!(parse_input("/context"), Ok(ShellInput::Context(None)));
        assert_eq!(parse_input("/context none"), Ok(ShellInput::Context(None)));
        assert!(parse_input("/context weather").is_err());
    }
}
