// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vigil ask` command implementation.
//!
//! Resolves one question and prints the response, or its JSON form.

use colored::Colorize;
use vigil_agent::{Resolution, ResolutionSource};
use vigil_config::model::VigilConfig;
use vigil_core::{Question, TopicContext, VigilError};

use crate::render;
use crate::runtime::Runtime;

/// Runs `vigil ask`.
pub async fn run_ask(
    config: &VigilConfig,
    text: &str,
    context: Option<TopicContext>,
    json: bool,
) -> Result<(), VigilError> {
    let runtime = Runtime::start(config).await?;

    let question = match context {
        Some(context) => Question::new(text).with_context(context),
        None => Question::new(text),
    };
    let resolution = runtime.pipeline.resolve_detailed(&question).await;

    let output = if json {
        to_json(&resolution)
    } else {
        Ok(render::render_response(
            &resolution.response,
            &resolution.suggestions,
        ))
    };
    runtime.shutdown().await;

    let output = output?;
    if json {
        println!("{output}");
    } else {
        print_colored(&resolution, &output);
    }
    Ok(())
}

/// The response as pretty JSON.
pub fn to_json(resolution: &Resolution) -> Result<String, VigilError> {
    serde_json::to_string_pretty(&resolution.response)
        .map_err(|e| VigilError::Internal(format!("failed to serialize response: {e}")))
}

fn print_colored(resolution: &Resolution, output: &str) {
    if !resolution.response.succeeded() {
        print!("{}", output.red());
        return;
    }
    print!("{output}");
    if let ResolutionSource::Fallback { route, .. } = &resolution.source {
        println!("{}", format!("(answered from the {route} fallback query)").dimmed());
    }
}
