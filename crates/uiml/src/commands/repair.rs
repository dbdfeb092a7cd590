use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use uiml_repair::CostModel;
use uiml_repair::OpenAiChatClient;
use uiml_repair::Repairer;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::Input;
use crate::commands::Workspace;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Repair {
    /// Markup file to repair. Reads stdin when omitted or `-`.
    file: Option<PathBuf>,

    /// Repair attempts before giving up. Overrides `repair.max_attempts`.
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Chat model to ask. Overrides `llm.model`.
    #[arg(long)]
    model: Option<String>,

    /// Write the repaired markup back to FILE.
    #[arg(long, requires = "file")]
    write: bool,
}

#[async_trait]
impl Command for Repair {
    async fn execute(&self, _args: &Args) -> Result<Exit> {
        let workspace = Workspace::load()?;
        let settings = &workspace.settings;
        let input = Input::read(self.file.as_deref())?;

        let model = self.model.as_deref().unwrap_or(&settings.llm.model);
        let client = OpenAiChatClient::from_env(&settings.llm.base_url, model, &settings.llm.api_key_env)
            .context("Failed to set up the chat client")?;

        let repairer = Repairer::new(workspace.parser(), client)
            .with_cost_model(CostModel::new(
                settings.pricing.input_per_1k,
                settings.pricing.output_per_1k,
            ))
            .with_max_output_tokens(settings.repair.max_output_tokens)
            .with_temperature(settings.repair.temperature);

        let max_attempts = self.max_attempts.unwrap_or(settings.repair.max_attempts);
        let result = repairer
            .parse_markup_with_repair(&input.source, max_attempts)
            .await;

        println!("{}", serde_json::to_string_pretty(&result)?);

        if !result.success {
            return Ok(Exit::error().with_message(format!(
                "Could not repair {} after {} attempt(s) (estimated cost ${:.6}).",
                input.label, result.attempts, result.cost
            )));
        }

        if self.write && result.attempts > 0 {
            if let Some(path) = &input.path {
                std::fs::write(path, &result.source)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }

        Ok(Exit::success().with_message(format!(
            "Parsed {} after {} repair attempt(s) (estimated cost ${:.6}).",
            input.label, result.attempts, result.cost
        )))
    }
}
