use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::Input;
use crate::commands::Workspace;
use crate::exit::Exit;
use crate::render::pick_renderer;
use crate::render::render_parse_error;

#[derive(Debug, Parser)]
pub struct Parse {
    /// Markup file to parse. Reads stdin when omitted or `-`.
    file: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

#[async_trait]
impl Command for Parse {
    async fn execute(&self, _args: &Args) -> Result<Exit> {
        let workspace = Workspace::load()?;
        let input = Input::read(self.file.as_deref())?;

        match workspace.parser().parse(&input.source) {
            Ok(nodes) => {
                let json = if self.compact {
                    serde_json::to_string(&nodes)?
                } else {
                    serde_json::to_string_pretty(&nodes)?
                };
                println!("{json}");
                Ok(Exit::success())
            }
            Err(error) => {
                let rendered =
                    render_parse_error(&input.source, &input.label, &error, &pick_renderer());
                println!("{rendered}\n");
                Ok(Exit::error().with_message(format!(
                    "Failed to parse {} ({} error).",
                    input.label,
                    error.kind.code()
                )))
            }
        }
    }
}
