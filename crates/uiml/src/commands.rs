mod components;
mod parse;
mod repair;

use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use clap::Subcommand;
use uiml_conf::Settings;
use uiml_markup::ComponentSpecs;
use uiml_markup::MarkupParser;

use crate::args::Args;
use crate::exit::Exit;

#[async_trait]
pub trait Command {
    async fn execute(&self, args: &Args) -> Result<Exit>;
}

#[derive(Debug, Subcommand)]
pub enum UimlCommand {
    /// Parse markup and print the component tree as JSON
    Parse(self::parse::Parse),
    /// Parse markup, asking a chat model to fix errors
    Repair(self::repair::Repair),
    /// List the component names markup may use
    Components(self::components::Components),
}

#[async_trait]
impl Command for UimlCommand {
    async fn execute(&self, args: &Args) -> Result<Exit> {
        match self {
            Self::Parse(cmd) => cmd.execute(args).await,
            Self::Repair(cmd) => cmd.execute(args).await,
            Self::Components(cmd) => cmd.execute(args).await,
        }
    }
}

/// Settings for the current directory plus the registry they describe.
struct Workspace {
    settings: Settings,
    registry: ComponentSpecs,
}

impl Workspace {
    fn load() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to get current directory")?;
        let settings = Settings::new(&root).context("Failed to load settings")?;

        let mut registry =
            ComponentSpecs::builtin().context("Failed to load built-in components")?;
        if let Some(path) = &settings.components {
            let path = if path.is_relative() {
                root.join(path)
            } else {
                path.clone()
            };
            let extra = ComponentSpecs::load_from_path(&path)
                .with_context(|| format!("Failed to load components from {}", path.display()))?;
            tracing::debug!(path = %path.display(), count = extra.len(), "merged user components");
            registry.merge(extra);
        }

        Ok(Self {
            settings,
            registry,
        })
    }

    fn parser(&self) -> MarkupParser {
        MarkupParser::new(Arc::new(self.registry.clone()))
    }
}

/// Markup read from a file, or from stdin when no file (or `-`) is given.
struct Input {
    label: String,
    path: Option<PathBuf>,
    source: String,
}

impl Input {
    fn read(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) if path != Path::new("-") => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(Self {
                    label: path.display().to_string(),
                    path: Some(path.to_path_buf()),
                    source,
                })
            }
            _ => {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .context("Failed to read stdin")?;
                Ok(Self {
                    label: "<stdin>".to_string(),
                    path: None,
                    source,
                })
            }
        }
    }
}
