use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use uiml_markup::valid_component_names;
use uiml_markup::ComponentRegistry;
use uiml_markup::Precomposed;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::Workspace;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Components {
    /// Also show whether each component accepts children.
    #[arg(long, short)]
    long: bool,
}

#[async_trait]
impl Command for Components {
    async fn execute(&self, _args: &Args) -> Result<Exit> {
        let workspace = Workspace::load()?;
        let registry = &workspace.registry;

        for name in valid_component_names(registry) {
            if !self.long {
                println!("{name}");
                continue;
            }
            let children = registry
                .lookup(&name)
                .map_or(true, |spec| spec.accepts_children);
            let note = if children { "children" } else { "leaf" };
            println!("{name:<16} {note}");
        }

        for shorthand in Precomposed::ALL {
            if self.long {
                println!(
                    "{:<16} precomposed, {} nodes",
                    shorthand.name(),
                    shorthand.node_count()
                );
            } else {
                println!("{}", shorthand.name());
            }
        }

        Ok(Exit::success())
    }
}
