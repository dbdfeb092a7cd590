use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use uiml_conf::Settings;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::UimlCommand;

/// Parse component markup, repair it with a chat model, or list the
/// components it may use.
#[derive(Parser)]
#[command(name = "uiml")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: UimlCommand,

    #[command(flatten)]
    pub args: Args,
}

/// Parse CLI arguments and execute the chosen command
pub async fn run(args: Vec<String>) -> Result<ExitCode> {
    let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
        e.exit();
    });

    // settings errors surface from the command itself
    let debug = std::env::current_dir()
        .ok()
        .and_then(|root| Settings::new(&root).ok())
        .is_some_and(|settings| settings.debug);
    crate::logging::init(&cli.args.global, debug);

    let exit = cli.command.execute(&cli.args).await?;
    Ok(exit.report(&cli.args.global))
}
