#![allow(clippy::exit)]

mod cli;
mod commands;
mod config;
mod context;
mod output;
mod prompt;
mod tables;
mod timing;

use anyhow::Result;
use clap::Parser as _;

use crate::cli::{Cli, Commands};
use crate::context::Session;
use crate::output::Output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    timing::init_tracing(cli.verbose, cli.timing);

    if let Err(err) = run(cli).await {
        Output::new().error(format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        commands::generate_completions(shell);
        return Ok(());
    }

    let session = Session::open(cli.api_url.as_deref())?;
    match cli.command {
        Commands::Login { email } => commands::run_login(session, email).await,
        Commands::Logout => commands::run_logout(session).await,
        Commands::Whoami => commands::run_whoami(&session).await,
        Commands::Dashboard => commands::run_dashboard(&session).await,
        Commands::Users { command } => commands::run_users(&session, command).await,
        Commands::Requests { command } => commands::run_requests(&session, command).await,
        Commands::Completions { .. } => Ok(()),
    }
}
