use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List { json } => commands::list_command(json),
        Commands::Describe { operator, json } => commands::describe_command(&operator, json),
        Commands::Demo { path } => commands::demo_command(&path),
    }
}
