use clap::{Parser, Subcommand};

/// Inspect and exercise the reelgraph operator catalog
#[derive(Parser, Debug)]
#[command(name = "reelgraph")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the operators of the built-in catalog
    #[command(visible_alias = "ls")]
    List {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show an operator's plugs
    Describe {
        /// Catalog name of the operator (e.g. folder.get)
        operator: String,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a folder workflow against the in-memory host
    Demo {
        /// Folder path to resolve, created when missing
        #[arg(long, default_value = "Footage/Day 01/Cam A")]
        path: String,
    },
}
