use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gmail-labels",
    version,
    about = "Make sure a set of Gmail labels exists and save the name-to-id mapping",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Config file (default: .gmail-labels.toml or gmail-labels.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// With no subcommand, runs `sync` using the config file
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create missing labels and write the mapping file
    Sync {
        /// Label to ensure (repeatable; replaces the configured list)
        #[arg(long = "label", value_name = "NAME")]
        labels: Vec<String>,

        /// Mapping file to write
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Show what would be created without creating or writing anything
        #[arg(long)]
        dry_run: bool,

        /// Exit with status 1 if any step fails
        #[arg(long)]
        strict: bool,
    },

    /// List the account's labels
    List,

    /// Add a label name to the config file
    AddLabel {
        /// Label to add
        label: String,
    },
}
