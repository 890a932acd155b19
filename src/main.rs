use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gmail_labels::cli::{Cli, Commands};
use gmail_labels::sync::SyncOptions;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let config_path = gmail_labels::resolve::config_file(cli.config.as_deref(), &cwd);

    match cli.command {
        None => gmail_labels::sync::run(&config_path, &SyncOptions::default()),
        Some(Commands::Sync {
            labels,
            output,
            dry_run,
            strict,
        }) => gmail_labels::sync::run(
            &config_path,
            &SyncOptions {
                labels,
                output,
                dry_run,
                strict,
            },
        ),
        Some(Commands::List) => gmail_labels::sync::list(&config_path),
        Some(Commands::AddLabel { label }) => {
            gmail_labels::config::add_label_cmd(&config_path, &label)
        }
    }
}
