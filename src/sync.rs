//! `sync` and `list` commands: wire config, auth and the Gmail client into
//! the reconciler and report the outcome.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::auth::{AuthProvider, TokenAuth};
use crate::config::{self, Config};
use crate::gmail::GmailClient;
use crate::reconcile::{FailureKind, LabelMapping, ReconcileFailure, Reconciler};
use crate::resolve;

#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Replaces the configured label set when non-empty.
    pub labels: Vec<String>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    /// Exit 1 on a failed reconciliation instead of 0.
    pub strict: bool,
}

/// Build an authenticated client. Auth problems count as a failed fetch.
pub fn connect(config: &Config) -> Result<GmailClient, ReconcileFailure> {
    let auth = TokenAuth::from_env(resolve::token_candidates(config.token_path().as_deref()));
    let credentials = auth.load_credentials().map_err(|e| {
        tracing::warn!(error = %e, "no usable credentials");
        ReconcileFailure::fetch(e.to_string())
    })?;
    Ok(GmailClient::new(credentials, &config.api_base, &config.user_id))
}

/// gmail-labels sync [--label NAME]... [--output PATH] [--dry-run] [--strict]
pub fn run(config_path: &Path, opts: &SyncOptions) -> Result<()> {
    let config = config::load(config_path)?;
    let desired = if opts.labels.is_empty() {
        config.desired_labels()?
    } else {
        config::normalize_labels(&opts.labels)?
    };
    let output = opts.output.clone().unwrap_or_else(|| config.output_path());
    tracing::debug!(labels = ?desired, output = %output.display(), "sync");

    let client = match connect(&config) {
        Ok(c) => c,
        Err(failure) => return finish(Err(failure), opts.strict),
    };
    let reconciler = Reconciler::new(client);

    if opts.dry_run {
        return match reconciler.plan(&desired) {
            Ok(missing) => {
                print_plan(&desired, &missing);
                Ok(())
            }
            Err(failure) => finish(Err(failure), opts.strict),
        };
    }

    finish(reconciler.run(&desired, &output), opts.strict)
}

fn print_plan(desired: &[String], missing: &[String]) {
    for name in desired {
        if missing.contains(name) {
            println!("  would create: {}", name);
        } else {
            println!("  exists:       {}", name);
        }
    }
    println!("\nDry run: {} of {} labels would be created.", missing.len(), desired.len());
}

fn finish(outcome: Result<LabelMapping, ReconcileFailure>, strict: bool) -> Result<()> {
    match outcome {
        Ok(mapping) => {
            println!("\nSync complete ({} labels).", mapping.len());
            Ok(())
        }
        Err(failure) => {
            eprintln!("Error {}", failure);
            match failure.kind {
                FailureKind::Fetch => {}
                FailureKind::Create => {
                    eprintln!(
                        "No mapping file written; {} labels were known at the time of failure.",
                        failure.mapping.len()
                    );
                }
                FailureKind::Persist => {
                    // Print the mapping so the run's result is not lost.
                    if let Ok(json) = serde_json::to_string_pretty(&failure.mapping) {
                        println!("{}", json);
                    }
                }
            }
            if strict {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// gmail-labels list
pub fn list(config_path: &Path) -> Result<()> {
    let config = config::load(config_path)?;
    let client = connect(&config)?;
    let mapping = Reconciler::new(client).fetch_existing()?;
    if mapping.is_empty() {
        println!("No labels.");
        return Ok(());
    }
    let width = mapping.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (name, id) in &mapping {
        println!("  {:<width$}  {}", name, id, width = width);
    }
    Ok(())
}
