//! Configuration: parse .gmail-labels.toml with defaults.
//!
//! ```toml
//! labels = ["Work", "Personal"]
//! output = "gmail_labels.json"
//! token_file = "~/.config/gmail-labels/token.json"
//! ```

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::resolve;

pub const DEFAULT_API_BASE: &str = "https://gmail.googleapis.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("label names must not be empty")]
    EmptyLabel,

    #[error("invalid user_id {0:?}: must be non-empty with no '/', '?', '#', '%' or whitespace")]
    InvalidUserId(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub token_file: Option<String>,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_labels() -> Vec<String> {
    vec!["Work".to_string()]
}
fn default_output() -> String {
    resolve::DEFAULT_OUTPUT.to_string()
}
fn default_user_id() -> String {
    "me".to_string()
}
fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            output: default_output(),
            token_file: None,
            user_id: default_user_id(),
            api_base: default_api_base(),
        }
    }
}

impl Config {
    pub fn output_path(&self) -> PathBuf {
        resolve::expand_tilde(&self.output)
    }

    pub fn token_path(&self) -> Option<PathBuf> {
        self.token_file
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(resolve::expand_tilde)
    }

    /// The validated desired set, in declaration order.
    pub fn desired_labels(&self) -> Result<Vec<String>, ConfigError> {
        normalize_labels(&self.labels)
    }
}

/// Reject blank names and drop repeats, keeping the first occurrence.
pub fn normalize_labels(names: &[String]) -> Result<Vec<String>, ConfigError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        if seen.insert(name.as_str()) {
            out.push(name.clone());
        }
    }
    Ok(out)
}

/// Load config from `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_user_id(&config.user_id)?;
    Ok(config)
}

/// `user_id` is a single URL path segment (`me` or an email address).
pub fn validate_user_id(user_id: &str) -> Result<(), ConfigError> {
    let bad = |c: char| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace();
    if user_id.is_empty() || user_id.contains(bad) {
        return Err(ConfigError::InvalidUserId(user_id.to_string()));
    }
    Ok(())
}

/// Add a label to the config's `labels` array.
///
/// Uses toml_edit for format-preserving edits. When the file has no
/// `labels` key yet, the default set is written out first so the new name
/// extends it rather than replacing it.
/// Returns Ok(true) if added, Ok(false) if already present.
pub fn add_label_to_config(path: &Path, label: &str) -> Result<bool> {
    if label.trim().is_empty() {
        bail!(ConfigError::EmptyLabel);
    }
    let current = load(path)?;
    if current.labels.iter().any(|l| l == label) {
        return Ok(false);
    }

    let content = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };
    let mut doc = content.parse::<toml_edit::DocumentMut>()?;

    match doc.get_mut("labels") {
        Some(item) => {
            let Some(arr) = item.as_array_mut() else {
                bail!("'labels' in {} is not an array", path.display());
            };
            arr.push(label);
        }
        None => {
            let mut arr: toml_edit::Array = current.labels.iter().map(String::as_str).collect();
            arr.push(label);
            doc["labels"] = toml_edit::value(arr);
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, doc.to_string())?;
    Ok(true)
}

/// CLI: gmail-labels add-label LABEL
pub fn add_label_cmd(config_path: &Path, label: &str) -> Result<()> {
    let added = add_label_to_config(config_path, label)?;
    if added {
        println!("Added '{}' to {}", label, config_path.display());
    } else {
        println!("Label '{}' already in {}", label, config_path.display());
    }
    Ok(())
}
