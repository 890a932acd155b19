//! Path resolution for config, token and output files.
//!
//! Everything is relative to the current directory unless overridden, with
//! the OS config dir as the last place to look for a saved token.

use std::path::{Path, PathBuf};

pub const CONFIG_DOTFILE: &str = ".gmail-labels.toml";
pub const CONFIG_FILE: &str = "gmail-labels.toml";
pub const DEFAULT_OUTPUT: &str = "gmail_labels.json";
pub const TOKEN_FILE: &str = "token.json";

/// Return the OS-native config directory for gmail-labels.
pub fn app_config_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "gmail-labels") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        home_dir().join(".config").join("gmail-labels")
    }
}

/// Resolve the config file: explicit path, then .gmail-labels.toml, then
/// gmail-labels.toml in `dir`.
pub fn config_file(explicit: Option<&Path>, dir: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let dotfile = dir.join(CONFIG_DOTFILE);
    if dotfile.exists() {
        return dotfile;
    }
    let plain = dir.join(CONFIG_FILE);
    if plain.exists() {
        return plain;
    }
    // Default to the dotfile (for creation)
    dotfile
}

/// Candidate token files in lookup order.
pub fn token_candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    match configured {
        Some(p) => vec![p.to_path_buf()],
        None => vec![PathBuf::from(TOKEN_FILE), app_config_dir().join(TOKEN_FILE)],
    }
}

/// Get the user's home directory.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand ~ to home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}
