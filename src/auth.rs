//! Access-token loading for the Gmail API.
//!
//! The token is produced elsewhere (Google's OAuth tooling writes an
//! authorized-user `token.json`); this module only reads it. No refresh.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const TOKEN_ENV: &str = "GMAIL_ACCESS_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no access token: set GMAIL_ACCESS_TOKEN or save a token file (looked in: {searched})")]
    NotFound { searched: String },

    #[error("failed to read token file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid token file {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// A live bearer token.
#[derive(Clone)]
pub struct Credentials {
    access_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

pub trait AuthProvider {
    fn load_credentials(&self) -> Result<Credentials, AuthError>;
}

/// Authorized-user JSON as written by Google's client libraries.
/// Only the access token is used.
#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(alias = "access_token")]
    token: String,
}

/// Token from an explicit value (usually the environment), else the first
/// existing token file.
#[derive(Debug, Clone)]
pub struct TokenAuth {
    env_token: Option<String>,
    candidates: Vec<PathBuf>,
}

impl TokenAuth {
    pub fn new(env_token: Option<String>, candidates: Vec<PathBuf>) -> Self {
        Self {
            env_token: env_token.filter(|t| !t.trim().is_empty()),
            candidates,
        }
    }

    /// Read [`TOKEN_ENV`] from the process environment.
    pub fn from_env(candidates: Vec<PathBuf>) -> Self {
        Self::new(std::env::var(TOKEN_ENV).ok(), candidates)
    }
}

impl AuthProvider for TokenAuth {
    fn load_credentials(&self) -> Result<Credentials, AuthError> {
        if let Some(ref token) = self.env_token {
            tracing::debug!("using access token from {}", TOKEN_ENV);
            return Ok(Credentials::new(token.trim()));
        }
        for path in &self.candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "using token file");
                return read_token_file(path);
            }
        }
        Err(AuthError::NotFound {
            searched: self
                .candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

fn read_token_file(path: &Path) -> Result<Credentials, AuthError> {
    let data = std::fs::read(path).map_err(|source| AuthError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: TokenFile = serde_json::from_slice(&data).map_err(|e| AuthError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if parsed.token.trim().is_empty() {
        return Err(AuthError::Invalid {
            path: path.to_path_buf(),
            reason: "token is empty".to_string(),
        });
    }
    Ok(Credentials::new(parsed.token.trim()))
}
