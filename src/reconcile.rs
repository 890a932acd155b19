//! Label reconciliation: make every desired label exist and record the
//! name-to-id mapping.
//!
//! Failures come back as a [`ReconcileFailure`] value tagged with the step
//! that failed. Nothing here panics or retries; each failure ends the run.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::gmail::{LabelService, NewLabel};

/// Label name to label id. Sorted so the saved file is stable.
pub type LabelMapping = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Fetch,
    Create,
    Persist,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Fetch => "fetching labels",
            FailureKind::Create => "creating labels",
            FailureKind::Persist => "saving label mapping",
        };
        f.write_str(s)
    }
}

/// A failed step plus whatever mapping was known when it failed.
///
/// - `Fetch`: empty mapping.
/// - `Create`: existing labels plus those created before the failure.
/// - `Persist`: the complete mapping that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} failed: {message}")]
pub struct ReconcileFailure {
    pub kind: FailureKind,
    pub message: String,
    pub mapping: LabelMapping,
}

impl ReconcileFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>, mapping: LabelMapping) -> Self {
        Self {
            kind,
            message: message.into(),
            mapping,
        }
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Fetch, message, LabelMapping::new())
    }
}

pub struct Reconciler<S> {
    service: S,
}

impl<S: LabelService> Reconciler<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Read every label currently defined on the account.
    pub fn fetch_existing(&self) -> Result<LabelMapping, ReconcileFailure> {
        match self.service.list_labels() {
            Ok(labels) => {
                tracing::debug!(count = labels.len(), "fetched labels");
                Ok(labels.into_iter().map(|l| (l.name, l.id)).collect())
            }
            Err(e) => {
                tracing::warn!(error = %e, "label listing failed");
                Err(ReconcileFailure::fetch(e.to_string()))
            }
        }
    }

    /// Create each desired label missing from `existing`, in order.
    ///
    /// Stops at the first failed create. The failure carries `existing`
    /// plus everything created before it, since those labels now exist
    /// remotely.
    pub fn ensure_labels(
        &self,
        desired: &[String],
        mut existing: LabelMapping,
    ) -> Result<LabelMapping, ReconcileFailure> {
        for name in desired {
            if let Some(id) = existing.get(name) {
                println!("Label '{}' already exists with id: {}", name, id);
                continue;
            }
            match self.service.create_label(&NewLabel::visible(name.as_str())) {
                Ok(created) => {
                    println!("Created label '{}' with id: {}", name, created.id);
                    existing.insert(name.clone(), created.id);
                }
                Err(e) => {
                    tracing::warn!(label = %name, error = %e, "label create failed");
                    return Err(ReconcileFailure::new(
                        FailureKind::Create,
                        format!("'{}': {}", name, e),
                        existing,
                    ));
                }
            }
        }
        Ok(existing)
    }

    /// Names from `desired` that a sync would create. No writes.
    pub fn plan(&self, desired: &[String]) -> Result<Vec<String>, ReconcileFailure> {
        let existing = self.fetch_existing()?;
        Ok(missing_labels(desired, &existing))
    }

    /// Fetch, create what is missing, then write the mapping to
    /// `destination`. The file is only written once every label exists.
    pub fn run(
        &self,
        desired: &[String],
        destination: &Path,
    ) -> Result<LabelMapping, ReconcileFailure> {
        let existing = self.fetch_existing()?;
        let mapping = self.ensure_labels(desired, existing)?;
        persist(mapping, destination)
    }
}

pub fn missing_labels(desired: &[String], existing: &LabelMapping) -> Vec<String> {
    desired
        .iter()
        .filter(|name| !existing.contains_key(name.as_str()))
        .cloned()
        .collect()
}

/// Write `mapping` as pretty JSON (2-space indent).
///
/// Goes through a temp file in the same directory and a rename, so the
/// destination is either the old file or the complete new one.
pub fn persist(
    mapping: LabelMapping,
    destination: &Path,
) -> Result<LabelMapping, ReconcileFailure> {
    match write_json_atomic(&mapping, destination) {
        Ok(()) => {
            println!("Label mapping saved to {}", destination.display());
            Ok(mapping)
        }
        Err(e) => {
            tracing::warn!(path = %destination.display(), error = %e, "write failed");
            Err(ReconcileFailure::new(
                FailureKind::Persist,
                format!("{}: {}", destination.display(), e),
                mapping,
            ))
        }
    }
}

fn write_json_atomic(mapping: &LabelMapping, destination: &Path) -> std::io::Result<()> {
    let dir = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut json = serde_json::to_string_pretty(mapping).map_err(std::io::Error::other)?;
    json.push('\n');

    let mut tmp = temp_file_like(dir, destination)?;
    tmp.write_all(json.as_bytes())?;
    tmp.persist(destination).map_err(|e| e.error)?;
    Ok(())
}

/// Temp file whose mode matches what a plain overwrite would leave: the
/// destination's current permissions, or the umask default for a new file.
fn temp_file_like(dir: &Path, destination: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".gmail-labels").suffix(".tmp");
    match std::fs::metadata(destination) {
        Ok(meta) => {
            let tmp = builder.tempfile_in(dir)?;
            tmp.as_file().set_permissions(meta.permissions())?;
            Ok(tmp)
        }
        Err(_) => {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                // Subject to the umask at creation, like `File::create`.
                builder.permissions(std::fs::Permissions::from_mode(0o666));
            }
            builder.tempfile_in(dir)
        }
    }
}

/// Load a previously saved mapping.
pub fn load_mapping(path: &Path) -> anyhow::Result<LabelMapping> {
    let data = std::fs::read(path)?;
    let mapping: LabelMapping = serde_json::from_slice(&data)?;
    Ok(mapping)
}
