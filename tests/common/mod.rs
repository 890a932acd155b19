//! Shared test fixtures and helpers.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::Path;

use gmail_labels::gmail::{ApiError, Label, LabelService, NewLabel};
use gmail_labels::reconcile::LabelMapping;

pub fn label(name: &str, id: &str) -> Label {
    Label {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

pub fn mapping(pairs: &[(&str, &str)]) -> LabelMapping {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// In-memory label service that records every call.
#[derive(Default)]
pub struct FakeService {
    pub existing: Vec<Label>,
    /// Make `list_labels` fail with this message.
    pub fail_list: Option<String>,
    /// Make `create_label` fail for this name.
    pub fail_create_on: Option<String>,
    pub list_calls: Cell<usize>,
    pub created: RefCell<Vec<NewLabel>>,
}

impl FakeService {
    pub fn with_labels(existing: Vec<Label>) -> Self {
        Self {
            existing,
            ..Self::default()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.created.borrow().len()
    }
}

impl LabelService for FakeService {
    fn list_labels(&self) -> Result<Vec<Label>, ApiError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if let Some(ref msg) = self.fail_list {
            return Err(ApiError::Status {
                code: 401,
                message: msg.clone(),
            });
        }
        Ok(self.existing.clone())
    }

    fn create_label(&self, new_label: &NewLabel) -> Result<Label, ApiError> {
        if self.fail_create_on.as_deref() == Some(new_label.name.as_str()) {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        let mut created = self.created.borrow_mut();
        created.push(new_label.clone());
        Ok(label(&new_label.name, &format!("Label_{}", 100 + created.len())))
    }
}

pub const LABELS_PATH: &str = "/gmail/v1/users/me/labels";

/// `GET labels` answering `body`, expected `times` times.
pub fn list_mock(server: &mut mockito::ServerGuard, body: &str, times: usize) -> mockito::Mock {
    server
        .mock("GET", LABELS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(times)
        .create()
}

/// `POST labels` answering `status` and `body`, expected `times` times.
pub fn create_mock(
    server: &mut mockito::ServerGuard,
    status: usize,
    body: &str,
    times: usize,
) -> mockito::Mock {
    server
        .mock("POST", LABELS_PATH)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(times)
        .create()
}

/// Write a config file pointing at a mock server.
pub fn write_config(dir: &Path, api_base: &str, labels: &[&str]) {
    let labels = labels
        .iter()
        .map(|l| format!("\"{}\"", l))
        .collect::<Vec<_>>()
        .join(", ");
    let content = format!(
        "labels = [{labels}]\napi_base = \"{api_base}\"\n",
        labels = labels,
        api_base = api_base,
    );
    std::fs::write(dir.join(".gmail-labels.toml"), content).unwrap();
}
