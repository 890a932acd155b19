//! Blocking HTTP client for `users.labels`.

use serde::de::DeserializeOwned;

use super::types::{self, Label, ListLabelsResponse, NewLabel};
use super::{ApiError, LabelService};
use crate::auth::Credentials;

pub struct GmailClient {
    agent: ureq::Agent,
    credentials: Credentials,
    labels_url: String,
}

impl GmailClient {
    pub fn new(credentials: Credentials, api_base: &str, user_id: &str) -> Self {
        let base = api_base.trim_end_matches('/');
        Self {
            agent: ureq::AgentBuilder::new().build(),
            credentials,
            labels_url: format!("{}/gmail/v1/users/{}/labels", base, user_id),
        }
    }

    pub fn labels_url(&self) -> &str {
        &self.labels_url
    }
}

impl LabelService for GmailClient {
    fn list_labels(&self) -> Result<Vec<Label>, ApiError> {
        tracing::debug!(url = %self.labels_url, "GET labels");
        let result = self
            .agent
            .get(&self.labels_url)
            .set("Authorization", &self.credentials.bearer())
            .set("Accept", "application/json")
            .call();
        let resp: ListLabelsResponse = decode(&read_body(result)?)?;
        Ok(resp.labels)
    }

    fn create_label(&self, label: &NewLabel) -> Result<Label, ApiError> {
        tracing::debug!(url = %self.labels_url, name = %label.name, "POST label");
        let result = self
            .agent
            .post(&self.labels_url)
            .set("Authorization", &self.credentials.bearer())
            .set("Accept", "application/json")
            .send_json(label);
        decode(&read_body(result)?)
    }
}

/// Turn a ureq outcome into the response text, mapping non-2xx statuses and
/// transport failures onto [`ApiError`].
fn read_body(result: Result<ureq::Response, ureq::Error>) -> Result<String, ApiError> {
    match result {
        Ok(resp) => resp
            .into_string()
            .map_err(|e| ApiError::Transport(e.to_string())),
        Err(ureq::Error::Status(code, resp)) => {
            let body = resp.into_string().unwrap_or_default();
            Err(ApiError::Status {
                code,
                message: types::error_message(&body),
            })
        }
        Err(ureq::Error::Transport(t)) => Err(ApiError::Transport(t.to_string())),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
