//! Gmail API wire types: Label, NewLabel, list response, error body.

use serde::{Deserialize, Serialize};

/// A label as returned by `users.labels.list` / `users.labels.create`.
/// Other fields in the response are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelListVisibility {
    #[serde(rename = "labelShow")]
    Show,
    #[serde(rename = "labelShowIfUnread")]
    ShowIfUnread,
    #[serde(rename = "labelHide")]
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageListVisibility {
    #[serde(rename = "show")]
    Show,
    #[serde(rename = "hide")]
    Hide,
}

/// Request body for `users.labels.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabel {
    pub name: String,
    pub label_list_visibility: LabelListVisibility,
    pub message_list_visibility: MessageListVisibility,
}

impl NewLabel {
    /// Shown in the label list and in the message list.
    pub fn visible(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label_list_visibility: LabelListVisibility::Show,
            message_list_visibility: MessageListVisibility::Show,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListLabelsResponse {
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Pull `error.message` out of a Google error body, falling back to the raw
/// text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}
