//! Gmail label API: list and create.

pub mod client;
pub mod types;

pub use self::client::GmailClient;
pub use self::types::{Label, LabelListVisibility, MessageListVisibility, NewLabel};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Gmail API returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// The two remote label operations the reconciler needs.
pub trait LabelService {
    fn list_labels(&self) -> Result<Vec<Label>, ApiError>;
    fn create_label(&self, label: &NewLabel) -> Result<Label, ApiError>;
}

impl<S: LabelService + ?Sized> LabelService for &S {
    fn list_labels(&self) -> Result<Vec<Label>, ApiError> {
        (**self).list_labels()
    }

    fn create_label(&self, label: &NewLabel) -> Result<Label, ApiError> {
        (**self).create_label(label)
    }
}
