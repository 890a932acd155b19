//! Integration tests for the Gmail HTTP client (src/gmail/client.rs) against
//! a local mockito server.

mod common;

use common::{LABELS_PATH, create_mock, label, list_mock};
use gmail_labels::auth::Credentials;
use gmail_labels::gmail::{ApiError, GmailClient, LabelService, NewLabel};
use mockito::Matcher;
use pretty_assertions::assert_eq;

fn client(base: &str) -> GmailClient {
    GmailClient::new(Credentials::new("test-token"), base, "me")
}

#[test]
fn test_list_labels_sends_bearer_and_decodes() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", LABELS_PATH)
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"labels": [
                {"id": "INBOX", "name": "INBOX", "type": "system"},
                {"id": "Label_1", "name": "Work", "type": "user",
                 "labelListVisibility": "labelShow", "messageListVisibility": "show"}
            ]}"#,
        )
        .expect(1)
        .create();

    let labels = client(&server.url()).list_labels().unwrap();
    assert_eq!(labels, vec![label("INBOX", "INBOX"), label("Work", "Label_1")]);
    mock.assert();
}

#[test]
fn test_create_label_posts_visibility() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", LABELS_PATH)
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::Json(serde_json::json!({
            "name": "Work",
            "labelListVisibility": "labelShow",
            "messageListVisibility": "show"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": "Label_42", "name": "Work",
                "labelListVisibility": "labelShow", "messageListVisibility": "show"}"#,
        )
        .expect(1)
        .create();

    let created = client(&server.url())
        .create_label(&NewLabel::visible("Work"))
        .unwrap();
    assert_eq!(created, label("Work", "Label_42"));
    mock.assert();
}

#[test]
fn test_error_status_carries_google_message() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", LABELS_PATH)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error": {"code": 401,
                "message": "Request had invalid authentication credentials.",
                "status": "UNAUTHENTICATED"}}"#,
        )
        .create();

    let err = client(&server.url()).list_labels().unwrap_err();
    match err {
        ApiError::Status { code, message } => {
            assert_eq!(code, 401);
            assert_eq!(message, "Request had invalid authentication credentials.");
        }
        other => panic!("expected Status, got {other:?}"),
    }
    mock.assert();
}

#[test]
fn test_malformed_label_is_decode_error() {
    let mut server = mockito::Server::new();
    let mock = list_mock(&mut server, r#"{"labels": [{"name": "Work"}]}"#, 1);

    let err = client(&server.url()).list_labels().unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    mock.assert();
}

#[test]
fn test_non_json_body_is_decode_error() {
    let mut server = mockito::Server::new();
    let mock = create_mock(&mut server, 200, "<html>oops</html>", 1);

    let err = client(&server.url())
        .create_label(&NewLabel::visible("Work"))
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    mock.assert();
}
