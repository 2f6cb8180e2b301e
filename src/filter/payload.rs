//! Partial decoding of event payloads.
//!
//! Each accessor decodes exactly one field path. A missing path or a value of
//! the wrong shape is a [`PayloadError`], never an empty default, so callers
//! can tell absent data apart from data that simply does not compare equal.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("event has no payload")]
    Missing,

    #[error("payload has no usable '{path}': {source}")]
    Decode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct Action {
    action: String,
}

#[derive(Deserialize)]
struct Issue<T> {
    issue: T,
}

#[derive(Deserialize)]
struct Labels {
    labels: Vec<Label>,
}

/// Labels arrive either as bare names or as label objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Name(String),
    Object { name: String },
}

impl Label {
    fn into_name(self) -> String {
        match self {
            Label::Name(name) | Label::Object { name } => name,
        }
    }
}

#[derive(Deserialize)]
struct Milestone {
    milestone: Title,
}

#[derive(Deserialize)]
struct Title {
    title: String,
}

#[derive(Deserialize)]
struct Body {
    body: String,
}

fn decode<T: DeserializeOwned>(
    raw: Option<&RawValue>,
    path: &'static str,
) -> Result<T, PayloadError> {
    let raw = raw.ok_or(PayloadError::Missing)?;
    serde_json::from_str(raw.get()).map_err(|source| PayloadError::Decode { path, source })
}

/// `payload.action`
pub fn action(raw: Option<&RawValue>) -> Result<String, PayloadError> {
    decode::<Action>(raw, "action").map(|p| p.action)
}

/// `payload.issue.labels[]`, as label names
pub fn issue_labels(raw: Option<&RawValue>) -> Result<Vec<String>, PayloadError> {
    decode::<Issue<Labels>>(raw, "issue.labels").map(|p| {
        p.issue
            .labels
            .into_iter()
            .map(Label::into_name)
            .collect()
    })
}

/// `payload.issue.milestone.title`
pub fn issue_milestone_title(raw: Option<&RawValue>) -> Result<String, PayloadError> {
    decode::<Issue<Milestone>>(raw, "issue.milestone.title").map(|p| p.issue.milestone.title)
}

/// `payload.issue.title`
pub fn issue_title(raw: Option<&RawValue>) -> Result<String, PayloadError> {
    decode::<Issue<Title>>(raw, "issue.title").map(|p| p.issue.title)
}

/// `payload.issue.body`
pub fn issue_body(raw: Option<&RawValue>) -> Result<String, PayloadError> {
    decode::<Issue<Body>>(raw, "issue.body").map(|p| p.issue.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> Option<Box<RawValue>> {
        Some(RawValue::from_string(json.to_string()).unwrap())
    }

    #[test]
    fn test_no_payload_is_missing() {
        assert!(matches!(action(None), Err(PayloadError::Missing)));
        assert!(matches!(issue_labels(None), Err(PayloadError::Missing)));
    }

    #[test]
    fn test_action_decodes_only_its_field() {
        let payload = raw(r#"{"action":"opened","issue":{"number":1}}"#);
        assert_eq!(action(payload.as_deref()).unwrap(), "opened");
    }

    #[test]
    fn test_missing_path_is_decode_error() {
        let payload = raw(r#"{"ref":"refs/heads/main"}"#);
        match action(payload.as_deref()) {
            Err(PayloadError::Decode { path, .. }) => assert_eq!(path, "action"),
            other => panic!("expected decode error, got {other:?}"),
        }
        assert!(issue_title(payload.as_deref()).is_err());
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let payload = raw(r#"{"action":42}"#);
        assert!(action(payload.as_deref()).is_err());

        let payload = raw(r#"{"issue":{"labels":"bug"}}"#);
        assert!(issue_labels(payload.as_deref()).is_err());
    }

    #[test]
    fn test_null_milestone_is_decode_error() {
        let payload = raw(r#"{"issue":{"milestone":null}}"#);
        assert!(issue_milestone_title(payload.as_deref()).is_err());
    }

    #[test]
    fn test_labels_accept_names_and_objects() {
        let payload = raw(r#"{"issue":{"labels":["bug",{"name":"help wanted","color":"008672"}]}}"#);
        assert_eq!(
            issue_labels(payload.as_deref()).unwrap(),
            vec!["bug".to_string(), "help wanted".to_string()]
        );
    }

    #[test]
    fn test_issue_body_and_title() {
        let payload = raw(r#"{"issue":{"title":"Crash on start","body":"stack trace"}}"#);
        assert_eq!(issue_title(payload.as_deref()).unwrap(), "Crash on start");
        assert_eq!(issue_body(payload.as_deref()).unwrap(), "stack trace");
    }
}
