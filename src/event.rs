use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use thiserror::Error;

/// Errors that can occur when reading a stream of events
#[derive(Debug, Error)]
pub enum EventParseError {
    #[error("Failed to parse event array: {0}")]
    Array(#[source] serde_json::Error),

    #[error("Failed to parse event on line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// A single activity event as returned by the GitHub Events API.
///
/// The payload is kept as undecoded JSON; conditions decode only the fields
/// they need.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "payload", default, skip_serializing_if = "Option::is_none")]
    pub raw_payload: Option<Box<RawValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<Actor>,
    #[serde(rename = "org", default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(rename = "repo", default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: i64,
    /// Full name in `owner/repo` form
    #[serde(default)]
    pub name: String,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: Some(event_type.into()),
            ..Self::default()
        }
    }

    /// Attach a raw JSON payload. Fails if `json` is not valid JSON.
    pub fn with_payload(mut self, json: impl Into<String>) -> Result<Self, serde_json::Error> {
        self.raw_payload = Some(RawValue::from_string(json.into())?);
        Ok(self)
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    pub fn with_organization(mut self, id: i64) -> Self {
        self.organization = Some(Organization {
            id,
            ..Organization::default()
        });
        self
    }

    pub fn with_repository(mut self, id: i64) -> Self {
        self.repository = Some(Repository {
            id,
            ..Repository::default()
        });
        self
    }

    /// Event type, or the empty string when the event carries none
    pub fn event_type(&self) -> &str {
        self.event_type.as_deref().unwrap_or_default()
    }

    /// Visibility, treating an unknown value as private
    pub fn is_public(&self) -> bool {
        self.public.unwrap_or(false)
    }

    pub fn raw_payload(&self) -> Option<&RawValue> {
        self.raw_payload.as_deref()
    }
}

/// Parse events from either a JSON array or newline-delimited JSON.
pub fn parse_events(input: &str) -> Result<Vec<Event>, EventParseError> {
    if input.trim_start().starts_with('[') {
        return serde_json::from_str(input).map_err(EventParseError::Array);
    }

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| EventParseError::Line {
                line: idx + 1,
                source,
            })
        })
        .collect()
}
