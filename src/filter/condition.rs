use super::error::FilterError;
use super::payload::{self, PayloadError};
use crate::event::Event;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A test which compares several fields of an event at once.
///
/// Every field left at its zero value skips the corresponding sub-check, so
/// `Condition::default()` matches every event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Condition {
    /// Turns a failed comparison into a match and full success into a miss.
    ///
    /// Sub-checks that need data the event does not have (a payload, a field
    /// in it) still fail regardless of this flag.
    pub negate: bool,
    /// Exact, case-sensitive match on the event type
    #[serde(rename = "type")]
    pub event_type: String,
    /// Case-insensitive match on `payload.action`
    pub payload_action: String,
    /// Case-insensitive membership test on `payload.issue.labels`
    pub payload_issue_label: String,
    /// Case-insensitive match on `payload.issue.milestone.title`
    pub payload_issue_milestone_title: String,
    /// Regexp searched in `payload.issue.title`
    pub payload_issue_title_regexp: String,
    /// Regexp searched in `payload.issue.body`
    pub payload_issue_body_regexp: String,
    /// Enables the visibility sub-check against `public`
    pub compare_public: bool,
    pub public: bool,
    #[serde(rename = "organizationID")]
    pub organization_id: i64,
    #[serde(rename = "repositoryID")]
    pub repository_id: i64,
}

/// Sub-checks in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubCheck {
    Type,
    PayloadAction,
    PayloadIssueLabel,
    PayloadIssueMilestoneTitle,
    PayloadIssueTitleRegexp,
    PayloadIssueBodyRegexp,
    Public,
    OrganizationId,
    RepositoryId,
}

impl SubCheck {
    const ORDER: [SubCheck; 9] = [
        SubCheck::Type,
        SubCheck::PayloadAction,
        SubCheck::PayloadIssueLabel,
        SubCheck::PayloadIssueMilestoneTitle,
        SubCheck::PayloadIssueTitleRegexp,
        SubCheck::PayloadIssueBodyRegexp,
        SubCheck::Public,
        SubCheck::OrganizationId,
        SubCheck::RepositoryId,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Not configured
    Skipped,
    Pass,
    /// Data present but not equal
    Mismatch,
    /// Data needed for the comparison is missing or unusable
    Unavailable,
}

impl Outcome {
    fn from_bool(passed: bool) -> Self {
        if passed {
            Outcome::Pass
        } else {
            Outcome::Mismatch
        }
    }
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn with_payload_action(mut self, action: impl Into<String>) -> Self {
        self.payload_action = action.into();
        self
    }

    pub fn with_payload_issue_label(mut self, label: impl Into<String>) -> Self {
        self.payload_issue_label = label.into();
        self
    }

    pub fn with_payload_issue_milestone_title(mut self, title: impl Into<String>) -> Self {
        self.payload_issue_milestone_title = title.into();
        self
    }

    pub fn with_payload_issue_title_regexp(mut self, pattern: impl Into<String>) -> Self {
        self.payload_issue_title_regexp = pattern.into();
        self
    }

    pub fn with_payload_issue_body_regexp(mut self, pattern: impl Into<String>) -> Self {
        self.payload_issue_body_regexp = pattern.into();
        self
    }

    /// Compare the event's visibility against `public`
    pub fn with_public(mut self, public: bool) -> Self {
        self.compare_public = true;
        self.public = public;
        self
    }

    pub fn with_organization_id(mut self, id: i64) -> Self {
        self.organization_id = id;
        self
    }

    pub fn with_repository_id(mut self, id: i64) -> Self {
        self.repository_id = id;
        self
    }

    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    /// True when no sub-check is configured
    pub fn is_empty(&self) -> bool {
        SubCheck::ORDER.iter().all(|check| !self.is_configured(*check))
    }

    /// Returns true if every configured sub-check passes, or none is configured.
    ///
    /// Sub-checks run in a fixed order and the first one that does not pass
    /// decides the result: `negate` when the comparison failed on present
    /// data, `false` when the data was missing.
    pub fn matches(&self, event: &Event) -> bool {
        for check in SubCheck::ORDER {
            match self.evaluate(check, event) {
                Outcome::Skipped | Outcome::Pass => {}
                Outcome::Mismatch => {
                    tracing::trace!(?check, negate = self.negate, "sub-check did not match");
                    return self.negate;
                }
                Outcome::Unavailable => {
                    tracing::trace!(?check, "sub-check data unavailable");
                    return false;
                }
            }
        }
        !self.negate
    }

    /// Check that both regexps compile.
    ///
    /// Matching never fails loudly; this is for reviewing a configuration
    /// before it is used.
    pub fn validate(&self) -> Result<(), FilterError> {
        for (field, pattern) in [
            ("title", &self.payload_issue_title_regexp),
            ("body", &self.payload_issue_body_regexp),
        ] {
            if pattern.is_empty() {
                continue;
            }
            Regex::new(pattern).map_err(|source| FilterError::InvalidRegex {
                field,
                pattern: pattern.clone(),
                source,
            })?;
        }
        Ok(())
    }

    fn is_configured(&self, check: SubCheck) -> bool {
        match check {
            SubCheck::Type => !self.event_type.is_empty(),
            SubCheck::PayloadAction => !self.payload_action.is_empty(),
            SubCheck::PayloadIssueLabel => !self.payload_issue_label.is_empty(),
            SubCheck::PayloadIssueMilestoneTitle => !self.payload_issue_milestone_title.is_empty(),
            SubCheck::PayloadIssueTitleRegexp => !self.payload_issue_title_regexp.is_empty(),
            SubCheck::PayloadIssueBodyRegexp => !self.payload_issue_body_regexp.is_empty(),
            SubCheck::Public => self.compare_public,
            SubCheck::OrganizationId => self.organization_id != 0,
            SubCheck::RepositoryId => self.repository_id != 0,
        }
    }

    fn evaluate(&self, check: SubCheck, event: &Event) -> Outcome {
        if !self.is_configured(check) {
            return Outcome::Skipped;
        }

        let raw = event.raw_payload();
        match check {
            SubCheck::Type => Outcome::from_bool(event.event_type() == self.event_type),
            SubCheck::PayloadAction => compare_payload(payload::action(raw), |action| {
                eq_ci(action, &self.payload_action)
            }),
            SubCheck::PayloadIssueLabel => compare_payload(payload::issue_labels(raw), |labels| {
                labels
                    .iter()
                    .any(|label| eq_ci(label, &self.payload_issue_label))
            }),
            SubCheck::PayloadIssueMilestoneTitle => {
                compare_payload(payload::issue_milestone_title(raw), |title| {
                    eq_ci(title, &self.payload_issue_milestone_title)
                })
            }
            SubCheck::PayloadIssueTitleRegexp => {
                search_payload(payload::issue_title(raw), &self.payload_issue_title_regexp)
            }
            SubCheck::PayloadIssueBodyRegexp => {
                search_payload(payload::issue_body(raw), &self.payload_issue_body_regexp)
            }
            SubCheck::Public => Outcome::from_bool(event.is_public() == self.public),
            SubCheck::OrganizationId => Outcome::from_bool(
                event
                    .organization
                    .as_ref()
                    .is_some_and(|org| org.id == self.organization_id),
            ),
            SubCheck::RepositoryId => Outcome::from_bool(
                event
                    .repository
                    .as_ref()
                    .is_some_and(|repo| repo.id == self.repository_id),
            ),
        }
    }

    fn clause(&self, check: SubCheck) -> Option<String> {
        if !self.is_configured(check) {
            return None;
        }

        let not = if self.negate { " not" } else { "" };
        let contains = if self.negate {
            "does not contain"
        } else {
            "contains"
        };
        let matches = if self.negate {
            "does not match"
        } else {
            "matches"
        };

        let clause = match check {
            SubCheck::Type => format!("If type is{not} {:?}", self.event_type),
            SubCheck::PayloadAction => {
                format!("If payload action is{not} {:?}", self.payload_action)
            }
            SubCheck::PayloadIssueLabel => {
                format!(
                    "If payload issue labels {contains} {:?}",
                    self.payload_issue_label
                )
            }
            SubCheck::PayloadIssueMilestoneTitle => format!(
                "If payload issue milestone title is{not} {:?}",
                self.payload_issue_milestone_title
            ),
            SubCheck::PayloadIssueTitleRegexp => format!(
                "If payload issue title {matches} regexp {:?}",
                self.payload_issue_title_regexp
            ),
            SubCheck::PayloadIssueBodyRegexp => format!(
                "If payload issue body {matches} regexp {:?}",
                self.payload_issue_body_regexp
            ),
            SubCheck::Public => {
                // "is not not public" for a negated private check is the expected wording
                let visibility = if self.public { "public" } else { "not public" };
                format!("If event is{not} {visibility}")
            }
            SubCheck::OrganizationId => {
                format!("If organization ID is{not} {}", self.organization_id)
            }
            SubCheck::RepositoryId => {
                format!("If repository ID is{not} {}", self.repository_id)
            }
        };
        Some(clause)
    }
}

fn compare_payload<T>(
    decoded: Result<T, PayloadError>,
    compare: impl FnOnce(&T) -> bool,
) -> Outcome {
    match decoded {
        Ok(value) => Outcome::from_bool(compare(&value)),
        Err(err) => {
            tracing::debug!(error = %err, "payload sub-check failed closed");
            Outcome::Unavailable
        }
    }
}

fn search_payload(decoded: Result<String, PayloadError>, pattern: &str) -> Outcome {
    let text = match decoded {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(error = %err, "payload sub-check failed closed");
            return Outcome::Unavailable;
        }
    };
    match Regex::new(pattern) {
        Ok(re) => Outcome::from_bool(re.is_match(&text)),
        Err(err) => {
            tracing::debug!(pattern, error = %err, "invalid regexp in condition");
            Outcome::Unavailable
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = SubCheck::ORDER
            .iter()
            .filter_map(|check| self.clause(*check))
            .collect();
        write!(f, "{}", clauses.join(" AND "))
    }
}
