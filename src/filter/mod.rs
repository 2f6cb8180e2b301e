//! Condition matching for GitHub activity events
//!
//! A [`Filter`] is an ordered list of [`Condition`]s and matches an event only
//! when every condition does. Each condition combines optional sub-checks,
//! evaluated in this order:
//!
//! ```text
//! type                      exact event type
//! payloadAction             payload.action, case-insensitive
//! payloadIssueLabel         payload.issue.labels[], case-insensitive
//! payloadIssueMilestoneTitle payload.issue.milestone.title, case-insensitive
//! payloadIssueTitleRegexp   regexp search in payload.issue.title
//! payloadIssueBodyRegexp    regexp search in payload.issue.body
//! comparePublic + public    event visibility
//! organizationID            event org id
//! repositoryID              event repo id
//! ```
//!
//! The first sub-check that does not pass decides the result. A comparison
//! that fails on present data yields `negate`; data that is missing (no
//! payload, absent field, malformed regexp) always yields `false`.
//!
//! # Expressions
//!
//! ```text
//! type:IssuesEvent action:opened      Opened issues
//! !label:wontfix                      Anything without the wontfix label
//! title:"(?i)crash" public:true       Public issues mentioning a crash
//! ```

pub mod condition;
pub mod error;
pub mod matcher;
pub mod parser;
mod payload;

pub use condition::Condition;
pub use error::{FilterError, FilterParseError};
pub use matcher::{Filter, print_filter_warnings};
pub use parser::{FieldType, FilterExpression, FilterTerm};
