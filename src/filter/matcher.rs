use super::condition::Condition;
use super::error::FilterError;
use crate::event::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered collection of conditions, all of which must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns true if the event matches every condition.
    ///
    /// Stops at the first condition that does not match. A filter without
    /// conditions matches every event.
    pub fn matches(&self, event: &Event) -> bool {
        self.conditions.iter().enumerate().all(|(index, condition)| {
            let matched = condition.matches(event);
            if !matched {
                tracing::trace!(index, event_id = ?event.id, "condition rejected event");
            }
            matched
        })
    }

    /// Borrow the events this filter matches, in input order
    pub fn select<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }

    /// Validate every condition, returning all problems found
    pub fn validate(&self) -> Result<(), Vec<FilterError>> {
        let errors: Vec<FilterError> = self
            .conditions
            .iter()
            .enumerate()
            .filter_map(|(index, condition)| {
                condition
                    .validate()
                    .err()
                    .map(|source| FilterError::Condition {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<Vec<Condition>> for Filter {
    fn from(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }
}

impl FromIterator<Condition> for Filter {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Condition> for Filter {
    fn extend<I: IntoIterator<Item = Condition>>(&mut self, iter: I) {
        self.conditions.extend(iter);
    }
}

/// One condition per line, in order
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, condition) in self.conditions.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{condition}")?;
        }
        Ok(())
    }
}

/// Log a warning for every condition that cannot behave as written
///
/// This helps users spot typos before events are silently dropped.
pub fn print_filter_warnings(filter: &Filter) {
    if let Err(errors) = filter.validate() {
        for err in errors {
            tracing::warn!("{err}: this condition never matches");
        }
    }
    for (index, condition) in filter.conditions.iter().enumerate() {
        if condition.is_empty() && condition.negate {
            tracing::warn!(
                "Condition {index}: negated condition without checks never matches"
            );
        }
    }
}
