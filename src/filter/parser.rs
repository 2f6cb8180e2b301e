use super::condition::Condition;
use super::error::FilterParseError;
use std::str::FromStr;

/// Condition fields that can be set from an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Type,
    Action,
    Label,
    Milestone,
    Title,
    Body,
    Public,
    Organization,
    Repository,
}

impl FromStr for FieldType {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "type" | "t" => Ok(FieldType::Type),
            "action" | "a" => Ok(FieldType::Action),
            "label" | "l" => Ok(FieldType::Label),
            "milestone" | "m" => Ok(FieldType::Milestone),
            "title" => Ok(FieldType::Title),
            "body" => Ok(FieldType::Body),
            "public" | "p" => Ok(FieldType::Public),
            "org" | "organization" | "o" => Ok(FieldType::Organization),
            "repo" | "repository" | "r" => Ok(FieldType::Repository),
            _ => Err(FilterParseError::UnknownField(s.to_string())),
        }
    }
}

impl FieldType {
    /// Get the canonical name of this field
    pub fn canonical_name(&self) -> &'static str {
        match self {
            FieldType::Type => "type",
            FieldType::Action => "action",
            FieldType::Label => "label",
            FieldType::Milestone => "milestone",
            FieldType::Title => "title",
            FieldType::Body => "body",
            FieldType::Public => "public",
            FieldType::Organization => "org",
            FieldType::Repository => "repo",
        }
    }
}

/// A single `field:value` term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    pub field: FieldType,
    pub value: String,
}

impl FilterTerm {
    /// Parse a single term, stripping quotes around the value
    pub fn parse(s: &str) -> Result<Self, FilterParseError> {
        let Some((name, value)) = s.split_once(':') else {
            return Err(FilterParseError::InvalidExpression(format!(
                "Expected 'field:value' format, got: {}",
                s
            )));
        };

        let field: FieldType = name.parse()?;
        let value = unquote(value.trim()).to_string();

        if value.is_empty() {
            return Err(FilterParseError::EmptyValue(
                field.canonical_name().to_string(),
            ));
        }

        Ok(FilterTerm { field, value })
    }
}

/// The one-line text form of a condition.
///
/// Terms are separated by whitespace and all apply to the same condition. A
/// leading `!` negates the condition.
///
/// ```text
/// type:IssuesEvent action:opened label:bug
/// !type:PushEvent
/// title:"(?i)will\s+match" public:false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    pub negate: bool,
    pub terms: Vec<FilterTerm>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an expression into a condition
    pub fn parse(s: &str) -> Result<Condition, FilterParseError> {
        Self::parse_terms(s)?.to_condition()
    }

    /// Parse an expression without interpreting values
    pub fn parse_terms(s: &str) -> Result<Self, FilterParseError> {
        let trimmed = s.trim();
        let (negate, rest) = match trimmed.strip_prefix('!') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let terms = split_preserving_quotes(rest)
            .into_iter()
            .map(FilterTerm::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FilterExpression { negate, terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Build the condition these terms describe
    pub fn to_condition(&self) -> Result<Condition, FilterParseError> {
        let mut seen: Vec<FieldType> = Vec::new();
        let mut condition = Condition {
            negate: self.negate,
            ..Condition::default()
        };

        for term in &self.terms {
            if seen.contains(&term.field) {
                return Err(FilterParseError::DuplicateField(
                    term.field.canonical_name().to_string(),
                ));
            }
            seen.push(term.field);

            let value = term.value.clone();
            match term.field {
                FieldType::Type => condition.event_type = value,
                FieldType::Action => condition.payload_action = value,
                FieldType::Label => condition.payload_issue_label = value,
                FieldType::Milestone => condition.payload_issue_milestone_title = value,
                FieldType::Title => condition.payload_issue_title_regexp = value,
                FieldType::Body => condition.payload_issue_body_regexp = value,
                FieldType::Public => {
                    condition.compare_public = true;
                    condition.public = parse_bool(term)?;
                }
                FieldType::Organization => condition.organization_id = parse_id(term)?,
                FieldType::Repository => condition.repository_id = parse_id(term)?,
            }
        }

        Ok(condition)
    }
}

fn parse_bool(term: &FilterTerm) -> Result<bool, FilterParseError> {
    match term.value.to_lowercase().as_str() {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => Err(FilterParseError::InvalidBool {
            field: term.field.canonical_name().to_string(),
            value: term.value.clone(),
        }),
    }
}

fn parse_id(term: &FilterTerm) -> Result<i64, FilterParseError> {
    term.value
        .parse()
        .map_err(|_| FilterParseError::InvalidNumber {
            field: term.field.canonical_name().to_string(),
            value: term.value.clone(),
        })
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Split a string by whitespace while preserving quoted segments
fn split_preserving_quotes(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => {
                if i > start {
                    let part = &s[start..i];
                    if !part.trim().is_empty() {
                        parts.push(part.trim());
                    }
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    // Add the last part
    if start < s.len() {
        let part = &s[start..];
        if !part.trim().is_empty() {
            parts.push(part.trim());
        }
    }

    parts
}
