use thiserror::Error;

/// Errors that can occur when parsing filter expressions
#[derive(Debug, Error)]
pub enum FilterParseError {
    #[error(
        "Unknown condition field: '{0}'. Valid fields are: type (t), action (a), label (l), milestone (m), title, body, public (p), org (o), repo (r)"
    )]
    UnknownField(String),

    #[error("Empty value for field '{0}'")]
    EmptyValue(String),

    #[error("Field '{0}' is given more than once")]
    DuplicateField(String),

    #[error("Invalid boolean for field '{field}': '{value}'. Valid values are: true, false")]
    InvalidBool { field: String, value: String },

    #[error("Invalid number for field '{field}': '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Invalid condition expression: {0}")]
    InvalidExpression(String),
}

/// Configuration problems found by validating a condition
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid {field} regexp '{pattern}': {source}")]
    InvalidRegex {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Condition {index}: {source}")]
    Condition {
        index: usize,
        #[source]
        source: Box<FilterError>,
    },
}
