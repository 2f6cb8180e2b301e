use crate::filter::Filter;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read filter file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse filter file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: json5::Error,
    },
}

/// Load a filter from an optional JSON5 file, or an empty filter
pub fn load_config(path: Option<&Path>) -> Result<Filter, ConfigError> {
    if let Some(path) = path {
        load_filter(path)
    } else {
        Ok(Filter::default())
    }
}

/// Load a filter definition such as:
///
/// ```json5
/// {
///   conditions: [
///     { type: "IssuesEvent", payloadAction: "opened" },
///     { payloadIssueLabel: "wontfix", negate: true },
///   ],
/// }
/// ```
pub fn load_filter(path: &Path) -> Result<Filter, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    parse_filter(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn parse_filter(raw: &str) -> Result<Filter, json5::Error> {
    json5::from_str::<Filter>(raw)
}
