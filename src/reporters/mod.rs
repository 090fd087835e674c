//! Output reporters for layout ratings
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON (`{score, metrics: [...]}`)
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

use crate::models::RatingResponse;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render a rating using an OutputFormat enum
pub fn report_with_format(response: &RatingResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(response),
        OutputFormat::Json => json::render(response),
        OutputFormat::Markdown => markdown::render(response),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{MetricGroup, Rating};

    /// Create a minimal RatingResponse for testing
    pub(crate) fn test_response() -> RatingResponse {
        RatingResponse {
            score: 72,
            groups: vec![
                MetricGroup::new(
                    "balance",
                    vec![
                        Rating::new("balance_horizontal", 90, "Excellent balance!"),
                        Rating::new("balance_vertical", 45, "Heavy on the top"),
                    ],
                ),
                MetricGroup::new(
                    "harmony",
                    vec![
                        Rating::new("harmony_density", 100, "The screen space is well used"),
                        Rating::new(
                            "harmony_proportion",
                            60,
                            "The elements are consistently shaped",
                        ),
                    ],
                ),
            ],
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(OutputFormat::Json), "json");
        assert_eq!(file_extension(OutputFormat::Markdown), "md");
    }

    #[test]
    fn test_report_dispatch() {
        let out = report_with_format(&test_response(), OutputFormat::Json).unwrap();
        assert!(out.trim_start().starts_with('{'));
        let md = report_with_format(&test_response(), OutputFormat::Markdown).unwrap();
        assert!(md.starts_with('#'));
    }
}
