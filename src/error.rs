//! Error types for the rating engine
//!
//! Every failure the core can produce is a `RateError`. The CLI and
//! reporters wrap these in `anyhow` like the rest of the application layer.

use crate::models::Element;
use thiserror::Error;

/// Errors that can occur while rating a layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    #[error("Heuristic '{name}' does not exist, choose between: {}", available.join(", "))]
    UnknownHeuristic {
        name: String,
        available: Vec<String>,
    },

    #[error("Invalid canvas {width}x{height}: dimensions must be positive and finite")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("Element #{index} {element:?} lies outside the unit square")]
    ElementOutOfBounds { index: usize, element: Element },

    #[error("Cannot compute {metric}: {reason}")]
    DegenerateGeometry { metric: &'static str, reason: String },

    #[error("No heuristics configured, nothing to rate")]
    NoHeuristics,

    #[error("Malformed layout: {0}")]
    MalformedInput(String),
}

impl RateError {
    pub(crate) fn degenerate(metric: &'static str, reason: impl Into<String>) -> Self {
        RateError::DegenerateGeometry {
            metric,
            reason: reason.into(),
        }
    }
}

pub type RateResult<T> = Result<T, RateError>;
