//! JSON reporter
//!
//! Outputs the RatingResponse as pretty-printed JSON in the wire shape
//! `{score, metrics: [{section, metrics: [{type, score, comment}]}]}`.

use crate::models::RatingResponse;
use anyhow::Result;

/// Render rating as JSON
pub fn render(response: &RatingResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}
