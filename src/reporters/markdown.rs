//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for pull request comments and design reviews.

use crate::models::{MetricGroup, RatingResponse};
use anyhow::Result;

/// Render rating as GitHub-flavored Markdown
pub fn render(response: &RatingResponse) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(response));
    md.push('\n');

    md.push_str(&render_summary(response));
    md.push('\n');

    for group in &response.groups {
        md.push_str(&render_group(group));
        md.push('\n');
    }

    Ok(md)
}

fn render_header(response: &RatingResponse) -> String {
    format!(
        "# {} Layout Rating\n\n**Overall score: {}/100**\n",
        score_badge(response.score),
        response.score
    )
}

fn render_summary(response: &RatingResponse) -> String {
    let mut md = String::from("## Summary\n\n| Section | Score |\n|---------|------:|\n");
    for group in &response.groups {
        md.push_str(&format!(
            "| {} | {} |\n",
            group.title(),
            group.average().unwrap_or(0)
        ));
    }
    md
}

fn render_group(group: &MetricGroup) -> String {
    let mut md = format!(
        "## {}\n\n| Metric | Score | Comment |\n|--------|------:|---------|\n",
        group.title()
    );
    for rating in &group.ratings {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            rating.title(),
            rating.score,
            escape_cell(&rating.comment)
        ));
    }
    md
}

fn score_badge(score: u8) -> &'static str {
    match score {
        80..=100 => "🟢",
        60..=79 => "🟡",
        _ => "🔴",
    }
}

/// Escape pipe characters so comments cannot break the table
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
