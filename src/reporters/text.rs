//! Text (terminal) reporter with colors and formatting

use crate::models::RatingResponse;
use anyhow::Result;
use console::{style, StyledObject};

/// Width of the score bar in characters
const BAR_WIDTH: usize = 20;

/// Render rating as formatted terminal output
pub fn render(response: &RatingResponse) -> Result<String> {
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{}\n", style("Layout Rating").bold()));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────").dim()
    ));
    out.push_str(&format!(
        "Score: {}  {}\n\n",
        colored_score(response.score).bold(),
        bar(response.score)
    ));

    for group in &response.groups {
        let average = group.average().unwrap_or(0);
        out.push_str(&format!(
            "{} {}\n",
            style(group.title().to_uppercase()).bold(),
            colored_score(average)
        ));
        for rating in &group.ratings {
            out.push_str(&format!(
                "  {:<24} {:>3}  {}\n",
                rating.title(),
                colored_score(rating.score),
                style(&rating.comment).dim()
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", style(verdict(response.score)).dim()));

    Ok(out)
}

/// Score colored by band
fn colored_score(score: u8) -> StyledObject<u8> {
    let s = style(score);
    if score >= 80 {
        s.green()
    } else if score >= 60 {
        s.yellow()
    } else {
        s.red()
    }
}

fn bar(score: u8) -> String {
    let filled = usize::from(score) * BAR_WIDTH / 100;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        style("░".repeat(BAR_WIDTH - filled)).dim()
    )
}

fn verdict(score: u8) -> &'static str {
    match score {
        80..=100 => "Well composed layout.",
        60..=79 => "Decent layout. Check the lowest metrics above.",
        _ => "The layout needs rework. Start with the lowest metrics above.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_response;

    #[test]
    fn test_text_render_lists_every_metric() {
        console::set_colors_enabled(false);
        let out = render(&test_response()).expect("render text");
        assert!(out.contains("Layout Rating"));
        assert!(out.contains("Score: 72"));
        assert!(out.contains("BALANCE 67"));
        assert!(out.contains("Horizontal balance"));
        assert!(out.contains("Heavy on the top"));
        assert!(out.contains("Proportion"));
    }

    #[test]
    fn test_bar_width() {
        console::set_colors_enabled(false);
        assert_eq!(bar(100), format!("[{}]", "█".repeat(BAR_WIDTH)));
        assert_eq!(bar(0), format!("[{}]", "░".repeat(BAR_WIDTH)));
        assert_eq!(bar(50).chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(verdict(80), "Well composed layout.");
        assert!(verdict(79).starts_with("Decent"));
        assert!(verdict(10).starts_with("The layout needs rework"));
    }
}
