//! Harmony heuristic
//!
//! Two independent sub-metrics:
//!
//! - **Density**: share of the canvas covered by elements, ideal at 65%.
//!   The comment is chosen from the raw coverage ratio, not the score.
//! - **Proportion**: mean relative aspect-ratio dissimilarity over every
//!   ordered pair of distinct elements.

use super::{ensure_finite, human_score};
use crate::error::{RateError, RateResult};
use crate::models::{Canvas, Element, Rating};

const DENSITY_ID: &str = "harmony_density";
const PROPORTION_ID: &str = "harmony_proportion";

/// Coverage ratio scoring 100
const IDEAL_DENSITY: f64 = 0.65;

#[derive(Debug, Clone, Copy)]
pub struct HarmonyRater<'a> {
    canvas: &'a Canvas,
    elements: &'a [Element],
}

impl<'a> HarmonyRater<'a> {
    pub const METRIC_IDS: [&'static str; 2] = [DENSITY_ID, PROPORTION_ID];

    pub fn new(canvas: &'a Canvas, elements: &'a [Element]) -> Self {
        Self { canvas, elements }
    }

    pub fn rate(&self) -> RateResult<Vec<Rating>> {
        Ok(vec![self.rate_density()?, self.rate_proportion()?])
    }

    pub fn rate_density(&self) -> RateResult<Rating> {
        let covered: f64 = self.elements.iter().map(|e| e.area(self.canvas)).sum();
        let density = ensure_finite(DENSITY_ID, covered / self.canvas.area())?;

        let score = human_score(1.0 - (density - IDEAL_DENSITY).abs() / IDEAL_DENSITY);
        Ok(Rating::new(DENSITY_ID, score, density_message(density)))
    }

    pub fn rate_proportion(&self) -> RateResult<Rating> {
        if self.elements.len() < 2 {
            return Err(RateError::degenerate(
                PROPORTION_ID,
                format!(
                    "needs at least two elements to compare, got {}",
                    self.elements.len()
                ),
            ));
        }

        let proportions = self
            .elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                if element.height <= 0.0 {
                    return Err(RateError::degenerate(
                        PROPORTION_ID,
                        format!("element #{index} has no height"),
                    ));
                }
                ensure_finite(PROPORTION_ID, element.proportion())
            })
            .collect::<RateResult<Vec<f64>>>()?;

        // Every unordered pair is visited twice
        let mut total = 0.0;
        let mut pairs = 0usize;
        for (i1, p1) in proportions.iter().enumerate() {
            for (i2, p2) in proportions.iter().enumerate() {
                if i1 == i2 {
                    continue;
                }
                total += dissimilarity(*p1, *p2);
                pairs += 1;
            }
        }
        let mean = ensure_finite(PROPORTION_ID, total / pairs as f64)?;

        let score = human_score(1.0 - mean);
        Ok(Rating::new(PROPORTION_ID, score, proportion_message(score)))
    }
}

/// Banded on the raw coverage ratio
fn density_message(density: f64) -> &'static str {
    if (0.0..=0.35).contains(&density) {
        "The screen doesn't have enough content"
    } else if density > 0.35 && density <= 0.70 {
        "The screen space is well used"
    } else {
        "The screen appears too cluttered"
    }
}

fn proportion_message(score: u8) -> &'static str {
    match score {
        0..=35 => "The shape of your elements differs greatly",
        36..=55 => "The elements are not entirely homogeneous",
        56..=75 => "The elements are consistently shaped",
        _ => "The elements proportions are excellent!",
    }
}

/// `|p1 - p2| / max(p1, p2)`, zero for identical proportions
fn dissimilarity(p1: f64, p2: f64) -> f64 {
    if p1 == p2 {
        return 0.0;
    }
    (p1 - p2).abs() / p1.max(p2)
}
