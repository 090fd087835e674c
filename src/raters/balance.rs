//! Balance heuristic
//!
//! Weighs every element by `area × signed distance of its midpoint from the
//! canvas center`, per axis, and compares the accumulated weight on each side.
//!
//! A layout without any element area cannot be rated. An axis where every
//! element sits exactly on the center line carries no displacement and is
//! perfectly balanced.

use super::{ensure_finite, human_score};
use crate::error::{RateError, RateResult};
use crate::models::{Canvas, Element, Rating};

const H_BALANCE_ID: &str = "balance_horizontal";
const V_BALANCE_ID: &str = "balance_vertical";

/// Area-weighted balance around the canvas center lines
#[derive(Debug, Clone, Copy)]
pub struct BalanceRater<'a> {
    canvas: &'a Canvas,
    elements: &'a [Element],
}

/// Accumulated side weights
#[derive(Debug, Default)]
struct SideWeights {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    area: f64,
}

impl<'a> BalanceRater<'a> {
    pub const METRIC_IDS: [&'static str; 2] = [H_BALANCE_ID, V_BALANCE_ID];

    pub fn new(canvas: &'a Canvas, elements: &'a [Element]) -> Self {
        Self { canvas, elements }
    }

    pub fn rate(&self) -> RateResult<Vec<Rating>> {
        let weights = self.side_weights();
        if weights.area <= 0.0 {
            return Err(RateError::degenerate(
                H_BALANCE_ID,
                "the layout has no element area to weigh",
            ));
        }

        let norm_h = normalized_difference(H_BALANCE_ID, weights.left, weights.right)?;
        let norm_v = normalized_difference(V_BALANCE_ID, weights.top, weights.bottom)?;

        let h_score = human_score(1.0 - norm_h.abs());
        let v_score = human_score(1.0 - norm_v.abs());
        let h_direction = if norm_h < 0.0 { "left" } else { "right" };
        let v_direction = if norm_v < 0.0 { "top" } else { "bottom" };

        Ok(vec![
            Rating::new(H_BALANCE_ID, h_score, message(h_score, h_direction)),
            Rating::new(V_BALANCE_ID, v_score, message(v_score, v_direction)),
        ])
    }

    fn side_weights(&self) -> SideWeights {
        let mut weights = SideWeights::default();
        for element in self.elements {
            let area = element.area(self.canvas);
            weights.area += area;

            let h_weight = area * (element.x_midpoint(self.canvas) - self.canvas.x_mid());
            if h_weight > 0.0 {
                weights.right += h_weight;
            } else {
                weights.left += h_weight.abs();
            }

            // Canvas y grows downward: positive means below center, booked as "top"
            let v_weight = area * (element.y_midpoint(self.canvas) - self.canvas.y_mid());
            if v_weight > 0.0 {
                weights.top += v_weight;
            } else {
                weights.bottom += v_weight.abs();
            }
        }
        weights
    }
}

/// `(a - b) / max(a, b)`, zero when neither side is displaced
fn normalized_difference(metric: &'static str, a: f64, b: f64) -> RateResult<f64> {
    let max = a.max(b);
    if max == 0.0 {
        return Ok(0.0);
    }
    ensure_finite(metric, (a - b) / max)
}

fn message(score: u8, direction: &str) -> String {
    match score {
        0..=30 => format!("Too heavy on the {direction}"),
        31..=50 => format!("Heavy on the {direction}"),
        51..=70 => format!("Slightly heavy on the {direction}"),
        71..=80 => format!("Good balance, slightly {direction}-heavy"),
        _ => "Excellent balance!".to_string(),
    }
}
