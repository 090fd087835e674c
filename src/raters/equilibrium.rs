//! Equilibrium heuristic: distance between the canvas center and the
//! area-weighted centroid of all elements.

use super::{ensure_finite, human_score};
use crate::error::{RateError, RateResult};
use crate::models::{Canvas, Element, Rating};

const H_EQUILIBRIUM_ID: &str = "equilibrium_horizontal";
const V_EQUILIBRIUM_ID: &str = "equilibrium_vertical";

#[derive(Debug, Clone, Copy)]
pub struct EquilibriumRater<'a> {
    canvas: &'a Canvas,
    elements: &'a [Element],
}

impl<'a> EquilibriumRater<'a> {
    pub const METRIC_IDS: [&'static str; 2] = [H_EQUILIBRIUM_ID, V_EQUILIBRIUM_ID];

    pub fn new(canvas: &'a Canvas, elements: &'a [Element]) -> Self {
        Self { canvas, elements }
    }

    pub fn rate(&self) -> RateResult<Vec<Rating>> {
        let (center_x, center_y) = self.layout_center()?;

        let norm_h = ensure_finite(
            H_EQUILIBRIUM_ID,
            (self.canvas.x_mid() - center_x) / self.canvas.x_mid().max(center_x),
        )?;
        let norm_v = ensure_finite(
            V_EQUILIBRIUM_ID,
            (self.canvas.y_mid() - center_y) / self.canvas.y_mid().max(center_y),
        )?;

        let h_score = human_score(1.0 - norm_h.abs());
        let v_score = human_score(1.0 - norm_v.abs());
        // Inverted relative to balance: a centroid left of center gives a positive norm
        let h_direction = if norm_h > 0.0 { "left" } else { "right" };
        let v_direction = if norm_v > 0.0 { "top" } else { "bottom" };

        Ok(vec![
            Rating::new(H_EQUILIBRIUM_ID, h_score, message(h_score, h_direction)),
            Rating::new(V_EQUILIBRIUM_ID, v_score, message(v_score, v_direction)),
        ])
    }

    /// Area-weighted centroid of the elements
    fn layout_center(&self) -> RateResult<(f64, f64)> {
        let mut areas_sum = 0.0;
        let mut h_sum = 0.0;
        let mut v_sum = 0.0;
        for element in self.elements {
            let area = element.area(self.canvas);
            areas_sum += area;
            h_sum += area * element.x_midpoint(self.canvas);
            v_sum += area * element.y_midpoint(self.canvas);
        }

        if areas_sum <= 0.0 {
            return Err(RateError::degenerate(
                H_EQUILIBRIUM_ID,
                "the layout has no element area, its centroid is undefined",
            ));
        }
        Ok((h_sum / areas_sum, v_sum / areas_sum))
    }
}

fn message(score: u8, direction: &str) -> String {
    match score {
        0..=30 => format!("Heavy disequilibrium towards the {direction}"),
        31..=58 => format!("Visible disequilibrium towards the {direction}"),
        59..=70 => format!("Slight disequilibrium towards the {direction}"),
        71..=80 => format!("Overall good equilibrium, slightly {direction}-leaning"),
        _ => "Great equilibrium!".to_string(),
    }
}
