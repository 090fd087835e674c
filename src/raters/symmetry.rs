//! Symmetry heuristic
//!
//! Splits the canvas into four quadrants around its center and accumulates a
//! weight vector per quadrant from the elements whose midpoint falls in it.
//! An element exactly on a center line belongs to every adjoining quadrant.
//! Vertical symmetry compares left quadrants against right ones, horizontal
//! symmetry compares top quadrants against bottom ones.

use super::{ensure_finite, human_score};
use crate::error::RateResult;
use crate::models::{Canvas, Element, Rating};

const H_SYMMETRY_ID: &str = "symmetry_horizontal";
const V_SYMMETRY_ID: &str = "symmetry_vertical";

#[derive(Debug, Clone, Copy)]
pub struct SymmetryRater<'a> {
    canvas: &'a Canvas,
    elements: &'a [Element],
}

/// Per-quadrant weight vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct QuadrantWeights {
    /// Summed horizontal distance of midpoints from the center
    x: f64,
    /// Summed vertical distance of midpoints from the center
    y: f64,
    w: f64,
    h: f64,
}

impl QuadrantWeights {
    fn add(&mut self, element: &Element, canvas: &Canvas) {
        self.x += (element.x_midpoint(canvas) - canvas.x_mid()).abs();
        self.y += (element.y_midpoint(canvas) - canvas.y_mid()).abs();
        self.w += element.absolute_width(canvas);
        self.h += element.absolute_height(canvas);
    }

    /// Mean relative difference over the four components
    fn diff(&self, other: &QuadrantWeights) -> f64 {
        let component = |a: f64, b: f64| {
            let max = a.max(b);
            // Both sides empty on this component: no difference
            let max = if max == 0.0 { 1.0 } else { max };
            (a - b) / max
        };
        (component(self.x, other.x)
            + component(self.y, other.y)
            + component(self.w, other.w)
            + component(self.h, other.h))
            / 4.0
    }
}

#[derive(Debug, Default)]
struct Quadrants {
    top_left: QuadrantWeights,
    top_right: QuadrantWeights,
    bottom_left: QuadrantWeights,
    bottom_right: QuadrantWeights,
}

impl<'a> SymmetryRater<'a> {
    pub const METRIC_IDS: [&'static str; 2] = [V_SYMMETRY_ID, H_SYMMETRY_ID];

    pub fn new(canvas: &'a Canvas, elements: &'a [Element]) -> Self {
        Self { canvas, elements }
    }

    pub fn rate(&self) -> RateResult<Vec<Rating>> {
        let q = self.quadrants();

        let vertical = ensure_finite(
            V_SYMMETRY_ID,
            (q.top_left.diff(&q.top_right) + q.bottom_left.diff(&q.bottom_right)) / 2.0,
        )?;
        let horizontal = ensure_finite(
            H_SYMMETRY_ID,
            (q.top_left.diff(&q.bottom_left) + q.top_right.diff(&q.bottom_right)) / 2.0,
        )?;

        let v_score = human_score(vertical);
        let h_score = human_score(horizontal);

        Ok(vec![
            Rating::new(V_SYMMETRY_ID, v_score, message(v_score)),
            Rating::new(H_SYMMETRY_ID, h_score, message(h_score)),
        ])
    }

    fn quadrants(&self) -> Quadrants {
        let mut q = Quadrants::default();
        let (cx, cy) = (self.canvas.x_mid(), self.canvas.y_mid());
        for element in self.elements {
            let x = element.x_midpoint(self.canvas);
            let y = element.y_midpoint(self.canvas);
            let (left, right) = (x <= cx, x >= cx);
            let (top, bottom) = (y <= cy, y >= cy);

            if left && top {
                q.top_left.add(element, self.canvas);
            }
            if right && top {
                q.top_right.add(element, self.canvas);
            }
            if left && bottom {
                q.bottom_left.add(element, self.canvas);
            }
            if right && bottom {
                q.bottom_right.add(element, self.canvas);
            }
        }
        q
    }
}

fn message(score: u8) -> &'static str {
    match score {
        0..=30 => "Significant asymmetry in the layout",
        31..=50 => "Noticeable asymmetry in the layout",
        51..=70 => "Overall decent symmetry",
        71..=80 => "Very good symmetry",
        _ => "Superb symmetry!",
    }
}
