//! Layout rating heuristics
//!
//! Each heuristic consumes a canvas and its ordered elements and emits one or
//! more [`Rating`]s. Heuristics are a closed set of variants dispatched through
//! [`Rater`]; the [`HeuristicRegistry`] maps configured names to constructors.
//!
//! # Heuristics
//!
//! - **balance**: area-weighted displacement of element mass from the center
//! - **equilibrium**: offset of the area-weighted centroid from the center
//! - **symmetry**: per-quadrant weight vectors compared across both axes
//! - **harmony**: screen coverage density and element proportion homogeneity
//!
//! # Scores
//!
//! Every metric maps a normalized value `v` to a human score
//! `round(100 × v)` clamped into `0..=100`.

mod balance;
mod equilibrium;
mod harmony;
mod registry;
mod symmetry;

pub use balance::BalanceRater;
pub use equilibrium::EquilibriumRater;
pub use harmony::HarmonyRater;
pub use registry::{HeuristicRegistry, RaterConstructor};
pub use symmetry::SymmetryRater;

use crate::error::{RateError, RateResult};
use crate::models::{Canvas, Element, Rating};

/// Upper bound of every human score
pub const MAX_SCORE: f64 = 100.0;

/// A rating heuristic bound to one layout
#[derive(Debug, Clone, Copy)]
pub enum Rater<'a> {
    Balance(BalanceRater<'a>),
    Equilibrium(EquilibriumRater<'a>),
    Symmetry(SymmetryRater<'a>),
    Harmony(HarmonyRater<'a>),
}

impl<'a> Rater<'a> {
    pub fn balance(canvas: &'a Canvas, elements: &'a [Element]) -> Self {
        Rater::Balance(BalanceRater::new(canvas, elements))
    }

    pub fn equilibrium(canvas: &'a Canvas, elements: &'a [Element]) -> Self {
        Rater::Equilibrium(EquilibriumRater::new(canvas, elements))
    }

    pub fn symmetry(canvas: &'a Canvas, elements: &'a [Element]) -> Self {
        Rater::Symmetry(SymmetryRater::new(canvas, elements))
    }

    pub fn harmony(canvas: &'a Canvas, elements: &'a [Element]) -> Self {
        Rater::Harmony(HarmonyRater::new(canvas, elements))
    }

    /// Compute the ratings of the bound layout
    pub fn rate(&self) -> RateResult<Vec<Rating>> {
        match self {
            Rater::Balance(r) => r.rate(),
            Rater::Equilibrium(r) => r.rate(),
            Rater::Symmetry(r) => r.rate(),
            Rater::Harmony(r) => r.rate(),
        }
    }

    /// Metric ids emitted by [`Rater::rate`], in emission order
    pub fn metric_ids(&self) -> &'static [&'static str] {
        match self {
            Rater::Balance(_) => &BalanceRater::METRIC_IDS,
            Rater::Equilibrium(_) => &EquilibriumRater::METRIC_IDS,
            Rater::Symmetry(_) => &SymmetryRater::METRIC_IDS,
            Rater::Harmony(_) => &HarmonyRater::METRIC_IDS,
        }
    }
}

/// Map a normalized value to a human score in `0..=100`
pub(crate) fn human_score(value: f64) -> u8 {
    (value * MAX_SCORE).round().clamp(0.0, MAX_SCORE) as u8
}

/// Guard against NaN/inf leaking into a rating
pub(crate) fn ensure_finite(metric: &'static str, value: f64) -> RateResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RateError::degenerate(
            metric,
            format!("intermediate value is not finite ({value})"),
        ))
    }
}
