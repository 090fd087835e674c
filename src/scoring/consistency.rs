//! Cross-layout consistency
//!
//! Measures how uniformly a set of layouts (e.g. the screens of one app)
//! scores on the metrics they all share. For every shared metric id:
//!
//! ```text
//! ratio       = sample_stddev(scores) / max(scores)
//! consistency = floor(100 × (1 − mean(ratios)))
//! ```
//!
//! Fewer than two layouts, or no shared metric, gives 0.

use crate::models::RatingResponse;
use std::collections::BTreeMap;

/// Consistency score in `0..=100` across rated layouts
pub fn consistency(responses: &[RatingResponse]) -> u8 {
    if responses.len() < 2 {
        return 0;
    }

    let per_layout: Vec<BTreeMap<&str, u8>> = responses.iter().map(scores_by_metric).collect();
    let shared: Vec<&str> = per_layout[0]
        .keys()
        .copied()
        .filter(|id| per_layout.iter().all(|scores| scores.contains_key(id)))
        .collect();
    if shared.is_empty() {
        return 0;
    }

    let ratio_sum: f64 = shared
        .iter()
        .map(|id| {
            let scores: Vec<f64> = per_layout
                .iter()
                .filter_map(|scores| scores.get(id))
                .map(|s| f64::from(*s))
                .collect();
            relative_deviation(&scores)
        })
        .sum();

    let value = 100.0 * (1.0 - ratio_sum / shared.len() as f64);
    value.floor().clamp(0.0, 100.0) as u8
}

/// Metric id to score; a repeated id keeps its last score
fn scores_by_metric(response: &RatingResponse) -> BTreeMap<&str, u8> {
    response
        .groups
        .iter()
        .flat_map(|g| &g.ratings)
        .map(|r| (r.metric_id.as_str(), r.score))
        .collect()
}

/// Sample standard deviation over the largest score, 0 when every score is 0
fn relative_deviation(scores: &[f64]) -> f64 {
    let max = scores.iter().copied().fold(0.0, f64::max);
    if max == 0.0 {
        return 0.0;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let square_diff_sum: f64 = scores.iter().map(|s| (s - mean).powi(2)).sum();
    (square_diff_sum / (n - 1.0)).sqrt() / max
}
