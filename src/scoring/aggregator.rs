//! Heuristic aggregator
//!
//! Resolves every configured heuristic up front, then rates layouts by
//! running each heuristic in order and averaging the results.

use crate::error::{RateError, RateResult};
use crate::models::{floor_mean, Canvas, Element, Layout, MetricGroup, RatingResponse};
use crate::raters::{HeuristicRegistry, RaterConstructor};
use rayon::prelude::*;
use tracing::{debug, info};

/// Runs a fixed, validated list of heuristics
#[derive(Debug, Clone)]
pub struct Aggregator {
    registry: HeuristicRegistry,
    heuristics: Vec<String>,
    strict_bounds: bool,
}

impl Aggregator {
    /// Build an aggregator, failing on an empty list or any unregistered name
    pub fn new(registry: HeuristicRegistry, heuristics: Vec<String>) -> RateResult<Self> {
        if heuristics.is_empty() {
            return Err(RateError::NoHeuristics);
        }
        for name in &heuristics {
            registry.get(name)?;
        }
        Ok(Self {
            registry,
            heuristics,
            strict_bounds: false,
        })
    }

    /// All built-in heuristics in registry order
    pub fn with_defaults() -> Self {
        let registry = HeuristicRegistry::default();
        let heuristics = registry.names().iter().map(|n| n.to_string()).collect();
        Self {
            registry,
            heuristics,
            strict_bounds: false,
        }
    }

    /// Reject elements outside the unit square before rating
    pub fn strict_bounds(mut self, strict: bool) -> Self {
        self.strict_bounds = strict;
        self
    }

    pub fn heuristics(&self) -> &[String] {
        &self.heuristics
    }

    /// Rate one layout
    pub fn rate(&self, layout: &Layout) -> RateResult<RatingResponse> {
        if self.strict_bounds {
            layout.check_bounds()?;
        }
        self.rate_elements(&layout.canvas, &layout.elements)
    }

    /// Rate a canvas and its elements
    pub fn rate_elements(
        &self,
        canvas: &Canvas,
        elements: &[Element],
    ) -> RateResult<RatingResponse> {
        let mut groups = Vec::with_capacity(self.heuristics.len());
        for (name, constructor) in self.constructors()? {
            let ratings = constructor(canvas, elements).rate()?;
            let group = MetricGroup::new(name, ratings);
            debug!(
                "Heuristic {}: {} metrics, group score {:?}",
                name,
                group.ratings.len(),
                group.average()
            );
            groups.push(group);
        }

        let response = aggregate(groups)?;
        info!(
            "Layout score: {} ({} elements, {} heuristics)",
            response.score,
            elements.len(),
            response.groups.len()
        );
        Ok(response)
    }

    /// Rate independent layouts in parallel, keeping input order
    pub fn rate_batch(&self, layouts: &[Layout]) -> Vec<RateResult<RatingResponse>> {
        layouts.par_iter().map(|layout| self.rate(layout)).collect()
    }

    fn constructors(&self) -> RateResult<Vec<(&str, RaterConstructor)>> {
        self.heuristics
            .iter()
            .map(|name| Ok((name.as_str(), self.registry.get(name)?)))
            .collect()
    }

    /// Generate a human-readable explanation of a response
    pub fn explain(&self, response: &RatingResponse) -> String {
        let mut lines = Vec::new();

        lines.push(format!("# Layout Score: {}/100\n", response.score));

        lines.push("## Scoring Formula\n".to_string());
        lines.push("```".to_string());
        lines.push("Group   = floor(sum(metric scores) / metric count)".to_string());
        lines.push("Overall = floor(sum(group scores) / group count)".to_string());
        lines.push("```\n".to_string());

        let group_scores: Vec<u8> = response
            .groups
            .iter()
            .filter_map(MetricGroup::average)
            .collect();
        let sum: u32 = group_scores.iter().map(|s| u32::from(*s)).sum();
        lines.push(format!(
            "Overall = floor({} / {}) = {}\n",
            sum,
            group_scores.len(),
            response.score
        ));

        for group in &response.groups {
            let scores: Vec<String> = group.ratings.iter().map(|r| r.score.to_string()).collect();
            lines.push(format!(
                "## {} Score: {}\n",
                group.title(),
                group.average().unwrap_or(0)
            ));
            lines.push(format!("- Metrics: {}", scores.join(" + ")));
            for rating in &group.ratings {
                lines.push(format!(
                    "  - {} ({}): {}",
                    rating.title(),
                    rating.metric_id,
                    rating.score
                ));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

/// Fold metric groups into a response
pub fn aggregate(groups: Vec<MetricGroup>) -> RateResult<RatingResponse> {
    let mut group_scores = Vec::with_capacity(groups.len());
    for group in &groups {
        let average = group.average().ok_or_else(|| {
            RateError::degenerate(
                "group_score",
                format!("heuristic '{}' produced no ratings", group.section),
            )
        })?;
        group_scores.push(average);
    }
    let score = floor_mean(group_scores).ok_or(RateError::NoHeuristics)?;
    Ok(RatingResponse { score, groups })
}
