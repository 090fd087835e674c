//! Heuristics command - list registered heuristics

use crate::config::RatingConfig;
use crate::models::Canvas;
use crate::raters::HeuristicRegistry;
use anyhow::Result;
use console::style;

/// A registered heuristic and the metric ids it emits
#[derive(Debug, PartialEq)]
pub(super) struct HeuristicInfo {
    pub name: &'static str,
    pub metric_ids: &'static [&'static str],
    pub enabled: bool,
}

pub(super) fn list(
    registry: &HeuristicRegistry,
    config: &RatingConfig,
) -> Result<Vec<HeuristicInfo>> {
    // Metric ids don't depend on geometry; any valid canvas will do
    let canvas = Canvas::new(1.0, 1.0)?;
    registry
        .names()
        .into_iter()
        .map(|name| -> Result<HeuristicInfo> {
            Ok(HeuristicInfo {
                name,
                metric_ids: registry.create(name, &canvas, &[])?.metric_ids(),
                enabled: config.heuristics.iter().any(|h| h == name),
            })
        })
        .collect()
}

/// Run the heuristics command
pub(super) fn run(config: &RatingConfig) -> Result<()> {
    let registry = HeuristicRegistry::default();

    println!("\n{}\n", style("Registered heuristics").bold());
    for info in list(&registry, config)? {
        let marker = if info.enabled {
            style("●").green()
        } else {
            style("○").dim()
        };
        println!("  {} {}", marker, style(info.name).cyan());
        for id in info.metric_ids {
            println!("      {}", style(id).dim());
        }
    }

    for name in registry.unknown(&config.heuristics) {
        println!(
            "\n{} configured heuristic '{}' is not registered",
            style("warning:").yellow().bold(),
            name
        );
    }
    Ok(())
}
