//! Project-level configuration support
//!
//! Loads configuration from `layoutscore.toml` or `.layoutscorerc.json` in a
//! directory, or from an explicit file passed on the command line.
//!
//! # Configuration Format
//!
//! ```toml
//! # layoutscore.toml
//!
//! # Heuristics to run, in report order
//! heuristics = ["balance", "equilibrium", "symmetry", "harmony"]
//!
//! # Reject elements whose fractional fields leave [0, 1]
//! strict_bounds = false
//!
//! [defaults]
//! format = "text"
//! fail_under = 60
//! ```

use crate::error::{RateError, RateResult};
use crate::raters::HeuristicRegistry;
use crate::scoring::Aggregator;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Written by `layoutscore init`
pub const EXAMPLE_CONFIG: &str = r#"# layoutscore configuration

# Heuristics to run, in report order.
# Available: balance, equilibrium, symmetry, harmony
heuristics = ["balance", "equilibrium", "symmetry", "harmony"]

# Reject layouts with elements outside the unit square
strict_bounds = false

[defaults]
# Output format (text, json, markdown)
format = "text"

# Exit with code 1 when a layout scores below this value
# fail_under = 60
"#;

/// Rating configuration loaded from layoutscore.toml or similar
#[derive(Debug, Clone, Deserialize)]
pub struct RatingConfig {
    /// Heuristic names to run, in order
    #[serde(default = "default_heuristics")]
    pub heuristics: Vec<String>,

    /// Reject elements outside the unit square
    #[serde(default)]
    pub strict_bounds: bool,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            heuristics: default_heuristics(),
            strict_bounds: false,
            defaults: CliDefaults::default(),
        }
    }
}

fn default_heuristics() -> Vec<String> {
    HeuristicRegistry::default()
        .names()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Default CLI flags that can be set in the config file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Default minimum overall score for CI
    #[serde(default)]
    pub fail_under: Option<u8>,
}

/// Load configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `layoutscore.toml`
/// 2. `.layoutscorerc.json`
///
/// Returns default configuration if no config file is found or parsing fails.
pub fn load_rating_config(dir: &Path) -> RatingConfig {
    for name in ["layoutscore.toml", ".layoutscorerc.json"] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded rating config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No rating config found, using defaults");
    RatingConfig::default()
}

/// Load configuration from an explicit TOML or JSON file
pub fn load_config_file(path: &Path) -> anyhow::Result<RatingConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    let mut config: RatingConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON config {}", path.display()))?,
        _ => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML config {}", path.display()))?,
    };
    config.normalize();
    Ok(config)
}

impl RatingConfig {
    /// Normalize heuristic names in place
    pub fn normalize(&mut self) {
        for name in &mut self.heuristics {
            *name = normalize_heuristic_name(name);
        }
    }

    /// Check that every configured heuristic is registered.
    ///
    /// All unregistered names are logged; the first one is returned as the error.
    pub fn validate(&self, registry: &HeuristicRegistry) -> RateResult<()> {
        if self.heuristics.is_empty() {
            return Err(RateError::NoHeuristics);
        }

        let unknown = registry.unknown(&self.heuristics);
        for name in &unknown {
            warn!(
                "Configured heuristic '{}' is not registered (available: {})",
                name,
                registry.names().join(", ")
            );
        }
        match unknown.first() {
            Some(name) => Err(RateError::UnknownHeuristic {
                name: name.to_string(),
                available: registry.names().iter().map(|n| n.to_string()).collect(),
            }),
            None => Ok(()),
        }
    }

    /// Build a validated aggregator for this configuration
    pub fn aggregator(&self, registry: HeuristicRegistry) -> RateResult<Aggregator> {
        self.validate(&registry)?;
        Ok(Aggregator::new(registry, self.heuristics.clone())?.strict_bounds(self.strict_bounds))
    }
}

/// Normalize a heuristic name for registry lookup.
///
/// Lowercases and trims, and drops a trailing `-rater`/`_rater`/`Rater`
/// suffix: `BalanceRater` -> `balance`, ` Harmony ` -> `harmony`.
pub fn normalize_heuristic_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let stripped = lower
        .strip_suffix("-rater")
        .or_else(|| lower.strip_suffix("_rater"))
        .or_else(|| lower.strip_suffix("rater"))
        .unwrap_or(&lower);
    stripped.to_string()
}
