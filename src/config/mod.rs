//! Configuration module for layoutscore
//!
//! This module handles:
//! - Project-level configuration (layoutscore.toml)
//! - Heuristic selection and validation against the registry
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file,
    load_rating_config,
    normalize_heuristic_name,
    CliDefaults,
    RatingConfig,
    EXAMPLE_CONFIG,
};
