//! Layoutscore - Geometric rating of UI layouts
//!
//! Rates the visual composition of a screen from the bounding boxes of its
//! elements. Each heuristic (balance, equilibrium, symmetry, harmony) emits
//! 0-100 metric scores with a short comment, and the aggregator folds them
//! into one overall score.
//!
//! ```no_run
//! use layoutscore::{Aggregator, Layout};
//!
//! let layout = Layout::from_json(
//!     r#"{"canvas": {"width": 1080, "height": 1920},
//!         "items": [{"x": 0.1, "y": 0.1, "width": 0.8, "height": 0.2}]}"#,
//! )?;
//! let response = Aggregator::with_defaults().rate(&layout)?;
//! println!("{}", response.score);
//! # Ok::<(), layoutscore::RateError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod raters;
pub mod reporters;
pub mod scoring;

pub use error::{RateError, RateResult};
pub use models::{Canvas, Element, Layout, MetricGroup, Rating, RatingResponse};
pub use scoring::Aggregator;
