//! Layout Scoring
//!
//! Runs the configured heuristics over one layout and folds their ratings
//! into a single [`RatingResponse`](crate::models::RatingResponse).
//!
//! # Scoring Formula
//!
//! ```text
//! Group score   = floor(Σ metric scores / metric count)
//! Overall score = floor(Σ group scores / group count)
//! ```
//!
//! Every metric score is already an integer in `0..=100`, so both levels
//! truncate rather than round.
//!
//! # Example
//!
//! A layout rated by `balance` (92, 81) and `harmony` (100, 40):
//! - Balance = floor(173 / 2) = 86
//! - Harmony = floor(140 / 2) = 70
//! - Overall = floor(156 / 2) = 78

//!
//! Batches of layouts also get a [`consistency()`] score across the metrics
//! they share.

mod aggregator;
mod consistency;

pub use aggregator::{aggregate, Aggregator};
pub use consistency::consistency;
