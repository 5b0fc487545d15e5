//! Scoring module - sub-scores and final grades
//!
//! Every grade shown to a user is derived here from raw criterion scores and
//! the active grading configuration.

mod aggregation;
mod engine;

pub use aggregation::*;
pub use engine::*;

/// Round to two decimals, halves away from zero.
///
/// Used for sub-scores, peer averages and blended final grades alike.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
