//! Proptest strategies for grading inputs.

use peer_grading_domain::{criteria::Criterion, evaluation::CriterionScores};
use proptest::prelude::*;

/// Scores with two decimal places within 0..=100
pub fn score() -> impl Strategy<Value = f64> {
    (0u32..=10_000).prop_map(|hundredths| hundredths as f64 / 100.0)
}

/// One score per criterion
pub fn criterion_scores() -> impl Strategy<Value = CriterionScores> {
    proptest::array::uniform6(score()).prop_map(|values| {
        let mut scores = CriterionScores::uniform(0.0);
        for (criterion, value) in Criterion::all().iter().zip(values) {
            scores.set(*criterion, value);
        }
        scores
    })
}

/// Six whole-number weights summing to exactly 100
pub fn criterion_weights() -> impl Strategy<Value = [f64; 6]> {
    proptest::collection::vec(0u32..=100, 5).prop_map(|mut cuts| {
        cuts.sort_unstable();
        let mut weights = [0.0; 6];
        let mut previous = 0;
        for (slot, cut) in weights.iter_mut().zip(cuts.iter().chain(std::iter::once(&100))) {
            *slot = f64::from(cut - previous);
            previous = *cut;
        }
        weights
    })
}

/// Instructor and peer weights summing to exactly 100
pub fn blend_weights() -> impl Strategy<Value = (f64, f64)> {
    (0u32..=100).prop_map(|instructor| (f64::from(instructor), f64::from(100 - instructor)))
}
