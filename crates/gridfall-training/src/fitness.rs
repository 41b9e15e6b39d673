//! Fitness boundary for external optimizers.
//!
//! A swarm or evolutionary optimization library only needs two things from
//! this system: a scalar evaluation of one weight vector and the search
//! bounds per component. Everything else (population bookkeeping, velocity
//! updates, convergence criteria) stays on the library's side.

use gridfall_evaluator::{FEATURE_COUNT, MoveSelector, Playout};

/// Evaluates one weight vector: the mean cleared-row count over `games`
/// full playouts, each bounded by `move_cutoff`.
#[must_use]
pub fn evaluate_weights(weights: &[f64; FEATURE_COUNT], games: usize, move_cutoff: usize) -> f64 {
    let selector = MoveSelector::new(*weights);
    Playout::new(move_cutoff).average_cleared_rows(&selector, games)
}

/// Per-component search bounds for optimizers that explore a bounded box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBounds {
    pub min: [f64; FEATURE_COUNT],
    pub max: [f64; FEATURE_COUNT],
}

/// Bounds calibrated for the six features in selector order: completed
/// lines are rewarded, every other feature is penalized.
pub const SWARM_BOUNDS: WeightBounds = WeightBounds {
    min: [-10.0, 5.0, -10.0, -10.0, -10.0, -10.0],
    max: [0.0, 10.0, 0.0, 0.0, 0.0, 0.0],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swarm_bounds_form_a_valid_box() {
        for (min, max) in SWARM_BOUNDS.min.iter().zip(&SWARM_BOUNDS.max) {
            assert!(min < max);
        }
    }

    #[test]
    fn test_evaluate_weights_returns_a_nonnegative_mean() {
        let weights = [-2.7, 7.1, -2.2, -7.5, -10.0, -2.8];
        let fitness = evaluate_weights(&weights, 1, 40);
        assert!(fitness.is_finite());
        assert!(fitness >= 0.0);
    }
}
