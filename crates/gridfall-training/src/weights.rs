//! Operations on raw weight arrays.
//!
//! These are the building blocks the population optimizer composes:
//! random initialization, unit-length normalization, and the
//! fitness-weighted parent combination used for breeding. They work on
//! plain `[f64; FEATURE_COUNT]` arrays; pairing a vector with its fitness
//! is the job of [`genetic::WeightVector`](crate::genetic::WeightVector).

use gridfall_evaluator::FEATURE_COUNT;
use rand::Rng;

/// Generates a random weight vector: uniform magnitude in `[0, 1)` with an
/// independently random sign per component, normalized to unit length.
pub fn random<R>(rng: &mut R) -> [f64; FEATURE_COUNT]
where
    R: Rng + ?Sized,
{
    let mut weights = [0.0; FEATURE_COUNT];
    for w in &mut weights {
        let magnitude: f64 = rng.random_range(0.0..1.0);
        *w = if rng.random_bool(0.5) {
            -magnitude
        } else {
            magnitude
        };
    }
    normalize_unit(&mut weights);
    weights
}

/// Scales the vector to unit Euclidean length in place.
///
/// A zero-magnitude vector cannot be normalized; it is left unchanged and
/// reported as `false` so the caller can flag the anomaly.
pub fn normalize_unit(weights: &mut [f64; FEATURE_COUNT]) -> bool {
    let magnitude = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
    if magnitude > 0.0 {
        for w in weights {
            *w /= magnitude;
        }
        true
    } else {
        false
    }
}

/// Componentwise fitness-weighted sum of two parents, the raw (still
/// unnormalized) weights of one offspring.
#[must_use]
pub fn combine(
    first: &[f64; FEATURE_COUNT],
    first_fitness: f64,
    second: &[f64; FEATURE_COUNT],
    second_fitness: f64,
) -> [f64; FEATURE_COUNT] {
    let mut combined = [0.0; FEATURE_COUNT];
    for (slot, (a, b)) in combined.iter_mut().zip(first.iter().zip(second)) {
        *slot = first_fitness * a + second_fitness * b;
    }
    combined
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;

    fn norm(weights: &[f64; FEATURE_COUNT]) -> f64 {
        weights.iter().map(|w| w * w).sum::<f64>().sqrt()
    }

    #[test]
    fn test_random_vectors_have_unit_norm() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..64 {
            let weights = random(&mut rng);
            assert!((norm(&weights) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_vectors_use_both_signs() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut negatives = 0;
        let mut positives = 0;
        for _ in 0..64 {
            for w in random(&mut rng) {
                if w < 0.0 {
                    negatives += 1;
                } else {
                    positives += 1;
                }
            }
        }
        assert!(negatives > 0);
        assert!(positives > 0);
    }

    #[test]
    fn test_normalize_unit_produces_unit_norm() {
        let mut weights = [3.0, -4.0, 0.0, 0.0, 0.0, 0.0];
        assert!(normalize_unit(&mut weights));
        assert!((norm(&weights) - 1.0).abs() < 1e-9);
        assert!((weights[0] - 0.6).abs() < 1e-9);
        assert!((weights[1] + 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_unit_passes_zero_vector_through() {
        let mut weights = [0.0; FEATURE_COUNT];
        assert!(!normalize_unit(&mut weights));
        assert_eq!(weights, [0.0; FEATURE_COUNT]);
    }

    #[test]
    fn test_combine_scales_each_parent_by_its_fitness() {
        let first = [1.0, 0.0, -1.0, 2.0, 0.5, -0.5];
        let second = [0.0, 1.0, 1.0, -1.0, 0.5, 0.5];
        let combined = combine(&first, 2.0, &second, 3.0);
        assert_eq!(combined, [2.0, 3.0, 1.0, 1.0, 2.5, 0.5]);
    }

    #[test]
    fn test_combine_with_a_zero_fitness_parent() {
        // The offspring's raw weights collapse to the other parent's
        // fitness-scaled weights.
        let first = [0.9, -0.1, 0.2, -0.3, 0.1, 0.1];
        let second = [0.5, 0.5, -0.5, 0.0, 0.25, -0.25];
        let combined = combine(&first, 0.0, &second, 4.0);
        assert_eq!(combined, [2.0, 2.0, -2.0, 0.0, 1.0, -1.0]);
    }
}
