//! Population state machine: evaluate, rank, breed.

use std::{mem, num::NonZero, thread};

use gridfall_evaluator::{FEATURE_COUNT, MoveSelector, Playout};
use gridfall_stats::Summary;
use rand::Rng;

use crate::weights;

/// A candidate weight vector paired with its most recent fitness.
///
/// Fitness is the mean cleared-row count over the configured number of
/// playouts; it is written only by [`Population::evaluate_fitness`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    weights: [f64; FEATURE_COUNT],
    fitness: f64,
}

impl WeightVector {
    /// Creates a vector with random unit-norm weights and zero fitness.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            weights: weights::random(rng),
            fitness: 0.0,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &[f64; FEATURE_COUNT] {
        &self.weights
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}

/// Breeds two ranked parents into one offspring: the fitness-weighted sum
/// of their weights, renormalized to unit length. A zero-magnitude result
/// (all components cancel) is passed through unnormalized and flagged.
#[must_use]
pub fn breed(first: &WeightVector, second: &WeightVector) -> WeightVector {
    let mut child = weights::combine(
        &first.weights,
        first.fitness,
        &second.weights,
        second.fitness,
    );
    if !weights::normalize_unit(&mut child) {
        eprintln!("warning: breeding produced a zero-magnitude offspring");
    }
    WeightVector {
        weights: child,
        fitness: 0.0,
    }
}

/// A fixed-size collection of weight vectors, ranked by fitness after
/// every evaluation round.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<WeightVector>,
}

impl Population {
    /// Creates a population of `count` random vectors.
    pub fn random<R>(count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let members = (0..count).map(|_| WeightVector::random(rng)).collect();
        Self { members }
    }

    #[must_use]
    pub fn members(&self) -> &[WeightVector] {
        &self.members
    }

    /// Evaluates every member's fitness and ranks the population.
    ///
    /// Members are statically partitioned across the available workers:
    /// `len / workers` vectors each, with the remainder absorbed by the
    /// last worker. Every worker writes only the fitness of its own
    /// members; ranking happens after all workers have joined. A panicked
    /// worker propagates and aborts the generation instead of leaving a
    /// silently undercounted fitness behind.
    pub fn evaluate_fitness(&mut self, games_per_vector: usize, move_cutoff: usize) {
        let playout = Playout::new(move_cutoff);
        let workers = available_workers();
        let chunk = self.members.len() / workers;

        thread::scope(|scope| {
            let mut rest = self.members.as_mut_slice();
            for worker in 0..workers {
                let mine = if worker == workers - 1 {
                    mem::take(&mut rest)
                } else {
                    let (head, tail) = mem::take(&mut rest).split_at_mut(chunk);
                    rest = tail;
                    head
                };
                scope.spawn(move || {
                    for member in mine {
                        let selector = MoveSelector::new(member.weights);
                        member.fitness = playout.average_cleared_rows(&selector, games_per_vector);
                    }
                });
            }
        });

        self.rank();
    }

    /// Sorts the population by descending fitness.
    pub fn rank(&mut self) {
        self.members
            .sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap());
    }

    /// Replaces the lowest-ranked tail with offspring bred from the head
    /// of the ranking.
    ///
    /// The pairing walks the ranked list with a sliding window of two:
    /// offspring `k` (for `k` in `1..offspring_count`) combines parents
    /// `k - 1` and `k` and lands in slot `len - k`. All offspring are
    /// computed before any slot is overwritten, so reads never observe a
    /// partially bred population.
    ///
    /// # Panics
    ///
    /// Panics if `offspring_count` exceeds the population size.
    pub fn breed_generation(&mut self, offspring_count: usize) {
        assert!(
            offspring_count <= self.members.len(),
            "cannot breed more offspring than the population holds"
        );

        let offspring: Vec<WeightVector> = self
            .members
            .windows(2)
            .take(offspring_count.saturating_sub(1))
            .map(|pair| breed(&pair[0], &pair[1]))
            .collect();

        let len = self.members.len();
        for (index, child) in offspring.into_iter().enumerate() {
            self.members[len - 1 - index] = child;
        }
    }

    /// Summary of the population's current fitness distribution.
    #[must_use]
    pub fn fitness_summary(&self) -> Option<Summary> {
        Summary::new(self.members.iter().map(WeightVector::fitness))
    }
}

fn available_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZero::get)
}
