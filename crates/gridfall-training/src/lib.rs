//! Population-based optimization of the move heuristic's weight vector.
//!
//! Each candidate is a unit-norm vector of six feature weights. Training
//! repeats a simple cycle:
//!
//! 1. **Evaluate** - every vector plays several full games; its fitness is
//!    the mean cleared-row count (parallel across the population)
//! 2. **Rank** - sort the population by descending fitness
//! 3. **Breed** - replace the lowest-ranked tail with offspring combined
//!    from adjacent pairs at the head of the ranking
//!
//! ```text
//! Population (ranked weight vectors)
//!     ↓ weights
//! MoveSelector (gridfall-evaluator)
//!     ↓ full games
//! Playout → mean cleared rows
//!     ↓ fitness
//! Rank & breed the next generation
//! ```
//!
//! An offspring's raw weights are the fitness-weighted sum of its two
//! parents' weights, renormalized to unit length; there is no mutation
//! step, so diversity comes entirely from the random initial population.
//!
//! The [`fitness`] module exposes the same evaluation as a single function
//! plus per-component bounds, the surface an external swarm or
//! evolutionary optimization library consumes instead of [`genetic`].

pub mod fitness;
pub mod genetic;
pub mod weights;
