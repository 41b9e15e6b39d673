//! Heuristic evaluation for the falling-block simulator.
//!
//! This crate implements a three-level evaluation stack:
//!
//! 1. **Board metrics** ([`board_metrics`]) - Scalar features of a board
//!    state after a simulated placement (heights, holes, transitions,
//!    wells, landing height, lines cleared).
//!
//! 2. **Move selection** ([`move_selector`]) - Scores every legal placement
//!    of the current piece as a weighted sum of six features and picks the
//!    maximizing one.
//!
//! 3. **Playouts** ([`playout`]) - Plays full games with a fixed weight
//!    vector and reports cleared-row counts, the fitness signal the
//!    training crate optimizes.
//!
//! ```text
//! Playout (full episode, mean cleared rows)
//!     ↓ uses
//! MoveSelector (best placement for one turn)
//!     ↓ uses
//! BoardMetrics (features of one candidate board)
//! ```
//!
//! The selection model is a greedy one-ply lookahead: each candidate
//! placement is simulated on a forked board, scored, and discarded. There
//! is no multi-turn planning.

pub use self::{board_metrics::*, move_selector::*, playout::*};

pub mod board_metrics;
pub mod move_selector;
pub mod playout;
