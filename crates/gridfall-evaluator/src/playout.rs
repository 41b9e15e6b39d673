use std::{num::NonZero, thread};

use gridfall_engine::{Board, PieceSource, RandomPieceSource};

use crate::move_selector::MoveSelector;

/// Outcome of one full episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutResult {
    pub cleared_rows: usize,
    pub moves: usize,
}

/// Runs full games with a fixed selector, each to a loss or a move cutoff.
///
/// The cutoff bounds pathological weight vectors during training; apart
/// from it the only terminal condition is the live board's `apply`
/// reporting a top-out.
#[derive(Debug, Clone, Copy)]
pub struct Playout {
    move_cutoff: usize,
}

impl Playout {
    #[must_use]
    pub const fn new(move_cutoff: usize) -> Self {
        Self { move_cutoff }
    }

    /// Plays one episode: select, commit on the live board, draw the next
    /// piece, until the commit fails or the cutoff is reached.
    pub fn play<S>(&self, selector: &MoveSelector, source: &mut S) -> PlayoutResult
    where
        S: PieceSource + ?Sized,
    {
        let mut board = Board::new(source.next_piece());
        let mut moves = 0;
        while moves < self.move_cutoff {
            let index = selector.select(&board);
            let placement = board.legal_placements()[index];
            if board.apply(placement).is_err() {
                break;
            }
            board.set_next_piece(source.next_piece());
            moves += 1;
        }
        PlayoutResult {
            cleared_rows: board.cleared_rows(),
            moves,
        }
    }

    /// Plays `games` independent episodes and returns the mean cleared-row
    /// count.
    ///
    /// Runs in the calling thread when the game count does not exceed the
    /// available parallelism. Otherwise the games are split statically over
    /// worker threads, `games / workers` each with the remainder on the
    /// last worker; every worker sums its own results and the totals are
    /// reduced only after all workers have joined. A panicked worker aborts
    /// the whole evaluation rather than undercounting it.
    #[must_use]
    pub fn average_cleared_rows(&self, selector: &MoveSelector, games: usize) -> f64 {
        assert!(games > 0, "at least one game is required");
        let workers = available_workers();
        let total = if games <= workers {
            self.play_batch(selector, games)
        } else {
            let per_worker = games / workers;
            let last_worker = games - (workers - 1) * per_worker;
            thread::scope(|scope| {
                let handles: Vec<_> = (0..workers)
                    .map(|worker| {
                        let count = if worker == workers - 1 {
                            last_worker
                        } else {
                            per_worker
                        };
                        scope.spawn(move || self.play_batch(selector, count))
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| handle.join().expect("playout worker panicked"))
                    .sum()
            })
        };
        #[expect(clippy::cast_precision_loss)]
        let average = total as f64 / games as f64;
        average
    }

    fn play_batch(&self, selector: &MoveSelector, games: usize) -> usize {
        let mut sum = 0;
        for _ in 0..games {
            let mut source = RandomPieceSource::new();
            sum += self.play(selector, &mut source).cleared_rows;
        }
        sum
    }
}

fn available_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZero::get)
}

#[cfg(test)]
mod tests {
    use gridfall_engine::{PieceKind, SequencePieceSource};

    use crate::move_selector::FEATURE_COUNT;

    use super::*;

    const TUNED_WEIGHTS: [f64; FEATURE_COUNT] = [-2.7, 7.1, -2.2, -7.5, -10.0, -2.8];

    #[test]
    fn test_playout_is_deterministic_for_a_fixed_piece_sequence() {
        let selector = MoveSelector::new(TUNED_WEIGHTS);
        let playout = Playout::new(200);

        let mut first = RandomPieceSource::seeded(99);
        let mut second = RandomPieceSource::seeded(99);
        assert_eq!(
            playout.play(&selector, &mut first),
            playout.play(&selector, &mut second)
        );
    }

    #[test]
    fn test_cutoff_bounds_the_episode() {
        let selector = MoveSelector::new(TUNED_WEIGHTS);
        let playout = Playout::new(3);

        let mut source = SequencePieceSource::new(vec![PieceKind::O, PieceKind::I]);
        let result = playout.play(&selector, &mut source);
        assert_eq!(result.moves, 3);
        assert_eq!(result.cleared_rows, 0);
    }

    #[test]
    fn test_zero_cutoff_plays_no_moves() {
        let selector = MoveSelector::new(TUNED_WEIGHTS);
        let playout = Playout::new(0);

        let mut source = SequencePieceSource::new(vec![PieceKind::T]);
        let result = playout.play(&selector, &mut source);
        assert_eq!(
            result,
            PlayoutResult {
                cleared_rows: 0,
                moves: 0
            }
        );
    }

    #[test]
    fn test_losing_episode_terminates_before_the_cutoff() {
        // Rewarding height makes the selector build towers, and every
        // S-piece tower buries a hole at its foot, so no row ever completes
        // and the board must top out.
        let selector = MoveSelector::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let playout = Playout::new(10_000);

        let mut source = SequencePieceSource::new(vec![PieceKind::S]);
        let result = playout.play(&selector, &mut source);
        assert!(result.moves < 10_000);
        assert_eq!(result.cleared_rows, 0);
    }

    #[test]
    fn test_average_is_nonnegative_and_finite() {
        let selector = MoveSelector::new(TUNED_WEIGHTS);
        let playout = Playout::new(100);

        let average = playout.average_cleared_rows(&selector, 2);
        assert!(average.is_finite());
        assert!(average >= 0.0);
    }
}
