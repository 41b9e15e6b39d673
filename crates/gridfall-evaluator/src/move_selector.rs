use std::iter;

use arrayvec::ArrayVec;
use gridfall_engine::{Board, MAX_PLACEMENTS, Placement};

use crate::board_metrics::BoardMetrics;

/// Number of features the heuristic combines; weight vectors share this
/// dimensionality.
pub const FEATURE_COUNT: usize = 6;

/// Greedy one-ply move selection with a linear heuristic.
///
/// Each candidate placement is simulated on a forked board and scored as
/// the dot product of the weight vector with six features in fixed order:
/// landing height, complete lines, row transitions, column transitions,
/// holes, wells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSelector {
    weights: [f64; FEATURE_COUNT],
}

impl MoveSelector {
    #[must_use]
    pub const fn new(weights: [f64; FEATURE_COUNT]) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &[f64; FEATURE_COUNT] {
        &self.weights
    }

    fn score(&self, metrics: &BoardMetrics<'_>) -> f64 {
        #[expect(clippy::cast_precision_loss)]
        let features = [
            metrics.landing_height(),
            metrics.complete_lines() as f64,
            metrics.total_row_transitions() as f64,
            metrics.total_column_transitions() as f64,
            metrics.number_holes() as f64,
            metrics.total_wells() as f64,
        ];
        iter::zip(&self.weights, &features).map(|(w, f)| w * f).sum()
    }

    /// Scores every legal placement of the board's next piece, in placement
    /// order. Entries are `None` where the placement tops out.
    #[must_use]
    pub fn scored_placements(&self, board: &Board) -> ArrayVec<Option<f64>, MAX_PLACEMENTS> {
        board
            .legal_placements()
            .iter()
            .map(|&placement| self.score_placement(board, placement))
            .collect()
    }

    fn score_placement(&self, board: &Board, placement: Placement) -> Option<f64> {
        let mut candidate = board.fork(board.next_piece());
        candidate.apply(placement).ok()?;
        let metrics = BoardMetrics::new(&candidate, placement);
        Some(self.score(&metrics))
    }

    /// Picks the index of the strictly highest-scoring placement; ties keep
    /// the first index encountered. Placements that top out are never
    /// selected. When every placement tops out, index 0 is returned and
    /// the caller's next `apply` on the live board reports the loss.
    #[must_use]
    pub fn select(&self, board: &Board) -> usize {
        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, score) in self.scored_placements(board).into_iter().enumerate() {
            let Some(score) = score else {
                continue;
            };
            if score > best_score {
                best_index = index;
                best_score = score;
            }
        }
        best_index
    }
}

#[cfg(test)]
mod tests {
    use gridfall_engine::PieceKind;

    use super::*;

    #[test]
    fn test_selection_is_deterministic() {
        let board = Board::from_ascii(
            PieceKind::T,
            "
            ..........
            #...##....
            ##.###..#.
            ",
        );
        let selector = MoveSelector::new([-1.0, 2.0, -0.5, -1.5, -4.0, -1.0]);

        let first = selector.select(&board);
        let second = selector.select(&board);
        assert_eq!(first, second);
    }

    #[test]
    fn test_selector_prefers_the_pit_under_landing_height_weight() {
        // Only landing height matters; the vertical line piece dropped into
        // the empty column 5 scores best.
        let board = Board::from_ascii(
            PieceKind::I,
            "
            #####.####
            #####.####
            #####.####
            #####.####
            #####.####
            ",
        );
        let selector = MoveSelector::new([-1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        // Placements 0..10 are the vertical orientation at slots 0..10; the
        // pit drop lands at 0 and every other placement rests on the walls.
        assert_eq!(selector.select(&board), 5);
    }

    #[test]
    fn test_topping_out_placements_are_skipped() {
        // Column 0 is stacked to the ceiling, so every placement touching
        // it fails; with all-zero weights each surviving placement scores
        // 0.0 and the first one wins.
        let mut art = String::new();
        for _ in 0..20 {
            art.push_str("#.........\n");
        }
        let board = Board::from_ascii(PieceKind::O, &art);
        let selector = MoveSelector::new([0.0; FEATURE_COUNT]);

        let scores = selector.scored_placements(&board);
        assert!(scores[0].is_none());
        assert!(scores[1].is_some());
        assert_eq!(selector.select(&board), 1);
    }

    #[test]
    fn test_all_placements_topping_out_falls_back_to_index_zero() {
        let mut art = String::new();
        for _ in 0..20 {
            art.push_str("##########\n");
        }
        let board = Board::from_ascii(PieceKind::T, &art);
        let selector = MoveSelector::new([-1.0, 1.0, -1.0, -1.0, -1.0, -1.0]);

        let scores = selector.scored_placements(&board);
        assert!(scores.iter().all(Option::is_none));
        assert_eq!(selector.select(&board), 0);
    }

    #[test]
    fn test_hole_weight_steers_away_from_overhangs() {
        // A J-piece on a flat floor: its flat-bottom orientations make no
        // holes, while orientation 2 buries two cells. With only the hole
        // weight active the selector must pick a hole-free placement.
        let board = Board::new(PieceKind::J);
        let selector = MoveSelector::new([0.0, 0.0, 0.0, 0.0, -1.0, 0.0]);

        let index = selector.select(&board);
        let placement = board.legal_placements()[index];

        let mut candidate = board.fork(board.next_piece());
        candidate.apply(placement).unwrap();
        let metrics = BoardMetrics::new(&candidate, placement);
        assert_eq!(metrics.number_holes(), 0);
    }

    #[test]
    fn test_scores_follow_placement_order() {
        let board = Board::new(PieceKind::S);
        let selector = MoveSelector::new([-1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        let scores = selector.scored_placements(&board);
        assert_eq!(scores.len(), board.legal_placements().len());
        assert!(scores.iter().all(Option::is_some));
    }
}
