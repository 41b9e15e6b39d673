use std::cell::OnceCell;

use gridfall_engine::{Board, COLUMNS, Placement, ROWS};

/// Scalar features of a board state produced by one simulated placement.
///
/// The borrowed board must be the result of a successful `apply` of
/// `placement`; metrics of an unapplied or topped-out board are undefined.
/// Scan-based metrics are computed once and cached.
///
/// Transition counts treat the start of each lane (the left end of a row,
/// the floor end of a column) as occupied, and the scans cover the fixed
/// nominal window of the board regardless of how far the stack has risen
/// above the ceiling after clears.
#[derive(Debug)]
pub struct BoardMetrics<'a> {
    board: &'a Board,
    placement: Placement,
    number_holes: OnceCell<usize>,
    row_transitions: OnceCell<usize>,
    column_transitions: OnceCell<usize>,
    wells: OnceCell<usize>,
}

impl<'a> BoardMetrics<'a> {
    #[must_use]
    pub fn new(board: &'a Board, placement: Placement) -> Self {
        Self {
            board,
            placement,
            number_holes: OnceCell::new(),
            row_transitions: OnceCell::new(),
            column_transitions: OnceCell::new(),
            wells: OnceCell::new(),
        }
    }

    /// Sum of the skyline heights.
    #[must_use]
    pub fn aggregate_height(&self) -> usize {
        self.board.skyline().iter().sum()
    }

    /// Empty cells strictly below their column's skyline, summed over
    /// columns.
    #[must_use]
    pub fn number_holes(&self) -> usize {
        *self.number_holes.get_or_init(|| {
            let mut holes = 0;
            for (column, &height) in self.board.skyline().iter().enumerate() {
                for row in 0..height {
                    if !self.board.cell(row, column) {
                        holes += 1;
                    }
                }
            }
            holes
        })
    }

    /// Skyline height at the placement slot plus half the piece height
    /// (minus one), read from the board the placement already mutated.
    #[must_use]
    pub fn landing_height(&self) -> f64 {
        let shape = self.board.next_piece().shape(self.placement.orientation);
        #[expect(clippy::cast_precision_loss)]
        let height = self.board.skyline()[self.placement.slot] as f64;
        #[expect(clippy::cast_precision_loss)]
        let correction = (shape.height as f64 - 1.0) / 2.0;
        height + correction
    }

    /// Occupancy changes between horizontally adjacent cells, scanning each
    /// row left to right with an occupied sentinel before the first cell.
    #[must_use]
    pub fn total_row_transitions(&self) -> usize {
        *self.row_transitions.get_or_init(|| {
            let mut transitions = 0;
            for row in 0..ROWS {
                let mut last = true;
                for column in 0..COLUMNS {
                    let current = self.board.cell(row, column);
                    if current != last {
                        transitions += 1;
                    }
                    last = current;
                }
            }
            transitions
        })
    }

    /// Occupancy changes between vertically adjacent cells, scanning each
    /// column from the floor up with an occupied sentinel below the floor.
    #[must_use]
    pub fn total_column_transitions(&self) -> usize {
        *self.column_transitions.get_or_init(|| {
            let mut transitions = 0;
            for column in 0..COLUMNS {
                let mut last = true;
                for row in 0..ROWS {
                    let current = self.board.cell(row, column);
                    if current != last {
                        transitions += 1;
                    }
                    last = current;
                }
            }
            transitions
        })
    }

    /// Well score summed over all columns.
    ///
    /// A well cell is empty with both horizontal neighbors occupied (edge
    /// columns only need their single inward neighbor). Each well cell
    /// found in the top-down scan scores 1 plus the contiguous empty run
    /// directly beneath it, and a column's scan stops at its surface.
    #[must_use]
    pub fn total_wells(&self) -> usize {
        *self.wells.get_or_init(|| {
            let interior: usize = (1..COLUMNS - 1)
                .map(|column| {
                    self.column_well_score(column, |row| {
                        self.board.cell(row, column - 1) && self.board.cell(row, column + 1)
                    })
                })
                .sum();
            let left = self.column_well_score(0, |row| self.board.cell(row, 1));
            let right =
                self.column_well_score(COLUMNS - 1, |row| self.board.cell(row, COLUMNS - 2));
            interior + left + right
        })
    }

    fn column_well_score(&self, column: usize, flanked: impl Fn(usize) -> bool) -> usize {
        let mut score = 0;
        for row in (0..ROWS).rev() {
            if !self.board.cell(row, column) && flanked(row) {
                score += 1;
                for below in (0..row).rev() {
                    if self.board.cell(below, column) {
                        break;
                    }
                    score += 1;
                }
            }
            if self.board.cell(row, column) {
                break;
            }
        }
        score
    }

    /// The board's cumulative cleared-row count, read directly.
    #[must_use]
    pub fn complete_lines(&self) -> usize {
        self.board.cleared_rows()
    }

    /// Sum of absolute differences between adjacent skyline heights.
    #[must_use]
    pub fn bumpiness(&self) -> usize {
        self.board
            .skyline()
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum()
    }

    /// Column holding the tallest stack; the first one wins on ties.
    #[must_use]
    pub fn max_height_column(&self) -> usize {
        let mut best = 0;
        let mut best_height = 0;
        for (column, &height) in self.board.skyline().iter().enumerate() {
            if height > best_height {
                best_height = height;
                best = column;
            }
        }
        best
    }

    /// Column holding the lowest stack; the first one wins on ties.
    #[must_use]
    pub fn min_height_column(&self) -> usize {
        let mut best = 0;
        let mut best_height = ROWS;
        for (column, &height) in self.board.skyline().iter().enumerate() {
            if height < best_height {
                best_height = height;
                best = column;
            }
        }
        best
    }
}
