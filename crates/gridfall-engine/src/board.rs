use crate::{
    TopOutError,
    geometry::{PieceKind, Placement},
};

/// Number of columns on the board.
pub const COLUMNS: usize = 10;
/// Nominal row capacity of the board. Row 0 is the floor.
pub const ROWS: usize = 21;

/// Single row of the board as a 10-bit occupancy mask (bit N = column N).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row(u16);

impl Row {
    pub const EMPTY: Self = Row(0);
    const FULL_MASK: u16 = (1 << COLUMNS) - 1;

    /// Checks whether the cell at the given column is occupied.
    #[inline]
    #[must_use]
    pub fn is_occupied(self, column: usize) -> bool {
        self.0 & (1 << column) != 0
    }

    #[inline]
    fn occupy(&mut self, column: usize) {
        self.0 |= 1 << column;
    }

    /// Checks whether every cell in the row is occupied.
    #[inline]
    #[must_use]
    pub fn is_full(self) -> bool {
        self.0 == Self::FULL_MASK
    }
}

/// Board simulator state: grid, cached skyline, rolling cleared-row
/// counter, and the identity of the next falling piece.
///
/// `skyline[c]` is always one past the highest occupied cell of column `c`
/// (0 for an empty column). Completed rows are counted, never removed: the
/// counter extends the effective ceiling in the top-out test and the rows
/// stay occupied in the grid. Because of that, a long game legitimately
/// stacks above the nominal ceiling, so row storage grows on demand.
///
/// The type has plain value semantics; [`Board::fork`] produces a fully
/// independent copy for one more ply of lookahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Row>,
    skyline: [usize; COLUMNS],
    cleared_rows: usize,
    next_piece: PieceKind,
}

impl Board {
    #[must_use]
    pub fn new(next_piece: PieceKind) -> Self {
        Self {
            rows: vec![Row::EMPTY; ROWS],
            skyline: [0; COLUMNS],
            cleared_rows: 0,
            next_piece,
        }
    }

    /// Returns an independent copy of this board carrying a newly supplied
    /// next piece. Mutating the copy never affects the original.
    #[must_use]
    pub fn fork(&self, next_piece: PieceKind) -> Self {
        Self {
            next_piece,
            ..self.clone()
        }
    }

    pub fn set_next_piece(&mut self, piece: PieceKind) {
        self.next_piece = piece;
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next_piece
    }

    #[must_use]
    pub fn skyline(&self) -> &[usize; COLUMNS] {
        &self.skyline
    }

    #[must_use]
    pub fn cleared_rows(&self) -> usize {
        self.cleared_rows
    }

    /// Returns the row at the given height; rows above the materialized
    /// grid read as empty.
    #[must_use]
    pub fn row(&self, row: usize) -> Row {
        self.rows.get(row).copied().unwrap_or(Row::EMPTY)
    }

    /// Checks whether the cell at (row, column) is occupied.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> bool {
        self.row(row).is_occupied(column)
    }

    /// Returns the legal placements of the current next piece.
    #[must_use]
    pub fn legal_placements(&self) -> &'static [Placement] {
        self.next_piece.placements()
    }

    /// Drops the current next piece at the given placement.
    ///
    /// The piece falls until one of its columns touches the existing stack
    /// or the floor. Returns [`TopOutError`] without mutating anything when
    /// the piece would not fit below the effective ceiling; this is an
    /// expected outcome for candidate placements near the top, not a fault.
    pub fn apply(&mut self, placement: Placement) -> Result<(), TopOutError> {
        let shape = self.next_piece.shape(placement.orientation);
        let slot = placement.slot;

        // Every orientation has a grounded column (bottom offset 0), so the
        // saturating form cannot change the resulting maximum.
        let mut landing = 0;
        for c in 0..shape.width {
            landing = landing.max(self.skyline[slot + c].saturating_sub(shape.bottom[c]));
        }

        if landing + shape.height >= ROWS + self.cleared_rows {
            return Err(TopOutError);
        }

        let piece_top = landing + shape.height;
        if self.rows.len() < piece_top {
            self.rows.resize(piece_top, Row::EMPTY);
        }
        for c in 0..shape.width {
            for r in landing + shape.bottom[c]..landing + shape.top[c] {
                self.rows[r].occupy(slot + c);
            }
        }
        for c in 0..shape.width {
            self.skyline[slot + c] = landing + shape.top[c];
        }

        // Completed rows between the piece top and the landing row bump the
        // counter; the rows themselves stay in place.
        for r in (landing..piece_top).rev() {
            if self.rows[r].is_full() {
                self.cleared_rows += 1;
            }
        }

        Ok(())
    }

    /// Builds a board from ASCII art for tests. `#` is occupied, `.` is
    /// empty; lines run top to bottom and the last line is the floor row.
    /// The skyline is recomputed from the drawn cells.
    #[must_use]
    pub fn from_ascii(next_piece: PieceKind, art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(lines.len() <= ROWS, "fixture taller than the board");

        let mut board = Self::new(next_piece);
        for (i, line) in lines.iter().enumerate() {
            let row = lines.len() - 1 - i;
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                COLUMNS,
                "each fixture row must have exactly {COLUMNS} cells, got {} at line {i}",
                cells.len(),
            );
            for (column, &cell) in cells.iter().enumerate() {
                if cell == '#' {
                    board.rows[row].occupy(column);
                    board.skyline[column] = board.skyline[column].max(row + 1);
                }
            }
        }
        board
    }
}
