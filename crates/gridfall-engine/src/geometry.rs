use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use crate::board::COLUMNS;

/// Enum representing the type of falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// Square piece.
    O = 0,
    /// Line piece.
    I = 1,
    /// L-piece.
    L = 2,
    /// J-piece.
    J = 3,
    /// T-piece.
    T = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::O,
            1 => PieceKind::I,
            2 => PieceKind::L,
            3 => PieceKind::J,
            4 => PieceKind::T,
            5 => PieceKind::S,
            _ => PieceKind::Z,
        }
    }
}

/// Geometry of one piece orientation.
///
/// Offsets are expressed per spanned column, relative to the landing row:
/// `bottom[c]` is the lowest occupied cell of column `c`, `top[c]` is one
/// past the highest. Only the first `width` entries of either array are
/// meaningful. Every orientation has at least one column with a zero
/// bottom offset (the column the piece rests on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedShape {
    pub width: usize,
    pub height: usize,
    pub bottom: [usize; 4],
    pub top: [usize; 4],
}

/// A candidate drop: orientation index and the leftmost column the piece
/// occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub orientation: usize,
    pub slot: usize,
}

const fn shape(width: usize, height: usize, bottom: [usize; 4], top: [usize; 4]) -> OrientedShape {
    OrientedShape {
        width,
        height,
        bottom,
        top,
    }
}

const O_SHAPES: [OrientedShape; 1] = [shape(2, 2, [0, 0, 0, 0], [2, 2, 0, 0])];

const I_SHAPES: [OrientedShape; 2] = [
    shape(1, 4, [0, 0, 0, 0], [4, 0, 0, 0]),
    shape(4, 1, [0, 0, 0, 0], [1, 1, 1, 1]),
];

const L_SHAPES: [OrientedShape; 4] = [
    shape(2, 3, [0, 0, 0, 0], [3, 1, 0, 0]),
    shape(3, 2, [0, 1, 1, 0], [2, 2, 2, 0]),
    shape(2, 3, [2, 0, 0, 0], [3, 3, 0, 0]),
    shape(3, 2, [0, 0, 0, 0], [1, 1, 2, 0]),
];

const J_SHAPES: [OrientedShape; 4] = [
    shape(2, 3, [0, 0, 0, 0], [1, 3, 0, 0]),
    shape(3, 2, [0, 0, 0, 0], [2, 1, 1, 0]),
    shape(2, 3, [0, 2, 0, 0], [3, 3, 0, 0]),
    shape(3, 2, [1, 1, 0, 0], [2, 2, 2, 0]),
];

const T_SHAPES: [OrientedShape; 4] = [
    shape(2, 3, [0, 1, 0, 0], [3, 2, 0, 0]),
    shape(3, 2, [1, 0, 1, 0], [2, 2, 2, 0]),
    shape(2, 3, [1, 0, 0, 0], [2, 3, 0, 0]),
    shape(3, 2, [0, 0, 0, 0], [1, 2, 1, 0]),
];

const S_SHAPES: [OrientedShape; 2] = [
    shape(3, 2, [0, 0, 1, 0], [1, 2, 2, 0]),
    shape(2, 3, [1, 0, 0, 0], [3, 2, 0, 0]),
];

const Z_SHAPES: [OrientedShape; 2] = [
    shape(3, 2, [1, 0, 0, 0], [2, 2, 1, 0]),
    shape(2, 3, [0, 1, 0, 0], [2, 3, 0, 0]),
];

/// Number of legal placements a shape list produces: one per orientation
/// and horizontal slot whose column span stays on the board.
const fn placement_count(shapes: &[OrientedShape]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < shapes.len() {
        count += COLUMNS + 1 - shapes[i].width;
        i += 1;
    }
    count
}

const fn build_placements<const N: usize>(shapes: &[OrientedShape]) -> [Placement; N] {
    let mut placements = [Placement {
        orientation: 0,
        slot: 0,
    }; N];
    let mut index = 0;
    let mut orientation = 0;
    while orientation < shapes.len() {
        let mut slot = 0;
        while slot + shapes[orientation].width <= COLUMNS {
            placements[index] = Placement { orientation, slot };
            index += 1;
            slot += 1;
        }
        orientation += 1;
    }
    placements
}

const O_PLACEMENTS: [Placement; placement_count(&O_SHAPES)] = build_placements(&O_SHAPES);
const I_PLACEMENTS: [Placement; placement_count(&I_SHAPES)] = build_placements(&I_SHAPES);
const L_PLACEMENTS: [Placement; placement_count(&L_SHAPES)] = build_placements(&L_SHAPES);
const J_PLACEMENTS: [Placement; placement_count(&J_SHAPES)] = build_placements(&J_SHAPES);
const T_PLACEMENTS: [Placement; placement_count(&T_SHAPES)] = build_placements(&T_SHAPES);
const S_PLACEMENTS: [Placement; placement_count(&S_SHAPES)] = build_placements(&S_SHAPES);
const Z_PLACEMENTS: [Placement; placement_count(&Z_SHAPES)] = build_placements(&Z_SHAPES);

/// Upper bound on the number of legal placements of any piece.
pub const MAX_PLACEMENTS: usize = placement_count(&L_SHAPES);

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Returns the geometry of every orientation of this piece.
    #[must_use]
    pub const fn orientations(self) -> &'static [OrientedShape] {
        match self {
            PieceKind::O => &O_SHAPES,
            PieceKind::I => &I_SHAPES,
            PieceKind::L => &L_SHAPES,
            PieceKind::J => &J_SHAPES,
            PieceKind::T => &T_SHAPES,
            PieceKind::S => &S_SHAPES,
            PieceKind::Z => &Z_SHAPES,
        }
    }

    /// Returns the geometry of one orientation.
    ///
    /// # Panics
    ///
    /// Panics if `orientation` is out of range for this piece.
    #[must_use]
    pub const fn shape(self, orientation: usize) -> &'static OrientedShape {
        &self.orientations()[orientation]
    }

    /// Returns every legal `(orientation, slot)` placement of this piece on
    /// the fixed-width board.
    #[must_use]
    pub const fn placements(self) -> &'static [Placement] {
        match self {
            PieceKind::O => &O_PLACEMENTS,
            PieceKind::I => &I_PLACEMENTS,
            PieceKind::L => &L_PLACEMENTS,
            PieceKind::J => &J_PLACEMENTS,
            PieceKind::T => &T_PLACEMENTS,
            PieceKind::S => &S_PLACEMENTS,
            PieceKind::Z => &Z_PLACEMENTS,
        }
    }

    #[must_use]
    pub const fn all() -> [PieceKind; PieceKind::LEN] {
        [
            PieceKind::O,
            PieceKind::I,
            PieceKind::L,
            PieceKind::J,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_counts() {
        let expected = [1, 2, 4, 4, 4, 2, 2];
        for (kind, count) in PieceKind::all().into_iter().zip(expected) {
            assert_eq!(kind.orientations().len(), count, "{kind:?}");
        }
    }

    #[test]
    fn test_placement_counts() {
        let expected = [9, 17, 34, 34, 34, 17, 17];
        for (kind, count) in PieceKind::all().into_iter().zip(expected) {
            assert_eq!(kind.placements().len(), count, "{kind:?}");
        }
        for kind in PieceKind::all() {
            assert!(kind.placements().len() <= MAX_PLACEMENTS);
        }
    }

    #[test]
    fn test_placements_stay_on_board() {
        for kind in PieceKind::all() {
            for placement in kind.placements() {
                let shape = kind.shape(placement.orientation);
                assert!(
                    placement.slot + shape.width <= COLUMNS,
                    "{kind:?} {placement:?} spans past the right edge"
                );
            }
        }
    }

    #[test]
    fn test_every_orientation_has_a_grounded_column() {
        for kind in PieceKind::all() {
            for (orientation, shape) in kind.orientations().iter().enumerate() {
                assert!(
                    shape.bottom[..shape.width].contains(&0),
                    "{kind:?} orientation {orientation} never touches its landing row"
                );
            }
        }
    }

    #[test]
    fn test_offsets_are_consistent_with_height() {
        for kind in PieceKind::all() {
            for shape in kind.orientations() {
                assert!(shape.width >= 1 && shape.width <= 4);
                for c in 0..shape.width {
                    assert!(shape.bottom[c] < shape.top[c]);
                    assert!(shape.top[c] <= shape.height);
                }
                let tallest = (0..shape.width).map(|c| shape.top[c]).max().unwrap();
                assert_eq!(tallest, shape.height);
            }
        }
    }

    #[test]
    fn test_each_orientation_covers_four_cells() {
        for kind in PieceKind::all() {
            for shape in kind.orientations() {
                let cells: usize = (0..shape.width).map(|c| shape.top[c] - shape.bottom[c]).sum();
                assert_eq!(cells, 4, "{kind:?}");
            }
        }
    }
}
