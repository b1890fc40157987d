//! Board geometry: cells, knight directions, and moves.

use serde::{Deserialize, Serialize};

/// Board width in cells.
pub const WIDTH: u8 = 11;

/// Board height in cells.
pub const HEIGHT: u8 = 9;

/// Number of cells on the board.
pub const CELLS: u8 = WIDTH * HEIGHT;

/// A board cell, stored as `row * WIDTH + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell(u8);

impl Cell {
    /// The cell at `(col, row)`, or `None` off the board.
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Option<Self> {
        if col < WIDTH && row < HEIGHT {
            Some(Self(row * WIDTH + col))
        } else {
            None
        }
    }

    /// The cell with a raw index, or `None` off the board.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < CELLS {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn col(self) -> u8 {
        self.0 % WIDTH
    }

    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / WIDTH
    }

    /// Bit for this cell in a board mask.
    #[inline]
    pub(crate) const fn bit(self) -> u128 {
        1u128 << self.0
    }

    /// Where a knight on this cell lands when jumping in `direction`.
    #[must_use]
    pub fn jump(self, direction: Direction) -> Option<Self> {
        let (dc, dr) = direction.delta();
        let col = self.col().checked_add_signed(dc)?;
        let row = self.row().checked_add_signed(dr)?;
        Self::new(col, row)
    }

    /// Iterate over every cell on the board.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELLS).map(Cell)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col(), self.row())
    }
}

/// The eight knight jumps, clockwise from north-north-east.
///
/// Rows grow southward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    NNE,
    ENE,
    ESE,
    SSE,
    SSW,
    WSW,
    WNW,
    NNW,
}

impl Direction {
    /// All directions in enumeration order.
    pub const ALL: [Direction; 8] = [
        Direction::NNE,
        Direction::ENE,
        Direction::ESE,
        Direction::SSE,
        Direction::SSW,
        Direction::WSW,
        Direction::WNW,
        Direction::NNW,
    ];

    /// Column and row offsets of the jump.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::NNE => (1, -2),
            Direction::ENE => (2, -1),
            Direction::ESE => (2, 1),
            Direction::SSE => (1, 2),
            Direction::SSW => (-1, 2),
            Direction::WSW => (-2, 1),
            Direction::WNW => (-2, -1),
            Direction::NNW => (-1, -2),
        }
    }
}

/// A move in Knight's Isolation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Opening placement of the mover's knight.
    Place(Cell),
    /// Knight jump from the mover's current cell.
    Jump(Direction),
}
