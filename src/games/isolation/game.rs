//! Knight's Isolation position.

use serde::{Deserialize, Serialize};

use super::board::{Cell, Direction, Move, HEIGHT, WIDTH};
use crate::core::PlayerId;
use crate::rules::GameState;

/// A Knight's Isolation position.
///
/// Blocked cells are a bitmask over the 99 cells. A knight's own cell is
/// always blocked.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Isolation {
    blocked: u128,
    locations: [Option<Cell>; 2],
    ply_count: u32,
}

impl Default for Isolation {
    fn default() -> Self {
        Self::new()
    }
}

impl Isolation {
    /// An empty board with neither knight placed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocked: 0,
            locations: [None, None],
            ply_count: 0,
        }
    }

    /// Block extra cells before the game starts.
    #[must_use]
    pub fn with_blocked(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        for cell in cells {
            self.blocked |= cell.bit();
        }
        self
    }

    /// Whether a knight may land on `cell`.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.blocked & cell.bit() == 0
    }

    /// Where `player`'s knight stands, `None` before placement.
    #[must_use]
    pub fn location(&self, player: PlayerId) -> Option<Cell> {
        self.locations[player.index()]
    }

    /// Cells `player` could move to if it were their turn.
    pub fn liberties(&self, player: PlayerId) -> Vec<Cell> {
        match self.location(player) {
            None => Cell::all().filter(|&c| self.is_open(c)).collect(),
            Some(from) => Direction::ALL
                .iter()
                .filter_map(|&d| from.jump(d))
                .filter(|&c| self.is_open(c))
                .collect(),
        }
    }

    /// Landing cell of `mv` for the player to move, if the move is legal.
    #[must_use]
    pub fn destination(&self, mv: &Move) -> Option<Cell> {
        let target = match (*mv, self.location(self.active_player())) {
            (Move::Place(cell), None) => cell,
            (Move::Jump(direction), Some(from)) => from.jump(direction)?,
            _ => return None,
        };
        self.is_open(target).then_some(target)
    }
}

impl GameState for Isolation {
    type Action = Move;

    fn legal_actions(&self) -> Vec<Move> {
        match self.location(self.active_player()) {
            None => Cell::all()
                .filter(|&c| self.is_open(c))
                .map(Move::Place)
                .collect(),
            Some(from) => Direction::ALL
                .iter()
                .copied()
                .filter(|&d| from.jump(d).is_some_and(|c| self.is_open(c)))
                .map(Move::Jump)
                .collect(),
        }
    }

    fn is_terminal(&self) -> bool {
        !self.has_liberties(self.active_player())
    }

    fn apply(&self, action: &Move) -> Self {
        let player = self.active_player();
        let target = self
            .destination(action)
            .unwrap_or_else(|| panic!("{:?} is not legal for {}", action, player));

        let mut next = self.clone();
        next.blocked |= target.bit();
        next.locations[player.index()] = Some(target);
        next.ply_count += 1;
        next
    }

    fn active_player(&self) -> PlayerId {
        PlayerId::for_ply(self.ply_count)
    }

    fn has_liberties(&self, player: PlayerId) -> bool {
        !self.liberties(player).is_empty()
    }

    fn ply_count(&self) -> u32 {
        self.ply_count
    }
}

impl std::fmt::Display for Isolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                let Some(cell) = Cell::new(col, row) else {
                    continue;
                };
                let glyph = if self.locations[0] == Some(cell) {
                    '1'
                } else if self.locations[1] == Some(cell) {
                    '2'
                } else if self.is_open(cell) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
