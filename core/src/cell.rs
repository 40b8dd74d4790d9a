#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One grid unit.
///
/// `adjacent_mine_count` only carries meaning for non-mine cells and is fixed once
/// mines have been placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mine_count: u8,
}

impl Cell {
    /// Whether the player still sees this cell as covered.
    pub const fn is_covered(self) -> bool {
        !self.is_revealed
    }

    /// Whether the cell is a revealed non-mine with no adjacent mines.
    pub const fn is_open_zero(self) -> bool {
        self.is_revealed && !self.is_mine && self.adjacent_mine_count == 0
    }
}
