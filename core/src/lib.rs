//! Game-state engine for a single-player grid-deduction puzzle.
//!
//! The engine owns no global state: a [`Session`] is created from a [`GameConfig`], the
//! embedding application calls [`Session::reveal`] and [`Session::toggle_flag`] in response
//! to input, and hands finished sessions to a [`Profile`] which keeps statistics,
//! achievements and best times on disk.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use achievements::*;
pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use persist::*;
pub use profile::*;
pub use stats::*;
pub use types::*;

mod achievements;
mod cell;
mod clock;
mod engine;
mod error;
mod generator;
mod grid;
mod persist;
mod profile;
mod stats;
mod types;

/// Dimensions, mine count and presentation cell size of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
    pub cell_size: u32,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount, cell_size: u32) -> Self {
        Self {
            size,
            mines,
            cell_size,
        }
    }

    /// Validated constructor: both dimensions positive and `mines < rows * cols`.
    pub fn new((rows, cols): Coord2, mines: CellCount, cell_size: u32) -> Result<Self> {
        if rows == 0 || cols == 0 || mines >= mult(rows, cols) {
            return Err(GameError::InvalidConfig {
                rows: rows.into(),
                cols: cols.into(),
                mines: mines.into(),
            });
        }
        Ok(Self::new_unchecked((rows, cols), mines, cell_size))
    }

    /// Same as [`GameConfig::new`] for signed values as they come from input widgets or
    /// save files.
    pub fn from_raw(rows: i32, cols: i32, mines: i32, cell_size: i32) -> Result<Self> {
        let invalid = || GameError::InvalidConfig {
            rows: rows.into(),
            cols: cols.into(),
            mines: mines.into(),
        };
        let rows = Coord::try_from(rows).map_err(|_| invalid())?;
        let cols = Coord::try_from(cols).map_err(|_| invalid())?;
        let mines = CellCount::try_from(mines).map_err(|_| invalid())?;
        let cell_size =
            u32::try_from(cell_size).map_err(|_| GameError::CorruptRecord("negative cell size"))?;
        Self::new((rows, cols), mines, cell_size)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// The three fixed difficulty presets offered by front-ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((9, 9), 10, 40),
            Self::Medium => GameConfig::new_unchecked((16, 16), 40, 32),
            Self::Hard => GameConfig::new_unchecked((16, 30), 99, 28),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// What a single reveal did to the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    /// Whether this reveal ended the game.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}
