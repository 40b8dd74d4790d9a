use crate::*;
pub use random::*;

mod random;

/// Strategy deciding where mines go once the first cell has been chosen.
///
/// Implementations must leave `exclude` free of mines.
pub trait MinePlacer {
    fn place(&mut self, grid: &mut Grid, exclude: Coord2);
}

/// Places mines at a fixed list of coordinates, for replays and deterministic tests.
///
/// A listed coordinate equal to the first revealed cell is skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPlacer {
    mines: Vec<Coord2>,
}

impl FixedPlacer {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, grid: &mut Grid, exclude: Coord2) {
        grid.place_mines_at(&self.mines, exclude);
    }
}
