use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular cell store of a session, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// Blank grid: no mines placed, nothing revealed or flagged.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            cells: Array2::default(nd_index(config.size)),
            mine_count: config.mines,
        }
    }

    /// Rebuilds a grid from a row-major cell array, used by the session decoder.
    pub(crate) fn from_cells(cells: Array2<Cell>, mine_count: CellCount) -> Self {
        Self { cells, mine_count }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    /// Declared number of mines, placed or not.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(nd_index(coords))
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(nd_index(coords))
    }

    /// In-bounds cells around `coords`, row-major.
    pub fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    /// All cells with their coordinates in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn count_mines(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_mine).count() as CellCount
    }

    pub fn count_flags(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount
    }

    pub fn count_revealed(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed).count() as CellCount
    }

    /// Number of mines among the in-bounds neighbours of `coords`.
    pub fn neighbor_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count() as u8
    }

    /// Scatters exactly `mine_count` mines uniformly over every cell except `exclude`.
    ///
    /// Uses rejection sampling: a draw landing on `exclude` or on an existing mine is
    /// thrown away and redrawn. Any mines from a previous placement are cleared first.
    pub fn place_mines<R: Rng>(&mut self, exclude: Coord2, rng: &mut R) {
        let (rows, cols) = self.size();

        for cell in self.cells.iter_mut() {
            cell.is_mine = false;
        }

        let free_cells = self.total_cells() - CellCount::from(self.contains(exclude));
        let target = if self.mine_count > free_cells {
            log::warn!(
                "Grid cannot hold {} mines next to a safe cell, placing {}",
                self.mine_count,
                free_cells
            );
            free_cells
        } else {
            self.mine_count
        };

        let mut placed = 0;
        while placed < target {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if coords == exclude || self[coords].is_mine {
                continue;
            }
            self[coords].is_mine = true;
            placed += 1;
        }
        self.mine_count = placed;

        log::debug!(
            "Placed {} mines on {}x{} grid avoiding {:?}",
            placed,
            rows,
            cols,
            exclude
        );
    }

    /// Marks the given coordinates as mines, ignoring `exclude` and out-of-bounds entries.
    pub(crate) fn place_mines_at(&mut self, mines: &[Coord2], exclude: Coord2) {
        for cell in self.cells.iter_mut() {
            cell.is_mine = false;
        }
        for &coords in mines {
            if coords == exclude {
                log::warn!("Skipping mine at {:?}, it is the first revealed cell", coords);
                continue;
            }
            if let Some(cell) = self.get_mut(coords) {
                cell.is_mine = true;
            }
        }

        let placed = self.count_mines();
        if placed != self.mine_count {
            log::warn!(
                "Placed mine count mismatch, actual: {}, requested: {}",
                placed,
                self.mine_count
            );
            self.mine_count = placed;
        }
    }

    /// Stores the neighbour mine count in every non-mine cell.
    pub fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self[coords].is_mine {
                    continue;
                }
                self[coords].adjacent_mine_count = self.neighbor_mines(coords);
            }
        }
    }

    /// Whether every non-mine cell has been revealed.
    pub fn all_safe_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine || cell.is_revealed)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[nd_index(coords)]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[nd_index(coords)]
    }
}
