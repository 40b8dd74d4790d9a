use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions, all from `InProgress`:
/// - InProgress -> Lost
/// - InProgress -> Won
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    InProgress,
    Lost,
    Won,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Outcome and duration of a session, the input to achievement rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionSummary {
    pub outcome: Outcome,
    pub elapsed_secs: u32,
}

/// One game from the blank grid to a win or a loss.
///
/// Mines are only placed on the first reveal, which is therefore always safe.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    grid: Grid,
    outcome: Outcome,
    first_click_done: bool,
    flag_count: CellCount,
    cell_size: u32,
    clock: Clock,
    triggered_mine: Option<Coord2>,
}

impl Session {
    /// Starts a fresh session, failing with [`GameError::InvalidConfig`] for empty
    /// dimensions or a mine count that leaves no safe cell.
    pub fn new(config: GameConfig) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines, config.cell_size)?;
        Ok(Self::blank(config))
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::blank(difficulty.config())
    }

    fn blank(config: GameConfig) -> Self {
        Self {
            grid: Grid::new(&config),
            outcome: Outcome::InProgress,
            first_click_done: false,
            flag_count: 0,
            cell_size: config.cell_size,
            clock: Clock::default(),
            triggered_mine: None,
        }
    }

    /// Reassembles a decoded session with its clock stopped; [`Session::resume`] restarts it.
    pub(crate) fn from_parts(
        grid: Grid,
        outcome: Outcome,
        first_click_done: bool,
        flag_count: CellCount,
        cell_size: u32,
        elapsed_secs: u32,
    ) -> Self {
        let clock = Clock::stopped_at(elapsed_secs);
        let triggered_mine = match outcome {
            Outcome::Lost => grid
                .iter_cells()
                .find(|(_, cell)| cell.is_mine && cell.is_revealed)
                .map(|(coords, _)| coords),
            _ => None,
        };
        Self {
            grid,
            outcome,
            first_click_done,
            flag_count,
            cell_size,
            clock,
            triggered_mine,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.grid.size(), self.grid.mine_count(), self.cell_size)
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.grid.get(coords).copied()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn first_click_done(&self) -> bool {
        self.first_click_done
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.grid.mine_count()) - i64::from(self.flag_count)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs()
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            outcome: self.outcome,
            elapsed_secs: self.elapsed_secs(),
        }
    }

    /// Maps a pixel position relative to the grid origin to the cell under it.
    pub fn locate(&self, x: i32, y: i32) -> Option<Coord2> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        let row = Coord::try_from(y.checked_div(self.cell_size)?).ok()?;
        let col = Coord::try_from(x.checked_div(self.cell_size)?).ok()?;
        self.grid.contains((row, col)).then_some((row, col))
    }

    /// Stops the clock while the game is not on screen.
    pub fn pause(&mut self) {
        if self.clock.is_running() {
            self.clock.stop();
            log::debug!("Clock paused at {}s", self.clock.elapsed_secs());
        }
    }

    /// Restarts a paused clock of a game that is underway.
    pub fn resume(&mut self) {
        if self.first_click_done && !self.is_finished() && !self.clock.is_running() {
            self.clock.start();
            log::debug!("Clock resumed at {}s", self.clock.elapsed_secs());
        }
    }

    /// Banks elapsed seconds so the persisted value is current.
    pub(crate) fn checkpoint_clock(&mut self) {
        self.clock.checkpoint();
    }

    /// Flags or unflags a covered cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.is_finished() {
            return MarkOutcome::NoChange;
        }
        let Some(cell) = self.grid.get_mut(coords) else {
            return MarkOutcome::NoChange;
        };
        if cell.is_revealed {
            return MarkOutcome::NoChange;
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        log::trace!("Toggled flag at {:?}, {} flags placed", coords, self.flag_count);
        MarkOutcome::Changed
    }

    /// Reveals a cell, placing mines with `placer` on the first call.
    pub fn reveal<P: MinePlacer + ?Sized>(
        &mut self,
        coords: Coord2,
        placer: &mut P,
    ) -> RevealOutcome {
        if self.is_finished() || !self.grid.contains(coords) {
            return RevealOutcome::NoChange;
        }

        if !self.first_click_done {
            self.start_game(coords, placer);
        }

        let cell = self.grid[coords];
        if cell.is_flagged || cell.is_revealed {
            return RevealOutcome::NoChange;
        }

        if cell.is_mine {
            self.grid[coords].is_revealed = true;
            self.triggered_mine = Some(coords);
            self.end_game(Outcome::Lost);
            return RevealOutcome::HitMine;
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Revealed {} cells from {:?}", opened, coords);

        if self.grid.all_safe_revealed() {
            self.end_game(Outcome::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn start_game<P: MinePlacer + ?Sized>(&mut self, first: Coord2, placer: &mut P) {
        placer.place(&mut self.grid, first);
        self.grid.compute_adjacency();
        self.first_click_done = true;
        self.clock.start();
        log::debug!("Game started from {:?}", first);
    }

    /// Reveals `start` and every cell reachable through zero-count cells.
    ///
    /// Flagged cells reached by the fill are revealed too and lose their flag.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.grid[visit_coords];
            if cell.is_revealed || cell.is_mine {
                continue;
            }

            if cell.is_flagged {
                cell.is_flagged = false;
                self.flag_count -= 1;
                log::trace!("Flood cleared flag at {:?}", visit_coords);
            }
            cell.is_revealed = true;
            opened += 1;

            let count = cell.adjacent_mine_count;
            log::trace!("Flood opened cell at {:?}, mine count: {}", visit_coords, count);

            // zero cells spread to every neighbour
            if count == 0 {
                to_visit.extend(
                    self.grid
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| !self.grid[pos].is_revealed),
                );
            }
        }

        opened
    }

    fn end_game(&mut self, outcome: Outcome) {
        if self.is_finished() {
            return;
        }
        self.outcome = outcome;
        self.clock.stop();
        log::debug!(
            "Game ended {:?} after {}s",
            outcome,
            self.clock.elapsed_secs()
        );
    }
}
