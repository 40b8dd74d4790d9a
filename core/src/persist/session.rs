use std::fs::File;
use std::io::{BufReader, BufWriter};

use ndarray::Array2;

use super::*;

impl Outcome {
    const fn to_raw(self) -> i32 {
        match self {
            Self::InProgress => 0,
            Self::Lost => 1,
            Self::Won => 2,
        }
    }

    fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Self::InProgress),
            1 => Ok(Self::Lost),
            2 => Ok(Self::Won),
            _ => Err(GameError::CorruptRecord("unknown outcome")),
        }
    }
}

impl Cell {
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_bool(writer, self.is_mine)?;
        write_bool(writer, self.is_revealed)?;
        write_bool(writer, self.is_flagged)?;
        write_i32(writer, self.adjacent_mine_count.into())
    }

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let is_mine = read_bool(reader, "cell mine flag")?;
        let is_revealed = read_bool(reader, "cell revealed flag")?;
        let is_flagged = read_bool(reader, "cell flagged flag")?;
        let adjacent_mine_count = match read_i32(reader)? {
            count @ 0..=8 => count as u8,
            _ => return Err(GameError::CorruptRecord("adjacent mine count out of range")),
        };
        if is_revealed && is_flagged {
            return Err(GameError::CorruptRecord("revealed cell is flagged"));
        }
        Ok(Self {
            is_mine,
            is_revealed,
            is_flagged,
            adjacent_mine_count,
        })
    }
}

impl Session {
    /// Writes the session header followed by every cell in row-major order.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let (rows, cols) = self.size();

        write_i32(writer, self.outcome().to_raw())?;
        write_bool(writer, self.first_click_done())?;
        write_i32(writer, rows.into())?;
        write_i32(writer, cols.into())?;
        write_count(writer, self.grid().mine_count(), "mine count")?;
        write_count(writer, self.flag_count(), "flag count")?;
        write_count(writer, self.cell_size(), "cell size")?;
        write_u32(writer, self.elapsed_secs())?;

        for (_, cell) in self.grid().iter_cells() {
            cell.write_to(writer)?;
        }
        Ok(())
    }

    /// Reads a session written by [`Session::write_to`].
    ///
    /// The clock comes back stopped; call [`Session::resume`] to continue timing.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let outcome = Outcome::from_raw(read_i32(reader)?)?;
        let first_click_done = read_bool(reader, "first click flag")?;
        let rows = read_i32(reader)?;
        let cols = read_i32(reader)?;
        let mines = read_i32(reader)?;
        let flag_count = read_count(reader, "flag count")?;
        let cell_size = read_i32(reader)?;
        let elapsed_secs = read_u32(reader)?;

        let config = GameConfig::from_raw(rows, cols, mines, cell_size)?;

        let mut cells = Vec::new();
        for _ in 0..config.total_cells() {
            cells.push(Cell::read_from(reader)?);
        }
        let cells = Array2::from_shape_vec(nd_index(config.size), cells)
            .map_err(|_| GameError::CorruptRecord("cell records do not match grid size"))?;
        let grid = Grid::from_cells(cells, config.mines);

        let placed = grid.count_mines();
        if first_click_done && placed != config.mines {
            return Err(GameError::CorruptRecord("mine count does not match grid"));
        }
        if !first_click_done && (placed != 0 || grid.count_revealed() != 0) {
            return Err(GameError::CorruptRecord("grid changed before the first reveal"));
        }
        if grid.count_flags() != flag_count {
            return Err(GameError::CorruptRecord("flag count does not match grid"));
        }

        Ok(Self::from_parts(
            grid,
            outcome,
            first_click_done,
            flag_count,
            config.cell_size,
            elapsed_secs,
        ))
    }

    /// Writes the session to `path`, banking the elapsed time first.
    ///
    /// A failed write may leave a partial file behind.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.checkpoint_clock();

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;

        log::debug!("Saved session to {}", path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let session = Self::read_from(&mut reader)?;

        log::debug!(
            "Loaded {}x{} session from {}",
            session.size().0,
            session.size().1,
            path.display()
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Easy board split by a wall of mines in column 6, opened on the left side.
    fn played_session() -> Session {
        let mut mines: Vec<Coord2> = (0..9).map(|row| (row, 6)).collect();
        mines.push((0, 8));
        let mut session = Session::from_difficulty(Difficulty::Easy);
        let mut placer = FixedPlacer::new(&mines);

        assert_eq!(session.reveal((4, 2), &mut placer), RevealOutcome::Revealed);
        assert_eq!(session.toggle_flag((4, 8)), MarkOutcome::Changed);
        session
    }

    fn encode(session: &Session) -> Vec<u8> {
        let mut bytes = Vec::new();
        session.write_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn layout_has_fixed_size() {
        let session = Session::from_difficulty(Difficulty::Hard);
        assert_eq!(encode(&session).len(), 8 * 4 + 480 * 16);
    }

    #[test]
    fn header_fields_are_in_order() {
        let session = Session::from_difficulty(Difficulty::Medium);
        let bytes = encode(&session);
        let words: Vec<i32> = bytes[..32]
            .chunks_exact(4)
            .map(|chunk| i32::from_ne_bytes(chunk.try_into().unwrap()))
            .collect();
        assert_eq!(words, vec![0, 0, 16, 16, 40, 0, 32, 0]);
    }

    #[test]
    fn fresh_session_round_trips() {
        let session = Session::from_difficulty(Difficulty::Medium);
        let loaded = Session::read_from(&mut encode(&session).as_slice()).unwrap();
        assert_eq!(loaded, session);
        assert!(!loaded.clock().is_running());
    }

    #[test]
    fn paused_session_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.dat");
        let mut session = played_session();
        session.pause();

        session.save(&path).unwrap();
        let loaded = Session::load(&path).unwrap();

        assert_eq!(loaded, session);
        assert!(!loaded.clock().is_running());
        assert_eq!(loaded.grid(), session.grid());
        assert_eq!(loaded.flag_count(), session.flag_count());
    }

    #[test]
    fn running_session_loads_stopped_until_resumed() {
        let mut session = played_session();
        assert!(session.clock().is_running());
        session.checkpoint_clock();

        let mut loaded = Session::read_from(&mut encode(&session).as_slice()).unwrap();
        assert!(!loaded.clock().is_running());
        assert_eq!(loaded.elapsed_secs(), session.clock().banked_secs());

        loaded.resume();
        assert_eq!(loaded, session);
    }

    #[test]
    fn paused_session_keeps_elapsed_time() {
        let mut session = played_session();
        session.pause();
        let saved_secs = session.elapsed_secs();

        let loaded = Session::read_from(&mut encode(&session).as_slice()).unwrap();

        assert_eq!(loaded.elapsed_secs(), saved_secs);
        assert_eq!(loaded.clock(), session.clock());
    }

    #[test]
    fn lost_session_round_trips_with_triggered_mine() {
        let mut session = Session::new(GameConfig::new((2, 2), 1, 16).unwrap()).unwrap();
        let mut placer = FixedPlacer::new(&[(0, 0)]);
        session.reveal((1, 1), &mut placer);
        session.reveal((0, 0), &mut placer);

        let loaded = Session::read_from(&mut encode(&session).as_slice()).unwrap();

        assert_eq!(loaded, session);
        assert_eq!(loaded.outcome(), Outcome::Lost);
        assert_eq!(loaded.triggered_mine(), Some((0, 0)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Session::load(dir.path().join("absent.dat"));
        assert!(matches!(result, Err(GameError::Io(_))));
    }

    #[test]
    fn truncated_file_is_io_error() {
        let bytes = encode(&played_session());
        for cut in [0, 3, 31, 32, bytes.len() - 1] {
            let result = Session::read_from(&mut &bytes[..cut]);
            match result {
                Err(GameError::Io(err)) => {
                    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof)
                }
                other => panic!("expected eof at {cut}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_outcome_is_corrupt() {
        let mut bytes = encode(&Session::from_difficulty(Difficulty::Easy));
        bytes[..4].copy_from_slice(&9i32.to_ne_bytes());
        assert!(matches!(
            Session::read_from(&mut bytes.as_slice()),
            Err(GameError::CorruptRecord("unknown outcome"))
        ));
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        let mut bytes = encode(&Session::from_difficulty(Difficulty::Easy));
        bytes[8..12].copy_from_slice(&(-9i32).to_ne_bytes());
        assert!(matches!(
            Session::read_from(&mut bytes.as_slice()),
            Err(GameError::InvalidConfig { rows: -9, .. })
        ));
    }

    #[test]
    fn mismatched_flag_count_is_corrupt() {
        let mut bytes = encode(&played_session());
        bytes[20..24].copy_from_slice(&5i32.to_ne_bytes());
        assert!(matches!(
            Session::read_from(&mut bytes.as_slice()),
            Err(GameError::CorruptRecord("flag count does not match grid"))
        ));
    }
}
