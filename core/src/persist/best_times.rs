use std::fs;

use smallvec::SmallVec;

use super::*;

/// How many completion times are kept.
pub const BEST_TIMES_LEN: usize = 3;

/// The fastest completed games, ascending, at most [`BEST_TIMES_LEN`] entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestTimes {
    times: SmallVec<[u32; BEST_TIMES_LEN]>,
}

impl BestTimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the fastest entries of `times`.
    pub fn from_times(times: impl IntoIterator<Item = u32>) -> Self {
        let mut best = Self::new();
        for secs in times {
            best.insert(secs);
        }
        best
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Would `secs` make it into the list.
    pub fn qualifies(&self, secs: u32) -> bool {
        self.times.len() < BEST_TIMES_LEN || self.times.last().is_some_and(|&last| secs < last)
    }

    /// Inserts a completion time, returning its 0-based rank when it was kept.
    pub fn insert(&mut self, secs: u32) -> Option<usize> {
        if !self.qualifies(secs) {
            return None;
        }
        let rank = self.times.partition_point(|&time| time <= secs);
        self.times.insert(rank, secs);
        self.times.truncate(BEST_TIMES_LEN);
        Some(rank)
    }

    /// Reads up to [`BEST_TIMES_LEN`] values, ignoring a trailing partial value.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::with_capacity(BEST_TIMES_LEN * 4);
        reader
            .take((BEST_TIMES_LEN * 4) as u64)
            .read_to_end(&mut bytes)?;
        let times = bytes.chunks_exact(4).map(|chunk| {
            let mut value = [0; 4];
            value.copy_from_slice(chunk);
            u32::from_ne_bytes(value)
        });
        Ok(Self::from_times(times))
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for &secs in &self.times {
            write_u32(writer, secs)?;
        }
        Ok(())
    }

    /// Loads the list, treating a missing or unreadable file as "no times yet".
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::File::open(path) {
            Ok(mut file) => match Self::read_from(&mut file) {
                Ok(times) => times,
                Err(err) => {
                    log::warn!("Ignoring unreadable best times {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("Cannot open best times {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Overwrites `path` with the current list.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut bytes = Vec::with_capacity(self.times.len() * 4);
        self.write_to(&mut bytes)?;
        fs::write(path, bytes)?;
        log::debug!("Saved best times {:?} to {}", self.as_slice(), path.display());
        Ok(())
    }

    /// Loads the list at `path`, inserts `secs` and rewrites the file.
    pub fn record(path: impl AsRef<Path>, secs: u32) -> Result<(Self, Option<usize>)> {
        let path = path.as_ref();
        let mut best = Self::load(path);
        let rank = best.insert(secs);
        best.save(path)?;
        Ok((best, rank))
    }
}
