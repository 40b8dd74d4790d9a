//! Fixed-layout binary files: the session, the best times and the player data.
//!
//! Every field is a 4-byte native-endian integer and no file carries a header, so a file
//! is only valid on the machine family that wrote it. Short reads surface as
//! [`GameError::Io`] with [`std::io::ErrorKind::UnexpectedEof`]; callers treat any load
//! failure as "nothing saved yet".

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::*;

pub use best_times::*;
pub use player::*;

mod best_times;
mod player;
mod session;

/// Where the three persistence files live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoragePaths {
    pub session: PathBuf,
    pub best_times: PathBuf,
    pub player: PathBuf,
}

impl StoragePaths {
    pub const SESSION_FILE: &'static str = "game.dat";
    pub const BEST_TIMES_FILE: &'static str = "time.dat";
    pub const PLAYER_FILE: &'static str = "player.dat";

    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            session: dir.join(Self::SESSION_FILE),
            best_times: dir.join(Self::BEST_TIMES_FILE),
            player: dir.join(Self::PLAYER_FILE),
        }
    }
}

impl Default for StoragePaths {
    /// Default file names in the working directory.
    fn default() -> Self {
        Self::in_dir("")
    }
}

pub(crate) fn write_i32<W: Write>(writer: &mut W, value: i32) -> io::Result<()> {
    writer.write_all(&value.to_ne_bytes())
}

pub(crate) fn write_u32<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_ne_bytes())
}

pub(crate) fn write_bool<W: Write>(writer: &mut W, value: bool) -> io::Result<()> {
    write_i32(writer, i32::from(value))
}

/// Writes an unsigned count into a signed record field.
pub(crate) fn write_count<W: Write>(
    writer: &mut W,
    value: u32,
    field: &'static str,
) -> Result<()> {
    let value = i32::try_from(value).map_err(|_| GameError::CorruptRecord(field))?;
    Ok(write_i32(writer, value)?)
}

pub(crate) fn read_i32<R: Read>(reader: &mut R) -> io::Result<i32> {
    let mut bytes = [0; 4];
    reader.read_exact(&mut bytes)?;
    Ok(i32::from_ne_bytes(bytes))
}

pub(crate) fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut bytes = [0; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_ne_bytes(bytes))
}

pub(crate) fn read_bool<R: Read>(reader: &mut R, field: &'static str) -> Result<bool> {
    match read_i32(reader)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(GameError::CorruptRecord(field)),
    }
}

/// Reads a signed record field that must hold a non-negative count.
pub(crate) fn read_count<R: Read>(reader: &mut R, field: &'static str) -> Result<u32> {
    u32::try_from(read_i32(reader)?).map_err(|_| GameError::CorruptRecord(field))
}
