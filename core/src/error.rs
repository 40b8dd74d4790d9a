use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid board configuration: {rows}x{cols} with {mines} mines")]
    InvalidConfig { rows: i64, cols: i64, mines: i64 },
    #[error("Corrupt save record: {0}")]
    CorruptRecord(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, GameError>;
