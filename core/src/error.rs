use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Stored counts do not match the cells")]
    InconsistentCounts,
    #[error("Mine layout has {actual} entries, expected {expected}")]
    InvalidLayoutLength { expected: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;
