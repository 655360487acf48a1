use crate::moves::Move;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("puzzle size must be between 2 and {max}, got {size}")]
    InvalidSize { size: usize, max: usize },
    #[error("board is not a permutation of 0..{cells}: {tiles:?}")]
    InvalidBoard { tiles: Vec<u8>, cells: usize },
    #[error("invalid scramble token: \"{0}\"")]
    InvalidToken(String),
    #[error("move {mv} at position {index} pulls a tile from outside the grid")]
    IllegalMove { mv: Move, index: usize },
    #[error("{0}")]
    Usage(String),
}
