//! Board errors

use crate::types::{Cell, TileId};

/// Errors raised by board operations.
///
/// Lookups on missing tiles never produce an error; only operations that
/// must change the board do.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions {width}x{height} (need width >= 1, height >= 2)")]
    InvalidDimensions { width: u16, height: u16 },
    #[error("palette size must be at least 1")]
    EmptyPalette,
    #[error("cell {0} is out of bounds")]
    OutOfBounds(Cell),
    #[error("tile is moving: source cell {0} is empty")]
    TileMoving(Cell),
    #[error("tile {0} is not on the board")]
    TileNotFound(TileId),
    #[error("cannot swap tile {0} with itself")]
    SameTile(TileId),
    #[error("cells {a} and {b} are not adjacent")]
    NotAdjacent { a: Cell, b: Cell },
    #[error("no tile value avoids a match at {cell} after {draws} draws")]
    GenerationExhausted { cell: Cell, draws: u32 },
    #[error("cascade did not settle within {0} cycles")]
    CascadeLimit(usize),
    #[error("animation failed: {0}")]
    AnimationFailed(String),
    #[error("board is busy with a swap or cascade")]
    Busy,
    #[error("swap sequence ended without reporting a result")]
    Aborted,
}
