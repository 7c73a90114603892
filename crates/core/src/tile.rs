//! Tile module - a single colored piece on the board

use crate::types::{TileId, TileValue};

/// A tile instance.
///
/// `PartialEq` compares identity and value; use [`Tile::matches`] to compare
/// tiles the way the match detector does (by value only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: TileValue,
}

impl Tile {
    pub fn new(id: TileId, value: TileValue) -> Self {
        Self { id, value }
    }

    /// Same symbol as `other`
    #[inline]
    pub fn matches(&self, other: &Tile) -> bool {
        self.value == other.value
    }
}
