//! Core types module - shared data structures and constants
//!
//! This module defines the plain data types used throughout the workspace.
//! All types are plain `Copy` data with no behaviour beyond geometry, making them
//! usable in any context (board model, async simulator, demo binary).
//!
//! # Coordinates
//!
//! Cells are addressed as `(x, y)`:
//!
//! - **x**: column, `0..width`, left to right
//! - **y**: row, `0..height`, bottom to top
//! - `y = 0` is the floor gravity pulls towards
//! - `y = height - 1` is the spawn row refilled after matches
//!
//! # Seeded Generator
//!
//! Tile values come from a linear-congruential sequence:
//!
//! | Constant | Value |
//! |----------|-------|
//! | `LCG_MULTIPLIER` | 9301 |
//! | `LCG_INCREMENT` | 49297 |
//! | `LCG_MODULUS` | 233280 |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Cell, DEFAULT_WIDTH, DEFAULT_HEIGHT};
//!
//! let cell = Cell::new(2, 3);
//! assert!(cell.is_adjacent(Cell::new(2, 4)));
//! assert!(!cell.is_adjacent(Cell::new(3, 4)));
//!
//! assert_eq!(cell.below(1), Some(Cell::new(2, 2)));
//! assert!(DEFAULT_WIDTH > 0 && DEFAULT_HEIGHT > 2);
//! ```

use arrayvec::ArrayVec;

/// Default board width in cells
pub const DEFAULT_WIDTH: u16 = 8;

/// Default board height in cells (including the spawn row)
pub const DEFAULT_HEIGHT: u16 = 9;

/// Default number of distinct tile symbols
pub const DEFAULT_PALETTE_SIZE: u8 = 6;

/// Default generator seed
pub const DEFAULT_SEED: u32 = 1;

/// Minimum run length that counts as a match
pub const MIN_MATCH_LEN: usize = 3;

/// Glyph used for empty cells in the text dump
pub const EMPTY_GLYPH: char = 'X';

/// LCG multiplier
pub const LCG_MULTIPLIER: u64 = 9301;

/// LCG increment
pub const LCG_INCREMENT: u64 = 49297;

/// LCG modulus
pub const LCG_MODULUS: u64 = 233280;

/// Tile value (index into the palette)
pub type TileValue = u8;

/// Cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Cell `rows` below this one, if it stays on the board
    pub fn below(self, rows: u16) -> Option<Cell> {
        self.y.checked_sub(rows).map(|y| Cell::new(self.x, y))
    }

    /// Orthogonal neighbors that have non-negative coordinates.
    ///
    /// Upper bounds are not known here; callers filter against the board size.
    pub fn neighbors(self) -> ArrayVec<Cell, 4> {
        let mut out = ArrayVec::new();
        if self.x > 0 {
            out.push(Cell::new(self.x - 1, self.y));
        }
        out.push(Cell::new(self.x + 1, self.y));
        if self.y > 0 {
            out.push(Cell::new(self.x, self.y - 1));
        }
        out.push(Cell::new(self.x, self.y + 1));
        out
    }

    /// True if `other` shares an edge with this cell
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.neighbors().contains(&other)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Stable identity of a tile instance.
///
/// Ids are handed out monotonically by the board; two tiles with the same
/// value are still distinct tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u32);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
