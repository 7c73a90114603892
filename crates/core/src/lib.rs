//! Core board logic - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules and board state with no async
//! runtime, rendering or I/O, making it:
//!
//! - **Deterministic**: the same seed produces the same board, byte for byte
//! - **Testable**: every step (match, remove, fill, gravity) runs on its own
//! - **Portable**: usable from the async simulator, tools and benchmarks alike
//!
//! # Module Structure
//!
//! - [`grid`]: generic `width x height` tile map with index transforms
//! - [`tile`]: tile identity and value equality
//! - [`rng`]: seeded linear-congruential tile generator
//! - [`detect`]: run walking and board-wide match sets
//! - [`board`]: the board model (generation, remove, fill, gravity planning)
//! - [`snapshot`]: serializable view of the board
//!
//! # Rules
//!
//! - A **match** is a run of three or more equal values in a row or column
//! - **Gravity** pulls tiles towards row 0
//! - New tiles **spawn** in the top row, one per column and cycle
//!
//! # Example
//!
//! ```
//! use match3_core::BoardModel;
//!
//! let mut board = BoardModel::new(6, 7, 5, 12345).unwrap();
//! board.randomize().unwrap();
//!
//! // Freshly generated boards never contain a match
//! assert!(board.get_matches().is_empty());
//!
//! // The spawn row is left empty for the first fill
//! assert!(board.to_string().starts_with("XXXXXX\n"));
//! ```

pub mod board;
pub mod detect;
pub mod error;
pub mod grid;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use board::{BoardModel, Move, TileAddedHook, DEFAULT_MAX_DRAWS_PER_CELL};
pub use detect::MatchSet;
pub use error::BoardError;
pub use grid::TileMap;
pub use rng::{LcgRng, SequenceRng, TileRng};
pub use snapshot::BoardSnapshot;
pub use tile::Tile;
