//! Board simulator - async swap and cascade orchestration
//!
//! Builds on the synchronous model in `match3-core` and adds the parts that
//! depend on time:
//!
//! - [`animator`]: the tile animation collaborator and two stock animators
//! - [`board`]: the shared board handle, swap protocol and cascade loop
//! - [`config`]: simulator settings, from defaults or `MATCH3_*` variables
//!
//! # Example
//!
//! ```
//! use match3_engine::{Board, SimConfig, SwapOutcome};
//!
//! let rt = tokio::runtime::Builder::new_current_thread()
//!     .enable_all()
//!     .build()
//!     .unwrap();
//! rt.block_on(async {
//!     let board = Board::new(SimConfig::default()).unwrap();
//!     board.randomize().unwrap();
//!
//!     // Fill the spawn row and resolve any matches that creates
//!     let outcome = board.settle().await.unwrap();
//!     assert!(matches!(outcome, SwapOutcome::Cascaded(_)));
//!     assert!(board.get_matches().is_empty());
//! });
//! ```

pub mod animator;
pub mod board;
pub mod config;

pub use match3_types as types;

pub use animator::{AnimationFuture, DelayAnimator, InstantAnimator, TileAnimator};
pub use board::{Board, CascadeReport, SwapOutcome, SwapResult, SwapSignal};
pub use config::SimConfig;
