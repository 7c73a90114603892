//! Match-3 board simulator (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so callers can use
//! `match3_sim::{core, engine, types}` without depending on each crate.

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;
