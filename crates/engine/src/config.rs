//! Simulator configuration

use std::time::Duration;

use match3_core::DEFAULT_MAX_DRAWS_PER_CELL;

use crate::types::{DEFAULT_HEIGHT, DEFAULT_PALETTE_SIZE, DEFAULT_SEED, DEFAULT_WIDTH};

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub width: u16,
    pub height: u16,
    pub palette_size: u8,
    pub seed: u32,
    /// Animation time per row travelled; zero means instant moves
    pub move_ms: u64,
    /// Fail a cascade that runs more cycles than this
    pub max_cascade_cycles: Option<usize>,
    /// Reject swaps between tiles that do not share an edge
    pub require_adjacent: bool,
    pub max_draws_per_cell: u32,
    /// Print `[Board]` diagnostics to stderr
    pub trace: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            palette_size: DEFAULT_PALETTE_SIZE,
            seed: DEFAULT_SEED,
            move_ms: 0,
            max_cascade_cycles: None,
            require_adjacent: true,
            max_draws_per_cell: DEFAULT_MAX_DRAWS_PER_CELL,
            trace: false,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|s| {
        let s = s.trim();
        !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
    })
}

impl SimConfig {
    /// Create from environment variables, falling back to defaults for
    /// anything missing or unparsable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let width = env_parse::<u16>("MATCH3_WIDTH")
            .filter(|w| *w > 0)
            .unwrap_or(defaults.width);
        let height = env_parse::<u16>("MATCH3_HEIGHT")
            .filter(|h| *h >= 2)
            .unwrap_or(defaults.height);
        let palette_size = env_parse::<u8>("MATCH3_PALETTE")
            .filter(|p| *p > 0)
            .unwrap_or(defaults.palette_size);
        let seed = env_parse("MATCH3_SEED").unwrap_or(defaults.seed);
        let move_ms = env_parse("MATCH3_MOVE_MS").unwrap_or(defaults.move_ms);
        let max_cascade_cycles = env_parse::<usize>("MATCH3_MAX_CYCLES")
            .filter(|n| *n > 0)
            .or(defaults.max_cascade_cycles);
        let require_adjacent =
            env_flag("MATCH3_REQUIRE_ADJACENT").unwrap_or(defaults.require_adjacent);
        let trace = env_flag("MATCH3_TRACE").unwrap_or(defaults.trace);

        Self {
            width,
            height,
            palette_size,
            seed,
            move_ms,
            max_cascade_cycles,
            require_adjacent,
            max_draws_per_cell: defaults.max_draws_per_cell,
            trace,
        }
    }

    /// Animation delay per row travelled
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_ms)
    }
}
