//! Headless match-3 runner (default binary).
//!
//! Generates a board, settles it, then plays a number of swaps by trying
//! adjacent pairs in scan order until one produces a match. The board is
//! printed after every step, as text or as JSON snapshots.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use match3_sim::engine::{Board, SimConfig, SwapOutcome};
use match3_sim::types::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunOptions {
    config: SimConfig,
    swaps: usize,
    json: bool,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    let v = value.ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

fn parse_args(args: &[String]) -> Result<RunOptions> {
    let mut options = RunOptions {
        config: SimConfig::from_env(),
        swaps: 3,
        json: false,
    };

    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--seed" => {
                i += 1;
                options.config.seed = parse_value(flag, args.get(i))?;
            }
            "--width" => {
                i += 1;
                options.config.width = parse_value(flag, args.get(i))?;
            }
            "--height" => {
                i += 1;
                options.config.height = parse_value(flag, args.get(i))?;
            }
            "--palette" => {
                i += 1;
                options.config.palette_size = parse_value(flag, args.get(i))?;
            }
            "--move-ms" => {
                i += 1;
                options.config.move_ms = parse_value(flag, args.get(i))?;
            }
            "--swaps" => {
                i += 1;
                options.swaps = parse_value(flag, args.get(i))?;
            }
            "--json" => options.json = true,
            "--trace" => options.config.trace = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(options)
}

/// Adjacent pairs, each cell paired with its right and upper neighbor
fn adjacent_pairs(width: u16, height: u16) -> Vec<(Cell, Cell)> {
    let mut pairs = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let cell = Cell::new(x, y);
            if x + 1 < width {
                pairs.push((cell, Cell::new(x + 1, y)));
            }
            if y + 1 < height {
                pairs.push((cell, Cell::new(x, y + 1)));
            }
        }
    }
    pairs
}

fn print_board(board: &Board, label: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&board.snapshot())?);
    } else {
        println!("== {}", label);
        print!("{}", board);
    }
    Ok(())
}

/// Try pairs in order until one cascades. Returns false if none does.
async fn play_one(board: &Board, pairs: &[(Cell, Cell)], json: bool) -> Result<bool> {
    for &(a, b) in pairs {
        let (Some(ta), Some(tb)) = (board.tile_at(a), board.tile_at(b)) else {
            continue;
        };
        match board.swap_tiles(ta, tb).await? {
            SwapOutcome::Reverted => continue,
            SwapOutcome::Cascaded(report) => {
                let label = format!(
                    "swap {} <-> {}: {} cycles, {} removed, {} spawned, {} moved",
                    a, b, report.cycles, report.removed, report.spawned, report.moved
                );
                print_board(board, &label, json)?;
                return Ok(true);
            }
        }
    }
    Ok(false)
}

async fn run(options: RunOptions) -> Result<()> {
    let board = Board::new(options.config.clone())?;

    let spawned = Arc::new(AtomicUsize::new(0));
    let counter = spawned.clone();
    board.set_on_tile_added(move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    board.randomize()?;
    print_board(&board, "randomized", options.json)?;

    board.settle().await?;
    print_board(&board, "settled", options.json)?;

    let pairs = adjacent_pairs(board.width(), board.height());
    for _ in 0..options.swaps {
        if !play_one(&board, &pairs, options.json).await? {
            eprintln!("[Sim] no swap produces a match");
            break;
        }
    }

    eprintln!("[Sim] {} tiles spawned", spawned.load(Ordering::Relaxed));
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run(options))
}
