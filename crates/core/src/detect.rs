//! Match detection
//!
//! Runs are found by walking outward from a cell along one axis, comparing
//! tile values with each neighbor until the first empty, unequal or
//! off-board cell. A run always contains its origin.

use std::collections::BTreeMap;

use crate::grid::TileMap;
use crate::tile::Tile;
use crate::types::{Cell, MIN_MATCH_LEN};

/// Matched tiles keyed by cell.
///
/// A tile inside both a horizontal and a vertical run appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    tiles: BTreeMap<Cell, Tile>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, run: impl IntoIterator<Item = (Cell, Tile)>) {
        self.tiles.extend(run);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.tiles.contains_key(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.tiles.keys().copied()
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.tiles.iter().map(|(c, t)| (*c, *t))
    }
}

/// Walk from `origin` in direction `(dx, dy)` and the opposite one.
fn run_along(grid: &TileMap<Tile>, origin: Cell, dx: i32, dy: i32) -> Vec<(Cell, Tile)> {
    let Some(tile) = grid.at(origin).copied() else {
        return Vec::new();
    };
    let mut run = vec![(origin, tile)];

    for (sx, sy) in [(-dx, -dy), (dx, dy)] {
        let mut x = origin.x as i32 + sx;
        let mut y = origin.y as i32 + sy;
        while let Some(next) = grid.get(x, y).filter(|next| tile.matches(next)) {
            run.push((Cell::new(x as u16, y as u16), *next));
            x += sx;
            y += sy;
        }
    }

    run
}

/// Horizontal run through `origin` (empty if the cell is empty)
pub fn horizontal_run(grid: &TileMap<Tile>, origin: Cell) -> Vec<(Cell, Tile)> {
    run_along(grid, origin, 1, 0)
}

/// Vertical run through `origin` (empty if the cell is empty)
pub fn vertical_run(grid: &TileMap<Tile>, origin: Cell) -> Vec<(Cell, Tile)> {
    run_along(grid, origin, 0, 1)
}

/// Every tile that belongs to a run of at least [`MIN_MATCH_LEN`]
pub fn find_matches(grid: &TileMap<Tile>) -> MatchSet {
    let mut matches = MatchSet::new();
    for (cell, _) in grid.iter() {
        let horizontal = horizontal_run(grid, cell);
        if horizontal.len() >= MIN_MATCH_LEN {
            matches.extend(horizontal);
        }
        let vertical = vertical_run(grid, cell);
        if vertical.len() >= MIN_MATCH_LEN {
            matches.extend(vertical);
        }
    }
    matches
}
