//! Board module - the synchronous match-3 model
//!
//! Owns the tile grid, the seeded tile generator and the id counter. Every
//! operation here completes immediately; the async simulator in the engine
//! crate sequences these steps and waits for tile animations between them.
//!
//! Coordinates: (x, y) where x grows to the right and y grows upwards.
//! Row 0 is the floor, row `height - 1` is the spawn row.

use std::fmt;

use crate::detect::{find_matches, horizontal_run, vertical_run, MatchSet};
use crate::error::BoardError;
use crate::grid::TileMap;
use crate::rng::{LcgRng, TileRng};
use crate::snapshot::BoardSnapshot;
use crate::tile::Tile;
use crate::types::{Cell, TileId, TileValue, EMPTY_GLYPH, MIN_MATCH_LEN};

/// Redraw limit per cell used by [`BoardModel::randomize`]
pub const DEFAULT_MAX_DRAWS_PER_CELL: u32 = 1000;

/// Callback invoked once per tile spawned by [`BoardModel::fill`]
pub type TileAddedHook = Box<dyn FnMut(Cell, Tile) + Send>;

/// A single tile relocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
}

/// The match-3 board
pub struct BoardModel {
    grid: TileMap<Tile>,
    rng: Box<dyn TileRng>,
    palette_size: u8,
    seed: u32,
    next_id: u32,
    on_tile_added: Option<TileAddedHook>,
}

impl BoardModel {
    /// Create an empty board drawing tiles from an [`LcgRng`] seeded with `seed`
    pub fn new(width: u16, height: u16, palette_size: u8, seed: u32) -> Result<Self, BoardError> {
        let mut board = Self::with_rng(width, height, palette_size, Box::new(LcgRng::new(seed)))?;
        board.seed = seed;
        Ok(board)
    }

    /// Create an empty board with a custom tile generator
    pub fn with_rng(
        width: u16,
        height: u16,
        palette_size: u8,
        rng: Box<dyn TileRng>,
    ) -> Result<Self, BoardError> {
        if width == 0 || height < 2 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        if palette_size == 0 {
            return Err(BoardError::EmptyPalette);
        }
        Ok(Self {
            grid: TileMap::new(width, height),
            rng,
            palette_size,
            seed: 0,
            next_id: 0,
            on_tile_added: None,
        })
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn palette_size(&self) -> u8 {
        self.palette_size
    }

    /// Seed the board was created with (0 for custom generators)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Read-only access to the underlying grid
    pub fn grid(&self) -> &TileMap<Tile> {
        &self.grid
    }

    /// Tile at `cell`
    pub fn get(&self, cell: Cell) -> Option<Tile> {
        self.grid.at(cell).copied()
    }

    /// Occupied cells in scan order (bottom row first)
    pub fn tiles(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.grid.iter().map(|(c, t)| (c, *t))
    }

    /// Current cell of `tile`, looked up by identity
    pub fn position_of(&self, tile: &Tile) -> Option<Cell> {
        self.grid.position_of(|t| t.id == tile.id)
    }

    /// Place a new tile with `value` at `cell`, replacing whatever was there
    pub fn place(&mut self, cell: Cell, value: TileValue) -> Result<Tile, BoardError> {
        if !self.grid.contains(cell) {
            return Err(BoardError::OutOfBounds(cell));
        }
        let tile = self.create_tile(value);
        self.grid.set(cell, Some(tile));
        Ok(tile)
    }

    /// Empty `cell`, returning the tile that was there
    pub fn clear_cell(&mut self, cell: Cell) -> Option<Tile> {
        self.grid.take(cell)
    }

    /// Build a board from text rows given top to bottom.
    ///
    /// Digits are tile values, any other character is an empty cell. Every
    /// row must have the same length.
    pub fn load_rows(&mut self, rows: &[&str]) -> Result<(), BoardError> {
        let height = self.height();
        let width = self.width();
        if rows.len() != height as usize || rows.iter().any(|r| r.chars().count() != width as usize)
        {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        self.grid.clear();
        for (row_idx, row) in rows.iter().enumerate() {
            let y = height - 1 - row_idx as u16;
            for (x, ch) in row.chars().enumerate() {
                if let Some(value) = ch.to_digit(10) {
                    self.place(Cell::new(x as u16, y), value as TileValue)?;
                }
            }
        }
        Ok(())
    }

    /// Register the spawn callback (replaces any previous one)
    pub fn set_on_tile_added(&mut self, hook: TileAddedHook) {
        self.on_tile_added = Some(hook);
    }

    fn create_tile(&mut self, value: TileValue) -> Tile {
        self.next_id = self.next_id.wrapping_add(1);
        Tile::new(TileId(self.next_id), value)
    }

    /// Draw a fresh tile from the board's generator
    pub fn create_random_tile(&mut self) -> Tile {
        let value = self.rng.next_value(self.palette_size);
        self.create_tile(value)
    }

    /// Populate every row below the spawn row without creating a match.
    ///
    /// Cells are visited left to right, bottom row first. Each cell keeps
    /// drawing until neither run through it is longer than two; only the
    /// already placed neighbors (left and below) can take part in a run.
    pub fn randomize(&mut self) -> Result<(), BoardError> {
        self.randomize_with_limit(DEFAULT_MAX_DRAWS_PER_CELL)
    }

    /// [`randomize`](Self::randomize) with an explicit redraw limit per cell
    pub fn randomize_with_limit(&mut self, max_draws_per_cell: u32) -> Result<(), BoardError> {
        self.grid.clear();
        let filled = self.size() - self.width() as usize;
        for i in 0..filled {
            let cell = self.grid.transform_1d(i);
            let mut draws = 0u32;
            loop {
                if draws >= max_draws_per_cell {
                    return Err(BoardError::GenerationExhausted { cell, draws });
                }
                draws += 1;
                let tile = self.create_random_tile();
                self.grid.set(cell, Some(tile));
                if horizontal_run(&self.grid, cell).len() < MIN_MATCH_LEN
                    && vertical_run(&self.grid, cell).len() < MIN_MATCH_LEN
                {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Every tile in a run of three or more, de-duplicated by cell
    pub fn get_matches(&self) -> MatchSet {
        find_matches(&self.grid)
    }

    /// Horizontal run through `tile`.
    ///
    /// A tile that is not on the board yields just itself.
    pub fn get_horizontal_matches(&self, tile: &Tile) -> Vec<Tile> {
        match self.position_of(tile) {
            Some(cell) => horizontal_run(&self.grid, cell).into_iter().map(|(_, t)| t).collect(),
            None => vec![*tile],
        }
    }

    /// Vertical run through `tile`.
    ///
    /// A tile that is not on the board yields just itself.
    pub fn get_vertical_matches(&self, tile: &Tile) -> Vec<Tile> {
        match self.position_of(tile) {
            Some(cell) => vertical_run(&self.grid, cell).into_iter().map(|(_, t)| t).collect(),
            None => vec![*tile],
        }
    }

    /// Clear every matched cell. Returns true if `matches` was non-empty.
    pub fn remove_all(&mut self, matches: &MatchSet) -> bool {
        for cell in matches.cells() {
            self.grid.take(cell);
        }
        !matches.is_empty()
    }

    /// Spawn one tile in every empty cell of the top row.
    ///
    /// Only the top row is touched; deeper gaps close over later cycles as
    /// gravity pulls the new tiles down. Returns the number spawned.
    pub fn spawn_top_row(&mut self) -> usize {
        let top = self.height() - 1;
        let mut spawned = 0;
        for x in 0..self.width() {
            let spawn = Cell::new(x, top);
            if self.grid.is_occupied(spawn) {
                continue;
            }
            let tile = self.create_random_tile();
            self.grid.set(spawn, Some(tile));
            spawned += 1;
            if let Some(hook) = self.on_tile_added.as_mut() {
                hook(spawn, tile);
            }
        }
        spawned
    }

    /// Refill the spawn row. Returns true if any tile was spawned.
    pub fn fill(&mut self) -> bool {
        self.spawn_top_row() > 0
    }

    /// Moves that compact every column towards row 0.
    ///
    /// Per column, scanning upwards, each occupied cell drops by the number
    /// of empty cells seen beneath it. Moves are listed column by column,
    /// bottom to top, which is also the order they must be applied in.
    pub fn plan_gravity(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for x in 0..self.width() {
            let mut drop = 0u16;
            for y in 0..self.height() {
                let cell = Cell::new(x, y);
                if !self.grid.is_occupied(cell) {
                    drop += 1;
                } else if drop > 0 {
                    moves.push(Move {
                        from: cell,
                        to: Cell::new(x, y - drop),
                    });
                }
            }
        }
        moves
    }

    /// Relocate the tile at `mv.from` to `mv.to`.
    ///
    /// Fails with [`BoardError::TileMoving`] if the source is empty.
    pub fn apply_move(&mut self, mv: Move) -> Result<Tile, BoardError> {
        if !self.grid.contains(mv.to) {
            return Err(BoardError::OutOfBounds(mv.to));
        }
        let tile = self.grid.take(mv.from).ok_or(BoardError::TileMoving(mv.from))?;
        self.grid.set(mv.to, Some(tile));
        Ok(tile)
    }

    /// Apply a full gravity pass at once. Returns true if anything moved.
    pub fn gravity(&mut self) -> Result<bool, BoardError> {
        let moves = self.plan_gravity();
        for mv in &moves {
            self.apply_move(*mv)?;
        }
        Ok(!moves.is_empty())
    }

    /// Exchange the contents of two cells
    pub fn swap_cells(&mut self, a: Cell, b: Cell) -> Result<(), BoardError> {
        for cell in [a, b] {
            if !self.grid.contains(cell) {
                return Err(BoardError::OutOfBounds(cell));
            }
        }
        self.grid.swap(a, b);
        Ok(())
    }

    /// Serializable copy of the board contents
    pub fn snapshot(&self) -> BoardSnapshot {
        let rows = (0..self.height())
            .rev()
            .map(|y| {
                (0..self.width())
                    .map(|x| self.get(Cell::new(x, y)).map(|t| t.value))
                    .collect()
            })
            .collect();
        BoardSnapshot {
            width: self.width(),
            height: self.height(),
            palette_size: self.palette_size,
            seed: self.seed,
            rows,
        }
    }
}

impl fmt::Debug for BoardModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardModel")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("palette_size", &self.palette_size)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

/// Rows top to bottom, values concatenated, `X` for empty cells
impl fmt::Display for BoardModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                match self.get(Cell::new(x, y)) {
                    Some(tile) => write!(f, "{}", tile.value)?,
                    None => write!(f, "{}", EMPTY_GLYPH)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    fn board(width: u16, height: u16, rows: &[&str]) -> BoardModel {
        let mut b = BoardModel::new(width, height, 6, 1).unwrap();
        b.load_rows(rows).unwrap();
        b
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            BoardModel::new(0, 5, 6, 1),
            Err(BoardError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            BoardModel::new(5, 1, 6, 1),
            Err(BoardError::InvalidDimensions { .. })
        ));
        assert_eq!(BoardModel::new(5, 5, 0, 1).unwrap_err(), BoardError::EmptyPalette);
    }

    #[test]
    fn test_display_rows_top_to_bottom() {
        let b = board(3, 2, &["1X2", "345"]);
        assert_eq!(b.to_string(), "1X2\n345\n");
        assert_eq!(b.get(Cell::new(0, 0)).map(|t| t.value), Some(3));
        assert_eq!(b.get(Cell::new(1, 1)), None);
    }

    #[test]
    fn test_randomize_leaves_top_row_empty() {
        let mut b = BoardModel::new(6, 7, 5, 42).unwrap();
        b.randomize().unwrap();
        let top = b.height() - 1;
        for x in 0..b.width() {
            assert!(b.get(Cell::new(x, top)).is_none());
            assert!(b.get(Cell::new(x, top - 1)).is_some());
        }
        assert!(b.get_matches().is_empty());
    }

    #[test]
    fn test_randomize_rejects_candidates_forming_runs() {
        // Scripted values would produce "000" in the bottom row without rejection.
        let rng = SequenceRng::new(vec![0, 0, 0, 1, 2, 2, 2, 0, 1, 1, 1, 2]);
        let mut b = BoardModel::with_rng(3, 3, 3, Box::new(rng)).unwrap();
        b.randomize().unwrap();
        assert!(b.get_matches().is_empty());
        assert_eq!(b.to_string(), "XXX\n220\n001\n");
    }

    #[test]
    fn test_randomize_exhausted_with_single_symbol() {
        let mut b = BoardModel::new(4, 3, 1, 1).unwrap();
        let err = b.randomize_with_limit(10).unwrap_err();
        assert_eq!(
            err,
            BoardError::GenerationExhausted {
                cell: Cell::new(2, 0),
                draws: 10
            }
        );
    }

    #[test]
    fn test_unresolvable_tile_yields_itself() {
        let b = board(3, 2, &["XXX", "111"]);
        let stray = Tile::new(TileId(999), 1);
        assert_eq!(b.get_horizontal_matches(&stray), vec![stray]);
        assert_eq!(b.get_vertical_matches(&stray), vec![stray]);
    }

    #[test]
    fn test_remove_all_reports_effect() {
        let mut b = board(3, 2, &["XXX", "111"]);
        let matches = b.get_matches();
        assert_eq!(matches.len(), 3);
        assert!(b.remove_all(&matches));
        assert_eq!(b.to_string(), "XXX\nXXX\n");
        assert!(!b.remove_all(&MatchSet::new()));
    }

    #[test]
    fn test_gravity_plan_order() {
        let b = board(1, 3, &["2", "1", "X"]);
        assert_eq!(
            b.plan_gravity(),
            vec![
                Move {
                    from: Cell::new(0, 1),
                    to: Cell::new(0, 0)
                },
                Move {
                    from: Cell::new(0, 2),
                    to: Cell::new(0, 1)
                },
            ]
        );
    }

    #[test]
    fn test_apply_move_from_empty_cell_fails() {
        let mut b = board(1, 2, &["X", "1"]);
        let err = b
            .apply_move(Move {
                from: Cell::new(0, 1),
                to: Cell::new(0, 0),
            })
            .unwrap_err();
        assert_eq!(err, BoardError::TileMoving(Cell::new(0, 1)));
    }

    #[test]
    fn test_fill_skips_occupied_spawn_cell() {
        let mut b = board(2, 3, &["1X", "XX", "23"]);
        assert_eq!(b.spawn_top_row(), 1);
        assert!(b.get(Cell::new(1, 2)).is_some());
        assert_eq!(b.get(Cell::new(0, 2)).map(|t| t.value), Some(1));
    }

    #[test]
    fn test_on_tile_added_called_per_spawn() {
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut b = board(3, 2, &["XXX", "XXX"]);
        b.set_on_tile_added(Box::new(move |cell, _tile| sink.lock().unwrap().push(cell)));
        assert!(b.fill());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1)]
        );
    }
}
