//! Grid module - generic tile map storage
//!
//! A `width x height` grid of optional slots using flat storage.
//! Linear index `i` maps to `(i % width, i / width)`, so index 0 is the
//! bottom-left cell and indices grow left to right, then upwards.

use crate::types::Cell;

/// Fixed-size grid of optional items
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap<T> {
    width: u16,
    height: u16,
    /// Flat storage, row-major with row 0 first (y * width + x)
    cells: Vec<Option<T>>,
}

impl<T> TileMap<T> {
    /// Create an empty grid
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        let mut cells = Vec::with_capacity(size);
        cells.resize_with(size, || None);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Check if `cell` lies on the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Linear index -> cell
    #[inline]
    pub fn transform_1d(&self, index: usize) -> Cell {
        let w = self.width.max(1) as usize;
        Cell::new((index % w) as u16, (index / w) as u16)
    }

    /// Cell -> linear index, `None` if off the grid
    #[inline]
    pub fn transform_2d(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Get the item at signed coordinates.
    ///
    /// Returns `None` for empty cells and for anything out of bounds, which
    /// lets callers walk past the edges without checking first.
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        if x < 0 || y < 0 {
            return None;
        }
        self.at(Cell::new(x as u16, y as u16))
    }

    /// Get the item at `cell`
    pub fn at(&self, cell: Cell) -> Option<&T> {
        self.transform_2d(cell)
            .and_then(|idx| self.cells[idx].as_ref())
    }

    /// Check if `cell` is on the grid and holds an item
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.at(cell).is_some()
    }

    /// Store `item` at `cell`, returning false if out of bounds
    pub fn set(&mut self, cell: Cell, item: Option<T>) -> bool {
        match self.transform_2d(cell) {
            Some(idx) => {
                self.cells[idx] = item;
                true
            }
            None => false,
        }
    }

    /// Remove and return the item at `cell`
    pub fn take(&mut self, cell: Cell) -> Option<T> {
        let idx = self.transform_2d(cell)?;
        self.cells[idx].take()
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: Cell, b: Cell) -> bool {
        match (self.transform_2d(a), self.transform_2d(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Occupied cells in linear index order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|item| (self.transform_1d(i), item)))
    }

    /// First cell whose item satisfies `pred`
    pub fn position_of(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Cell> {
        self.cells
            .iter()
            .position(|slot| slot.as_ref().map_or(false, &mut pred))
            .map(|i| self.transform_1d(i))
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for slot in &mut self.cells {
            *slot = None;
        }
    }
}
