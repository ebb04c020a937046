//! The square grid of cells.
//!
//! Cells are stored row-major in a flat vector, mirroring the fixed arrays
//! the board state uses elsewhere for O(1) lookup.

use super::tile::Tile;

/// N x N grid of optional tiles. At most one tile occupies a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Creates an empty grid with side length `size`.
    pub fn empty(size: usize) -> Self {
        Grid {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.size,
            self.size
        );
        row * self.size + col
    }

    /// Returns the tile at a cell, if any.
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.cells[self.index(row, col)]
    }

    /// Overwrites a cell.
    pub fn set(&mut self, row: usize, col: usize, tile: Option<Tile>) {
        let idx = self.index(row, col);
        self.cells[idx] = tile;
    }


    /// Iterates over `(row, col, tile)` for every occupied cell, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|t| (i / n, i % n, t)))
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| (i / n, i % n))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Largest tile value on the grid, or 0 when empty.
    pub fn max_value(&self) -> u64 {
        self.cells.iter().flatten().map(|t| t.value).max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn total_value(&self) -> u64 {
        self.cells.iter().flatten().map(|t| t.value).sum()
    }

    /// Tile values row by row, 0 for empty cells.
    pub fn values(&self) -> Vec<Vec<u64>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.map_or(0, |t| t.value)).collect())
            .collect()
    }
}
