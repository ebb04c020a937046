//! Grid notation encoding and decoding.
//!
//! A compact single-token form of a grid's tile values, used by the
//! `position` and `board` protocol commands.
//!
//! Format: `<size>:<row>/<row>/...`, each row a comma-separated list of tile
//! values with `.` for an empty cell, e.g. `4:2,2,.,./.,.,.,./.,.,.,./.,.,.,4`.

use crate::board::grid::Grid;
use crate::board::tile::{is_tile_value, Tile, TileIds};

/// Errors that can occur during notation parsing.
#[derive(Debug, thiserror::Error)]
pub enum NotationError {
    #[error("expected '<size>:<rows>', got '{0}'")]
    MissingSize(String),

    #[error("invalid grid size: '{0}'")]
    InvalidSize(String),

    #[error("expected {expected} rows, got {actual}")]
    WrongRowCount { expected: usize, actual: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    WrongRowWidth { row: usize, expected: usize, actual: usize },

    #[error("invalid cell '{cell}' in row {row}")]
    InvalidCell { row: usize, cell: String },

    #[error("{value} is not a tile value (row {row})")]
    InvalidValue { row: usize, value: u64 },
}

/// Parses a grid from notation. Tiles receive fresh ids in row-major order.
pub fn parse_grid(s: &str) -> Result<Grid, NotationError> {
    let s = s.trim();
    let (size_str, rows_str) = s
        .split_once(':')
        .ok_or_else(|| NotationError::MissingSize(s.to_string()))?;

    let size: usize = size_str
        .parse()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| NotationError::InvalidSize(size_str.to_string()))?;

    let rows: Vec<&str> = rows_str.split('/').collect();
    if rows.len() != size {
        return Err(NotationError::WrongRowCount {
            expected: size,
            actual: rows.len(),
        });
    }

    let mut ids = TileIds::new();
    let mut grid = Grid::empty(size);
    for (r, row) in rows.iter().enumerate() {
        let cells: Vec<&str> = row.split(',').collect();
        if cells.len() != size {
            return Err(NotationError::WrongRowWidth {
                row: r,
                expected: size,
                actual: cells.len(),
            });
        }
        for (c, cell) in cells.iter().enumerate() {
            if *cell == "." {
                continue;
            }
            let value: u64 = cell.parse().map_err(|_| NotationError::InvalidCell {
                row: r,
                cell: cell.to_string(),
            })?;
            if !is_tile_value(value) {
                return Err(NotationError::InvalidValue { row: r, value });
            }
            grid.set(r, c, Some(Tile::new(ids.next_id(), value)));
        }
    }

    Ok(grid)
}

/// Encodes a grid's values as notation.
pub fn encode_grid(grid: &Grid) -> String {
    let rows: Vec<String> = grid
        .values()
        .iter()
        .map(|row| {
            row.iter()
                .map(|&v| if v == 0 { ".".to_string() } else { v.to_string() })
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    format!("{}:{}", grid.size(), rows.join("/"))
}
