//! Move resolution.
//!
//! Every direction is handled by the same line compactor. A direction only
//! decides which cells form a line and in which order they are read; the
//! compacted line is written back through the same mapping.

use serde::{Deserialize, Serialize};

use super::line::compact_line;
use crate::board::grid::Grid;
use crate::board::tile::{Tile, TileIds};

/// A move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions, in the order used by `legal_moves`.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Returns the direction at `index` in `Direction::ALL`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`. Direction indices come from the caller's own
    /// input mapping, so an out-of-range index is a bug.
    pub fn from_index(index: usize) -> Direction {
        match Direction::ALL.get(index) {
            Some(&d) => d,
            None => panic!("invalid direction index {}", index),
        }
    }

    /// Returns the lowercase protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Parses a direction from its name or first letter (case-insensitive).
    pub fn from_name(s: &str) -> Option<Direction> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }

    /// The direction that mirrors this one.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Maps position `pos` of line `line` to a `(row, col)` cell.
    ///
    /// Position 0 is the cell tiles compact toward.
    pub const fn cell(self, size: usize, line: usize, pos: usize) -> (usize, usize) {
        match self {
            Direction::Left => (line, pos),
            Direction::Right => (line, size - 1 - pos),
            Direction::Up => (pos, line),
            Direction::Down => (size - 1 - pos, line),
        }
    }
}

/// Outcome of resolving a move against a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The grid after compaction. Equal to the input when `changed` is false.
    pub grid: Grid,
    pub changed: bool,
    pub score_delta: u64,
    /// Tiles created by merges as `(row, col, tile)`, in line-then-position order.
    pub merged: Vec<(usize, usize, Tile)>,
}

/// Resolves a move on a copy of `grid`. The input is never modified.
pub fn resolve_move(grid: &Grid, direction: Direction, ids: &mut TileIds) -> MoveOutcome {
    let n = grid.size();
    let mut next = grid.clone();
    let mut changed = false;
    let mut score_delta: u64 = 0;
    let mut merged = Vec::new();

    for line in 0..n {
        let cells: Vec<Option<Tile>> = (0..n)
            .map(|pos| {
                let (r, c) = direction.cell(n, line, pos);
                grid.get(r, c)
            })
            .collect();

        let outcome = compact_line(&cells, ids);
        if !outcome.changed {
            continue;
        }

        changed = true;
        score_delta = score_delta.saturating_add(outcome.score_gained);
        for (pos, tile) in outcome.line.into_iter().enumerate() {
            let (r, c) = direction.cell(n, line, pos);
            next.set(r, c, tile);
        }
        for (pos, tile) in outcome.merged {
            let (r, c) = direction.cell(n, line, pos);
            merged.push((r, c, tile));
        }
    }

    MoveOutcome {
        grid: next,
        changed,
        score_delta,
        merged,
    }
}

/// Returns true if moving in `direction` would change the grid.
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    let n = grid.size();
    (0..n).any(|line| {
        let mut seen_empty = false;
        let mut prev: Option<Tile> = None;
        for pos in 0..n {
            let (r, c) = direction.cell(n, line, pos);
            match grid.get(r, c) {
                None => seen_empty = true,
                Some(t) => {
                    if seen_empty || prev.is_some_and(|p| p.merges_with(&t)) {
                        return true;
                    }
                    prev = Some(t);
                }
            }
        }
        false
    })
}
