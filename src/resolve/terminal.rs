//! Terminal-state evaluation.
//!
//! Win and loss are judged on raw tile values only. The merge lock lasts a
//! single move, so it plays no part in deciding whether the grid is stuck.

use crate::board::grid::Grid;

/// Returns true if any tile has reached `target`.
pub fn check_won(grid: &Grid, target: u64) -> bool {
    grid.tiles().any(|(_, _, t)| t.value >= target)
}

/// Returns true if two horizontally or vertically adjacent tiles can merge.
pub fn has_adjacent_pair(grid: &Grid) -> bool {
    let n = grid.size();
    for r in 0..n {
        for c in 0..n {
            let Some(tile) = grid.get(r, c) else {
                continue;
            };
            if c + 1 < n && grid.get(r, c + 1).is_some_and(|t| tile.merges_with(&t)) {
                return true;
            }
            if r + 1 < n && grid.get(r + 1, c).is_some_and(|t| tile.merges_with(&t)) {
                return true;
            }
        }
    }
    false
}

/// Returns true if the grid is full and no adjacent pair can merge.
pub fn check_lost(grid: &Grid) -> bool {
    grid.is_full() && !has_adjacent_pair(grid)
}
