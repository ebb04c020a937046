//! Tile spawning.

use rand::Rng;

use crate::board::grid::Grid;
use crate::board::tile::{Tile, TileIds};

/// Probability that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Places a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
///
/// Returns the placed tile and its cell, or `None` when the grid is full.
pub fn try_spawn<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    ids: &mut TileIds,
) -> Option<(usize, usize, Tile)> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 };
    let tile = Tile::new(ids.next_id(), value);
    grid.set(row, col, Some(tile));
    Some((row, col, tile))
}
