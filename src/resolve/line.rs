//! Line compaction.
//!
//! Slides the tiles of one line toward index 0 and merges equal neighbours.
//! Every direction is reduced to this single routine by the move resolver.

use crate::board::tile::{Tile, TileIds};

/// Result of compacting a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    /// The compacted line, same length as the input.
    pub line: Vec<Option<Tile>>,
    /// True if any position holds a different value (or emptiness) than before.
    pub changed: bool,
    /// Sum of the values of all tiles created by merges.
    pub score_gained: u64,
    /// Tiles created by merges with their index in `line`, in index order.
    pub merged: Vec<(usize, Tile)>,
}

/// Compacts a line toward index 0.
///
/// Tiles are consumed greedily left to right: a tile merges with the next
/// occupied tile if their values are equal, and a merge result is never
/// reconsidered in the same pass. So `2 2 2 2` becomes `4 4 . .` and
/// `2 2 2 .` becomes `4 2 . .`. Tiles at `MAX_TILE_VALUE` only slide.
pub fn compact_line(cells: &[Option<Tile>], ids: &mut TileIds) -> LineOutcome {
    let tiles: Vec<Tile> = cells.iter().flatten().copied().collect();
    let mut line = vec![None; cells.len()];
    let mut merged = Vec::new();
    let mut score_gained: u64 = 0;

    let mut cursor = 0;
    let mut i = 0;
    while i < tiles.len() {
        let current = tiles[i];
        match tiles.get(i + 1) {
            Some(next) if current.merges_with(next) => {
                let tile = current.doubled(ids.next_id());
                line[cursor] = Some(tile);
                merged.push((cursor, tile));
                score_gained = score_gained.saturating_add(tile.value);
                i += 2;
            }
            _ => {
                line[cursor] = Some(current);
                i += 1;
            }
        }
        cursor += 1;
    }

    let changed = cells
        .iter()
        .zip(&line)
        .any(|(before, after)| before.map(|t| t.value) != after.map(|t| t.value));

    LineOutcome {
        line,
        changed,
        score_gained,
        merged,
    }
}
