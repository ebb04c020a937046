//! Tiles and tile identity.
//!
//! A tile is a value plus an opaque id. Its position is the grid cell it
//! occupies and is not stored on the tile itself.

use serde::{Deserialize, Serialize};

/// Opaque unique token identifying a tile for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u64);

/// Monotonic allocator for tile ids. Ids are never reused within a board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileIds {
    next: u64,
}

impl TileIds {
    pub fn new() -> Self {
        TileIds { next: 0 }
    }

    /// An allocator whose first id follows `last`.
    pub fn starting_after(last: TileId) -> Self {
        TileIds { next: last.0 + 1 }
    }

    /// Hands out the next unused id.
    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }
}

/// A tile on the grid. `value` is always a power of two >= 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: u64,
}

impl Tile {
    pub fn new(id: TileId, value: u64) -> Self {
        debug_assert!(is_tile_value(value), "invalid tile value {}", value);
        Tile { id, value }
    }

    /// True if this tile and `other` combine into one. Tiles at
    /// `MAX_TILE_VALUE` never merge, so doubling cannot overflow.
    pub fn merges_with(&self, other: &Tile) -> bool {
        self.value == other.value && self.value < MAX_TILE_VALUE
    }

    /// The tile two copies of this one merge into, under a fresh id.
    pub fn doubled(self, id: TileId) -> Tile {
        Tile::new(id, self.value * 2)
    }
}

/// Largest value a tile may hold. Tiles of this value stop merging.
pub const MAX_TILE_VALUE: u64 = 1 << 62;

/// Returns true if `value` can appear on a tile.
pub fn is_tile_value(value: u64) -> bool {
    (2..=MAX_TILE_VALUE).contains(&value) && value.is_power_of_two()
}

/// Read-only view of a tile handed to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub id: TileId,
    pub value: u64,
    pub row: usize,
    pub col: usize,
    /// Spawned during the last committed turn.
    pub is_new: bool,
    /// Produced by a merge during the last committed turn.
    pub just_merged: bool,
}
