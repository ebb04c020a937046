//! Board representation and game-state types.
//!
//! Contains the tiles, the grid they live on, difficulty levels, and the
//! `Board` that owns a game's canonical state.

pub mod difficulty;
pub mod grid;
pub mod state;
pub mod tile;

pub use difficulty::{Difficulty, ALL_DIFFICULTIES};
pub use grid::Grid;
pub use state::{Board, BoardError, GameState, MoveResult, Snapshot, Status};
pub use tile::{is_tile_value, Tile, TileId, TileIds, TileView, MAX_TILE_VALUE};
