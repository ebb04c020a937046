//! Move resolution.
//!
//! Turns a direction into a new grid via one shared line compactor, then
//! spawns a tile and judges whether the game is won or lost.

pub mod line;
pub mod movement;
pub mod spawn;
pub mod terminal;

pub use line::{compact_line, LineOutcome};
pub use movement::{can_move, resolve_move, Direction, MoveOutcome};
pub use spawn::{try_spawn, SPAWN_TWO_PROBABILITY};
pub use terminal::{check_lost, check_won, has_adjacent_pair};
