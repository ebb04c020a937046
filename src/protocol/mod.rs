//! Line protocol handling.
//!
//! This module implements the grid notation used to load and report
//! positions, and the command parser for the main loop.

pub mod notation;
pub mod parser;

pub use notation::{encode_grid, parse_grid, NotationError};
pub use parser::{parse_command, Command};
