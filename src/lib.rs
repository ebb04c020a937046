//! tilefold engine library.
//!
//! Exposes the board representation, move resolution, the line protocol,
//! best-score records and batch playouts for use by integration tests and
//! the binary entry points.

pub mod board;
pub mod engine;
pub mod protocol;
pub mod records;
pub mod resolve;
pub mod selfplay;
