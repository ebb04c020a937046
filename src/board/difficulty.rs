//! Difficulty levels.
//!
//! A difficulty fixes the grid size and the tile value that counts as a win.

use serde::{Deserialize, Serialize};

/// Selects grid size and target tile for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Classic,
    Large,
    Huge,
    Giant,
}

/// All difficulties in ascending grid size.
pub const ALL_DIFFICULTIES: [Difficulty; 4] = [
    Difficulty::Classic,
    Difficulty::Large,
    Difficulty::Huge,
    Difficulty::Giant,
];

impl Difficulty {
    /// Side length of the square grid.
    pub const fn size(self) -> usize {
        match self {
            Difficulty::Classic => 4,
            Difficulty::Large => 5,
            Difficulty::Huge => 6,
            Difficulty::Giant => 8,
        }
    }

    /// Tile value that wins the game.
    pub const fn target(self) -> u64 {
        match self {
            Difficulty::Classic => 2048,
            Difficulty::Large => 4096,
            Difficulty::Huge => 8192,
            Difficulty::Giant => 16384,
        }
    }

    /// Returns the lowercase protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Classic => "classic",
            Difficulty::Large => "large",
            Difficulty::Huge => "huge",
            Difficulty::Giant => "giant",
        }
    }

    /// Parses a difficulty from its protocol name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Difficulty> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Some(Difficulty::Classic),
            "large" => Some(Difficulty::Large),
            "huge" => Some(Difficulty::Huge),
            "giant" => Some(Difficulty::Giant),
            _ => None,
        }
    }

    /// Returns the difficulty played on a grid of the given side length.
    pub fn from_size(size: usize) -> Option<Difficulty> {
        ALL_DIFFICULTIES.iter().copied().find(|d| d.size() == size)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Classic
    }
}
