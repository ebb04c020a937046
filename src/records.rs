//! Best-score records per difficulty.
//!
//! The engine never reads or writes storage. Callers keep a `BestScores`
//! alongside their own persistence and feed it the scores a `Board` reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Difficulty;

/// Errors that can occur while loading or saving records.
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("malformed records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Best score seen for each difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScores {
    scores: BTreeMap<Difficulty, u64>,
}

impl BestScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score for `difficulty`, 0 if none recorded.
    pub fn get(&self, difficulty: Difficulty) -> u64 {
        self.scores.get(&difficulty).copied().unwrap_or(0)
    }

    /// Records `score` for `difficulty`. Returns true if it is a new best.
    pub fn record(&mut self, difficulty: Difficulty, score: u64) -> bool {
        let best = self.scores.entry(difficulty).or_insert(0);
        if score > *best {
            *best = score;
            true
        } else {
            false
        }
    }

    pub fn to_json(&self) -> Result<String, RecordsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, RecordsError> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::resolve::Direction;

    #[test]
    fn record_keeps_maximum() {
        let mut best = BestScores::new();
        assert_eq!(best.get(Difficulty::Classic), 0);
        assert!(best.record(Difficulty::Classic, 120));
        assert!(!best.record(Difficulty::Classic, 80));
        assert!(!best.record(Difficulty::Classic, 120));
        assert_eq!(best.get(Difficulty::Classic), 120);
        assert_eq!(best.get(Difficulty::Giant), 0);
    }

    #[test]
    fn json_roundtrip() {
        let mut best = BestScores::new();
        best.record(Difficulty::Large, 4000);
        best.record(Difficulty::Giant, 12);
        let json = best.to_json().unwrap();
        assert_eq!(json, r#"{"large":4000,"giant":12}"#);
        assert_eq!(BestScores::from_json(&json).unwrap(), best);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(BestScores::from_json("{\"nightmare\": 3}").is_err());
        assert!(BestScores::from_json("[").is_err());
    }

    #[test]
    fn feeds_board_best_score() {
        let mut best = BestScores::new();
        best.record(Difficulty::Classic, 900);

        let mut board = Board::with_seed(Difficulty::Classic, 5);
        board.set_best_score(best.get(board.difficulty()));
        for i in 0..50 {
            board.apply_move(Direction::from_index(i % 4));
        }
        best.record(board.difficulty(), board.best_score());
        assert!(best.get(Difficulty::Classic) >= 900);
    }
}
