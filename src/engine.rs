//! Engine state management.
//!
//! Holds the current board, engine options, and answers protocol commands
//! by writing response lines to the given output.

use std::collections::HashMap;
use std::io::Write;

use log::warn;
use serde::Serialize;

use crate::board::{Board, BoardError, Difficulty};
use crate::protocol::notation::{encode_grid, parse_grid, NotationError};
use crate::resolve::Direction;

/// Errors raised while handling a command.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to parse position: {0}")]
    Notation(#[from] NotationError),

    #[error("no difficulty plays on a {0}x{0} grid")]
    UnsupportedSize(usize),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub board: Option<Board>,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates a new engine with no game in progress.
    pub fn new() -> Self {
        Engine {
            board: None,
            options: HashMap::new(),
        }
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Returns the configured seed, or `None` to seed from entropy.
    fn seed(&self) -> Option<u64> {
        self.options.get("Seed").and_then(|v| v.parse::<u64>().ok())
    }

    /// Returns the configured difficulty (default classic).
    fn difficulty(&self) -> Difficulty {
        match self.options.get("Difficulty") {
            Some(name) => Difficulty::from_name(name).unwrap_or_else(|| {
                warn!("unknown Difficulty option '{}', using classic", name);
                Difficulty::Classic
            }),
            None => Difficulty::Classic,
        }
    }

    /// Starts a new game. The best score carries over from the previous game
    /// when the difficulty is unchanged.
    pub fn new_game(&mut self, difficulty: Option<Difficulty>) {
        let difficulty = difficulty.unwrap_or_else(|| self.difficulty());
        let mut board = match self.seed() {
            Some(seed) => Board::with_seed(difficulty, seed),
            None => Board::new(difficulty),
        };
        if let Some(prev) = &self.board {
            if prev.difficulty() == difficulty {
                board.set_best_score(prev.best_score());
            }
        }
        self.board = Some(board);
    }

    /// Replaces the board with a grid given in notation. Without an explicit
    /// difficulty it is inferred from the grid size.
    pub fn set_position(
        &mut self,
        notation: &str,
        difficulty: Option<Difficulty>,
    ) -> Result<(), EngineError> {
        let grid = parse_grid(notation)?;
        let difficulty = match difficulty {
            Some(d) => d,
            None => Difficulty::from_size(grid.size())
                .ok_or(EngineError::UnsupportedSize(grid.size()))?,
        };
        let mut board = Board::from_grid(difficulty, grid, self.seed().unwrap_or(0))?;
        if let Some(prev) = &self.board {
            if prev.difficulty() == difficulty {
                board.set_best_score(prev.best_score());
            }
        }
        self.board = Some(board);
        Ok(())
    }

    /// Handles the protocol handshake: writes id, options, protocol_version, and hellook.
    pub fn handle_hello<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name tilefold").unwrap();
        writeln!(out, "id author tilefold").unwrap();
        writeln!(
            out,
            "option name Difficulty type combo default classic var classic var large var huge var giant"
        )
        .unwrap();
        writeln!(out, "option name Seed type string default <empty>").unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "hellook").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Handles `move <direction>`: applies the move and writes its result.
    pub fn handle_move<W: Write>(&mut self, direction: Direction, out: &mut W) {
        let Some(board) = self.board.as_mut() else {
            eprintln!("move: no game in progress");
            return;
        };
        let result = board.apply_move(direction);
        write_json(out, "result", &result);
    }

    /// Handles `state`: writes counters and status.
    pub fn handle_state<W: Write>(&self, out: &mut W) {
        match &self.board {
            Some(board) => write_json(out, "state", &board.query_state()),
            None => eprintln!("state: no game in progress"),
        }
    }

    /// Handles `snapshot`: writes every cell with per-turn flags.
    pub fn handle_snapshot<W: Write>(&self, out: &mut W) {
        match &self.board {
            Some(board) => write_json(out, "snapshot", &board.snapshot()),
            None => eprintln!("snapshot: no game in progress"),
        }
    }

    /// Handles `board`: writes the grid in notation.
    pub fn handle_board<W: Write>(&self, out: &mut W) {
        let Some(board) = &self.board else {
            eprintln!("board: no game in progress");
            return;
        };
        writeln!(out, "board {}", encode_grid(board.grid())).unwrap();
        out.flush().unwrap();
    }

    /// Handles `legal`: writes the directions that would change the grid.
    pub fn handle_legal<W: Write>(&self, out: &mut W) {
        let Some(board) = &self.board else {
            eprintln!("legal: no game in progress");
            return;
        };
        let legal: Vec<&str> = Direction::ALL
            .iter()
            .zip(board.legal_moves())
            .filter(|(_, ok)| *ok)
            .map(|(d, _)| d.name())
            .collect();
        if legal.is_empty() {
            writeln!(out, "legal none").unwrap();
        } else {
            writeln!(out, "legal {}", legal.join(" ")).unwrap();
        }
        out.flush().unwrap();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `<tag> <json>` as one line.
fn write_json<W: Write, T: Serialize>(out: &mut W, tag: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => {
            writeln!(out, "{} {}", tag, json).unwrap();
            out.flush().unwrap();
        }
        Err(e) => eprintln!("{}: failed to serialize: {}", tag, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GameState, MoveResult, Status};

    const PAIR: &str = "4:2,2,.,./.,.,.,./.,.,.,./.,.,.,.";
    const STUCK: &str = "4:2,4,2,4/4,2,4,2/2,4,2,4/4,2,4,2";

    fn output_of<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_has_no_state() {
        let engine = Engine::new();
        assert!(engine.board.is_none());
        assert!(engine.options.is_empty());
    }

    #[test]
    fn new_game_uses_difficulty_option() {
        let mut engine = Engine::new();
        engine.set_option("Difficulty".to_string(), Some("huge".to_string()));
        engine.new_game(None);
        assert_eq!(engine.board.as_ref().unwrap().grid().size(), 6);

        engine.new_game(Some(Difficulty::Giant));
        assert_eq!(engine.board.as_ref().unwrap().grid().size(), 8);
    }

    #[test]
    fn seeded_new_games_match() {
        let mut engine = Engine::new();
        engine.set_option("Seed".to_string(), Some("123".to_string()));
        engine.new_game(None);
        let first = engine.board.as_ref().unwrap().grid().clone();
        engine.new_game(None);
        assert_eq!(engine.board.as_ref().unwrap().grid(), &first);
    }

    #[test]
    fn set_position_valid() {
        let mut engine = Engine::new();
        engine.set_position(PAIR, None).unwrap();
        let board = engine.board.as_ref().unwrap();
        assert_eq!(board.difficulty(), Difficulty::Classic);
        assert_eq!(board.grid().tiles().count(), 2);
    }

    #[test]
    fn set_position_invalid() {
        let mut engine = Engine::new();
        assert!(matches!(engine.set_position("garbage", None), Err(EngineError::Notation(_))));
        assert!(matches!(
            engine.set_position("3:.,.,./.,.,./.,.,.", None),
            Err(EngineError::UnsupportedSize(3))
        ));
        assert!(engine.board.is_none());
    }

    #[test]
    fn set_position_with_difficulty() {
        let mut engine = Engine::new();
        engine.set_position(PAIR, Some(Difficulty::Classic)).unwrap();
        assert_eq!(engine.board.as_ref().unwrap().difficulty(), Difficulty::Classic);

        assert!(matches!(
            engine.set_position(PAIR, Some(Difficulty::Large)),
            Err(EngineError::Board(BoardError::SizeMismatch { expected: 5, actual: 4, .. }))
        ));
        assert_eq!(engine.board.as_ref().unwrap().grid().size(), 4);
    }

    #[test]
    fn oversized_tiles_are_refused_and_largest_tiles_stay_put() {
        let mut engine = Engine::new();
        let too_big = "4:9223372036854775808,9223372036854775808,.,./.,.,.,./.,.,.,./.,.,.,.";
        assert!(matches!(
            engine.set_position(too_big, None),
            Err(EngineError::Notation(NotationError::InvalidValue { .. }))
        ));

        let largest = "4:.,4611686018427387904,4611686018427387904,./.,.,.,./.,.,.,./.,.,.,.";
        engine.set_position(largest, None).unwrap();
        let text = output_of(|out| engine.handle_move(Direction::Left, out));
        let result: MoveResult = serde_json::from_str(text.trim().strip_prefix("result ").unwrap()).unwrap();
        assert!(result.changed);
        assert_eq!(result.score_delta, 0);
        assert!(result.merged_tiles.is_empty());
        let board = engine.board.as_ref().unwrap();
        assert_eq!(board.grid().get(0, 0).map(|t| t.value), Some(1 << 62));
        assert_eq!(board.grid().get(0, 1).map(|t| t.value), Some(1 << 62));
    }

    #[test]
    fn best_score_survives_new_game() {
        let mut engine = Engine::new();
        engine.set_position(PAIR, None).unwrap();
        let mut out = Vec::new();
        engine.handle_move(Direction::Left, &mut out);
        engine.new_game(None);
        assert_eq!(engine.board.as_ref().unwrap().best_score(), 4);
        engine.new_game(Some(Difficulty::Large));
        assert_eq!(engine.board.as_ref().unwrap().best_score(), 0);
    }

    #[test]
    fn handle_move_writes_result() {
        let mut engine = Engine::new();
        engine.set_position(PAIR, None).unwrap();
        let text = output_of(|out| engine.handle_move(Direction::Left, out));
        let json = text.trim().strip_prefix("result ").unwrap();
        let result: MoveResult = serde_json::from_str(json).unwrap();
        assert!(result.changed);
        assert_eq!(result.score_delta, 4);
        assert_eq!(result.merged_tiles.len(), 1);
        assert!(result.spawned_tile.is_some());
    }

    #[test]
    fn handle_move_without_game_writes_nothing() {
        let mut engine = Engine::new();
        let text = output_of(|out| engine.handle_move(Direction::Up, out));
        assert!(text.is_empty());
    }

    #[test]
    fn handle_state_reports_lost() {
        let mut engine = Engine::new();
        engine.set_position(STUCK, None).unwrap();
        let text = output_of(|out| engine.handle_state(out));
        let state: GameState = serde_json::from_str(text.trim().strip_prefix("state ").unwrap()).unwrap();
        assert_eq!(state.status, Status::Lost);
        assert_eq!(state.max_tile_seen, 4);
    }

    #[test]
    fn handle_board_and_legal() {
        let mut engine = Engine::new();
        engine.set_position(PAIR, None).unwrap();
        assert_eq!(output_of(|out| engine.handle_board(out)).trim(), format!("board {}", PAIR));
        assert_eq!(output_of(|out| engine.handle_legal(out)).trim(), "legal left right down");

        engine.set_position(STUCK, None).unwrap();
        assert_eq!(output_of(|out| engine.handle_legal(out)).trim(), "legal none");
    }

    #[test]
    fn handle_snapshot_has_all_rows() {
        let mut engine = Engine::new();
        engine.set_position(PAIR, None).unwrap();
        let text = output_of(|out| engine.handle_snapshot(out));
        let json: serde_json::Value = serde_json::from_str(text.trim().strip_prefix("snapshot ").unwrap()).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0]["value"], 2);
        assert!(rows[3][3].is_null());
    }

    #[test]
    fn handle_hello_outputs_handshake() {
        let engine = Engine::new();
        let text = output_of(|out| engine.handle_hello(out));
        assert!(text.contains("id name tilefold"));
        assert!(text.contains("protocol_version 1"));
        assert!(text.trim_end().ends_with("hellook"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        assert_eq!(output_of(|out| engine.handle_isready(out)).trim(), "readyok");
    }
}
