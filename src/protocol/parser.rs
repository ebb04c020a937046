//! Line protocol command parser.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the main loop can dispatch on.

use crate::board::Difficulty;
use crate::resolve::Direction;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; engine replies with id, options and `hellook`.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game, optionally overriding the configured difficulty.
    NewGame { difficulty: Option<Difficulty> },

    /// Load a grid from notation, optionally naming the difficulty it is
    /// played at. Without one the difficulty follows the grid size.
    Position {
        notation: String,
        difficulty: Option<Difficulty>,
    },

    /// Apply a move.
    Move { direction: Direction },

    /// Report counters and status as JSON.
    State,

    /// Report the grid as notation.
    Board,

    /// Report the full tile snapshot as JSON.
    Snapshot,

    /// Report which directions would change the grid.
    Legal,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "state" => Some(Command::State),
        "board" => Some(Command::Board),
        "snapshot" => Some(Command::Snapshot),
        "legal" => Some(Command::Legal),

        "setoption" => parse_setoption(&tokens),
        "newgame" => parse_newgame(&tokens),
        "position" => parse_position(&tokens),
        "move" => parse_move(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");
    let (name_parts, value_parts) = match value_idx {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        eprintln!("malformed setoption: empty name");
        return None;
    }

    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `newgame [difficulty]`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1) {
        None => Some(Command::NewGame { difficulty: None }),
        Some(name) => match Difficulty::from_name(name) {
            Some(difficulty) => Some(Command::NewGame {
                difficulty: Some(difficulty),
            }),
            None => {
                eprintln!("unknown difficulty: '{}'", name);
                None
            }
        },
    }
}

/// Parses `position <notation> [difficulty]`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    let Some(notation) = tokens.get(1) else {
        eprintln!("malformed position: expected 'position <notation> [difficulty]'");
        return None;
    };
    let difficulty = match tokens.get(2) {
        None => None,
        Some(name) => match Difficulty::from_name(name) {
            Some(difficulty) => Some(difficulty),
            None => {
                eprintln!("unknown difficulty: '{}'", name);
                return None;
            }
        },
    };
    Some(Command::Position {
        notation: notation.to_string(),
        difficulty,
    })
}

/// Parses `move <direction>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    let Some(name) = tokens.get(1) else {
        eprintln!("malformed move: expected 'move <left|right|up|down>'");
        return None;
    };
    match Direction::from_name(name) {
        Some(direction) => Some(Command::Move { direction }),
        None => {
            eprintln!("unknown direction: '{}'", name);
            None
        }
    }
}
