//! tilefold -- a sliding-tile merge engine behind a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! one command per line.

use std::io::{self, BufRead};

use env_logger::Env;

use tilefold::engine::Engine;
use tilefold::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Hello => {
                engine.handle_hello(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
            }
            Command::NewGame { difficulty } => {
                engine.new_game(difficulty);
            }
            Command::Position { notation, difficulty } => {
                if let Err(e) = engine.set_position(&notation, difficulty) {
                    eprintln!("{}", e);
                }
            }
            Command::Move { direction } => {
                engine.handle_move(direction, &mut out);
            }
            Command::State => {
                engine.handle_state(&mut out);
            }
            Command::Board => {
                engine.handle_board(&mut out);
            }
            Command::Snapshot => {
                engine.handle_snapshot(&mut out);
            }
            Command::Legal => {
                engine.handle_legal(&mut out);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
