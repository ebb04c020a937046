//! Batch playouts.
//!
//! Plays many games with a trivial move policy to exercise the engine and
//! gather statistics. Records final score, counters and outcome per game.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Difficulty, Status};
use crate::resolve::Direction;

/// How a playout picks its next direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Uniformly random among the directions that change the grid.
    Random,
    /// Left, Down, Right, Up in turn, skipping directions that do nothing.
    Cycle,
}

impl Policy {
    pub fn from_name(s: &str) -> Option<Policy> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Some(Policy::Random),
            "cycle" => Some(Policy::Cycle),
            _ => None,
        }
    }
}

const CYCLE_ORDER: [Direction; 4] = [Direction::Left, Direction::Down, Direction::Right, Direction::Up];

/// Configuration for batch playouts.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    pub difficulty: Difficulty,
    pub policy: Policy,
    /// Stop a game after this many committed moves (0 = until lost).
    pub max_moves: u64,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            difficulty: Difficulty::Classic,
            policy: Policy::Random,
            max_moves: 0,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Summary of one finished playout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub difficulty: Difficulty,
    pub policy: Policy,
    pub score: u64,
    pub move_count: u64,
    pub merge_count: u64,
    pub max_tile: u64,
    pub status: Status,
    /// Moves rejected because they would not change the grid.
    pub rejected_moves: u64,
}

/// Plays one game to completion (or `max_moves`) with the given RNG.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut board = Board::with_seed(config.difficulty, rng.gen());
    let mut rejected_moves = 0;
    let mut turn = 0usize;

    loop {
        if board.status() == Status::Lost {
            break;
        }
        if config.max_moves > 0 && board.query_state().move_count >= config.max_moves {
            break;
        }

        let direction = match config.policy {
            Policy::Random => {
                let legal: Vec<Direction> = Direction::ALL
                    .iter()
                    .zip(board.legal_moves())
                    .filter(|(_, ok)| *ok)
                    .map(|(d, _)| *d)
                    .collect();
                if legal.is_empty() {
                    // Won boards stay Won even when stuck.
                    break;
                }
                legal[rng.gen_range(0..legal.len())]
            }
            Policy::Cycle => {
                let d = CYCLE_ORDER[turn % CYCLE_ORDER.len()];
                turn += 1;
                d
            }
        };

        if !board.apply_move(direction).changed {
            rejected_moves += 1;
            if board.legal_moves().iter().all(|ok| !ok) {
                break;
            }
        }
    }

    let state = board.query_state();
    GameRecord {
        game_id,
        difficulty: state.difficulty,
        policy: config.policy,
        score: state.score,
        move_count: state.move_count,
        merge_count: state.merge_count,
        max_tile: state.max_tile_seen,
        status: state.status,
        rejected_moves,
    }
}

/// Runs batch playouts, producing one record per game in completion order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games
}

/// Runs batch playouts, calling `on_game` with each completed record.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn log_game(config: &SelfPlayConfig, n: usize, game: &GameRecord, elapsed: f64) {
    if !config.quiet {
        info!(
            "Game {}/{}: {:?}, score {}, max tile {}, {} moves ({:.2}s)",
            n, config.num_games, game.status, game.score, game.max_tile, game.move_count, elapsed,
        );
    }
}

/// Sequential playouts: one game at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let game_start = Instant::now();
        let mut rng = game_rng(config, i);
        let game = play_game(config, i, &mut rng);
        log_game(config, i + 1, &game, game_start.elapsed().as_secs_f64());
        on_game(game);
    }
}

/// Parallel playouts on a rayon pool. Completed games are handed to the
/// callback on the calling thread through a channel.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("failed to build thread pool ({}); running sequentially", e);
            run_self_play_sequential(config, on_game);
            return;
        }
    };

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games).into_par_iter().for_each_with(tx, |tx, i| {
                    let game_start = Instant::now();
                    let mut rng = game_rng(config, i);
                    let game = play_game(config, i, &mut rng);
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    log_game(config, n, &game, game_start.elapsed().as_secs_f64());
                    let _ = tx.send(game);
                });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    out.flush()
}

/// Writes a single game record as one JSON line.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

/// Logs a summary of playout results.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len().max(1) as f64;
    let won = games.iter().filter(|g| g.status == Status::Won).count();
    let lost = games.iter().filter(|g| g.status == Status::Lost).count();
    let total_score: u64 = games.iter().map(|g| g.score).sum();
    let total_moves: u64 = games.iter().map(|g| g.move_count).sum();
    let best = games.iter().map(|g| g.score).max().unwrap_or(0);

    info!("=== Playout Summary ===");
    info!("Games: {}", games.len());
    info!("Won: {} ({:.1}%)", won, 100.0 * won as f64 / total);
    info!("Lost: {} ({:.1}%)", lost, 100.0 * lost as f64 / total);
    info!("Avg score: {:.1}", total_score as f64 / total);
    info!("Avg moves/game: {:.1}", total_moves as f64 / total);
    info!("Best score: {}", best);

    let mut tiles: Vec<u64> = games.iter().map(|g| g.max_tile).collect();
    tiles.sort_unstable();
    tiles.dedup();
    for tile in tiles.iter().rev() {
        let count = games.iter().filter(|g| g.max_tile == *tile).count();
        info!("  max tile {:>6}: {} ({:.1}%)", tile, count, 100.0 * count as f64 / total);
    }
}
