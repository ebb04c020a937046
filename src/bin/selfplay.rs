//! Batch playout CLI.
//!
//! Plays games with a trivial policy and outputs one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N          Number of games to play (default: 10)
//!   --difficulty NAME  classic, large, huge or giant (default: classic)
//!   --policy NAME      random or cycle (default: random)
//!   --max-moves N      Stop each game after N moves, 0 for no cap (default: 0)
//!   --threads N        Number of parallel threads (default: 4)
//!   --seed N           Random seed, 0 for entropy (default: 0)
//!   --output FILE      Output file path (default: stdout)
//!   --quiet            Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use env_logger::Env;
use log::info;

use tilefold::board::Difficulty;
use tilefold::selfplay::{self, Policy, SelfPlayConfig};

/// Parses the value following `flag`, exiting with usage on failure.
fn parse_arg<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = parse_arg(&args, i, "--games");
            }
            "--difficulty" => {
                i += 1;
                let name: String = parse_arg(&args, i, "--difficulty");
                config.difficulty = Difficulty::from_name(&name).unwrap_or_else(|| {
                    eprintln!("unknown difficulty: {}", name);
                    process::exit(1);
                });
            }
            "--policy" => {
                i += 1;
                let name: String = parse_arg(&args, i, "--policy");
                config.policy = Policy::from_name(&name).unwrap_or_else(|| {
                    eprintln!("unknown policy: {}", name);
                    process::exit(1);
                });
            }
            "--max-moves" => {
                i += 1;
                config.max_moves = parse_arg(&args, i, "--max-moves");
            }
            "--threads" => {
                i += 1;
                config.threads = parse_arg(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_arg(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_arg(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        info!(
            "Playouts: {} games, {} grid, {:?} policy, {} threads",
            config.num_games,
            config.difficulty.name(),
            config.policy,
            config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        info!(
            "Completed {} games in {:.2}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };

    match (written, output_path) {
        (Err(e), _) => {
            eprintln!("failed to write output: {}", e);
            process::exit(1);
        }
        (Ok(()), Some(path)) if !config.quiet => info!("Wrote {} games to {}", games.len(), path),
        _ => {}
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N          Number of games to play (default: 10)");
    eprintln!("  --difficulty NAME  classic, large, huge or giant (default: classic)");
    eprintln!("  --policy NAME      random or cycle (default: random)");
    eprintln!("  --max-moves N      Stop each game after N moves, 0 for no cap (default: 0)");
    eprintln!("  --threads N        Number of parallel threads (default: 4)");
    eprintln!("  --seed N           Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE      Output file path (default: stdout)");
    eprintln!("  --quiet            Suppress progress and summary output");
    eprintln!("  --help             Show this help");
}
