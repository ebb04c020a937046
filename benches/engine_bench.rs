use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tilefold::board::{Board, Difficulty};
use tilefold::protocol::parse_grid;
use tilefold::resolve::{can_move, check_lost, compact_line, resolve_move, Direction};
use tilefold::selfplay::{run_self_play, Policy, SelfPlayConfig};

const BUSY_4X4: &str = "4:2,2,4,8/16,16,4,2/2,8,8,2/4,4,4,4";
const BUSY_8X8: &str = "8:2,2,4,8,.,16,16,2/4,4,2,2,8,.,8,4/2,.,2,.,4,4,8,8/16,8,8,2,2,.,4,2/2,2,2,2,4,8,16,32/.,4,.,4,8,8,.,2/64,64,32,16,8,4,2,2/2,4,8,16,32,64,128,256";

fn bench_compact_line(c: &mut Criterion) {
    let grid = parse_grid(BUSY_8X8).unwrap();
    let line: Vec<_> = (0..8).map(|col| grid.get(4, col)).collect();
    let ids = tilefold::board::TileIds::starting_after(tilefold::board::TileId(1_000));
    c.bench_function("compact_line_8", |b| {
        b.iter(|| {
            let mut ids = ids.clone();
            compact_line(black_box(&line), &mut ids)
        })
    });
}

fn bench_resolve_all_directions(c: &mut Criterion) {
    for (name, notation) in [("resolve_4x4", BUSY_4X4), ("resolve_8x8", BUSY_8X8)] {
        let grid = parse_grid(notation).unwrap();
        let ids = tilefold::board::TileIds::starting_after(tilefold::board::TileId(1_000));
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut ids = ids.clone();
                for d in Direction::ALL {
                    black_box(resolve_move(black_box(&grid), d, &mut ids));
                }
            })
        });
    }
}

fn bench_terminal_checks(c: &mut Criterion) {
    let grid = parse_grid(BUSY_8X8).unwrap();
    c.bench_function("check_lost_8x8", |b| b.iter(|| check_lost(black_box(&grid))));
    c.bench_function("can_move_8x8", |b| {
        b.iter(|| Direction::ALL.map(|d| can_move(black_box(&grid), d)))
    });
}

fn bench_apply_move(c: &mut Criterion) {
    c.bench_function("apply_move_classic", |b| {
        let mut board = Board::with_seed(Difficulty::Classic, 42);
        let mut i = 0;
        b.iter(|| {
            if board.is_terminal() {
                board.reset(Difficulty::Classic);
            }
            i += 1;
            board.apply_move(Direction::from_index(i % 4))
        })
    });
}

fn bench_full_playout(c: &mut Criterion) {
    let config = SelfPlayConfig {
        num_games: 1,
        difficulty: Difficulty::Classic,
        policy: Policy::Random,
        threads: 1,
        seed: 7,
        quiet: true,
        ..Default::default()
    };
    c.bench_function("random_playout_classic", |b| b.iter(|| run_self_play(black_box(&config))));
}

fn bench_board_clone(c: &mut Criterion) {
    let board = Board::with_seed(Difficulty::Giant, 1);
    c.bench_function("board_clone_giant", |b| b.iter(|| black_box(&board).clone()));
}

criterion_group!(
    benches,
    bench_compact_line,
    bench_resolve_all_directions,
    bench_terminal_checks,
    bench_apply_move,
    bench_full_playout,
    bench_board_clone,
);
criterion_main!(benches);
