//! Canonical game state.
//!
//! The `Board` owns the grid, the turn counters and the RNG used for
//! spawns. It exposes read-only queries and a single mutating command,
//! `apply_move`, which either commits a whole move or leaves every field
//! untouched.

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::grid::Grid;
use super::tile::{Tile, TileId, TileIds, TileView};
use crate::resolve::{check_lost, check_won, resolve_move, try_spawn, Direction};

/// Progress of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Playing,
    /// The target tile was reached. Play may continue.
    Won,
    /// No move can change the grid. No further moves are accepted.
    Lost,
}

/// Counters and status reported to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub difficulty: Difficulty,
    pub score: u64,
    pub best_score: u64,
    pub move_count: u64,
    pub merge_count: u64,
    pub max_tile_seen: u64,
    pub status: Status,
}

/// What a single `apply_move` call did.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveResult {
    pub changed: bool,
    pub score_delta: u64,
    /// Tiles created by merges, in line-then-position order.
    pub merged_tiles: Vec<TileView>,
    pub spawned_tile: Option<TileView>,
}

/// Read-only copy of the grid, indexed `[row][col]`.
pub type Snapshot = Vec<Vec<Option<TileView>>>;

/// Errors raised when adopting an externally supplied grid.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("grid is {actual}x{actual} but difficulty '{difficulty}' plays on {expected}x{expected}")]
    SizeMismatch {
        difficulty: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Ids touched by the last committed turn. Drives the snapshot flags.
#[derive(Debug, Clone, Default)]
struct TurnMarks {
    spawned: Vec<TileId>,
    merged: Vec<TileId>,
}

/// The canonical state of one game.
#[derive(Debug, Clone)]
pub struct Board {
    difficulty: Difficulty,
    grid: Grid,
    score: u64,
    best_score: u64,
    move_count: u64,
    merge_count: u64,
    max_tile_seen: u64,
    status: Status,
    marks: TurnMarks,
    ids: TileIds,
    rng: SmallRng,
}

impl Board {
    /// Creates a board with two spawned tiles, seeding the RNG from entropy.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::start(difficulty, SmallRng::from_entropy())
    }

    /// Creates a board with two spawned tiles and a deterministic RNG.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::start(difficulty, SmallRng::seed_from_u64(seed))
    }

    /// Adopts an existing grid. Counters start at zero and the status is
    /// evaluated against the grid as given.
    pub fn from_grid(difficulty: Difficulty, grid: Grid, seed: u64) -> Result<Self, BoardError> {
        if grid.size() != difficulty.size() {
            return Err(BoardError::SizeMismatch {
                difficulty: difficulty.name(),
                expected: difficulty.size(),
                actual: grid.size(),
            });
        }

        let ids = match grid.tiles().map(|(_, _, t)| t.id).max() {
            Some(last) => TileIds::starting_after(last),
            None => TileIds::new(),
        };

        let mut board = Board {
            difficulty,
            max_tile_seen: grid.max_value(),
            grid,
            score: 0,
            best_score: 0,
            move_count: 0,
            merge_count: 0,
            status: Status::Playing,
            marks: TurnMarks::default(),
            ids,
            rng: SmallRng::seed_from_u64(seed),
        };
        board.update_status();
        Ok(board)
    }

    fn start(difficulty: Difficulty, rng: SmallRng) -> Self {
        let mut board = Board {
            difficulty,
            grid: Grid::empty(difficulty.size()),
            score: 0,
            best_score: 0,
            move_count: 0,
            merge_count: 0,
            max_tile_seen: 0,
            status: Status::Playing,
            marks: TurnMarks::default(),
            ids: TileIds::new(),
            rng,
        };
        for _ in 0..2 {
            if let Some((_, _, tile)) = try_spawn(&mut board.grid, &mut board.rng, &mut board.ids) {
                board.marks.spawned.push(tile.id);
                board.max_tile_seen = board.max_tile_seen.max(tile.value);
            }
        }
        board
    }

    /// Discards the current game and starts a fresh one.
    ///
    /// The best score carries over only when the difficulty is unchanged.
    /// The RNG stream continues, so a seeded board stays reproducible.
    pub fn reset(&mut self, difficulty: Difficulty) {
        let best = if difficulty == self.difficulty { self.best_score } else { 0 };
        let rng = self.rng.clone();
        *self = Self::start(difficulty, rng);
        self.best_score = best;
        debug!("reset board to {}", difficulty.name());
    }

    /// Applies a move in `direction`.
    ///
    /// When nothing slides or merges the board is left exactly as it was and
    /// `changed` is false. A `Lost` board accepts no moves.
    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        if self.status == Status::Lost {
            return MoveResult::default();
        }

        let outcome = resolve_move(&self.grid, direction, &mut self.ids);
        if !outcome.changed {
            // Status is refreshed after every commit, so this only catches a
            // grid that was swapped in without going through one.
            if self.status == Status::Playing && check_lost(&self.grid) {
                self.status = Status::Lost;
                debug!("no-op move on stuck grid; game lost");
            }
            return MoveResult::default();
        }

        self.grid = outcome.grid;
        self.marks = TurnMarks {
            spawned: Vec::new(),
            merged: outcome.merged.iter().map(|(_, _, t)| t.id).collect(),
        };
        self.move_count += 1;
        self.score = self.score.saturating_add(outcome.score_delta);
        if !outcome.merged.is_empty() {
            self.merge_count += 1;
        }
        self.best_score = self.best_score.max(self.score);
        for (_, _, tile) in &outcome.merged {
            self.max_tile_seen = self.max_tile_seen.max(tile.value);
        }

        let spawned = try_spawn(&mut self.grid, &mut self.rng, &mut self.ids);
        if let Some((_, _, tile)) = spawned {
            self.marks.spawned.push(tile.id);
            self.max_tile_seen = self.max_tile_seen.max(tile.value);
        }

        self.update_status();
        debug!(
            "move {} #{}: +{} (score {}), {} merged, status {:?}",
            direction.name(),
            self.move_count,
            outcome.score_delta,
            self.score,
            outcome.merged.len(),
            self.status
        );

        MoveResult {
            changed: true,
            score_delta: outcome.score_delta,
            merged_tiles: outcome
                .merged
                .iter()
                .map(|&(r, c, t)| self.view(r, c, t))
                .collect(),
            spawned_tile: spawned.map(|(r, c, t)| self.view(r, c, t)),
        }
    }

    /// Re-evaluates win/loss after a spawn attempt. `Won` is sticky.
    fn update_status(&mut self) {
        if self.status == Status::Playing && check_won(&self.grid, self.difficulty.target()) {
            self.status = Status::Won;
            debug!("target {} reached", self.difficulty.target());
        }
        if self.status == Status::Playing && check_lost(&self.grid) {
            self.status = Status::Lost;
            debug!("grid locked; game lost");
        }
    }

    fn view(&self, row: usize, col: usize, tile: Tile) -> TileView {
        TileView {
            id: tile.id,
            value: tile.value,
            row,
            col,
            is_new: self.marks.spawned.contains(&tile.id),
            just_merged: self.marks.merged.contains(&tile.id),
        }
    }

    /// Returns a read-only copy of the grid with per-turn flags.
    pub fn snapshot(&self) -> Snapshot {
        let n = self.grid.size();
        (0..n)
            .map(|r| {
                (0..n)
                    .map(|c| self.grid.get(r, c).map(|t| self.view(r, c, t)))
                    .collect()
            })
            .collect()
    }

    pub fn query_state(&self) -> GameState {
        GameState {
            difficulty: self.difficulty,
            score: self.score,
            best_score: self.best_score,
            move_count: self.move_count,
            merge_count: self.merge_count,
            max_tile_seen: self.max_tile_seen,
            status: self.status,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// True once the game is won or lost. Only `Lost` blocks further moves.
    pub fn is_terminal(&self) -> bool {
        self.status != Status::Playing
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Seeds the best score from a persisted record. Never lowers it.
    pub fn set_best_score(&mut self, best: u64) {
        self.best_score = self.best_score.max(best);
    }

    /// Returns true if moving in `direction` would change the grid.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.status != Status::Lost && crate::resolve::can_move(&self.grid, direction)
    }

    /// Which directions would change the grid, in `Direction::ALL` order.
    pub fn legal_moves(&self) -> [bool; 4] {
        Direction::ALL.map(|d| self.can_move(d))
    }
}
