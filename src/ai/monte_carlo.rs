use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{completes_four, Board, Player, COLS};

use super::agent::Agent;

pub const DEFAULT_SIMULATIONS_PER_MOVE: usize = 100;

/// Flat Monte Carlo agent: scores each legal column by the number of random
/// playouts that end in a win for the mover.
pub struct MonteCarloAgent {
    simulations_per_move: usize,
    seed: Option<u64>,
    rng: StdRng,
}

impl MonteCarloAgent {
    pub fn new(simulations_per_move: usize) -> Self {
        MonteCarloAgent {
            simulations_per_move,
            seed: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for reproducible games and tests.
    pub fn with_seed(simulations_per_move: usize, seed: u64) -> Self {
        MonteCarloAgent {
            simulations_per_move,
            seed: Some(seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn simulations_per_move(&self) -> usize {
        self.simulations_per_move
    }

    /// Column with the most playout wins for `me`; the lowest column wins ties.
    pub fn find_best_move(&mut self, board: &Board, me: Player) -> Option<usize> {
        let legal = board.valid_moves();
        let wins = self.win_counts(board, me);

        let mut best: Option<usize> = None;
        for &col in &legal {
            if best.map_or(true, |b| wins[col] > wins[b]) {
                best = Some(col);
            }
        }

        if let Some(col) = best {
            debug!(
                "monte carlo: {} picks column {col}, wins per column {:?} ({} playouts each)",
                me.name(),
                wins,
                self.simulations_per_move
            );
        }
        best
    }

    /// Playout wins for `me` per column. Full columns stay at zero.
    fn win_counts(&mut self, board: &Board, me: Player) -> [usize; COLS] {
        let mut wins = [0; COLS];

        for col in board.valid_moves() {
            for _ in 0..self.simulations_per_move {
                let mut sim = *board;
                let Ok(row) = sim.place(col, me) else {
                    continue;
                };
                let result = if completes_four(&sim, row, col, me) {
                    Some(me)
                } else {
                    self.playout(&mut sim, me.other())
                };
                if result == Some(me) {
                    wins[col] += 1;
                }
            }
        }

        wins
    }

    /// Play uniformly random moves until someone completes a four or no
    /// column is left. `None` is a draw.
    ///
    /// The open columns are read once at the start; a column drops out only
    /// when a placement finds it full.
    fn playout(&mut self, board: &mut Board, mut to_move: Player) -> Option<Player> {
        let mut available = board.valid_moves();

        loop {
            if available.is_empty() {
                return None;
            }
            let idx = self.rng.random_range(0..available.len());
            let col = available[idx];
            match board.place(col, to_move) {
                Ok(row) => {
                    if completes_four(board, row, col, to_move) {
                        return Some(to_move);
                    }
                    to_move = to_move.other();
                }
                Err(_) => {
                    available.remove(idx);
                }
            }
        }
    }
}

impl Default for MonteCarloAgent {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATIONS_PER_MOVE)
    }
}

impl Agent for MonteCarloAgent {
    fn select_column(&mut self, board: &Board, me: Player) -> Option<usize> {
        self.find_best_move(board, me)
    }

    fn name(&self) -> &str {
        "Monte Carlo"
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        match self.seed {
            Some(seed) => Box::new(MonteCarloAgent::with_seed(self.simulations_per_move, seed)),
            None => Box::new(MonteCarloAgent::new(self.simulations_per_move)),
        }
    }
}
