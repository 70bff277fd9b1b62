use log::debug;

use crate::game::{winner, Board, Player, COLS};

use super::agent::Agent;
use super::heuristic::{Heuristic, WindowHeuristic};

/// Score of a decided position found above the search horizon. The remaining
/// depth is added so that quicker wins (and slower losses) rank higher.
pub const WIN_SCORE: i32 = 1_000_000;

const INFINITY: i32 = i32::MAX;

/// Column ordering for interior nodes: center-first for better pruning.
const MOVE_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Depth-limited minimax agent with alpha-beta pruning.
pub struct AlphaBetaAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
}

impl AlphaBetaAgent {
    pub fn new(depth: usize) -> Self {
        AlphaBetaAgent {
            depth,
            heuristic: Box::new(WindowHeuristic),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        AlphaBetaAgent { depth, heuristic }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pick the root column with the strictly greatest minimax value. Columns
    /// are tried in ascending order, so the lowest column wins ties.
    pub fn find_best_move(&self, board: &Board, me: Player) -> Option<usize> {
        let opponent = me.other();
        let mut best: Option<(usize, i32)> = None;

        for col in board.valid_moves() {
            let mut child = *board;
            if child.place(col, me).is_err() {
                continue;
            }
            let score = self.alphabeta(
                &child,
                self.depth.saturating_sub(1),
                -INFINITY,
                INFINITY,
                false,
                me,
                opponent,
            );
            debug!("alpha-beta: column {col} scores {score}");
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }

        if let Some((col, score)) = best {
            debug!(
                "alpha-beta: {} picks column {col} ({score}) at depth {}",
                me.name(),
                self.depth
            );
        }
        best.map(|(col, _)| col)
    }

    /// Minimax value of `board` from `me`'s perspective.
    ///
    /// Horizon nodes (`depth == 0`) are scored by the heuristic unless the
    /// opponent has just completed four, which is a loss of `-WIN_SCORE`.
    /// Above the horizon a completed four ends the line at
    /// `±(WIN_SCORE + depth)`, and a full board is a draw worth 0.
    #[allow(clippy::too_many_arguments)]
    fn alphabeta(
        &self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        me: Player,
        opponent: Player,
    ) -> i32 {
        if depth == 0 {
            // The heuristic has no term for an opponent four.
            if winner(board) == Some(opponent) {
                return -WIN_SCORE;
            }
            return self.heuristic.score(board, me, opponent);
        }

        match winner(board) {
            Some(p) if p == me => return WIN_SCORE + depth as i32,
            Some(_) => return -(WIN_SCORE + depth as i32),
            None => {}
        }

        if board.is_full() {
            return 0;
        }

        if maximizing {
            let mut value = -INFINITY;
            for &col in &MOVE_ORDER {
                let mut child = *board;
                if child.place(col, me).is_err() {
                    continue;
                }
                value = value.max(self.alphabeta(&child, depth - 1, alpha, beta, false, me, opponent));
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        } else {
            let mut value = INFINITY;
            for &col in &MOVE_ORDER {
                let mut child = *board;
                if child.place(col, opponent).is_err() {
                    continue;
                }
                value = value.min(self.alphabeta(&child, depth - 1, alpha, beta, true, me, opponent));
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        }
    }
}

impl Agent for AlphaBetaAgent {
    fn select_column(&mut self, board: &Board, me: Player) -> Option<usize> {
        self.find_best_move(board, me)
    }

    fn name(&self) -> &str {
        "Alpha-Beta"
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(AlphaBetaAgent::with_heuristic(
            self.depth,
            self.heuristic.clone_box(),
        ))
    }
}
