use crate::game::{Board, Cell, Player, CENTER_COL, COLS, ROWS};

/// Points per own token in the center column.
pub const CENTER_WEIGHT: i32 = 3;
/// A window holding four own tokens.
pub const FOUR_SCORE: i32 = 1000;
/// Three own tokens and one empty cell.
pub const THREE_SCORE: i32 = 5;
/// Two own tokens and two empty cells.
pub const TWO_SCORE: i32 = 2;
/// Three opponent tokens and one empty cell.
pub const OPPONENT_THREE_PENALTY: i32 = -4;

/// Trait for evaluating a board position from `me`'s perspective.
pub trait Heuristic: Send {
    fn score(&self, board: &Board, me: Player, opponent: Player) -> i32;

    fn clone_box(&self) -> Box<dyn Heuristic>;
}

/// Default heuristic: center column bonus plus a sum over every 4-cell window.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl WindowHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
        if own == 4 {
            FOUR_SCORE
        } else if own == 3 && empty == 1 {
            THREE_SCORE
        } else if own == 2 && empty == 2 {
            TWO_SCORE
        } else if opp == 3 && empty == 1 {
            OPPONENT_THREE_PENALTY
        } else {
            0
        }
    }

    /// Classify the four cells produced by `cell_at(0..4)` and score them.
    fn window<F>(own_cell: Cell, opp_cell: Cell, cell_at: F) -> i32
    where
        F: Fn(usize) -> Cell,
    {
        let mut own = 0;
        let mut opp = 0;
        let mut empty = 0;
        for i in 0..4 {
            match cell_at(i) {
                c if c == own_cell => own += 1,
                c if c == opp_cell => opp += 1,
                _ => empty += 1,
            }
        }
        Self::score_window(own, opp, empty)
    }
}

impl Heuristic for WindowHeuristic {
    fn score(&self, board: &Board, me: Player, opponent: Player) -> i32 {
        let own_cell = me.to_cell();
        let opp_cell = opponent.to_cell();
        let mut score = 0;

        for row in 0..ROWS {
            if board.get(row, CENTER_COL) == own_cell {
                score += CENTER_WEIGHT;
            }
        }

        // Horizontal
        for row in 0..ROWS {
            for col in 0..COLS - 3 {
                score += Self::window(own_cell, opp_cell, |i| board.get(row, col + i));
            }
        }

        // Vertical
        for col in 0..COLS {
            for row in 0..ROWS - 3 {
                score += Self::window(own_cell, opp_cell, |i| board.get(row + i, col));
            }
        }

        // Diagonal (top-left to bottom-right)
        for row in 0..ROWS - 3 {
            for col in 0..COLS - 3 {
                score += Self::window(own_cell, opp_cell, |i| board.get(row + i, col + i));
            }
        }

        // Diagonal (bottom-left to top-right)
        for row in 3..ROWS {
            for col in 0..COLS - 3 {
                score += Self::window(own_cell, opp_cell, |i| board.get(row - i, col + i));
            }
        }

        score
    }

    fn clone_box(&self) -> Box<dyn Heuristic> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_is_zero() {
        let board = Board::new();
        let h = WindowHeuristic;
        assert_eq!(h.score(&board, Player::One, Player::Two), 0);
        assert_eq!(h.score(&board, Player::Two, Player::One), 0);
    }

    #[test]
    fn center_beats_edge_by_at_least_center_weight() {
        let h = WindowHeuristic;
        let mut center = Board::new();
        center.place(3, Player::Two).unwrap();
        let mut edge = Board::new();
        edge.place(0, Player::Two).unwrap();

        let center_score = h.score(&center, Player::Two, Player::One);
        let edge_score = h.score(&edge, Player::Two, Player::One);
        assert!(
            center_score - edge_score >= CENTER_WEIGHT,
            "center ({center_score}) should beat edge ({edge_score}) by >= {CENTER_WEIGHT}"
        );
    }

    #[test]
    fn single_token_scores_only_center_bonus() {
        // One token alone never fills 2 of a window, so only the center bonus counts.
        let h = WindowHeuristic;
        let mut board = Board::new();
        board.place(3, Player::One).unwrap();
        assert_eq!(h.score(&board, Player::One, Player::Two), CENTER_WEIGHT);
        assert_eq!(h.score(&board, Player::Two, Player::One), 0);
    }

    #[test]
    fn opponent_three_is_penalised() {
        let h = WindowHeuristic;
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "XXX....",
        ])
        .unwrap();
        // Only the window at columns 0-3 holds three X and one empty.
        assert_eq!(h.score(&board, Player::Two, Player::One), OPPONENT_THREE_PENALTY);
    }

    #[test]
    fn bottom_three_scores_threes_and_twos() {
        let h = WindowHeuristic;
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "OOO....",
        ])
        .unwrap();
        // Bottom row windows: cols 0-3 = 3 own + 1 empty, cols 1-4 = 2 own + 2 empty.
        assert_eq!(
            h.score(&board, Player::Two, Player::One),
            THREE_SCORE + TWO_SCORE
        );
    }

    #[test]
    fn four_in_a_row_adds_four_score() {
        let h = WindowHeuristic;
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "OOOO...",
        ])
        .unwrap();
        // cols 0-3: four; cols 1-4: three + empty; cols 2-5: two + two empty;
        // center bonus for (5,3).
        assert_eq!(
            h.score(&board, Player::Two, Player::One),
            FOUR_SCORE + THREE_SCORE + TWO_SCORE + CENTER_WEIGHT
        );
    }

    #[test]
    fn mixed_windows_score_zero() {
        let h = WindowHeuristic;
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "OX.OX.O",
        ])
        .unwrap();
        // Every bottom window holds both colors or a single own token.
        assert_eq!(h.score(&board, Player::Two, Player::One), CENTER_WEIGHT);
    }
}
