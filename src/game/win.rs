//! Four-in-a-row detection: a full-board scan for any position, and a cheap
//! check around a just-placed token.

use super::board::{Board, Cell, COLS, ROWS};
use super::player::Player;

/// Direction steps (row, col): right, down, down-right, up-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

fn cell_at(board: &Board, row: isize, col: isize) -> Option<Cell> {
    if row < 0 || col < 0 || row >= ROWS as isize || col >= COLS as isize {
        return None;
    }
    Some(board.get(row as usize, col as usize))
}

/// Scan the whole board for a completed four. Returns the first owner found,
/// scanning rows top to bottom and columns left to right.
pub fn winner(board: &Board) -> Option<Player> {
    for row in 0..ROWS {
        for col in 0..COLS {
            let cell = board.get(row, col);
            let Some(player) = cell.owner() else {
                continue;
            };

            for (dr, dc) in DIRECTIONS {
                let run = (1..4).all(|i| {
                    cell_at(board, row as isize + dr * i, col as isize + dc * i) == Some(cell)
                });
                if run {
                    return Some(player);
                }
            }
        }
    }
    None
}

/// Check whether the token `player` holds at (row, col) is part of a line of
/// four, counting up to three steps each way along every axis.
pub fn completes_four(board: &Board, row: usize, col: usize, player: Player) -> bool {
    let cell = player.to_cell();
    if board.get(row, col) != cell {
        return false;
    }

    DIRECTIONS.iter().any(|&(dr, dc)| {
        let mut count = 1;
        for sign in [1, -1] {
            for i in 1..4 {
                let r = row as isize + dr * sign * i;
                let c = col as isize + dc * sign * i;
                if cell_at(board, r, c) != Some(cell) {
                    break;
                }
                count += 1;
            }
        }
        count >= 4
    })
}
