//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::types::Board;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner indicates a draw.
#[instrument(skip(board), fields(board = %board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// Checks if the board is a finished game with no winner.
#[instrument(skip(board), fields(board = %board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X O / O X O
        let board: Board = "XOXOXOOXO".parse().unwrap();
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        // Full board, X wins the left column.
        let board: Board = "XOXXOOXXO".parse().unwrap();
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
