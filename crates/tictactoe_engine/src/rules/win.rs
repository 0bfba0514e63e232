//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Cell, Player};
use tracing::instrument;

/// Three positions that win when held by one player.
pub type WinningLine = [Position; 3];

/// All winning lines, checked in this order.
pub const WINNING_LINES: [WinningLine; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Finds the first completed line on the board.
///
/// Returns the owner and the line. With two completed lines (only
/// possible on hand-built boards) the earlier one in [`WINNING_LINES`] wins.
#[instrument(skip(board), fields(board = %board))]
pub fn check_winner(board: &Board) -> Option<(Player, WinningLine)> {
    WINNING_LINES.into_iter().find_map(|line| {
        let [a, b, c] = line;
        let first = board.get(a);
        match first {
            Cell::Occupied(player) if board.get(b) == first && board.get(c) == first => {
                Some((player, line))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let (player, line) = check_winner(&board("XXX......")).unwrap();
        assert_eq!(player, Player::Human);
        assert_eq!(line, WINNING_LINES[0]);
    }

    #[test]
    fn test_winner_column() {
        let (player, line) = check_winner(&board(".O..O..O.")).unwrap();
        assert_eq!(player, Player::Ai);
        assert_eq!(line, [Position::TopCenter, Position::Center, Position::BottomCenter]);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let (player, _) = check_winner(&board("..O.O.O..")).unwrap();
        assert_eq!(player, Player::Ai);
    }

    #[test]
    fn test_double_win_picks_first_line() {
        // Top row and left column both complete; rows are checked first.
        let (_, line) = check_winner(&board("XXXX..X..")).unwrap();
        assert_eq!(line, WINNING_LINES[0]);

        // Human holds the bottom row, AI the top row: the top row comes first.
        let (player, _) = check_winner(&board("OOO...XXX")).unwrap();
        assert_eq!(player, Player::Ai);
    }

    #[test]
    fn test_no_winner_incomplete() {
        assert_eq!(check_winner(&board("XX.OO....")), None);
    }
}
