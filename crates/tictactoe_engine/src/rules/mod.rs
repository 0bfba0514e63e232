//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating boards according to
//! tic-tac-toe rules. Every function takes a board value and returns a new
//! value; nothing here holds state between calls.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WINNING_LINES, WinningLine, check_winner};

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::position::Position;
use crate::types::{Board, Cell, GameStatus, Player};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Terminal status of a board and the line that decided it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminal {
    /// Game status derived from the board.
    pub status: GameStatus,
    /// Completed line when a player has won.
    pub line: Option<WinningLine>,
}

/// Creates a new empty board for the configured size.
#[instrument(skip(config), fields(size = *config.size()))]
pub fn new_board(config: &GameConfig) -> Result<Board, EngineError> {
    config.validate().map_err(|_| EngineError::InvalidBoard)?;
    Ok(Board::new())
}

/// Derives the game status from a board.
#[instrument(skip(board), fields(board = %board))]
pub fn is_terminal(board: &Board) -> Terminal {
    if let Some((player, line)) = check_winner(board) {
        let status = match player {
            Player::Human => GameStatus::HumanWon,
            Player::Ai => GameStatus::AiWon,
        };
        return Terminal {
            status,
            line: Some(line),
        };
    }

    let status = if is_draw(board) {
        GameStatus::Draw
    } else {
        GameStatus::Playing
    };
    Terminal { status, line: None }
}

/// Returns a new board with `player`'s mark at `pos`.
///
/// The target cell is not checked here; [`validate_move`] and
/// [`check_move`] are the legality gates.
#[instrument(skip(board), fields(board = %board))]
pub fn apply_move(board: &Board, pos: Position, player: Player) -> Board {
    board.with_cell(pos, Cell::Occupied(player))
}

/// Derives whose turn it is from mark counts. The human moves on equal counts.
pub fn next_player(board: &Board) -> Player {
    if board.count(Player::Human) == board.count(Player::Ai) {
        Player::Human
    } else {
        Player::Ai
    }
}

/// Checks that `player` may move next under strict alternation.
///
/// The human moves when counts are equal; the AI moves when the human
/// has exactly one more mark.
pub fn check_turn(board: &Board, player: Player) -> Result<(), EngineError> {
    let humans = board.count(Player::Human);
    let ais = board.count(Player::Ai);
    let in_turn = match player {
        Player::Human => humans == ais,
        Player::Ai => humans == ais + 1,
    };
    if in_turn {
        Ok(())
    } else {
        warn!(humans, ais, ?player, "Move out of turn");
        Err(EngineError::InvalidTurnOrder)
    }
}

/// Typed legality gate for a parsed board and position.
///
/// Checks, in order: game over, cell occupied, turn order.
#[instrument(skip(board), fields(board = %board))]
pub fn check_move(board: &Board, pos: Position, player: Player) -> Result<(), EngineError> {
    if is_terminal(board).status.is_over() {
        warn!("Move after game over");
        return Err(EngineError::GameOver);
    }
    if !board.is_empty(pos) {
        warn!(position = %pos, "Cell occupied");
        return Err(EngineError::CellOccupied);
    }
    check_turn(board, player)
}

/// Validates a raw human move as it arrives from a caller.
///
/// Checks, in order: board shape, move index, game over, cell occupied,
/// turn order. The first failure wins. On success the parsed board and
/// position are returned so callers do not parse twice.
#[instrument(skip(config))]
pub fn validate_move(
    config: &GameConfig,
    board: &str,
    index: Option<i64>,
) -> Result<(Board, Position), EngineError> {
    if board.chars().count() != *config.size() {
        warn!("Board length does not match configured size");
        return Err(EngineError::InvalidBoard);
    }
    let board: Board = board.parse()?;

    let pos = index
        .and_then(|i| usize::try_from(i).ok())
        .and_then(Position::from_index)
        .ok_or(EngineError::InvalidMoveIndex)?;

    check_move(&board, pos, Player::Human)?;
    Ok((board, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let b = new_board(&GameConfig::default()).unwrap();
        assert_eq!(b.to_string(), ".........");
        assert_eq!(b.to_string().len(), 9);
    }

    #[test]
    fn test_new_board_rejects_unsupported_size() {
        let config = GameConfig::new().with_size(16);
        assert_eq!(new_board(&config), Err(EngineError::InvalidBoard));
    }

    #[test]
    fn test_terminal_statuses() {
        let t = is_terminal(&board("XXX......"));
        assert_eq!(t.status, GameStatus::HumanWon);
        assert_eq!(t.line, Some(WINNING_LINES[0]));

        let t = is_terminal(&board("OOO......"));
        assert_eq!(t.status, GameStatus::AiWon);

        // Full board with a winner is a win, not a draw.
        let t = is_terminal(&board("XOXXOOXXO"));
        assert_eq!(t.status, GameStatus::HumanWon);

        let t = is_terminal(&board("XOXOXOOXO"));
        assert_eq!(t, Terminal { status: GameStatus::Draw, line: None });

        let t = is_terminal(&board("X...O...."));
        assert_eq!(t, Terminal { status: GameStatus::Playing, line: None });
    }

    #[test]
    fn test_apply_move_changes_one_cell() {
        let before = board("X...O....");
        let after = apply_move(&before, Position::BottomRight, Player::Human);
        assert_eq!(after.to_string(), "X...O...X");
        assert_eq!(before.to_string(), "X...O....");
    }

    #[test]
    fn test_next_player() {
        assert_eq!(next_player(&Board::new()), Player::Human);
        assert_eq!(next_player(&board("X........")), Player::Ai);
        assert_eq!(next_player(&board("X...O....")), Player::Human);
    }

    #[test]
    fn test_validate_order() {
        let config = GameConfig::default();
        let check = |board: &str, index: Option<i64>| validate_move(&config, board, index);
        assert_eq!(check("XX", Some(0)), Err(EngineError::InvalidBoard));
        assert_eq!(check("XX", None), Err(EngineError::InvalidBoard));
        assert_eq!(check(".........", None), Err(EngineError::InvalidMoveIndex));
        assert_eq!(check(".........", Some(-1)), Err(EngineError::InvalidMoveIndex));
        assert_eq!(check(".........", Some(9)), Err(EngineError::InvalidMoveIndex));
        // Game over beats occupied cell and bad turn order.
        assert_eq!(check("XXX......", Some(0)), Err(EngineError::GameOver));
        assert_eq!(check("XXX......", Some(3)), Err(EngineError::GameOver));
        // Occupied beats turn order.
        assert_eq!(check("O........", Some(0)), Err(EngineError::CellOccupied));
        assert_eq!(check("O........", Some(1)), Err(EngineError::InvalidTurnOrder));
        assert_eq!(check("X........", Some(1)), Err(EngineError::InvalidTurnOrder));
    }

    #[test]
    fn test_validate_accepts_legal_move() {
        let config = GameConfig::default();
        let (b, pos) = validate_move(&config, "X...O....", Some(8)).unwrap();
        assert_eq!(b, board("X...O...."));
        assert_eq!(pos, Position::BottomRight);
    }

    #[test]
    fn test_check_move_for_ai() {
        let b = board("X........");
        assert!(check_move(&b, Position::Center, Player::Ai).is_ok());
        assert_eq!(
            check_move(&b, Position::Center, Player::Human),
            Err(EngineError::InvalidTurnOrder)
        );
    }
}
