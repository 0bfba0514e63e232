//! Exhaustive minimax with alpha-beta pruning.
//!
//! The tree is at most nine plies deep, so every line is searched to a
//! terminal board and values are exact: `+1` AI win, `-1` human win, `0` draw.

use super::cache::{Bound, CacheEntry, TranspositionCache};
use crate::position::Position;
use crate::rules::{apply_move, is_terminal};
use crate::types::{Board, GameStatus, Player};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Initial alpha, strictly below every reachable value.
pub const ALPHA_INIT: i8 = -2;
/// Initial beta, strictly above every reachable value.
pub const BETA_INIT: i8 = 2;

/// Best move and value of a searched board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Move achieving `value`, `None` when the board is already terminal.
    pub best: Option<Position>,
    /// Value from the AI's perspective.
    pub value: i8,
}

/// Scores a status from the AI's perspective.
///
/// Non-terminal statuses score as a draw.
pub fn score_terminal(status: GameStatus) -> i8 {
    match status {
        GameStatus::AiWon => 1,
        GameStatus::HumanWon => -1,
        GameStatus::Draw | GameStatus::Playing => 0,
    }
}

/// Returns the first empty cell, in index order, that wins at once for `player`.
pub fn immediate_win(board: &Board, player: Player) -> Option<Position> {
    let target = match player {
        Player::Human => GameStatus::HumanWon,
        Player::Ai => GameStatus::AiWon,
    };
    board
        .empty_positions()
        .find(|pos| is_terminal(&apply_move(board, *pos, player)).status == target)
}

// Cache entries are plain values, so a poisoned lock is still consistent.
fn lock(cache: &Mutex<TranspositionCache>) -> MutexGuard<'_, TranspositionCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Searches `board` with `to_move` on move inside the window `(alpha, beta)`.
///
/// The AI maximizes and the human minimizes. Children are tried in
/// ascending index order and ties keep the first move found. The cache
/// lock is taken only for single probes and stores, so concurrent
/// searches may duplicate work but never observe partial entries.
pub fn minimax(
    cache: &Mutex<TranspositionCache>,
    board: &Board,
    to_move: Player,
    mut alpha: i8,
    mut beta: i8,
) -> SearchResult {
    let status = is_terminal(board).status;
    if status.is_over() {
        return SearchResult {
            best: None,
            value: score_terminal(status),
        };
    }

    let hit = lock(cache)
        .probe(*board, to_move)
        .and_then(|entry| entry.usable(alpha, beta));
    if let Some(entry) = hit {
        trace!(board = %board, value = entry.value, "Cache hit");
        return SearchResult {
            best: entry.best,
            value: entry.value,
        };
    }

    let (alpha_start, beta_start) = (alpha, beta);
    let maximizing = to_move == Player::Ai;
    let mut best = None;
    let mut best_value = if maximizing { ALPHA_INIT } else { BETA_INIT };

    for pos in board.empty_positions() {
        let child = apply_move(board, pos, to_move);
        let value = minimax(cache, &child, to_move.opponent(), alpha, beta).value;

        if maximizing {
            if value > best_value {
                best_value = value;
                best = Some(pos);
            }
            alpha = alpha.max(best_value);
        } else {
            if value < best_value {
                best_value = value;
                best = Some(pos);
            }
            beta = beta.min(best_value);
        }

        if beta <= alpha {
            break;
        }
    }

    let bound = if best_value <= alpha_start {
        Bound::Upper
    } else if best_value >= beta_start {
        Bound::Lower
    } else {
        Bound::Exact
    };
    lock(cache).store(
        *board,
        to_move,
        CacheEntry {
            best,
            value: best_value,
            bound,
        },
    );

    SearchResult {
        best,
        value: best_value,
    }
}
