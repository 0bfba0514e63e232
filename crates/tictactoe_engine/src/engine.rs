//! Tic-tac-toe engine: the AI's move policy on top of rules and search.

use crate::config::{GameConfig, TurnMismatch};
use crate::error::{ConfigError, EngineError};
use crate::position::Position;
use crate::rules::{WinningLine, apply_move, is_terminal, next_player, validate_move};
use crate::search::{
    ALPHA_INIT, BETA_INIT, SearchResult, TranspositionCache, immediate_win, minimax,
    score_terminal,
};
use crate::types::{Board, GameStatus, Player};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, instrument};

/// Result of one request: the human's move plus the AI's reply, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Board after both moves.
    pub board: Board,
    /// Status of `board`.
    pub status: GameStatus,
    /// Completed line when a player has won.
    pub winning_line: Option<WinningLine>,
    /// Cell the AI played, `None` when the human's move ended the game.
    pub ai_move: Option<Position>,
}

/// Game-theoretic evaluation of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Status of the board.
    pub status: GameStatus,
    /// Side to move, inferred from mark counts.
    pub to_move: Player,
    /// Best move for `to_move`, `None` on terminal boards.
    pub best: Option<Position>,
    /// Value under perfect play from the AI's perspective.
    pub value: i8,
}

/// Optimal tic-tac-toe opponent.
///
/// The engine owns its configuration and a bounded transposition cache.
/// It is `Sync`; share one instance between request handlers to share
/// the cache.
#[derive(Debug)]
pub struct Engine {
    config: GameConfig,
    cache: Mutex<TranspositionCache>,
}

impl Engine {
    /// Creates an engine after validating `config`.
    #[instrument]
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(cache_capacity = *config.cache_capacity(), "Creating engine");
        let cache = Mutex::new(TranspositionCache::new(*config.cache_capacity()));
        Ok(Self { config, cache })
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns a fresh empty board.
    pub fn new_board(&self) -> Board {
        Board::new()
    }

    /// Runs minimax from `board` with `to_move` on move.
    pub fn minimax(&self, board: &Board, to_move: Player, alpha: i8, beta: i8) -> SearchResult {
        minimax(&self.cache, board, to_move, alpha, beta)
    }

    /// Picks the AI's move.
    ///
    /// An immediate win is taken first (lowest index). If inference says
    /// the human should move next, the configured [`TurnMismatch`] policy
    /// decides. Otherwise the full search picks the move.
    ///
    /// # Errors
    ///
    /// `NoValidMoves` when the game is already over, `InvalidTurnOrder`
    /// for an out-of-turn request under [`TurnMismatch::Reject`].
    #[instrument(skip(self), fields(board = %board))]
    pub fn best_ai_reply(&self, board: &Board) -> Result<Position, EngineError> {
        if is_terminal(board).status.is_over() {
            debug!("AI asked to move on a finished board");
            return Err(EngineError::NoValidMoves);
        }

        if let Some(pos) = immediate_win(board, Player::Ai) {
            debug!(position = %pos, "Taking immediate win");
            return Ok(pos);
        }

        if next_player(board) != Player::Ai {
            debug!(policy = ?self.config.turn_mismatch(), "AI asked to move out of turn");
            return match self.config.turn_mismatch() {
                TurnMismatch::Reject => Err(EngineError::InvalidTurnOrder),
                TurnMismatch::Simulate => self.reply_out_of_turn(board),
            };
        }

        let result = self.minimax(board, Player::Ai, ALPHA_INIT, BETA_INIT);
        debug!(value = result.value, best = ?result.best, "Search complete");
        result.best.ok_or(EngineError::NoValidMoves)
    }

    /// Simulates each human move and returns the AI reply with the
    /// highest resulting value; ties keep the earliest human move.
    fn reply_out_of_turn(&self, board: &Board) -> Result<Position, EngineError> {
        let mut chosen: Option<(Position, i8)> = None;
        for human in board.empty_positions() {
            let after = apply_move(board, human, Player::Human);
            let result = self.minimax(&after, Player::Ai, ALPHA_INIT, BETA_INIT);
            if let Some(reply) = result.best
                && chosen.is_none_or(|(_, value)| result.value > value)
            {
                chosen = Some((reply, result.value));
            }
        }
        chosen.map(|(pos, _)| pos).ok_or(EngineError::NoValidMoves)
    }

    /// Evaluates `board` with the side to move inferred from mark counts.
    #[instrument(skip(self), fields(board = %board))]
    pub fn analyze(&self, board: &Board) -> Analysis {
        let status = is_terminal(board).status;
        let to_move = next_player(board);
        if status.is_over() {
            return Analysis {
                status,
                to_move,
                best: None,
                value: score_terminal(status),
            };
        }
        let result = self.minimax(board, to_move, ALPHA_INIT, BETA_INIT);
        Analysis {
            status,
            to_move,
            best: result.best,
            value: result.value,
        }
    }

    /// Plays one human move and the AI's reply.
    ///
    /// The move is validated, applied and the board re-checked. If the
    /// game is still on, the AI replies and the board is checked again.
    #[instrument(skip(self))]
    pub fn play_turn(&self, board: &str, index: Option<i64>) -> Result<TurnOutcome, EngineError> {
        let (board, human) = validate_move(&self.config, board, index)?;
        let board = apply_move(&board, human, Player::Human);

        let terminal = is_terminal(&board);
        if terminal.status.is_over() {
            info!(status = %terminal.status, "Human move ended the game");
            return Ok(TurnOutcome {
                board,
                status: terminal.status,
                winning_line: terminal.line,
                ai_move: None,
            });
        }

        let reply = self.best_ai_reply(&board)?;
        let board = apply_move(&board, reply, Player::Ai);
        let terminal = is_terminal(&board);
        info!(human = %human, ai = %reply, status = %terminal.status, "Turn played");
        Ok(TurnOutcome {
            board,
            status: terminal.status,
            winning_line: terminal.line,
            ai_move: Some(reply),
        })
    }

    /// Number of positions currently cached.
    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Empties the transposition cache.
    pub fn clear_cache(&self) {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        let config = GameConfig::default();
        let cache = Mutex::new(TranspositionCache::new(*config.cache_capacity()));
        Self { config, cache }
    }
}
