//! Error types for the engine and its configuration.

use derive_more::{Display, Error};
use tracing::instrument;

/// Error that can occur when validating, applying or searching a move.
///
/// The display strings are user-facing and are forwarded unchanged by
/// callers that surface validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EngineError {
    /// Board string has the wrong length or an unknown character.
    #[display("invalid board")]
    InvalidBoard,

    /// Move index is missing or outside 0-8.
    #[display("invalid move index")]
    InvalidMoveIndex,

    /// A player already won or the board is full.
    #[display("game is already over")]
    GameOver,

    /// Target cell is not empty.
    #[display("cell occupied")]
    CellOccupied,

    /// The move would break strict Human/AI alternation.
    #[display("invalid turn order")]
    InvalidTurnOrder,

    /// The AI was asked to move with no game left to play.
    #[display("no legal moves")]
    NoValidMoves,

    /// A character that is neither `X` nor `O` was used as a mark.
    #[display("invalid mark: {:?}", _0)]
    InvalidMark(char),
}

impl std::error::Error for EngineError {}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
