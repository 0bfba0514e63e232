//! Tic-tac-toe engine - rules and optimal play
//!
//! This library validates and applies moves on a 3x3 board and picks
//! provably optimal replies for the AI with an exhaustive alpha-beta search.
//!
//! # Architecture
//!
//! - **Rules**: board parsing, move legality, win/draw detection
//! - **Search**: minimax with alpha-beta pruning and a transposition cache
//! - **Engine**: the AI's move policy and a full human-then-AI turn
//!
//! Boards cross the API as 9-character strings over `.`, `X` (human) and
//! `O` (AI), row-major from the top-left cell.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Engine, GameStatus};
//!
//! let engine = Engine::default();
//! let outcome = engine.play_turn(".........", Some(4)).unwrap();
//! assert_eq!(outcome.status, GameStatus::Playing);
//! assert!(outcome.ai_move.is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod error;
mod position;
mod types;

pub mod rules;
pub mod search;

// Crate-level exports - Configuration
pub use config::{GameConfig, TurnMismatch};

// Crate-level exports - Errors
pub use error::{ConfigError, EngineError};

// Crate-level exports - Engine
pub use engine::{Analysis, Engine, TurnOutcome};

// Crate-level exports - Board types
pub use position::Position;
pub use rules::{
    Terminal, WINNING_LINES, WinningLine, apply_move, check_move, is_terminal, new_board,
    next_player, validate_move,
};
pub use types::{Board, CELLS, CHAR_AI, CHAR_EMPTY, CHAR_HUMAN, Cell, GameStatus, Player};
