//! Core domain types for tic-tac-toe.

use crate::error::EngineError;
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// Canonical character for an empty cell.
pub const CHAR_EMPTY: char = '.';
/// Canonical character for the human's mark.
pub const CHAR_HUMAN: char = 'X';
/// Canonical character for the AI's mark.
pub const CHAR_AI: char = 'O';

/// Player in the game.
///
/// The human always plays `X` and moves first; the AI plays `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The human opponent (`X`).
    Human,
    /// The engine (`O`).
    Ai,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Ai,
            Player::Ai => Player::Human,
        }
    }

    /// Returns the board character for this player's mark.
    pub fn mark(self) -> char {
        match self {
            Player::Human => CHAR_HUMAN,
            Player::Ai => CHAR_AI,
        }
    }
}

impl TryFrom<char> for Player {
    type Error = EngineError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            CHAR_HUMAN => Ok(Player::Human),
            CHAR_AI => Ok(Player::Ai),
            other => Err(EngineError::InvalidMark(other)),
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns the canonical character for this cell.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => CHAR_EMPTY,
            Cell::Occupied(player) => player.mark(),
        }
    }
}

impl TryFrom<char> for Cell {
    type Error = EngineError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c == CHAR_EMPTY {
            Ok(Cell::Empty)
        } else {
            Player::try_from(c).map(Cell::Occupied)
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are plain values: two boards with the same cells are
/// interchangeable. Every move produces a new board instead of
/// mutating the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Returns a copy of this board with `cell` written at `pos`.
    pub(crate) fn with_cell(mut self, pos: Position, cell: Cell) -> Self {
        self.cells[pos.to_index()] = cell;
        self
    }

    /// Counts the marks placed by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(player))
            .count()
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Iterates the empty positions in ascending index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| self.is_empty(*pos))
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their index so a player can pick one.
    pub fn display_grid(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.cells[pos] {
                    Cell::Empty => result.push_str(&pos.to_string()),
                    Cell::Occupied(player) => result.push(player.mark()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parses the canonical 9-character form (`.`, `X`, `O`).
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != CELLS {
            return Err(EngineError::InvalidBoard);
        }
        let mut cells = [Cell::Empty; CELLS];
        for (cell, c) in cells.iter_mut().zip(s.chars()) {
            *cell = Cell::try_from(c).map_err(|_| EngineError::InvalidBoard)?;
        }
        Ok(Self { cells })
    }
}

impl TryFrom<String> for Board {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_string()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

/// Current status of the game, always derived from a board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum GameStatus {
    /// Game is ongoing.
    #[serde(rename = "playing")]
    #[strum(serialize = "playing")]
    Playing,
    /// Board is full with no winner.
    #[serde(rename = "draw")]
    #[strum(serialize = "draw")]
    Draw,
    /// The human completed a line.
    #[serde(rename = "x_won")]
    #[strum(serialize = "x_won")]
    HumanWon,
    /// The AI completed a line.
    #[serde(rename = "o_won")]
    #[strum(serialize = "o_won")]
    AiWon,
}

impl GameStatus {
    /// Returns true once the game can no longer continue.
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}
