//! Named cells of the 3x3 board.

use serde::{Deserialize, Serialize};

/// A position on the tic-tac-toe board (0-8, row-major).
///
/// Positions are the only way to address a cell, so an out-of-range
/// index is rejected once, when it is converted with [`Position::from_index`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(into = "usize", try_from = "usize")]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in ascending index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl From<Position> for usize {
    fn from(pos: Position) -> Self {
        pos.to_index()
    }
}

impl TryFrom<usize> for Position {
    type Error = crate::error::EngineError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(crate::error::EngineError::InvalidMoveIndex)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), i);
            assert_eq!(Position::from_index(i), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
    }


    #[test]
    fn test_labels() {
        assert_eq!(Position::Center.label(), "Center");
        assert_eq!(Position::BottomRight.label(), "Bottom-right");
    }
}
