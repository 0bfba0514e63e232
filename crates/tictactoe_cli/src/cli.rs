//! Command-line interface for the tic-tac-toe engine.

use clap::{Parser, Subcommand};

/// Tic-tac-toe - play against an engine that never loses
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Optimal tic-tac-toe engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML engine configuration file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a new empty board
    New,

    /// Print the status and winning line of a board as JSON
    Status {
        /// Board as 9 characters of '.', 'X' and 'O'
        board: String,
    },

    /// Check a human move and print the verdict as JSON
    Validate {
        /// Board as 9 characters of '.', 'X' and 'O'
        board: String,

        /// Cell index (0-8, row-major)
        #[arg(allow_hyphen_values = true)]
        index: i64,
    },

    /// Print the AI's chosen cell for a board
    Reply {
        /// Board as 9 characters of '.', 'X' and 'O'
        board: String,
    },

    /// Play a human move plus the AI's reply and print the outcome as JSON
    Turn {
        /// Board as 9 characters of '.', 'X' and 'O'
        board: String,

        /// Cell index (0-8, row-major)
        #[arg(allow_hyphen_values = true)]
        index: i64,
    },

    /// Play an interactive game in the terminal
    Play,
}
