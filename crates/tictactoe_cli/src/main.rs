//! Tic-tac-toe - command-line driver
//!
//! Thin wrapper around `tictactoe_engine`: every subcommand parses its
//! arguments, calls one engine operation and prints the result.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use std::io::{BufRead, Write};
use tictactoe_engine::{Board, Engine, GameConfig, GameStatus, is_terminal, validate_move};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

/// Verdict printed by the `validate` subcommand.
#[derive(Debug, Serialize)]
struct Validation {
    valid: bool,
    error: String,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    let engine = Engine::new(config)?;

    match cli.command {
        Command::New => {
            println!("{}", tictactoe_engine::new_board(engine.config())?);
            Ok(())
        }
        Command::Status { board } => print_status(&board),
        Command::Validate { board, index } => print_validation(&engine, &board, index),
        Command::Reply { board } => print_reply(&engine, &board),
        Command::Turn { board, index } => print_turn(&engine, &board, index),
        Command::Play => run_interactive(&engine),
    }
}

#[instrument]
fn print_status(board: &str) -> Result<()> {
    let board: Board = board.parse().context("Failed to parse board")?;
    println!("{}", serde_json::to_string(&is_terminal(&board))?);
    Ok(())
}

#[instrument(skip(engine))]
fn print_validation(engine: &Engine, board: &str, index: i64) -> Result<()> {
    let verdict = match validate_move(engine.config(), board, Some(index)) {
        Ok(_) => Validation {
            valid: true,
            error: String::new(),
        },
        Err(e) => Validation {
            valid: false,
            error: e.to_string(),
        },
    };
    println!("{}", serde_json::to_string(&verdict)?);
    Ok(())
}

#[instrument(skip(engine))]
fn print_reply(engine: &Engine, board: &str) -> Result<()> {
    let board: Board = board.parse().context("Failed to parse board")?;
    let reply = engine.best_ai_reply(&board)?;
    println!("{}", reply);
    Ok(())
}

#[instrument(skip(engine))]
fn print_turn(engine: &Engine, board: &str, index: i64) -> Result<()> {
    let outcome = engine.play_turn(board, Some(index))?;
    println!("{}", serde_json::to_string(&outcome)?);
    Ok(())
}

/// Runs a game on stdin/stdout until it ends or input closes.
fn run_interactive(engine: &Engine) -> Result<()> {
    info!("Starting interactive game");
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut board = engine.new_board();

    loop {
        println!("\n{}\n", board.display_grid());
        print!("Your move (0-8): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            return Ok(());
        };
        let index = line?.trim().parse::<i64>().ok();

        let outcome = match engine.play_turn(&board.to_string(), index) {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("Rejected: {}", e);
                continue;
            }
        };
        board = outcome.board;
        if let Some(reply) = outcome.ai_move {
            println!("AI plays {} ({})", reply, reply.label());
        }

        let message = match outcome.status {
            GameStatus::Playing => continue,
            GameStatus::HumanWon => "You win!",
            GameStatus::AiWon => "AI wins!",
            GameStatus::Draw => "Draw.",
        };
        println!("\n{}\n\n{}", board.display_grid(), message);
        return Ok(());
    }
}
