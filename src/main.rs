//! Headless marbles runner (default binary).
//!
//! Plays a seeded game by picking random legal moves, then prints the final
//! board through the framebuffer renderer or as a JSON snapshot.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use marbles::core::{Board, BoardConfig, BoardSnapshot, SimpleRng};
use marbles::engine::{apply_move, random_move};
use marbles::term::{stdout_is_styled, write_frame, BoardView, Viewport};
use marbles::types::PreviewMode;

#[derive(Parser)]
#[command(name = "marbles")]
#[command(about = "Seeded autoplay of the marbles puzzle")]
struct Args {
    /// Board seed; also seeds the move picker
    #[arg(long)]
    seed: Option<u32>,

    /// Board width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Board height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Number of moves to play
    #[arg(short, long, default_value = "20")]
    moves: u32,

    /// JSON file with a board configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the preview marbles are drawn
    #[arg(long)]
    preview: Option<Preview>,

    /// Print the final board as a JSON snapshot
    #[arg(long)]
    json: bool,

    /// Print the board without colors
    #[arg(long)]
    plain: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preview {
    None,
    Board,
    Side,
}

impl From<Preview> for PreviewMode {
    fn from(value: Preview) -> Self {
        match value {
            Preview::None => PreviewMode::None,
            Preview::Board => PreviewMode::Board,
            Preview::Side => PreviewMode::Side,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    moves_played: u32,
    game_over: bool,
    board: &'a BoardSnapshot,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;
    let mut board = Board::with_config(config);
    let (moves_played, game_over) = play(&mut board, args.moves);
    info!(
        moves_played,
        game_over,
        score = board.total_score(),
        "game finished"
    );

    let snap = board.snapshot();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let report = Report {
            moves_played,
            game_over,
            board: &snap,
        };
        serde_json::to_writer_pretty(&mut out, &report).context("encode snapshot")?;
        writeln!(out)?;
    } else {
        let view = BoardView::new(config.preview_mode);
        let fb = view.render(&snap, Viewport::fitting(snap.width, snap.height));
        let styled = !args.plain && stdout_is_styled();
        write_frame(&fb, &mut out, styled)?;
        writeln!(
            out,
            "moves: {moves_played}  score: {}{}",
            board.total_score(),
            if game_over { "  (game over)" } else { "" }
        )?;
    }
    out.flush()?;
    Ok(())
}

fn load_config(args: &Args) -> Result<BoardConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => BoardConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(preview) = args.preview {
        config.preview_mode = preview.into();
    }
    check_config(&config)?;
    Ok(config)
}

/// Reject board sizes and preview counts the board would have to clamp
fn check_config(config: &BoardConfig) -> Result<()> {
    let sides = BoardConfig::MIN_SIDE..=BoardConfig::MAX_SIDE;
    ensure!(
        sides.contains(&config.width) && sides.contains(&config.height),
        "board size {}x{} outside {}..={}",
        config.width,
        config.height,
        BoardConfig::MIN_SIDE,
        BoardConfig::MAX_SIDE
    );
    ensure!(
        config.is_in_range(),
        "preview count {} exceeds {} or the {} cells of the board",
        config.preview_count,
        BoardConfig::MAX_PREVIEW_COUNT,
        config.cell_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_accepted() {
        assert!(check_config(&BoardConfig::default()).is_ok());
    }

    #[test]
    fn oversized_board_is_rejected() {
        let config = BoardConfig {
            width: 40_000,
            height: 2,
            ..BoardConfig::default()
        };
        let err = check_config(&config).unwrap_err();
        assert!(err.to_string().contains("40000x2"));

        let config = BoardConfig {
            width: 0,
            ..BoardConfig::default()
        };
        assert!(check_config(&config).is_err());
    }

    #[test]
    fn huge_preview_count_is_rejected() {
        let config = BoardConfig {
            preview_count: 1_000_000,
            ..BoardConfig::default()
        };
        assert!(check_config(&config).is_err());

        let config = BoardConfig {
            width: 2,
            height: 1,
            preview_count: 3,
            ..BoardConfig::default()
        };
        assert!(check_config(&config).is_err());
    }

    #[test]
    fn flags_override_config_values() {
        let args = Args::parse_from(["marbles", "--width", "7", "--seed", "3"]);
        let config = load_config(&args).unwrap();
        assert_eq!((config.width, config.height, config.seed), (7, 9, 3));

        let args = Args::parse_from(["marbles", "--width", "40000", "--height", "2"]);
        assert!(load_config(&args).is_err());
    }
}

/// Autoplay up to `moves` turns; returns the moves played and whether the
/// game ended
fn play(board: &mut Board, moves: u32) -> (u32, bool) {
    board.new_game();
    if board.created_animation_finished() {
        board.score_matches();
    }
    board.take_events();

    let mut picker = SimpleRng::new(board.config().seed.rotate_left(16));
    let mut played = 0;
    while played < moves {
        let Some((from, to)) = random_move(board, &mut picker) else {
            return (played, true);
        };
        match apply_move(board, from, to) {
            Ok(outcome) => {
                played += 1;
                debug!(
                    turn = played,
                    marble = %outcome.marble,
                    score = outcome.score,
                    "turn"
                );
                if outcome.game_over {
                    return (played, true);
                }
            }
            Err(err) => {
                debug!(code = err.code(), %err, "move rejected");
                return (played, board.is_full());
            }
        }
    }
    (played, board.is_full())
}
