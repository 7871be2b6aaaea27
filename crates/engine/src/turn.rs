use thiserror::Error;
use tracing::debug;

use crate::core::pathfind::Path;
use crate::core::{Board, BoardError, BoardEvent, MarbleId, SimpleRng};
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no selectable marble at {0}")]
    NotSelectable(Position),

    #[error("target {0} is outside the board")]
    TargetOutOfBounds(Position),

    #[error("target {0} is occupied")]
    TargetOccupied(Position),

    #[error("no path from {from} to {to}")]
    NoPath { from: Position, to: Position },

    #[error("the board is full")]
    GameOver,

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl MoveError {
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::NotSelectable(_) => "not_selectable",
            MoveError::TargetOutOfBounds(_) | MoveError::TargetOccupied(_) => "invalid_target",
            MoveError::NoPath { .. } => "no_path",
            MoveError::GameOver => "game_over",
            MoveError::Board(_) => "board_error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MoveError::NotSelectable(_) => "no marble that can be picked up at source",
            MoveError::TargetOutOfBounds(_) => "target cell is outside the board",
            MoveError::TargetOccupied(_) => "target cell already holds a marble",
            MoveError::NoPath { .. } => "target cell cannot be reached",
            MoveError::GameOver => "game is over",
            MoveError::Board(_) => "board rejected the move",
        }
    }
}

/// Result of one completed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub marble: MarbleId,
    /// Cells travelled, source and target included
    pub path: Path,
    /// The moved marble completed a run
    pub matched: bool,
    /// Marbles placed after a move without a match
    pub spawned: usize,
    /// A spawned marble completed a run
    pub spawn_matched: bool,
    /// Points scored during the turn
    pub score: u32,
    /// No free cell left after the turn
    pub game_over: bool,
    /// Board events of the turn, in order
    pub events: Vec<BoardEvent>,
}

/// Move the marble at `from` to `to` and finish the turn
///
/// Runs path search, move and match check; scores a match, otherwise spawns
/// the preview marbles, settles them and scores whatever they completed.
/// Board events queued before the call are included in the outcome.
pub fn apply_move(
    board: &mut Board,
    from: Position,
    to: Position,
) -> Result<MoveOutcome, MoveError> {
    if board.is_full() {
        return Err(MoveError::GameOver);
    }
    let marble = match board.marble_at(from) {
        Some(m) if board.can_select(from) => m.id(),
        _ => return Err(MoveError::NotSelectable(from)),
    };
    if !board.position_in_map(to) {
        return Err(MoveError::TargetOutOfBounds(to));
    }
    if board.marble_at(to).is_some() {
        return Err(MoveError::TargetOccupied(to));
    }

    let path = board
        .find_path(marble, to)?
        .ok_or(MoveError::NoPath { from, to })?;
    board.move_marble(marble, to)?;

    let mut score = 0;
    let mut spawned = 0;
    let mut spawn_matched = false;
    let matched = board.check_match(to);
    if matched {
        score += board.score_matches();
    } else {
        let before = board.placed_marbles().count();
        board.create_random_marbles();
        spawned = board.placed_marbles().count().saturating_sub(before);
        spawn_matched = board.created_animation_finished();
        if spawn_matched {
            score += board.score_matches();
        }
    }

    let game_over = board.is_full();
    debug!(
        %from,
        %to,
        steps = path.len().saturating_sub(1),
        matched,
        spawned,
        score,
        game_over,
        "move"
    );
    Ok(MoveOutcome {
        marble,
        path,
        matched,
        spawned,
        spawn_matched,
        score,
        game_over,
        events: board.take_events(),
    })
}

/// Pick a legal `(from, to)` pair at random
///
/// Sources and targets are tried in shuffled order until a path is found.
/// Returns `None` when no selectable marble can reach any free cell.
pub fn random_move(board: &mut Board, rng: &mut SimpleRng) -> Option<(Position, Position)> {
    let mut sources: Vec<(MarbleId, Position)> = board
        .placed_marbles()
        .filter(|m| !m.color().is_bomb_joker())
        .map(|m| (m.id(), m.position()))
        .collect();
    rng.shuffle(&mut sources);
    let mut targets: Vec<Position> = board.free_positions().iter().copied().collect();

    for (id, from) in sources {
        rng.shuffle(&mut targets);
        for &to in &targets {
            if let Ok(Some(_)) = board.find_path(id, to) {
                return Some((from, to));
            }
        }
    }
    None
}
