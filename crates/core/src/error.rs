use thiserror::Error;

use crate::marble::MarbleId;
use crate::types::Position;
use marbles_pathfind::PathError;

/// Contract violations reported by a [`Board`](crate::Board)
///
/// None of these describe a normal game outcome; a missing path is `Ok(None)`
/// and an out-of-grid lookup is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell {0} is already occupied")]
    CellOccupied(Position),

    #[error("cell {0} is outside the board")]
    OutOfBounds(Position),

    #[error("marble {0} is not tracked by this board")]
    UnknownMarble(MarbleId),

    #[error(transparent)]
    Path(#[from] PathError),
}
