//! Marble module - one game piece and its identity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{MarbleColor, MarbleState, Position};

/// Stable identity of a marble for the lifetime of its board
///
/// Ids are never reused within one board, so a presentation layer can key its
/// render handles on them across moves and removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarbleId(pub u32);

impl fmt::Display for MarbleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A marble tracked by a board
///
/// Fields are read-only outside this crate; the board is the only writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marble {
    pub(crate) id: MarbleId,
    pub(crate) color: MarbleColor,
    pub(crate) position: Position,
    pub(crate) state: MarbleState,
    pub(crate) on_board: bool,
}

impl Marble {
    pub(crate) fn new(id: MarbleId, color: MarbleColor, position: Position) -> Self {
        Self {
            id,
            color,
            position,
            state: MarbleState::Default,
            on_board: false,
        }
    }

    pub fn id(&self) -> MarbleId {
        self.id
    }

    pub fn color(&self) -> MarbleColor {
        self.color
    }

    /// First display color (the lower hue of a dual marble)
    pub fn color1(&self) -> MarbleColor {
        self.color.components().0
    }

    /// Second display color (the higher hue of a dual marble)
    pub fn color2(&self) -> MarbleColor {
        self.color.components().1
    }

    /// Cell of the marble; for a preview marble, its reserved cell
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> MarbleState {
        self.state
    }

    /// Whether the marble occupies its cell, as opposed to waiting in the
    /// preview buffer
    pub fn on_board(&self) -> bool {
        self.on_board
    }

    /// Whether this marble can sit in one run with `other`
    pub fn is_compatible(&self, other: &Marble) -> bool {
        crate::matching::compatible(self.color, other.color)
    }
}
