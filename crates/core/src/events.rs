//! Board events
//!
//! Mutating board calls queue events instead of invoking callbacks. A
//! presentation layer drains them with [`Board::take_events`](crate::Board::take_events)
//! after each call and reacts (effects, sounds, releasing render handles).

use crate::marble::MarbleId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A match check found at least one run
    Matched {
        /// Whether a matched run holds a bomb-joker
        has_bomb: bool,
    },
    /// Preview marbles were placed on the board
    NewMarbles,
    /// Marbles dropped from the board; their render handles can be released
    Disposed(Vec<MarbleId>),
}
