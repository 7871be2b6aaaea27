//! Headless turn driver
//!
//! A front-end spreads one player move over several frames: it animates the
//! path, then the spawn, and only then scores. [`apply_move`] runs the same
//! sequence of board calls back to back, for autoplay, tests and benches.

pub mod turn;

pub use marbles_core as core;
pub use marbles_types as types;

pub use turn::{apply_move, random_move, MoveError, MoveOutcome};
