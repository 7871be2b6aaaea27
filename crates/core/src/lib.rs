//! Board engine - pure, deterministic, and testable
//!
//! This crate holds the rules of the marbles game: grid occupancy, marble
//! lifecycle, match detection, bomb effects, scoring and seeded marble
//! generation. It has no dependency on rendering, input or timing; a
//! front-end drives it through explicit calls and reads back queued events.
//!
//! - **Deterministic**: same seed and same calls produce the same game
//! - **Headless**: no callbacks into presentation code
//!
//! # Module Structure
//!
//! - [`board`]: the board and its entry points
//! - [`grid`]: cell occupancy and free-cell set, also the path cost source
//! - [`marble`]: marble identity and read-only accessors
//! - [`matching`]: color compatibility and run scanning
//! - [`scoring`]: points for a move
//! - [`rng`]: seeded generator for positions and colors
//! - [`events`]: events queued by mutating calls
//! - [`config`]: board configuration
//! - [`snapshot`]: serializable board view
//!
//! # Rules
//!
//! - A run is 5 or more compatible marbles along a row, column or diagonal
//! - Compatible means equal colors or at least one shared hue
//! - A run holding a bomb-joker also explodes every placed marble of the
//!   run's primary color
//! - Several runs in one move multiply: the run sum times the run count
//!
//! # Example
//!
//! ```
//! use marbles_core::{Board, BoardEvent};
//! use marbles_types::{Hue, MarbleColor, MarbleState, Position};
//!
//! let mut board = Board::new(9);
//! let red = MarbleColor::single(Hue::Red);
//! for y in 0..4 {
//!     board.create_marble(Position::new(0, y), red).unwrap();
//! }
//! board
//!     .create_marble(Position::new(0, 4), MarbleColor::dual(Hue::Red, Hue::Blue))
//!     .unwrap();
//!
//! assert!(board.check_match(Position::new(0, 4)));
//! assert!(board.marbles().iter().all(|m| m.state() == MarbleState::Removing));
//! assert_eq!(board.take_events(), vec![BoardEvent::Matched { has_bomb: false }]);
//!
//! board.score_matches();
//! assert_eq!(board.total_score(), 10);
//! assert!(board.marbles().is_empty());
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod marble;
pub mod matching;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use marbles_pathfind as pathfind;
pub use marbles_types as types;

pub use board::Board;
pub use config::BoardConfig;
pub use error::BoardError;
pub use events::BoardEvent;
pub use grid::Grid;
pub use marble::{Marble, MarbleId};
pub use matching::{compatible, primary_hue, MatchRun, LINE_DIRECTIONS};
pub use rng::SimpleRng;
pub use scoring::{calculate_run_score, calculate_score, ScoreResult};
pub use snapshot::{BoardSnapshot, MarbleSnapshot};
