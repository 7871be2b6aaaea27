//! Terminal board view.
//!
//! Renders a board snapshot into a small styled framebuffer and prints it.
//! There are no widgets or layout engine; the board sits at the top left with
//! a score panel to its right.
//!
//! Goals:
//! - Keep `core` free of any presentation concern
//! - Stay pure up to the final write, so rendering is unit-testable
//! - Two columns per cell, so a dual marble can show both of its hues

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use marbles_core as core;
pub use marbles_types as types;

pub use board_view::{BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_frame_into, stdout_is_styled, write_frame};
