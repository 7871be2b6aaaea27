//! Marbles (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so that the binary,
//! integration tests and benches can use `marbles::{core,engine,...}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use marbles_core as core;
pub use marbles_engine as engine;
pub use marbles_pathfind as pathfind;
pub use marbles_term as term;
pub use marbles_types as types;
