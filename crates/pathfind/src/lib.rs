//! Grid pathfinding for marble moves
//!
//! A marble may only travel through empty cells, one orthogonal step at a
//! time, or through declared jump holes. This crate finds such paths. It has
//! no knowledge of marbles or boards: cell costs come from any [`CellCosts`]
//! implementation, so the same finder works over any grid owner.
//!
//! # Module Structure
//!
//! - [`costs`]: the cost-callback trait and search tunables
//! - [`map`]: lazily materialized per-cell way points
//! - [`heap`]: indexed binary heap used as open list
//! - [`jump_holes`]: non-adjacent links between cells
//! - [`finder`]: the search itself
//! - [`relative_way`]: compression of a path into straight runs and jumps
//!
//! # Example
//!
//! ```
//! use marbles_pathfind::PathFinder;
//! use marbles_types::{Position, Region, BLOCKED_CELL_COST, FREE_CELL_COST};
//!
//! // A 9x9 grid with a wall in column 4, open at the bottom row.
//! let costs = |p: Position| {
//!     if p.x == 4 && p.y < 8 { BLOCKED_CELL_COST } else { FREE_CELL_COST }
//! };
//!
//! let mut finder = PathFinder::new(9, 9);
//! let path = finder
//!     .find_path(&costs, Position::new(0, 0), Position::new(8, 0), &[Region::Default])
//!     .unwrap()
//!     .expect("a path exists");
//!
//! assert_eq!(path.first(), Some(&Position::new(0, 0)));
//! assert_eq!(path.last(), Some(&Position::new(8, 0)));
//! assert!(path.contains(&Position::new(4, 8)));
//! ```

pub mod costs;
pub mod error;
pub mod finder;
pub mod heap;
pub mod jump_holes;
pub mod map;
pub mod relative_way;

pub use marbles_types as types;

pub use costs::{is_passable, path_cost, CellCosts, PathConfig};
pub use error::PathError;
pub use finder::{Path, PathFinder};
pub use heap::WayPointHeap;
pub use jump_holes::JumpHoles;
pub use map::{NodeId, WayPoint, WayPointMap};
pub use relative_way::{expand_ways, relative_ways, Direction, RelativeWay};
