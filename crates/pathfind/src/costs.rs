//! Cost model of a search: per-cell costs supplied by the caller plus the
//! tunable constants of the search itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{
    Position, Region, BLOCKED_CELL_COST, JUMP_COST, MIN_CELL_COST, SEARCH_BUDGET_SECS,
    SEARCH_CHECK_INTERVAL,
};

/// Source of traversal costs for the cells of a grid
///
/// A cost of [`BLOCKED_CELL_COST`] marks a cell that can never be entered.
/// Implementors are queried every time the way point map is reset, so the
/// costs always reflect the current state of whatever owns the grid.
pub trait CellCosts {
    fn cell_cost(&self, pos: Position) -> u16;

    fn region(&self, _pos: Position) -> Region {
        Region::Default
    }
}

impl<F> CellCosts for F
where
    F: Fn(Position) -> u16,
{
    fn cell_cost(&self, pos: Position) -> u16 {
        self(pos)
    }
}

/// Whether a cell with this cost can be entered at all
#[inline]
pub fn is_passable(cost: u16) -> bool {
    cost < BLOCKED_CELL_COST
}

/// Tunables of a path search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Surcharge for a step between non-adjacent cells
    pub jump_cost: u32,
    /// Cheapest possible step; scales the Manhattan heuristic
    pub min_cell_cost: u32,
    /// Wall-clock budget of one search
    pub search_budget: Duration,
    /// Iterations between two budget checks
    pub check_interval: u32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            jump_cost: JUMP_COST,
            min_cell_cost: MIN_CELL_COST,
            search_budget: Duration::from_secs(SEARCH_BUDGET_SECS),
            check_interval: SEARCH_CHECK_INTERVAL,
        }
    }
}

/// Cost of a complete path under the search's cost model
///
/// The start cell is free; every further cell adds its traversal cost, and
/// every step between non-adjacent cells adds `jump_cost`.
pub fn path_cost<C: CellCosts + ?Sized>(path: &[Position], costs: &C, config: &PathConfig) -> u32 {
    path.windows(2)
        .map(|w| {
            let step = costs.cell_cost(w[1]) as u32;
            if w[0].manhattan(w[1]) > 1 {
                step + config.jump_cost
            } else {
                step
            }
        })
        .sum()
}
