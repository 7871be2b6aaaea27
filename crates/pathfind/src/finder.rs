//! Path finder - best-first search over the free cells of a grid
//!
//! The search is an A* variant with a few deliberate particularities that
//! decide which of several equal-cost paths is returned:
//!
//! - Neighbours are generated in a direction-biased order: the axis with the
//!   larger offset to the node's anchor (its parent, or the destination for
//!   the start node) comes first, and the direction towards the anchor before
//!   its opposite. The generated list is then expanded last-in-first-out,
//!   with jump-hole targets (appended after the neighbours) expanded first.
//! - A node already in the open list takes a new parent whenever the new path
//!   is *not worse* (`<=`), not only when it is strictly better.
//! - The heuristic is the Manhattan distance scaled by the cheapest step cost,
//!   lowered when a chain of jump holes promises a shorter route.
//!
//! A search is time-boxed and single-flight; see [`PathFinder::find_path_with_jumps`].

use std::time::Instant;

use tracing::{debug, warn};

use crate::costs::{is_passable, CellCosts, PathConfig};
use crate::error::PathError;
use crate::heap::WayPointHeap;
use crate::jump_holes::JumpHoles;
use crate::map::{NodeId, WayPointMap};
use crate::types::{Position, Region};

/// An ordered cell sequence from start to destination, both included
pub type Path = Vec<Position>;

#[derive(Debug, Clone)]
pub struct PathFinder {
    map: WayPointMap,
    open: WayPointHeap,
    config: PathConfig,
    searching: bool,
    successors: Vec<NodeId>,
}

impl PathFinder {
    /// Create a path finder for a `width` x `height` grid with default tunables
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(width, height, PathConfig::default())
    }

    pub fn with_config(width: i32, height: i32, config: PathConfig) -> Self {
        Self {
            map: WayPointMap::new(width, height),
            open: WayPointHeap::new(),
            config,
            searching: false,
            successors: Vec::with_capacity(8),
        }
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    pub fn map(&self) -> &WayPointMap {
        &self.map
    }

    /// Whether a search is currently running on this instance
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Find a path without jump holes
    pub fn find_path<C: CellCosts + ?Sized>(
        &mut self,
        costs: &C,
        start: Position,
        destination: Position,
        regions: &[Region],
    ) -> Result<Option<Path>, PathError> {
        self.find_path_with_jumps(costs, start, destination, regions, &JumpHoles::new())
    }

    /// Find a path from `start` to `destination`
    ///
    /// Returns `Ok(None)` when `start == destination`, when the destination is
    /// outside the grid, blocked or not in one of `regions`, when no path
    /// exists, and when the search exceeds its time budget. The start cell
    /// itself may be occupied (it usually holds the marble being moved).
    ///
    /// Fails with [`PathError::SearchInProgress`] if a search is already
    /// running on this instance. The busy flag and the open list are reset on
    /// every exit, including unwinding out of a panicking cost source.
    pub fn find_path_with_jumps<C: CellCosts + ?Sized>(
        &mut self,
        costs: &C,
        start: Position,
        destination: Position,
        regions: &[Region],
        jump_holes: &JumpHoles,
    ) -> Result<Option<Path>, PathError> {
        if self.searching {
            return Err(PathError::SearchInProgress);
        }
        self.searching = true;

        let mut search = Search {
            finder: self,
            costs,
            start,
            destination,
            regions,
            allow_jumps: !jump_holes.is_empty(),
        };
        Ok(search.run(jump_holes))
    }
}

/// Successor offsets of a node at `pos` whose anchor is `anchor`, in
/// generation order
pub(crate) fn successor_offsets(pos: Position, anchor: Position) -> [(i32, i32); 4] {
    let east_first = pos.x < anchor.x;
    let south_first = pos.y < anchor.y;

    if (pos.x - anchor.x).abs() > (pos.y - anchor.y).abs() {
        let (a, b) = if east_first {
            ((1, 0), (-1, 0))
        } else {
            ((-1, 0), (1, 0))
        };
        let (c, d) = if south_first {
            ((0, -1), (0, 1))
        } else {
            ((0, 1), (0, -1))
        };
        [a, b, c, d]
    } else {
        let (a, b) = if south_first {
            ((0, 1), (0, -1))
        } else {
            ((0, -1), (0, 1))
        };
        let (c, d) = if east_first {
            ((-1, 0), (1, 0))
        } else {
            ((1, 0), (-1, 0))
        };
        [a, b, c, d]
    }
}

/// State of one running search
///
/// Dropping it clears the open list and releases the busy flag.
struct Search<'a, C: CellCosts + ?Sized> {
    finder: &'a mut PathFinder,
    costs: &'a C,
    start: Position,
    destination: Position,
    regions: &'a [Region],
    allow_jumps: bool,
}

impl<C: CellCosts + ?Sized> Drop for Search<'_, C> {
    fn drop(&mut self) {
        self.finder.open.clear();
        self.finder.searching = false;
    }
}

impl<C: CellCosts + ?Sized> Search<'_, C> {
    fn run(&mut self, jump_holes: &JumpHoles) -> Option<Path> {
        self.finder.map.reset(self.costs);
        self.finder.map.set_jump_holes(jump_holes);

        if self.start == self.destination {
            return None;
        }
        let destination = self.finder.map.node(self.destination, self.costs)?;
        if !self.allowed(destination) {
            return None;
        }
        let start = self.finder.map.node(self.start, self.costs)?;

        let h = self.heuristic(self.start);
        let wp = self.finder.map.wp_mut(start);
        wp.h = h;
        wp.g = 0;
        wp.parent = None;
        self.finder.open.push(self.finder.map.nodes_mut(), start);

        let budget = self.finder.config.search_budget;
        let check_interval = self.finder.config.check_interval.max(1);
        let started = Instant::now();
        let mut iterations = 0u32;
        let mut expanded = 0usize;

        while let Some(id) = self.finder.open.pop(self.finder.map.nodes_mut()) {
            iterations += 1;
            if iterations == check_interval {
                iterations = 0;
                if started.elapsed() >= budget {
                    warn!(
                        start = %self.start,
                        destination = %self.destination,
                        expanded,
                        "path search exceeded its time budget"
                    );
                    return None;
                }
            }

            self.finder.map.wp_mut(id).closed = true;
            self.add_next_nodes(id);
            expanded += 1;

            if self.finder.map.wp(id).position == self.destination {
                let path = self.way_to(id);
                debug!(
                    start = %self.start,
                    destination = %self.destination,
                    steps = path.len(),
                    expanded,
                    "path found"
                );
                return Some(path);
            }
        }

        debug!(start = %self.start, destination = %self.destination, expanded, "no path");
        None
    }

    fn allowed(&self, id: NodeId) -> bool {
        let wp = self.finder.map.wp(id);
        is_passable(wp.cost) && self.regions.contains(&wp.region)
    }

    fn allowed_at(&self, pos: Position) -> bool {
        self.finder.map.contains(pos)
            && is_passable(self.costs.cell_cost(pos))
            && self.regions.contains(&self.costs.region(pos))
    }

    fn add_next_nodes(&mut self, id: NodeId) {
        let mut successors = std::mem::take(&mut self.finder.successors);
        successors.clear();

        let (pos, parent_g, parent) = {
            let wp = self.finder.map.wp(id);
            (wp.position, wp.g, wp.parent)
        };
        let anchor = parent
            .map(|p| self.finder.map.wp(p).position)
            .unwrap_or(self.destination);

        for (dx, dy) in successor_offsets(pos, anchor) {
            if let Some(next) = self.finder.map.node_by_offset(pos, dx, dy, self.costs) {
                successors.push(next);
            }
        }

        if self.allow_jumps {
            let links = self.finder.map.jump_holes().links(pos).len();
            for i in 0..links {
                let target = self.finder.map.jump_holes().links(pos)[i];
                if let Some(next) = self.finder.map.node(target, self.costs) {
                    successors.push(next);
                }
            }
        }

        let jump_cost = self.finder.config.jump_cost;
        for &next in successors.iter().rev() {
            if !self.allowed(next) || self.finder.map.wp(next).closed {
                continue;
            }

            let (next_pos, cell_cost, next_g, is_open, open_index) = {
                let wp = self.finder.map.wp(next);
                (wp.position, wp.cost as u32, wp.g, wp.is_open(), wp.open_index)
            };
            let mut g = parent_g + cell_cost;
            if pos.manhattan(next_pos) > 1 {
                g += jump_cost;
            }

            if is_open {
                if g <= next_g {
                    let wp = self.finder.map.wp_mut(next);
                    wp.parent = Some(id);
                    wp.g = g;
                    self.finder
                        .open
                        .sift_up(self.finder.map.nodes_mut(), open_index);
                }
            } else {
                let h = self.heuristic(next_pos);
                let wp = self.finder.map.wp_mut(next);
                wp.parent = Some(id);
                wp.g = g;
                wp.h = h;
                self.finder.open.push(self.finder.map.nodes_mut(), next);
            }
        }

        self.finder.successors = successors;
    }

    /// Lower bound of the remaining cost from `from`, in cost units
    fn heuristic(&self, from: Position) -> u32 {
        let min = self.finder.config.min_cell_cost;
        let mut best = from.manhattan(self.destination) * min;
        if !self.allow_jumps {
            return best;
        }

        let step = self.jump_step();
        let mut in_use = Vec::new();
        for source in self.finder.map.jump_holes().sources() {
            if !self.allowed_at(source) {
                continue;
            }
            let to_jump = from.manhattan(source) * min;
            if to_jump < best {
                let via = self.jump_bound(source, source, best, to_jump + step, &mut in_use);
                best = best.min(via);
            }
        }
        best
    }

    /// Cheapest possible cost of one jump: the surcharge plus the landing cell
    fn jump_step(&self) -> u32 {
        self.finder.config.jump_cost + self.finder.config.min_cell_cost
    }

    /// Best bound reachable by jumping out of `jump_point`, where `cost` is
    /// the bound for reaching the far side of the jump
    ///
    /// `in_use` holds the links taken on the current recursion path; a link
    /// is never taken twice on one path, which keeps cyclic links finite.
    fn jump_bound(
        &self,
        jump_point: Position,
        last_pos: Position,
        best: u32,
        cost: u32,
        in_use: &mut Vec<(Position, Position)>,
    ) -> u32 {
        let min = self.finder.config.min_cell_cost;
        let step = self.jump_step();
        let holes = self.finder.map.jump_holes();
        let mut result = best;

        for &target in holes.links(jump_point) {
            let link = (jump_point, target);
            if in_use.contains(&link) {
                continue;
            }
            in_use.push(link);

            if target != last_pos && self.allowed_at(target) {
                result = result.min(target.manhattan(self.destination) * min + cost);

                for source in holes.sources() {
                    if source == jump_point || !self.allowed_at(source) {
                        continue;
                    }
                    let to_jump = target.manhattan(source) * min + cost;
                    if to_jump < result {
                        result = result.min(self.jump_bound(
                            source,
                            target,
                            result,
                            to_jump + step,
                            in_use,
                        ));
                    }
                }
            }

            in_use.pop();
        }
        result
    }

    fn way_to(&self, goal: NodeId) -> Path {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(id) = current {
            let wp = self.finder.map.wp(id);
            path.push(wp.position);
            current = wp.parent;
        }
        path.reverse();
        path
    }
}
