//! Way point map - the per-cell working set of a search
//!
//! Nodes live in an arena (`nodes`) and are reached through a per-cell index
//! table (`lookup`). A node is only materialized the first time its cell is
//! looked up; after that it keeps its arena slot for the lifetime of the map,
//! and [`WayPointMap::reset`] merely clears its search fields.

use crate::costs::CellCosts;
use crate::jump_holes::JumpHoles;
use crate::types::{Position, Region};

/// Arena index of a way point
pub type NodeId = usize;

const UNMATERIALIZED: u32 = u32::MAX;

/// Search state of one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WayPoint {
    pub position: Position,
    /// Predecessor on the best known path
    pub parent: Option<NodeId>,
    /// Cost accumulated from the start
    pub g: u32,
    /// Estimated remaining cost
    pub h: u32,
    /// Slot in the open heap; 0 while not open
    pub open_index: usize,
    pub closed: bool,
    /// Traversal cost of the cell itself
    pub cost: u16,
    pub region: Region,
}

impl WayPoint {
    fn new<C: CellCosts + ?Sized>(position: Position, costs: &C) -> Self {
        Self {
            position,
            parent: None,
            g: 0,
            h: 0,
            open_index: 0,
            closed: false,
            cost: costs.cell_cost(position),
            region: costs.region(position),
        }
    }

    /// Total estimate used to order the open list
    #[inline]
    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    pub fn is_open(&self) -> bool {
        self.open_index > 0
    }
}

#[derive(Debug, Clone)]
pub struct WayPointMap {
    width: i32,
    height: i32,
    lookup: Vec<u32>,
    nodes: Vec<WayPoint>,
    jump_holes: JumpHoles,
}

impl WayPointMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            lookup: Vec::new(),
            nodes: Vec::new(),
            jump_holes: JumpHoles::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.y as usize) * (self.width as usize) + (pos.x as usize))
    }

    /// Prepare for a new search
    ///
    /// The first call allocates the index table. Later calls clear the search
    /// fields of every materialized node and re-read its cost, keeping the
    /// node's identity.
    pub fn reset<C: CellCosts + ?Sized>(&mut self, costs: &C) {
        if self.lookup.is_empty() {
            let len = (self.width.max(0) as usize) * (self.height.max(0) as usize);
            self.lookup = vec![UNMATERIALIZED; len];
            return;
        }
        for node in &mut self.nodes {
            node.parent = None;
            node.g = 0;
            node.h = 0;
            node.open_index = 0;
            node.closed = false;
            node.cost = costs.cell_cost(node.position);
            node.region = costs.region(node.position);
        }
    }

    /// Drop every node; the next reset starts from scratch
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.nodes.clear();
    }

    /// Node of the cell at `pos`, materializing it on first access
    ///
    /// Returns `None` outside the grid, so neighbour lookups need no bounds
    /// checks at the call site.
    pub fn node<C: CellCosts + ?Sized>(&mut self, pos: Position, costs: &C) -> Option<NodeId> {
        let idx = self.index(pos)?;
        if self.lookup.is_empty() {
            self.reset(costs);
        }
        let slot = self.lookup[idx];
        if slot != UNMATERIALIZED {
            return Some(slot as NodeId);
        }
        let id = self.nodes.len();
        self.nodes.push(WayPoint::new(pos, costs));
        self.lookup[idx] = id as u32;
        Some(id)
    }

    /// Node at `pos` offset by `(dx, dy)`
    pub fn node_by_offset<C: CellCosts + ?Sized>(
        &mut self,
        pos: Position,
        dx: i32,
        dy: i32,
        costs: &C,
    ) -> Option<NodeId> {
        self.node(pos.offset(dx, dy), costs)
    }

    /// Already materialized node at `pos`, without creating one
    pub fn get(&self, pos: Position) -> Option<&WayPoint> {
        let idx = self.index(pos)?;
        match self.lookup.get(idx) {
            Some(&slot) if slot != UNMATERIALIZED => self.nodes.get(slot as usize),
            _ => None,
        }
    }

    pub fn materialized(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn wp(&self, id: NodeId) -> &WayPoint {
        &self.nodes[id]
    }

    #[inline]
    pub fn wp_mut(&mut self, id: NodeId) -> &mut WayPoint {
        &mut self.nodes[id]
    }

    pub fn nodes_mut(&mut self) -> &mut [WayPoint] {
        &mut self.nodes
    }

    pub fn jump_holes(&self) -> &JumpHoles {
        &self.jump_holes
    }

    pub fn set_jump_holes(&mut self, jump_holes: &JumpHoles) {
        self.jump_holes.clone_from(jump_holes);
    }
}
