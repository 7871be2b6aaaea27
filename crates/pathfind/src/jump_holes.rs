//! Jump holes - directed links between non-adjacent cells.

use std::collections::BTreeMap;

use crate::types::Position;

/// Set of jump-hole links, keyed by source cell
///
/// Sources iterate in position order; the destinations of one source keep
/// their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpHoles {
    links: BTreeMap<Position, Vec<Position>>,
}

impl JumpHoles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link from `from` to `to`
    pub fn add(&mut self, from: Position, to: Position) {
        self.links.entry(from).or_default().push(to);
    }

    /// Add links in both directions
    pub fn add_pair(&mut self, a: Position, b: Position) {
        self.add(a, b);
        self.add(b, a);
    }

    /// Number of source cells
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, from: Position) -> bool {
        self.links.contains_key(&from)
    }

    /// Destinations reachable from `from`, in insertion order
    pub fn links(&self, from: Position) -> &[Position] {
        self.links.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All source cells in position order
    pub fn sources(&self) -> impl Iterator<Item = Position> + '_ {
        self.links.keys().copied()
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }
}
