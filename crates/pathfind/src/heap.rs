//! Open list of a search: a 1-based binary min-heap over way point ids.
//!
//! Each way point records its own heap slot (`open_index`), so a node whose
//! cost drops can be moved up in place. Ties are resolved purely by the heap
//! shape: an entry equal to its parent moves above it on insertion, and a
//! parent equal to a child sinks below it on removal. Equal-cost paths are
//! therefore only reproducible as long as these rules stay unchanged.

use std::cmp::Ordering;

use crate::map::{NodeId, WayPoint};

#[derive(Debug, Clone)]
pub struct WayPointHeap {
    /// Slot 0 is unused so that parent/child arithmetic stays 1-based
    slots: Vec<NodeId>,
}

impl WayPointHeap {
    pub fn new() -> Self {
        Self { slots: vec![0] }
    }

    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.slots.truncate(1);
    }

    pub fn push(&mut self, nodes: &mut [WayPoint], id: NodeId) {
        self.slots.push(id);
        let pos = self.len();
        nodes[id].open_index = pos;
        self.sift_up(nodes, pos);
    }

    /// Remove the entry with the lowest `g + h`
    pub fn pop(&mut self, nodes: &mut [WayPoint]) -> Option<NodeId> {
        if self.is_empty() {
            return None;
        }
        let top = self.slots[1];
        if let Some(last) = self.slots.pop() {
            if self.len() > 0 {
                self.slots[1] = last;
                nodes[last].open_index = 1;
                self.sift_down(nodes);
            }
        }
        nodes[top].open_index = 0;
        Some(top)
    }

    /// Restore heap order after the entry at `index` got cheaper
    pub fn sift_up(&mut self, nodes: &mut [WayPoint], index: usize) {
        let mut pos = index;
        while pos > 1 {
            let parent = pos / 2;
            if compare(nodes, self.slots[pos], self.slots[parent]) != Ordering::Greater {
                self.swap(nodes, pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, nodes: &mut [WayPoint]) {
        let count = self.len();
        let mut next = 1;
        loop {
            let current = next;
            let left = 2 * current;
            let right = left + 1;
            if right <= count {
                if compare(nodes, self.slots[current], self.slots[left]) != Ordering::Less {
                    next = left;
                }
                if compare(nodes, self.slots[next], self.slots[right]) != Ordering::Less {
                    next = right;
                }
            } else if left <= count
                && compare(nodes, self.slots[current], self.slots[left]) != Ordering::Less
            {
                next = left;
            }

            if current == next {
                break;
            }
            self.swap(nodes, current, next);
        }
    }

    fn swap(&mut self, nodes: &mut [WayPoint], a: usize, b: usize) {
        self.slots.swap(a, b);
        nodes[self.slots[a]].open_index = a;
        nodes[self.slots[b]].open_index = b;
    }
}

impl Default for WayPointHeap {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn compare(nodes: &[WayPoint], a: NodeId, b: NodeId) -> Ordering {
    nodes[a].f().cmp(&nodes[b].f())
}
