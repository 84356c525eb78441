//! Binary heap over distinct price keys, with O(log n) removal by value.
//!
//! The heap stores only prices — volume and order data live in the owning
//! side's level map. An auxiliary key→heap-position map is what makes
//! `remove` logarithmic instead of linear; keeping it in sync on every swap
//! is the component's single dominant invariant.

use rust_decimal::Decimal;
use std::collections::HashMap;

/// Which extreme this index tracks: the max (bids want the highest price) or
/// the min (asks want the lowest price).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Max,
    Min,
}

impl Orientation {
    /// True if `a` should sit closer to the root than `b` under this orientation.
    fn is_higher_priority(self, a: Decimal, b: Decimal) -> bool {
        match self {
            Orientation::Max => a > b,
            Orientation::Min => a < b,
        }
    }
}

/// An indexed binary heap of distinct `Decimal` price keys.
#[derive(Debug)]
pub struct PriorityIndex {
    orientation: Orientation,
    heap: Vec<Decimal>,
    positions: HashMap<Decimal, usize>,
}

impl PriorityIndex {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            heap: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// The extreme price (max for bids, min for asks), or `None` if empty. O(1).
    pub fn peek(&self) -> Option<Decimal> {
        self.heap.first().copied()
    }

    /// O(1).
    pub fn contains(&self, key: Decimal) -> bool {
        self.positions.contains_key(&key)
    }

    /// O(1).
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert a new price key. Returns `false` if it is already present
    /// (distinct-key discipline — callers must route through the level map
    /// instead of inserting a duplicate).
    pub fn insert(&mut self, key: Decimal) -> bool {
        if self.positions.contains_key(&key) {
            return false;
        }
        let idx = self.heap.len();
        self.heap.push(key);
        self.positions.insert(key, idx);
        self.sift_up(idx);
        true
    }

    /// Remove a price key if present. O(log n).
    pub fn remove(&mut self, key: Decimal) -> bool {
        let Some(&idx) = self.positions.get(&key) else {
            return false;
        };
        let last = self.heap.len() - 1;
        self.swap(idx, last);
        self.heap.pop();
        self.positions.remove(&key);

        // The element now at `idx` (if any) came from the tail and its
        // relation to its new neighbors is unknown in either direction.
        if idx < self.heap.len() {
            self.sift_up(idx);
            self.sift_down(idx);
        }
        true
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions.insert(self.heap[i], i);
        self.positions.insert(self.heap[j], j);
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self
                .orientation
                .is_higher_priority(self.heap[idx], self.heap[parent])
            {
                self.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut best = idx;

            if left < len
                && self
                    .orientation
                    .is_higher_priority(self.heap[left], self.heap[best])
            {
                best = left;
            }
            if right < len
                && self
                    .orientation
                    .is_higher_priority(self.heap[right], self.heap[best])
            {
                best = right;
            }
            if best == idx {
                break;
            }
            self.swap(idx, best);
            idx = best;
        }
    }
}
