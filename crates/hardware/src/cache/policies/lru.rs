//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the block that has not been accessed for the longest time.
//! It keeps a recency queue of the occupied ways: the head is the least recently
//! used way, the tail the most recently used. Installations and hits move a way
//! to the tail.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_install()` / `on_hit()`: O(W) where W is the number of ways
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(W)
//! - **Best Case:** Workloads with good temporal locality
//! - **Worst Case:** Scanning patterns larger than the set (thrashing)

use std::collections::VecDeque;

use super::ReplacementPolicy;

/// LRU Policy state for one set.
#[derive(Debug, Clone, Default)]
pub struct LruPolicy {
    /// Occupied ways, least recently used first.
    queue: VecDeque<usize>,
}

impl LruPolicy {
    /// Creates a new LRU policy instance with an empty recency queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `way` to the most recently used position.
    fn touch(&mut self, way: usize) {
        if let Some(pos) = self.queue.iter().position(|&w| w == way) {
            let _ = self.queue.remove(pos);
        }
        self.queue.push_back(way);
    }
}

impl ReplacementPolicy for LruPolicy {
    fn on_install(&mut self, way: usize) {
        self.touch(way);
    }

    fn on_hit(&mut self, way: usize) {
        self.touch(way);
    }

    /// Pops the least recently used way and re-queues it at the tail.
    fn victim(&mut self) -> usize {
        match self.queue.pop_front() {
            Some(way) => {
                self.queue.push_back(way);
                way
            }
            None => 0,
        }
    }

    fn reset(&mut self) {
        self.queue.clear();
    }

    fn order(&self) -> Option<Vec<usize>> {
        Some(self.queue.iter().copied().collect())
    }
}
