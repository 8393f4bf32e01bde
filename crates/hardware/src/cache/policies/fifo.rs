//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest block in a set, regardless of how recently
//! it was accessed. The queue holds every way of the set in installation
//! order. Because empty slots are filled lowest-index first, the initial
//! order `0..ways` is exactly the order in which the set fills up.
//!
//! When a victim is needed, the head of the queue is rotated to the tail:
//! the way is about to be reinstalled, so it becomes the newest.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_install()` / `on_hit()`: O(1)
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(W) where W is the number of ways
//! - **Best Case:** Streaming accesses where all blocks have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (hot blocks are evicted anyway)

use std::collections::VecDeque;

use super::ReplacementPolicy;

/// FIFO Policy state for one set.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Ways in installation order, oldest first.
    queue: VecDeque<usize>,
    /// Number of ways in the set.
    ways: usize,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    pub fn new(ways: usize) -> Self {
        Self {
            queue: (0..ways).collect(),
            ways,
        }
    }

    /// Number of ways this policy was built for.
    pub const fn ways(&self) -> usize {
        self.ways
    }
}

impl ReplacementPolicy for FifoPolicy {
    /// Installation order is maintained by `victim`, so this is a no-op.
    fn on_install(&mut self, _way: usize) {}

    /// Hits never affect eviction order under FIFO.
    fn on_hit(&mut self, _way: usize) {}

    /// Pops the oldest way and re-queues it as the newest.
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
        self.queue = (0..self.ways).collect();
    }

    fn order(&self) -> Option<Vec<usize>> {
        Some(self.queue.iter().copied().collect())
    }
}
