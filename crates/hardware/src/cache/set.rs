//! Cache set: a fixed group of blocks sharing one index.
//!
//! A set owns its blocks and its replacement state. It answers tag lookups,
//! picks a slot for the next installation (fill-before-evict, then policy),
//! and installs blocks. Lookups are passive: only [`Set::promote`] updates
//! recency, and only the cache's hit path calls it.

use std::mem;

use super::block::Block;
use super::policies::{PolicyState, ReplacementPolicy};
use crate::config::ReplacementPolicy as PolicyType;

/// A set of `capacity` block slots with per-set replacement state.
#[derive(Debug, Clone)]
pub struct Set<D = u64> {
    blocks: Vec<Block<D>>,
    policy: PolicyState,
}

impl<D: Default> Set<D> {
    /// Creates a set with `capacity` empty slots.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of slots (the associativity).
    /// * `policy` - Replacement policy used once the set is full.
    /// * `seed` - Generator seed, used only by the Random policy.
    pub fn new(capacity: usize, policy: PolicyType, seed: u64) -> Self {
        Self {
            blocks: (0..capacity).map(|_| Block::empty()).collect(),
            policy: PolicyState::new(policy, capacity, seed),
        }
    }

    /// Creates a set using an explicitly constructed policy state.
    ///
    /// Useful to inject a specific Random generator.
    ///
    /// # Panics
    ///
    /// Panics if `policy` was built for a way count other than `capacity`,
    /// since it could then choose victims outside the set.
    pub fn with_policy(capacity: usize, policy: PolicyState) -> Self {
        if let Some(ways) = policy.ways() {
            assert_eq!(
                ways, capacity,
                "replacement policy sized for {ways} ways used in a {capacity}-way set"
            );
        }
        Self {
            blocks: (0..capacity).map(|_| Block::empty()).collect(),
            policy,
        }
    }

    /// Installs a new valid block at slot `index`.
    ///
    /// Returns the block previously held in the slot, if it was valid, so the
    /// caller can report the eviction and write back dirty data. Under LRU the
    /// slot becomes most recently used; FIFO order is maintained by
    /// [`find_victim`](Self::find_victim) alone.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    pub fn replace_block(
        &mut self,
        index: usize,
        tag: u64,
        data: D,
        dirty: bool,
    ) -> Option<Block<D>> {
        debug_assert!(
            self.find(tag).is_none_or(|way| way == index),
            "tag {tag:#x} already resident in another slot"
        );
        let old = mem::replace(&mut self.blocks[index], Block::new(tag, data, dirty));
        self.policy.on_install(index);
        if old.valid {
            Some(old)
        } else {
            None
        }
    }

    /// Empties every slot and resets the replacement state.
    ///
    /// Returns the dirty blocks that were resident, together with their slot
    /// index, so they can be written back.
    pub fn flush(&mut self) -> Vec<(usize, Block<D>)> {
        let dirty = self
            .blocks
            .iter_mut()
            .enumerate()
            .filter_map(|(way, slot)| {
                let block = mem::take(slot);
                if block.needs_write_back() {
                    Some((way, block))
                } else {
                    None
                }
            })
            .collect();
        self.policy.reset();
        dirty
    }
}

impl<D> Set<D> {
    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.blocks.len()
    }

    /// Replacement policy of this set.
    pub const fn policy(&self) -> PolicyType {
        self.policy.kind()
    }

    /// Returns `true` iff a valid block holds `tag`.
    pub fn contains(&self, tag: u64) -> bool {
        self.find(tag).is_some()
    }

    /// Returns the slot index of the valid block holding `tag`.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.blocks.iter().position(|b| b.matches(tag))
    }

    /// Returns the payload of the valid block holding `tag`.
    ///
    /// Does not update replacement state.
    pub fn read_data(&self, tag: u64) -> Option<&D> {
        self.blocks.iter().find(|b| b.matches(tag)).map(|b| &b.data)
    }

    /// Overwrites the payload of the valid block holding `tag` and marks it dirty.
    ///
    /// Returns `false` (and changes nothing) if no such block exists.
    pub fn write_data(&mut self, tag: u64, data: D) -> bool {
        match self.blocks.iter_mut().find(|b| b.matches(tag)) {
            Some(block) => {
                block.data = data;
                block.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Selects the slot for the next installation.
    ///
    /// The lowest empty slot is used while one exists; otherwise the
    /// replacement policy chooses. Nothing is evicted here; see
    /// [`replace_block`](Self::replace_block).
    pub fn find_victim(&mut self) -> usize {
        if let Some(free) = self.blocks.iter().position(|b| !b.valid) {
            return free;
        }
        self.policy.victim()
    }

    /// Marks slot `index` as just used by a hit.
    pub fn promote(&mut self, index: usize) {
        if index < self.blocks.len() {
            self.policy.on_hit(index);
        }
    }

    /// Clears the dirty bit of slot `index`.
    pub fn mark_clean(&mut self, index: usize) {
        if let Some(block) = self.blocks.get_mut(index) {
            block.dirty = false;
        }
    }

    /// Returns the tag in slot `index`, or `None` if the slot is empty.
    pub fn get_tag(&self, index: usize) -> Option<u64> {
        self.blocks.get(index).filter(|b| b.valid).map(|b| b.tag)
    }

    /// Returns the block in slot `index`, valid or not.
    pub fn block(&self, index: usize) -> Option<&Block<D>> {
        self.blocks.get(index)
    }

    /// All slots in index order.
    pub fn blocks(&self) -> &[Block<D>] {
        &self.blocks
    }

    /// Number of valid blocks.
    pub fn occupancy(&self) -> usize {
        self.blocks.iter().filter(|b| b.valid).count()
    }

    /// Returns `true` when every slot holds a valid block.
    pub fn is_full(&self) -> bool {
        self.blocks.iter().all(|b| b.valid)
    }

    /// Snapshot of the FIFO/LRU queue, next victim first; `None` for Random.
    pub fn policy_order(&self) -> Option<Vec<usize>> {
        self.policy.order()
    }
}
