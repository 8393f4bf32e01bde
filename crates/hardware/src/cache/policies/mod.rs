//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim blocks in a full set.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Lru`: Least Recently Used.
//! - `Random`: Uniform random selection from a seedable generator.
//!
//! Every [`Set`](super::Set) owns one [`PolicyState`], a closed enum over the
//! three policies. Dispatch is a `match`, not a trait object.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use crate::config::ReplacementPolicy as PolicyType;

/// Interface for per-set replacement state.
///
/// Victim selection is only consulted once a set is full; filling empty
/// slots is handled by the set itself.
pub trait ReplacementPolicy {
    /// Records that a new block was installed at `way`.
    fn on_install(&mut self, way: usize);

    /// Records a read or write hit on `way`.
    ///
    /// Passive lookups must never call this.
    fn on_hit(&mut self, way: usize);

    /// Selects the way to evict from a full set.
    fn victim(&mut self) -> usize;

    /// Returns the policy to its freshly-constructed state.
    fn reset(&mut self);

    /// Snapshot of the ordering queue, head (next victim) first.
    ///
    /// Returns `None` for policies without ordering state.
    fn order(&self) -> Option<Vec<usize>>;
}

/// Replacement state of one set.
#[derive(Debug, Clone)]
pub enum PolicyState {
    /// Installation-order queue.
    Fifo(FifoPolicy),
    /// Recency-order queue.
    Lru(LruPolicy),
    /// Seeded generator.
    Random(RandomPolicy),
}

impl PolicyState {
    /// Creates the state for `policy` over a set of `ways` slots.
    ///
    /// `seed` is only used by the Random policy.
    pub fn new(policy: PolicyType, ways: usize, seed: u64) -> Self {
        match policy {
            PolicyType::Fifo => Self::Fifo(FifoPolicy::new(ways)),
            PolicyType::Lru => Self::Lru(LruPolicy::new()),
            PolicyType::Random => Self::Random(RandomPolicy::new(ways, seed)),
        }
    }

    /// Returns which policy this state implements.
    pub const fn kind(&self) -> PolicyType {
        match self {
            Self::Fifo(_) => PolicyType::Fifo,
            Self::Lru(_) => PolicyType::Lru,
            Self::Random(_) => PolicyType::Random,
        }
    }

    /// Number of ways the state was sized for; `None` for LRU, whose queue
    /// only ever holds ways it was told about.
    pub const fn ways(&self) -> Option<usize> {
        match self {
            Self::Fifo(p) => Some(p.ways()),
            Self::Lru(_) => None,
            Self::Random(p) => Some(p.ways()),
        }
    }
}

impl ReplacementPolicy for PolicyState {
    fn on_install(&mut self, way: usize) {
        match self {
            Self::Fifo(p) => p.on_install(way),
            Self::Lru(p) => p.on_install(way),
            Self::Random(p) => p.on_install(way),
        }
    }

    fn on_hit(&mut self, way: usize) {
        match self {
            Self::Fifo(p) => p.on_hit(way),
            Self::Lru(p) => p.on_hit(way),
            Self::Random(p) => p.on_hit(way),
        }
    }

    fn victim(&mut self) -> usize {
        match self {
            Self::Fifo(p) => p.victim(),
            Self::Lru(p) => p.victim(),
            Self::Random(p) => p.victim(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Fifo(p) => p.reset(),
            Self::Lru(p) => p.reset(),
            Self::Random(p) => p.reset(),
        }
    }

    fn order(&self) -> Option<Vec<usize>> {
        match self {
            Self::Fifo(p) => p.order(),
            Self::Lru(p) => p.order(),
            Self::Random(p) => p.order(),
        }
    }
}
