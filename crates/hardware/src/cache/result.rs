//! Outcome types reported by [`Cache::access`](super::Cache::access).

use std::fmt;

use crate::common::AccessType;

/// Whether the requested block was resident.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The block was resident.
    Hit,
    /// The block was not resident and has been installed.
    Miss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
        }
    }
}

/// Why data was propagated to backing storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriteBackCause {
    /// A dirty block was evicted (write-back policy).
    Eviction,
    /// A write was propagated immediately (write-through policy).
    WriteThrough,
    /// A dirty block was drained by [`Cache::flush`](super::Cache::flush).
    Flush,
}

/// A block displaced from its slot to make room for an installation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evicted<D = u64> {
    /// Tag of the displaced block.
    pub tag: u64,
    /// Base address of the displaced block.
    pub address: u64,
    /// Slot the block occupied.
    pub way: usize,
    /// Payload of the displaced block.
    pub data: D,
    /// Whether the block was dirty when displaced.
    pub dirty: bool,
}

/// Data propagated to backing storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteBack<D = u64> {
    /// Tag of the written block.
    pub tag: u64,
    /// Base address of the written block.
    pub address: u64,
    /// Set the block belongs to.
    pub set_index: usize,
    /// Payload written to backing storage.
    pub data: D,
    /// What triggered the write.
    pub cause: WriteBackCause,
}

/// Result of a single cache access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessResult<D = u64> {
    /// Read or write.
    pub access_type: AccessType,
    /// Hit or miss.
    pub outcome: Outcome,
    /// Address presented to the cache.
    pub address: u64,
    /// Set the address maps to.
    pub set_index: usize,
    /// Tag of the address.
    pub tag: u64,
    /// Slot that serves the address after the access.
    pub way: usize,
    /// Payload for reads: the cached data on a hit, the filled data on a miss.
    /// `None` for writes.
    pub data: Option<D>,
    /// Block displaced by a miss, if the chosen slot was occupied.
    pub evicted: Option<Evicted<D>>,
    /// Propagation to backing storage caused by this access.
    pub write_back: Option<WriteBack<D>>,
}

impl<D> AccessResult<D> {
    /// Returns `true` for a hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.outcome == Outcome::Hit
    }

    /// Returns `true` for a miss.
    #[inline]
    pub fn is_miss(&self) -> bool {
        self.outcome == Outcome::Miss
    }

    /// Tag of the displaced block, if any.
    pub fn evicted_tag(&self) -> Option<u64> {
        self.evicted.as_ref().map(|e| e.tag)
    }
}
