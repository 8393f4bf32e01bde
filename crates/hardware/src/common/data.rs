//! Memory Access Types.
//!
//! This module defines the classification of requests presented to the cache.
//! These types are used for the following:
//! 1. **Request Routing:** Selecting the read or write path inside [`Cache::access`](crate::cache::Cache::access).
//! 2. **Statistics Tracking:** Splitting hit/miss counters by direction.
//! 3. **Trace Ingestion:** Tagging parsed trace entries.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data read access.
    ///
    /// Hits return the cached payload; misses fill the block clean.
    Read,

    /// Data write access.
    ///
    /// Hits overwrite the payload; misses allocate the block (write-allocate).
    Write,
}

/// A single request presented to the cache, carrying the payload for writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation<D = u64> {
    /// Read the block containing the address.
    Read,
    /// Write `D` into the block containing the address.
    Write(D),
}

impl<D> Operation<D> {
    /// Returns the access direction of this operation.
    pub const fn access_type(&self) -> AccessType {
        match self {
            Self::Read => AccessType::Read,
            Self::Write(_) => AccessType::Write,
        }
    }
}
