//! Set-associative cache simulator library.
//!
//! This crate models a set-associative hardware cache for analysis with the following:
//! 1. **Cache:** Block / set / cache hierarchy with FIFO, LRU and Random replacement.
//! 2. **Write policies:** Write-back and write-through, both write-allocate.
//! 3. **Configuration:** Geometry and policy selection, loadable from JSON.
//! 4. **Simulation:** Trace parsing and generation, the driver loop, and statistics.
//!
//! The model tracks which blocks are resident and the traffic that results;
//! it does not model timing, coherence, or multi-level hierarchies.

/// Common types (access types, errors).
pub mod common;
/// Cache configuration (defaults, policy enums, geometry).
pub mod config;
/// Cache model (blocks, sets, replacement policies, access path).
pub mod cache;
/// Trace sources and the simulation driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Cache configuration; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// The cache model; construct with `Cache::new`.
pub use crate::cache::Cache;
/// Driver owning a cache and its statistics.
pub use crate::sim::Simulator;
