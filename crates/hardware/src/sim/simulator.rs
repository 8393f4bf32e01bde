//! Simulator: owns the cache and the statistics side-by-side.
//!
//! The driver loop feeds trace entries to the cache one at a time and records
//! every result, so statistics never have to be reconstructed afterwards.

use std::path::Path;

use tracing::info;

use super::trace::{TraceEntry, load_trace};
use crate::cache::{AccessResult, Cache, WriteBack};
use crate::common::{CacheError, TraceError};
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Top-level simulator: cache state + run statistics.
#[derive(Debug)]
pub struct Simulator {
    /// Simulated cache.
    pub cache: Cache<u64>,
    /// Statistics accumulated over every access so far.
    pub stats: CacheStats,
}

impl Simulator {
    /// Creates a new simulator with an empty cache built from `config`.
    ///
    /// # Errors
    ///
    /// Returns the cache construction error for an invalid configuration.
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        Ok(Self {
            cache: Cache::new(config)?,
            stats: CacheStats::default(),
        })
    }

    /// Builds a simulator from `config` and replays the trace file at `path`.
    ///
    /// The run is not finished; call [`finish`](Self::finish) to flush.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Config`] for an invalid configuration,
    /// [`TraceError::Io`] if the file cannot be read, or
    /// [`TraceError::Parse`] for the first malformed line.
    pub fn from_trace_file(
        config: &CacheConfig,
        path: impl AsRef<Path>,
    ) -> Result<Self, TraceError> {
        let mut sim = Self::new(config)?;
        let entries = load_trace(path)?;
        info!(entries = entries.len(), "replaying trace");
        let _ = sim.run(&entries);
        Ok(sim)
    }

    /// Serves one trace entry and records its result.
    pub fn step(&mut self, entry: &TraceEntry) -> AccessResult<u64> {
        let result = self.cache.access(entry.address, entry.op);
        self.stats.record(&result);
        result
    }

    /// Serves every entry in order.
    pub fn run<'a, I>(&mut self, entries: I) -> &CacheStats
    where
        I: IntoIterator<Item = &'a TraceEntry>,
    {
        for entry in entries {
            let _ = self.step(entry);
        }
        &self.stats
    }

    /// Ends the run, optionally draining dirty blocks to backing storage.
    ///
    /// Returns the write-backs produced by the flush (empty if `flush` is false).
    pub fn finish(&mut self, flush: bool) -> Vec<WriteBack<u64>> {
        let write_backs = if flush {
            self.cache.flush()
        } else {
            Vec::new()
        };
        self.stats.record_flush(&write_backs);
        info!(
            accesses = self.stats.accesses(),
            hits = self.stats.hits(),
            misses = self.stats.misses(),
            write_backs = self.stats.write_backs(),
            "simulation finished"
        );
        write_backs
    }
}
