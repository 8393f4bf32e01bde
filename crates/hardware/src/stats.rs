//! Simulation statistics collection and reporting.
//!
//! This module tracks cache metrics for a simulation run. It provides:
//! 1. **Access counts:** Reads and writes, each split into hits and misses.
//! 2. **Replacement:** Evictions of valid blocks, and how many of them were dirty.
//! 3. **Traffic:** Write-backs to backing storage, split by cause.
//! 4. **Derived rates:** Hit rate and miss rate, overall and per direction.

use std::fmt::{self, Write as _};
use std::time::Instant;

use serde::Serialize;

use crate::cache::{AccessResult, Outcome, WriteBack, WriteBackCause};
use crate::common::AccessType;

/// Simulation statistics structure tracking all cache metrics.
#[derive(Clone, Debug, Serialize)]
pub struct CacheStats {
    #[serde(skip)]
    start_time: Instant,
    /// Read requests served.
    pub reads: u64,
    /// Write requests served.
    pub writes: u64,
    /// Reads that found their block resident.
    pub read_hits: u64,
    /// Reads that had to allocate their block.
    pub read_misses: u64,
    /// Writes that found their block resident.
    pub write_hits: u64,
    /// Writes that had to allocate their block.
    pub write_misses: u64,

    /// Valid blocks displaced by installations.
    pub evictions: u64,
    /// Displaced blocks that were dirty.
    pub dirty_evictions: u64,

    /// Write-backs caused by evicting dirty blocks.
    pub eviction_write_backs: u64,
    /// Writes propagated immediately under write-through.
    pub write_through_writes: u64,
    /// Dirty blocks drained by a flush.
    pub flush_write_backs: u64,
}

impl Default for CacheStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            reads: 0,
            writes: 0,
            read_hits: 0,
            read_misses: 0,
            write_hits: 0,
            write_misses: 0,
            evictions: 0,
            dirty_evictions: 0,
            eviction_write_backs: 0,
            write_through_writes: 0,
            flush_write_backs: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"reads"`, `"writes"`, `"traffic"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "reads", "writes", "traffic"];

/// Returns `part / whole` as a percentage, or 0 when `whole` is 0.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

impl CacheStats {
    /// Accounts for one access result.
    pub fn record<D>(&mut self, result: &AccessResult<D>) {
        match (result.access_type, result.outcome) {
            (AccessType::Read, Outcome::Hit) => self.read_hits += 1,
            (AccessType::Read, Outcome::Miss) => self.read_misses += 1,
            (AccessType::Write, Outcome::Hit) => self.write_hits += 1,
            (AccessType::Write, Outcome::Miss) => self.write_misses += 1,
        }
        match result.access_type {
            AccessType::Read => self.reads += 1,
            AccessType::Write => self.writes += 1,
        }
        if let Some(evicted) = &result.evicted {
            self.evictions += 1;
            if evicted.dirty {
                self.dirty_evictions += 1;
            }
        }
        if let Some(write_back) = &result.write_back {
            self.record_write_back(write_back);
        }
    }

    /// Accounts for the write-backs returned by a flush.
    pub fn record_flush<D>(&mut self, write_backs: &[WriteBack<D>]) {
        for write_back in write_backs {
            self.record_write_back(write_back);
        }
    }

    fn record_write_back<D>(&mut self, write_back: &WriteBack<D>) {
        match write_back.cause {
            WriteBackCause::Eviction => self.eviction_write_backs += 1,
            WriteBackCause::WriteThrough => self.write_through_writes += 1,
            WriteBackCause::Flush => self.flush_write_backs += 1,
        }
    }

    /// Total requests served.
    pub const fn accesses(&self) -> u64 {
        self.reads + self.writes
    }

    /// Total hits.
    pub const fn hits(&self) -> u64 {
        self.read_hits + self.write_hits
    }

    /// Total misses.
    pub const fn misses(&self) -> u64 {
        self.read_misses + self.write_misses
    }

    /// Total write-backs of every cause.
    pub const fn write_backs(&self) -> u64 {
        self.eviction_write_backs + self.write_through_writes + self.flush_write_backs
    }

    /// Fraction of accesses that hit, in `[0, 1]`; 0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        percent(self.hits(), self.accesses()) / 100.0
    }

    /// Fraction of accesses that missed, in `[0, 1]`; 0 when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        percent(self.misses(), self.accesses()) / 100.0
    }

    /// Renders the requested sections as text.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"reads"`,
    /// `"writes"`, or `"traffic"`. An empty slice renders all sections.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let mut out = String::new();

        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "CACHE SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "accesses                 {}", self.accesses());
            let _ = writeln!(out, "hits                     {}", self.hits());
            let _ = writeln!(out, "misses                   {}", self.misses());
            let _ = writeln!(out, "hit_rate                 {:.2}%", self.hit_rate() * 100.0);
            let _ = writeln!(out, "miss_rate                {:.2}%", self.miss_rate() * 100.0);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("reads") {
            let _ = writeln!(out, "READS");
            let _ = writeln!(out, "  reads                  {}", self.reads);
            let _ = writeln!(
                out,
                "  read.hits              {} ({:.2}%)",
                self.read_hits,
                percent(self.read_hits, self.reads)
            );
            let _ = writeln!(
                out,
                "  read.misses            {} ({:.2}%)",
                self.read_misses,
                percent(self.read_misses, self.reads)
            );
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("writes") {
            let _ = writeln!(out, "WRITES");
            let _ = writeln!(out, "  writes                 {}", self.writes);
            let _ = writeln!(
                out,
                "  write.hits             {} ({:.2}%)",
                self.write_hits,
                percent(self.write_hits, self.writes)
            );
            let _ = writeln!(
                out,
                "  write.misses           {} ({:.2}%)",
                self.write_misses,
                percent(self.write_misses, self.writes)
            );
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("traffic") {
            let _ = writeln!(out, "REPLACEMENT & TRAFFIC");
            let _ = writeln!(out, "  evictions              {}", self.evictions);
            let _ = writeln!(out, "  evictions.dirty        {}", self.dirty_evictions);
            let _ = writeln!(out, "  writeback.eviction     {}", self.eviction_write_backs);
            let _ = writeln!(out, "  writeback.through      {}", self.write_through_writes);
            let _ = writeln!(out, "  writeback.flush        {}", self.flush_write_backs);
            let _ = writeln!(out, "  writeback.total        {}", self.write_backs());
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Pass an empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_sections(&[]))
    }
}
