//! Simulation Driver Tests.
//!
//! Verifies that the simulator feeds traces through the cache in order,
//! keeps statistics in step with the access results, and accounts for the
//! final flush.

use std::io::Write as _;

use cachesim_core::cache::Outcome;
use cachesim_core::common::{CacheError, TraceError};
use cachesim_core::config::{ReplacementPolicy, WritePolicy};
use cachesim_core::sim::{Simulator, TraceEntry, parse_trace, random_trace};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::common::harness::{config, init_tracing};

#[test]
fn invalid_config_is_rejected() {
    let cfg = config(0, 1, 1, ReplacementPolicy::Lru, WritePolicy::WriteBack);
    assert!(matches!(
        Simulator::new(&cfg),
        Err(CacheError::InvalidGeometry { .. })
    ));
}

#[test]
fn step_records_each_result() {
    let cfg = config(1, 2, 1, ReplacementPolicy::Lru, WritePolicy::WriteBack);
    let mut sim = Simulator::new(&cfg).unwrap();

    assert_eq!(sim.step(&TraceEntry::read(1)).outcome, Outcome::Miss);
    assert_eq!(sim.step(&TraceEntry::read(1)).outcome, Outcome::Hit);
    assert_eq!(sim.stats.accesses(), 2);
    assert_eq!(sim.stats.read_hits, 1);
}

#[test]
fn run_replays_trace_in_order() {
    init_tracing();
    let trace = parse_trace(
        "R 0xA\n\
         R 0xB\n\
         R 0xA\n\
         R 0xC\n",
    )
    .unwrap();
    let cfg = config(1, 2, 1, ReplacementPolicy::Fifo, WritePolicy::WriteBack);
    let mut sim = Simulator::new(&cfg).unwrap();

    let stats = sim.run(&trace);
    assert_eq!(stats.hits(), 1);
    assert_eq!(stats.misses(), 3);
    assert_eq!(stats.evictions, 1);
    assert!(!sim.cache.contains(0xA));
    assert!(sim.cache.contains(0xB));
    assert!(sim.cache.contains(0xC));
}

#[test]
fn finish_with_flush_counts_dirty_blocks() {
    let trace = vec![
        TraceEntry::write(0, 1),
        TraceEntry::write(64, 2),
        TraceEntry::read(128),
    ];
    let cfg = config(4, 2, 64, ReplacementPolicy::Lru, WritePolicy::WriteBack);
    let mut sim = Simulator::new(&cfg).unwrap();
    let _ = sim.run(&trace);

    let write_backs = sim.finish(true);
    assert_eq!(write_backs.len(), 2);
    assert_eq!(sim.stats.flush_write_backs, 2);
    assert_eq!(sim.cache.occupancy(), 0);
}

#[test]
fn finish_without_flush_keeps_cache() {
    let cfg = config(4, 2, 64, ReplacementPolicy::Lru, WritePolicy::WriteBack);
    let mut sim = Simulator::new(&cfg).unwrap();
    let _ = sim.step(&TraceEntry::write(0, 1));

    assert!(sim.finish(false).is_empty());
    assert_eq!(sim.stats.flush_write_backs, 0);
    assert_eq!(sim.cache.occupancy(), 1);
}

/// Every access is either a hit or a miss, and rates sum to one.
#[test]
fn random_run_accounts_every_access() {
    let trace = random_trace(11, 5000, 1 << 12, 0.3);
    let cfg = config(16, 4, 16, ReplacementPolicy::Random, WritePolicy::WriteBack);
    let mut sim = Simulator::new(&cfg).unwrap();
    let stats = sim.run(&trace).clone();

    assert_eq!(stats.accesses(), 5000);
    assert_eq!(stats.hits() + stats.misses(), 5000);
    assert_eq!(stats.reads + stats.writes, 5000);
    assert!((stats.hit_rate() + stats.miss_rate() - 1.0).abs() < 1e-9);
    assert!(stats.evictions <= stats.misses());
    assert_eq!(stats.eviction_write_backs, stats.dirty_evictions);
}

/// Identical seeds give identical statistics, even with Random replacement.
#[test]
fn seeded_runs_are_reproducible() {
    let trace = random_trace(4, 2000, 1 << 10, 0.5);
    let cfg = config(4, 4, 8, ReplacementPolicy::Random, WritePolicy::WriteBack);
    let run = || {
        let mut sim = Simulator::new(&cfg).unwrap();
        let _ = sim.run(&trace);
        (sim.stats.hits(), sim.stats.evictions, sim.stats.write_backs())
    };
    assert_eq!(run(), run());
}

// ══════════════════════════════════════════════════════════
// Trace files
// ══════════════════════════════════════════════════════════

fn trace_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn from_trace_file_replays_every_entry() {
    let file = trace_file("R 0xA\nR 0xB\nR 0xA\nR 0xC\n");
    let cfg = config(1, 2, 1, ReplacementPolicy::Lru, WritePolicy::WriteBack);

    let sim = Simulator::from_trace_file(&cfg, file.path()).unwrap();
    assert_eq!(sim.stats.accesses(), 4);
    assert_eq!(sim.stats.hits(), 1);
    assert!(sim.cache.contains(0xA));
    assert!(!sim.cache.contains(0xB));
}

#[test]
fn from_trace_file_reports_invalid_config() {
    let file = trace_file("R 1\n");
    let cfg = config(4, 0, 16, ReplacementPolicy::Lru, WritePolicy::WriteBack);

    let err = Simulator::from_trace_file(&cfg, file.path()).unwrap_err();
    assert!(matches!(
        err,
        TraceError::Config(CacheError::InvalidGeometry { set_size: 0, .. })
    ));
    assert!(err.to_string().starts_with("invalid cache geometry"));
}

#[test]
fn from_trace_file_reports_parse_errors() {
    let file = trace_file("R 1\nW 2\n");
    let cfg = config(1, 2, 1, ReplacementPolicy::Lru, WritePolicy::WriteBack);

    let err = Simulator::from_trace_file(&cfg, file.path()).unwrap_err();
    assert!(matches!(err, TraceError::Parse { line: 2, .. }));
}

#[test]
fn from_trace_file_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(1, 2, 1, ReplacementPolicy::Lru, WritePolicy::WriteBack);

    let err = Simulator::from_trace_file(&cfg, dir.path().join("missing.trace")).unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
}
