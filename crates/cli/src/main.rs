//! Set-associative cache simulator CLI.
//!
//! This binary wires a configuration, a trace source and the simulator together. It performs:
//! 1. **Configuration:** Defaults, optionally a JSON config file, then per-flag overrides.
//! 2. **Trace source:** A trace file (`--trace`) or a seeded random trace (`--random`).
//! 3. **Reporting:** Text statistics on stdout, or a JSON report with `--json`.

use std::path::PathBuf;
use std::{fs, process};

use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{CacheConfig, ReplacementPolicy, WritePolicy};
use cachesim_core::sim::{Simulator, random_trace};
use cachesim_core::stats::CacheStats;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative cache simulator",
    long_about = "Feed an access trace through a configurable set-associative cache and report hit/miss statistics.\n\nTrace lines are `R <addr>` or `W <addr> <value>`; addresses are decimal or 0x-hex.\n\nExamples:\n  cachesim --sets 64 --ways 4 --block-size 64 --policy LRU --trace trace.txt\n  cachesim --config l1.json --random 100000 --seed 42 --json\n  cachesim --policy FIFO --write-policy write-through --random 5000 --flush"
)]
struct Cli {
    /// JSON configuration file; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of sets.
    #[arg(short, long)]
    sets: Option<usize>,

    /// Associativity (blocks per set).
    #[arg(short, long)]
    ways: Option<usize>,

    /// Block size in bytes.
    #[arg(short, long)]
    block_size: Option<usize>,

    /// Replacement policy: FIFO, LRU or Random.
    #[arg(short, long)]
    policy: Option<ReplacementPolicy>,

    /// Write policy: write-back or write-through.
    #[arg(long)]
    write_policy: Option<WritePolicy>,

    /// Seed for the Random replacement policy and for `--random` traces.
    #[arg(long)]
    seed: Option<u64>,

    /// Trace file to replay.
    #[arg(short, long, conflicts_with = "random")]
    trace: Option<PathBuf>,

    /// Generate a random trace with this many requests instead of reading a file.
    #[arg(short, long)]
    random: Option<usize>,

    /// Size of the address range used by `--random`.
    #[arg(long, default_value_t = 1 << 16)]
    address_space: u64,

    /// Fraction of `--random` requests that are writes.
    #[arg(long, default_value_t = 0.3)]
    write_ratio: f64,

    /// Write back every dirty block at the end of the run.
    #[arg(long)]
    flush: bool,

    /// Print a JSON report instead of the text statistics.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Machine-readable run summary printed by `--json`.
#[derive(Serialize)]
struct Report<'a> {
    config: &'a CacheConfig,
    stats: &'a CacheStats,
    accesses: u64,
    hits: u64,
    misses: u64,
    hit_rate: f64,
    miss_rate: f64,
    write_backs: u64,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(&cli).unwrap_or_else(|e| fail(&e));
    let mut sim = simulate(&cli, &config).unwrap_or_else(|e| fail(&e));
    let _ = sim.finish(cli.flush);

    if cli.json {
        let stats = &sim.stats;
        let report = Report {
            config: &config,
            stats,
            accesses: stats.accesses(),
            hits: stats.hits(),
            misses: stats.misses(),
            hit_rate: stats.hit_rate(),
            miss_rate: stats.miss_rate(),
            write_backs: stats.write_backs(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&format!("failed to encode report: {e}")),
        }
    } else {
        println!(
            "Configuration: {} sets x {} ways x {} B ({} B), {}, {}",
            config.num_sets,
            config.set_size,
            config.block_size,
            config.capacity_bytes(),
            config.replacement_policy,
            config.write_policy
        );
        sim.stats.print();
    }
}

/// Log level selected by the number of `-v` flags.
const fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Starts from the JSON file (or defaults) and applies flag overrides.
fn build_config(cli: &Cli) -> Result<CacheConfig, String> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("could not read config {}: {e}", path.display()))?;
            CacheConfig::from_json(&text)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => CacheConfig::default(),
    };

    if let Some(sets) = cli.sets {
        config.num_sets = sets;
    }
    if let Some(ways) = cli.ways {
        config.set_size = ways;
    }
    if let Some(block_size) = cli.block_size {
        config.block_size = block_size;
    }
    if let Some(policy) = cli.policy {
        config.replacement_policy = policy;
    }
    if let Some(policy) = cli.write_policy {
        config.write_policy = policy;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Replays the trace file, or generates and replays the random trace.
fn simulate(cli: &Cli, config: &CacheConfig) -> Result<Simulator, String> {
    match (&cli.trace, cli.random) {
        (Some(path), _) => Simulator::from_trace_file(config, path)
            .map_err(|e| format!("{}: {e}", path.display())),
        (None, Some(count)) => {
            let entries = random_trace(
                cli.seed.unwrap_or_default(),
                count,
                cli.address_space,
                cli.write_ratio,
            );
            let mut sim = Simulator::new(config).map_err(|e| e.to_string())?;
            info!(entries = entries.len(), "replaying random trace");
            let _ = sim.run(&entries);
            Ok(sim)
        }
        (None, None) => Err("specify --trace <file> or --random <count>".to_string()),
    }
}

/// Reports a fatal error and exits with code 1.
fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}
