use std::io;
use std::sync::{Arc, Mutex};

use cachesim_core::cache::Cache;
use cachesim_core::config::{CacheConfig, ReplacementPolicy, WritePolicy};

/// Seed used by every test cache so Random runs are reproducible.
pub const TEST_SEED: u64 = 0xC0FF_EE00;

/// Builds a validated configuration with a fixed Random seed.
pub fn config(
    num_sets: usize,
    set_size: usize,
    block_size: usize,
    replacement_policy: ReplacementPolicy,
    write_policy: WritePolicy,
) -> CacheConfig {
    CacheConfig {
        num_sets,
        set_size,
        block_size,
        replacement_policy,
        write_policy,
        seed: Some(TEST_SEED),
    }
}

/// Builds a cache, panicking on an invalid configuration.
pub fn cache(
    num_sets: usize,
    set_size: usize,
    block_size: usize,
    replacement_policy: ReplacementPolicy,
    write_policy: WritePolicy,
) -> Cache {
    let config = config(num_sets, set_size, block_size, replacement_policy, write_policy);
    Cache::new(&config).unwrap()
}

/// Fully-associative single-set cache with 1-byte blocks: address == tag.
pub fn single_set(set_size: usize, replacement_policy: ReplacementPolicy) -> Cache {
    cache(1, set_size, 1, replacement_policy, WritePolicy::WriteBack)
}

/// Tags resident in set `index`, by slot (`None` for empty slots).
pub fn resident_tags(cache: &Cache, index: usize) -> Vec<Option<u64>> {
    let set = cache.set(index).unwrap();
    (0..set.capacity()).map(|way| set.get_tag(way)).collect()
}

/// Installs a tracing subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Shared in-memory sink for captured log output.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a debug-level subscriber scoped to this thread and returns
/// everything it logged, without ANSI colours.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
