//! Set-Associative Cache Simulator.
//!
//! This module implements a configurable set-associative cache. It supports
//! FIFO, LRU and Random replacement and write-back or write-through write
//! policies (both write-allocate). It models hits, misses, evictions and the
//! write-back traffic they cause; it does not model timing.
//!
//! The hierarchy is [`Cache`] → [`Set`] → [`Block`]. The cache decomposes an
//! address into `(set index, tag)` and routes the request to the owning set.

/// Cache block (line) storage.
pub mod block;
/// Cache replacement policy implementations (FIFO, LRU, Random).
pub mod policies;
/// Access outcome and write-back event types.
pub mod result;
/// Cache set: slots plus replacement state.
pub mod set;

pub use block::Block;
pub use result::{AccessResult, Evicted, Outcome, WriteBack, WriteBackCause};
pub use set::Set;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, trace};

use crate::common::error::CacheError;
use crate::common::Operation;
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType, WritePolicy};

/// Address geometry: how addresses map to sets and tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    num_sets: u64,
    block_size: u64,
}

impl Geometry {
    /// Creates a geometry; both values must be non-zero.
    const fn new(num_sets: usize, block_size: usize) -> Self {
        Self {
            num_sets: num_sets as u64,
            block_size: block_size as u64,
        }
    }

    /// Splits `address` into `(set_index, tag)`.
    ///
    /// The block offset is discarded, the low-order remaining bits select the
    /// set and the high-order bits form the tag. Division is used so that
    /// non-power-of-two geometries map consistently too.
    #[inline]
    pub const fn decompose(&self, address: u64) -> (usize, u64) {
        let block = address / self.block_size;
        ((block % self.num_sets) as usize, block / self.num_sets)
    }

    /// Base address of the block with `tag` in set `set_index`.
    #[inline]
    pub const fn block_address(&self, set_index: usize, tag: u64) -> u64 {
        tag.wrapping_mul(self.num_sets)
            .wrapping_add(set_index as u64)
            .wrapping_mul(self.block_size)
    }
}

/// Set-associative cache holding opaque payloads of type `D`.
///
/// # Examples
///
/// ```
/// use cachesim_core::cache::{Cache, Outcome};
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let config = CacheConfig {
///     num_sets: 1,
///     set_size: 2,
///     block_size: 1,
///     replacement_policy: ReplacementPolicy::Fifo,
///     ..CacheConfig::default()
/// };
/// let mut cache: Cache = Cache::new(&config).unwrap();
///
/// assert_eq!(cache.read(0xA).outcome, Outcome::Miss);
/// assert_eq!(cache.read(0xB).outcome, Outcome::Miss);
/// assert_eq!(cache.read(0xA).outcome, Outcome::Hit);
///
/// // FIFO evicts the oldest installation even though it was just read.
/// let result = cache.read(0xC);
/// assert_eq!(result.evicted_tag(), Some(0xA));
/// ```
#[derive(Debug, Clone)]
pub struct Cache<D = u64> {
    sets: Vec<Set<D>>,
    geometry: Geometry,
    set_size: usize,
    block_size: usize,
    replacement_policy: PolicyType,
    write_policy: WritePolicy,
}

impl<D: Clone + Default> Cache<D> {
    /// Creates a cache with every slot empty.
    ///
    /// Each set's Random generator is derived from `config.seed`, or from OS
    /// entropy when no seed is configured.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidGeometry`] if any dimension is zero.
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        config.validate()?;

        let mut seeds = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sets = (0..config.num_sets)
            .map(|_| Set::new(config.set_size, config.replacement_policy, seeds.next_u64()))
            .collect();

        info!(
            num_sets = config.num_sets,
            set_size = config.set_size,
            block_size = config.block_size,
            replacement = %config.replacement_policy,
            write = %config.write_policy,
            "cache constructed"
        );

        Ok(Self {
            sets,
            geometry: Geometry::new(config.num_sets, config.block_size),
            set_size: config.set_size,
            block_size: config.block_size,
            replacement_policy: config.replacement_policy,
            write_policy: config.write_policy,
        })
    }

    /// Serves one request.
    ///
    /// Hits promote the block (LRU). Misses allocate a block for reads and
    /// writes alike, evicting a victim when the set is full; a dirty victim
    /// produces a write-back event. Under write-through every write also
    /// produces a write-back event and leaves the block clean.
    ///
    /// # Arguments
    ///
    /// * `address` - Byte address of the request.
    /// * `op` - Read, or write with the payload to store.
    pub fn access(&mut self, address: u64, op: Operation<D>) -> AccessResult<D> {
        let geometry = self.geometry;
        let write_policy = self.write_policy;
        let (set_index, tag) = geometry.decompose(address);
        let access_type = op.access_type();
        let set = &mut self.sets[set_index];

        let result = match (set.find(tag), op) {
            (Some(way), Operation::Read) => {
                set.promote(way);
                let data = set.read_data(tag).cloned();
                AccessResult {
                    access_type,
                    outcome: Outcome::Hit,
                    address,
                    set_index,
                    tag,
                    way,
                    data,
                    evicted: None,
                    write_back: None,
                }
            }
            (Some(way), Operation::Write(value)) => {
                set.promote(way);
                let write_back = match write_policy {
                    WritePolicy::WriteBack => {
                        let _ = set.write_data(tag, value);
                        None
                    }
                    WritePolicy::WriteThrough => {
                        let _ = set.write_data(tag, value.clone());
                        set.mark_clean(way);
                        Some(write_through(geometry, set_index, tag, value))
                    }
                };
                AccessResult {
                    access_type,
                    outcome: Outcome::Hit,
                    address,
                    set_index,
                    tag,
                    way,
                    data: None,
                    evicted: None,
                    write_back,
                }
            }
            (None, Operation::Read) => {
                let fill = D::default();
                let (way, evicted, write_back) =
                    install(set, geometry, set_index, tag, fill.clone(), false);
                AccessResult {
                    access_type,
                    outcome: Outcome::Miss,
                    address,
                    set_index,
                    tag,
                    way,
                    data: Some(fill),
                    evicted,
                    write_back,
                }
            }
            (None, Operation::Write(value)) => {
                let (way, evicted, write_back) = match write_policy {
                    WritePolicy::WriteBack => {
                        install(set, geometry, set_index, tag, value, true)
                    }
                    WritePolicy::WriteThrough => {
                        let (way, evicted, eviction_write_back) =
                            install(set, geometry, set_index, tag, value.clone(), false);
                        debug_assert!(
                            eviction_write_back.is_none(),
                            "write-through cache evicted a dirty block"
                        );
                        let write_back = write_through(geometry, set_index, tag, value);
                        (way, evicted, Some(write_back))
                    }
                };
                AccessResult {
                    access_type,
                    outcome: Outcome::Miss,
                    address,
                    set_index,
                    tag,
                    way,
                    data: None,
                    evicted,
                    write_back,
                }
            }
        };

        trace!(
            address,
            set = set_index,
            tag,
            way = result.way,
            kind = ?access_type,
            outcome = %result.outcome,
            "access"
        );
        result
    }

    /// Reads the block containing `address`.
    pub fn read(&mut self, address: u64) -> AccessResult<D> {
        self.access(address, Operation::Read)
    }

    /// Writes `value` to the block containing `address`.
    pub fn write(&mut self, address: u64, value: D) -> AccessResult<D> {
        self.access(address, Operation::Write(value))
    }

    /// Writes back every dirty block and empties the cache.
    ///
    /// Replacement state of every set returns to its initial state.
    pub fn flush(&mut self) -> Vec<WriteBack<D>> {
        let geometry = self.geometry;
        let write_backs: Vec<WriteBack<D>> = self
            .sets
            .iter_mut()
            .enumerate()
            .flat_map(move |(set_index, set)| {
                set.flush().into_iter().map(move |(_, block)| WriteBack {
                    tag: block.tag,
                    address: geometry.block_address(set_index, block.tag),
                    set_index,
                    data: block.data,
                    cause: WriteBackCause::Flush,
                })
            })
            .collect();
        debug!(dirty = write_backs.len(), "cache flushed");
        write_backs
    }
}

impl<D> Cache<D> {
    /// Returns `true` if the block containing `address` is resident.
    ///
    /// Does not update replacement state.
    pub fn contains(&self, address: u64) -> bool {
        let (set_index, tag) = self.geometry.decompose(address);
        self.sets[set_index].contains(tag)
    }

    /// Splits `address` into `(set_index, tag)`.
    pub const fn decompose(&self, address: u64) -> (usize, u64) {
        self.geometry.decompose(address)
    }

    /// Base address of the block with `tag` in set `set_index`.
    pub const fn block_address(&self, set_index: usize, tag: u64) -> u64 {
        self.geometry.block_address(set_index, tag)
    }

    /// Address mapping used by this cache.
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Returns set `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&Set<D>> {
        self.sets.get(index)
    }

    /// All sets in index order.
    pub fn sets(&self) -> &[Set<D>] {
        &self.sets
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Associativity.
    pub const fn set_size(&self) -> usize {
        self.set_size
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Replacement policy shared by every set.
    pub const fn replacement_policy(&self) -> PolicyType {
        self.replacement_policy
    }

    /// Write policy.
    pub const fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Total data capacity in bytes.
    pub fn capacity_bytes(&self) -> usize {
        self.sets
            .len()
            .saturating_mul(self.set_size)
            .saturating_mul(self.block_size)
    }

    /// Number of valid blocks across all sets.
    pub fn occupancy(&self) -> usize {
        self.sets.iter().map(Set::occupancy).sum()
    }
}

/// Builds the write-through event for a write of `data` to `tag`.
fn write_through<D>(geometry: Geometry, set_index: usize, tag: u64, data: D) -> WriteBack<D> {
    let address = geometry.block_address(set_index, tag);
    debug!(set = set_index, tag, address, "write-through write");
    WriteBack {
        tag,
        address,
        set_index,
        data,
        cause: WriteBackCause::WriteThrough,
    }
}

/// Installs `tag` into `set`, displacing the policy's victim if the set is full.
///
/// Returns the slot used, the displaced block and, if it was dirty, its
/// write-back event.
fn install<D: Clone + Default>(
    set: &mut Set<D>,
    geometry: Geometry,
    set_index: usize,
    tag: u64,
    data: D,
    dirty: bool,
) -> (usize, Option<Evicted<D>>, Option<WriteBack<D>>) {
    let way = set.find_victim();
    let Some(old) = set.replace_block(way, tag, data, dirty) else {
        return (way, None, None);
    };

    let address = geometry.block_address(set_index, old.tag);
    debug!(
        set = set_index,
        way,
        victim = old.tag,
        dirty = old.dirty,
        "evicted block"
    );
    if old.dirty {
        debug!(set = set_index, tag = old.tag, address, "write-back on eviction");
    }
    let write_back = old.dirty.then(|| WriteBack {
        tag: old.tag,
        address,
        set_index,
        data: old.data.clone(),
        cause: WriteBackCause::Eviction,
    });
    let evicted = Evicted {
        tag: old.tag,
        address,
        way,
        data: old.data,
        dirty: old.dirty,
    };
    (way, Some(evicted), write_back)
}
