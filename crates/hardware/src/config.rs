//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structure and enums used to parameterize
//! a cache. It provides:
//! 1. **Defaults:** Baseline geometry and policies.
//! 2. **Structures:** [`CacheConfig`], deserializable from JSON.
//! 3. **Enums:** Replacement policy and write policy types, parsed from their
//!    conventional names (`"FIFO"`, `"LRU"`, `"Random"`, `"write-back"`, `"write-through"`).
//!
//! Configuration is supplied as JSON (`CacheConfig::from_json`), from the CLI flags,
//! or via `CacheConfig::default()`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::{CacheError, PolicyKind};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default number of sets.
    pub const NUM_SETS: usize = 64;

    /// Default associativity (4-way set-associative).
    pub const SET_SIZE: usize = 4;

    /// Default block size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes.
    pub const BLOCK_SIZE: usize = 64;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which block to evict
/// when a new block must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReplacementPolicy {
    /// First In First Out replacement policy.
    ///
    /// Evicts the block installed longest ago, regardless of reads.
    Fifo,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the block that was accessed least recently.
    #[default]
    Lru,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly random slot of the set.
    Random,
}

impl ReplacementPolicy {
    /// All supported replacement policies.
    pub const ALL: [Self; 3] = [Self::Fifo, Self::Lru, Self::Random];

    /// Canonical name of the policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Random => "Random",
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "lru" => Ok(Self::Lru),
            "random" | "rand" => Ok(Self::Random),
            _ => Err(CacheError::UnknownPolicy {
                kind: PolicyKind::Replacement,
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ReplacementPolicy {
    type Error = CacheError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReplacementPolicy> for String {
    fn from(policy: ReplacementPolicy) -> Self {
        policy.as_str().to_string()
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write policy applied to write requests.
///
/// Governs whether a write is propagated to backing storage immediately
/// or deferred until the dirty block is evicted. Both policies allocate on
/// a write miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WritePolicy {
    /// Mark the block dirty; write it back only when it is evicted.
    #[default]
    WriteBack,
    /// Propagate every write immediately; blocks never stay dirty.
    WriteThrough,
}

impl WritePolicy {
    /// All supported write policies.
    pub const ALL: [Self; 2] = [Self::WriteBack, Self::WriteThrough];

    /// Canonical name of the policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WriteBack => "write-back",
            Self::WriteThrough => "write-through",
        }
    }
}

impl FromStr for WritePolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "write-back" | "writeback" | "wb" | "back" => Ok(Self::WriteBack),
            "write-through" | "writethrough" | "wt" | "through" => Ok(Self::WriteThrough),
            _ => Err(CacheError::UnknownPolicy {
                kind: PolicyKind::Write,
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for WritePolicy {
    type Error = CacheError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WritePolicy> for String {
    fn from(policy: WritePolicy) -> Self {
        policy.as_str().to_string()
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry and policy configuration for a single cache.
///
/// Missing JSON fields fall back to the defaults.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy, WritePolicy};
///
/// let json = r#"{
///     "num_sets": 16,
///     "set_size": 2,
///     "block_size": 32,
///     "replacement_policy": "FIFO",
///     "write_policy": "write-through",
///     "seed": 7
/// }"#;
///
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.num_sets, 16);
/// assert_eq!(config.replacement_policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.write_policy, WritePolicy::WriteThrough);
/// assert_eq!(config.capacity_bytes(), 16 * 2 * 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of sets.
    pub num_sets: usize,
    /// Associativity (blocks per set).
    pub set_size: usize,
    /// Block size in bytes.
    pub block_size: usize,
    /// Victim selection algorithm for full sets.
    pub replacement_policy: ReplacementPolicy,
    /// Write propagation policy.
    pub write_policy: WritePolicy,
    /// Seed for the Random replacement policy. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            num_sets: defaults::NUM_SETS,
            set_size: defaults::SET_SIZE,
            block_size: defaults::BLOCK_SIZE,
            replacement_policy: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
            seed: None,
        }
    }
}

impl CacheConfig {
    /// Builds a configuration from policy names, as a driver reading flags would.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnknownPolicy`] if either name is not recognised,
    /// or [`CacheError::InvalidGeometry`] if any dimension is zero.
    pub fn from_names(
        num_sets: usize,
        set_size: usize,
        block_size: usize,
        replacement_policy: &str,
        write_policy: &str,
    ) -> Result<Self, CacheError> {
        let config = Self {
            num_sets,
            set_size,
            block_size,
            replacement_policy: replacement_policy.parse()?,
            write_policy: write_policy.parse()?,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Decodes a configuration from a JSON document.
    ///
    /// Policy names are checked while decoding; geometry is checked by
    /// [`validate`](Self::validate) or when the cache is built.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the document is malformed or names an
    /// unknown policy.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the same configuration with a fixed Random-policy seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every dimension is non-zero and that the total capacity
    /// fits in a `usize`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidGeometry`] describing the rejected geometry.
    pub const fn validate(&self) -> Result<(), CacheError> {
        if self.num_sets == 0
            || self.set_size == 0
            || self.block_size == 0
            || self.checked_capacity().is_none()
        {
            return Err(CacheError::InvalidGeometry {
                num_sets: self.num_sets,
                set_size: self.set_size,
                block_size: self.block_size,
            });
        }
        Ok(())
    }

    /// Total data capacity in bytes, saturating at `usize::MAX`.
    pub const fn capacity_bytes(&self) -> usize {
        match self.checked_capacity() {
            Some(bytes) => bytes,
            None => usize::MAX,
        }
    }

    const fn checked_capacity(&self) -> Option<usize> {
        match self.num_sets.checked_mul(self.set_size) {
            Some(blocks) => blocks.checked_mul(self.block_size),
            None => None,
        }
    }
}
