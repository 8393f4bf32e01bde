//! Error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Configuration Errors:** Rejecting impossible geometries and unknown policy names.
//! 2. **Trace Errors:** Reporting unreadable or malformed trace input with line numbers.
//!
//! Cache misses, empty slots and clean evictions are never errors; they are
//! reported through [`AccessResult`](crate::cache::AccessResult).

use std::fmt;

use thiserror::Error;

/// Which policy family an unrecognised name was given for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    /// Block replacement policy (FIFO, LRU, Random).
    Replacement,
    /// Write policy (write-back, write-through).
    Write,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replacement => write!(f, "replacement"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Configuration-time errors raised while constructing a cache.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A geometry parameter is zero, or the total capacity overflows `usize`.
    #[error(
        "invalid cache geometry: num_sets={num_sets}, set_size={set_size}, block_size={block_size} (all must be > 0 and their product must fit in usize)"
    )]
    InvalidGeometry {
        /// Requested number of sets.
        num_sets: usize,
        /// Requested associativity.
        set_size: usize,
        /// Requested block size in bytes.
        block_size: usize,
    },

    /// A policy name did not match any supported policy.
    #[error("unknown {kind} policy `{name}`")]
    UnknownPolicy {
        /// Policy family the name was given for.
        kind: PolicyKind,
        /// The rejected name, as supplied.
        name: String,
    },
}

/// Errors raised while loading or parsing an access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A trace line is malformed.
    #[error("trace line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// Human-readable description of the problem.
        message: String,
    },

    /// The cache configuration for the run is invalid.
    #[error(transparent)]
    Config(#[from] CacheError),
}
