//! Access Trace Loading and Generation.
//!
//! This module provides the request streams fed to the simulator. It performs:
//! 1. **Parsing:** Reads a text trace, one request per line.
//! 2. **Loading:** Reads a trace file from disk.
//! 3. **Generation:** Produces a deterministic pseudo-random trace from a seed.
//!
//! # Format
//!
//! ```text
//! # comment
//! R 0x1f40
//! W 0x1f48 42
//! read 8000
//! ```
//!
//! The operation is `R`/`READ` or `W`/`WRITE` (case-insensitive). Addresses and
//! values are decimal or `0x`-prefixed hexadecimal. Writes require a value.

use std::fmt;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::common::{Operation, TraceError};

/// One request of an access trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// Byte address of the request.
    pub address: u64,
    /// Operation, with the payload for writes.
    pub op: Operation<u64>,
}

impl TraceEntry {
    /// A read of `address`.
    pub const fn read(address: u64) -> Self {
        Self {
            address,
            op: Operation::Read,
        }
    }

    /// A write of `value` to `address`.
    pub const fn write(address: u64, value: u64) -> Self {
        Self {
            address,
            op: Operation::Write(value),
        }
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            Operation::Read => write!(f, "R {:#x}", self.address),
            Operation::Write(value) => write!(f, "W {:#x} {}", self.address, value),
        }
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal number.
fn parse_number(token: &str) -> Option<u64> {
    let token = token.replace('_', "");
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}

/// Parses one trace line; blank and comment-only lines yield `None`.
fn parse_line(line_no: usize, line: &str) -> Result<Option<TraceEntry>, TraceError> {
    let content = line.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }

    let err = |message: String| TraceError::Parse {
        line: line_no,
        message,
    };
    let mut tokens = content.split_whitespace();
    let op = tokens.next().unwrap_or_default();
    let address = tokens
        .next()
        .ok_or_else(|| err(format!("missing address after `{op}`")))?;
    let address =
        parse_number(address).ok_or_else(|| err(format!("invalid address `{address}`")))?;

    let entry = match op.to_ascii_lowercase().as_str() {
        "r" | "read" => TraceEntry::read(address),
        "w" | "write" => {
            let value = tokens
                .next()
                .ok_or_else(|| err("write is missing its value".to_string()))?;
            let value =
                parse_number(value).ok_or_else(|| err(format!("invalid value `{value}`")))?;
            TraceEntry::write(address, value)
        }
        other => return Err(err(format!("unknown operation `{other}`"))),
    };

    if let Some(extra) = tokens.next() {
        return Err(err(format!("unexpected token `{extra}`")));
    }
    Ok(Some(entry))
}

/// Parses a whole trace.
///
/// # Errors
///
/// Returns [`TraceError::Parse`] for the first malformed line.
pub fn parse_trace(text: &str) -> Result<Vec<TraceEntry>, TraceError> {
    let mut entries = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(entry) = parse_line(idx + 1, line)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read, or
/// [`TraceError::Parse`] for the first malformed line.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceEntry>, TraceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let entries = parse_trace(&text)?;
    debug!(path = %path.display(), entries = entries.len(), "trace loaded");
    Ok(entries)
}

/// Generates `count` uniformly distributed requests over `[0, address_space)`.
///
/// Each request is a write with probability `write_ratio` (clamped to
/// `[0, 1]`), carrying a random value. The same seed always yields the same
/// trace.
pub fn random_trace(
    seed: u64,
    count: usize,
    address_space: u64,
    write_ratio: f64,
) -> Vec<TraceEntry> {
    let mut rng = StdRng::seed_from_u64(seed);
    let write_ratio = if write_ratio.is_finite() {
        write_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let address_space = address_space.max(1);

    (0..count)
        .map(|_| {
            let address = rng.gen_range(0..address_space);
            if rng.gen_bool(write_ratio) {
                TraceEntry::write(address, rng.next_u64())
            } else {
                TraceEntry::read(address)
            }
        })
        .collect()
}
