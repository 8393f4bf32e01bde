//! Shared helpers for the cache test suite.

/// Config/cache builders and address helpers.
pub mod harness;
