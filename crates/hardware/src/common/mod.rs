//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Memory Access:** Definitions for categorizing requests (Read/Write).
//! 2. **Error Handling:** Configuration and trace error types.

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use data::{AccessType, Operation};
pub use error::{CacheError, PolicyKind, TraceError};
