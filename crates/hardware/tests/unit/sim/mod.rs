//! Simulation driver tests.

/// Driver loop and flush accounting.
pub mod simulator;
