//! Simulation driver and trace sources.
//!
//! Provides trace loading/generation and the loop that feeds requests to a
//! cache while collecting statistics.

pub mod simulator;
pub mod trace;

pub use simulator::Simulator;
pub use trace::{TraceEntry, load_trace, parse_trace, random_trace};
