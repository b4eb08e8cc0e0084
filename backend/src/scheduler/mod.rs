//! Scheduler - main tick loop
//!
//! Drives admissions and both consultation tracks until every patient has
//! been served.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use engine::{
    simulate, Occupancy, Scheduler, SchedulerConfig, SchedulerError, TickResult,
};
