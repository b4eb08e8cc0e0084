//! Clinic Simulator Core - Rust Engine
//!
//! Discrete-time admission and consultation scheduler with deterministic
//! execution.
//!
//! # Architecture
//!
//! - **core**: Time management
//! - **models**: Domain types (Patient, queues, waiting lines, registry, logs)
//! - **admission**: Routes admitted patients onto one of four waiting lines
//! - **track**: Per-track service slot (general, specialist)
//! - **scheduler**: Main tick loop
//! - **intake**: Roster parsing
//! - **report**: Aggregation over the output log
//!
//! # Critical Invariants
//!
//! 1. Every supplied patient is in exactly one place at any tick: admission
//!    queue, one waiting line, one service slot, or done
//! 2. Tick order is admission, general track, specialist track
//! 3. No randomness, no wall-clock time: same roster, same output log

// Module declarations
pub mod admission;
pub mod core;
pub mod intake;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod track;

// Re-exports for convenience
pub use core::time::TickClock;
pub use intake::{load_roster, parse_roster, IntakeError};
pub use models::{
    event::{Event, EventLog},
    line::{WaitingLine, WaitingRoom},
    patient::{ConsultationType, Patient, PatientError, Urgency},
    queue::FifoQueue,
    record::{OutputLog, OutputRecord},
    registry::{AdmissionPromotions, PromotionRegistry},
};
pub use report::Summary;
pub use scheduler::{simulate, Occupancy, Scheduler, SchedulerConfig, SchedulerError, TickResult};
pub use track::{TrackController, TrackStep};
