//! Domain models for the clinic scheduler

pub mod event;
pub mod line;
pub mod patient;
pub mod queue;
pub mod record;
pub mod registry;

// Re-exports
pub use event::{Event, EventLog};
pub use line::{WaitingLine, WaitingRoom};
pub use patient::{ConsultationType, Patient, PatientError, Urgency};
pub use queue::FifoQueue;
pub use record::{OutputLog, OutputRecord};
pub use registry::{AdmissionPromotions, PromotionRegistry};
