//! Event logging for scheduler replay and auditing.
//!
//! This module defines the Event enum which captures every notice the
//! scheduler emits. Events enable:
//! - Debugging (understand what happened and when)
//! - Auditing (verify promotions and departures)
//! - Analysis (extract per-tick activity)
//!
//! # Event Types
//!
//! Events are categorized by tick phase:
//! - **Admission**: patient leaves the admission queue for a waiting line
//! - **PromotionApplied**: an earlier registry promotion takes effect at admission
//! - **ConsultationStarted**: patient enters a service slot
//! - **Promoted**: patient waited past the aging threshold
//! - **Departed**: consultation finished and the slot was vacated
//!
//! # Example
//!
//! ```rust
//! use clinic_simulator_core_rs::models::Event;
//! use clinic_simulator_core_rs::WaitingLine;
//!
//! let event = Event::Admitted {
//!     tick: 3,
//!     patient_id: "P2".to_string(),
//!     line: WaitingLine::GeneralPriority,
//! };
//!
//! assert_eq!(event.tick(), 3);
//! assert_eq!(event.event_type(), "Admitted");
//! ```

use crate::models::line::WaitingLine;
use crate::models::patient::ConsultationType;

/// Scheduler event capturing a state change.
///
/// All events include a tick number for temporal ordering.
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Patient admitted and classified onto a waiting line
    Admitted {
        tick: usize,
        patient_id: String,
        line: WaitingLine,
    },

    /// Registry flag consumed at admission; patient now carries the priority flag
    PromotionApplied { tick: usize, patient_id: String },

    /// Patient entered a service slot
    ///
    /// `line` is the line the patient was dequeued from; `origin` is the
    /// queue origin written to the output record.
    ConsultationStarted {
        tick: usize,
        patient_id: String,
        track: ConsultationType,
        line: WaitingLine,
        origin: WaitingLine,
        wait: usize,
        priority_at_entry: bool,
    },

    /// Patient added to the promotion registry after waiting too long
    Promoted {
        tick: usize,
        patient_id: String,
        wait: usize,
    },

    /// Consultation finished and the slot was vacated
    Departed {
        tick: usize,
        patient_id: String,
        track: ConsultationType,
    },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::Admitted { tick, .. } => *tick,
            Event::PromotionApplied { tick, .. } => *tick,
            Event::ConsultationStarted { tick, .. } => *tick,
            Event::Promoted { tick, .. } => *tick,
            Event::Departed { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Admitted { .. } => "Admitted",
            Event::PromotionApplied { .. } => "PromotionApplied",
            Event::ConsultationStarted { .. } => "ConsultationStarted",
            Event::Promoted { .. } => "Promoted",
            Event::Departed { .. } => "Departed",
        }
    }

    /// Get the patient the event relates to
    pub fn patient_id(&self) -> &str {
        match self {
            Event::Admitted { patient_id, .. } => patient_id,
            Event::PromotionApplied { patient_id, .. } => patient_id,
            Event::ConsultationStarted { patient_id, .. } => patient_id,
            Event::Promoted { patient_id, .. } => patient_id,
            Event::Departed { patient_id, .. } => patient_id,
        }
    }

    /// Get the track the event concerns, if any
    pub fn track(&self) -> Option<ConsultationType> {
        match self {
            Event::ConsultationStarted { track, .. } => Some(*track),
            Event::Departed { track, .. } => Some(*track),
            Event::Admitted { line, .. } => Some(line.track()),
            _ => None,
        }
    }

    /// Get the waiting line the patient joined or left, if any
    pub fn line(&self) -> Option<WaitingLine> {
        match self {
            Event::Admitted { line, .. } => Some(*line),
            Event::ConsultationStarted { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Event log for storing and querying scheduler events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific patient
    pub fn events_for_patient(&self, patient_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.patient_id() == patient_id)
            .collect()
    }
}
