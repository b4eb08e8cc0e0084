//! Waiting lines
//!
//! Each consultation track has two waiting lines: a priority line and a
//! non-priority line. [`WaitingRoom`] owns all four.
//!
//! # Critical Invariants
//!
//! 1. **Strict precedence**: a track never draws from its non-priority line
//!    while its priority line holds a patient
//! 2. **Track isolation**: a line only ever holds patients of its own track

use crate::models::patient::{ConsultationType, Patient};
use crate::models::queue::FifoQueue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four waiting lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaitingLine {
    GeneralPriority,
    GeneralNoPriority,
    SpecialistPriority,
    SpecialistNoPriority,
}

impl WaitingLine {
    pub const ALL: [WaitingLine; 4] = [
        WaitingLine::GeneralPriority,
        WaitingLine::GeneralNoPriority,
        WaitingLine::SpecialistPriority,
        WaitingLine::SpecialistNoPriority,
    ];

    /// Line for a track, priority or not
    pub fn for_track(track: ConsultationType, priority: bool) -> Self {
        match (track, priority) {
            (ConsultationType::General, true) => WaitingLine::GeneralPriority,
            (ConsultationType::General, false) => WaitingLine::GeneralNoPriority,
            (ConsultationType::Specialist, true) => WaitingLine::SpecialistPriority,
            (ConsultationType::Specialist, false) => WaitingLine::SpecialistNoPriority,
        }
    }

    pub fn track(&self) -> ConsultationType {
        match self {
            WaitingLine::GeneralPriority | WaitingLine::GeneralNoPriority => {
                ConsultationType::General
            }
            WaitingLine::SpecialistPriority | WaitingLine::SpecialistNoPriority => {
                ConsultationType::Specialist
            }
        }
    }

    pub fn is_priority(&self) -> bool {
        matches!(
            self,
            WaitingLine::GeneralPriority | WaitingLine::SpecialistPriority
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WaitingLine::GeneralPriority => "general-priority",
            WaitingLine::GeneralNoPriority => "general-no-priority",
            WaitingLine::SpecialistPriority => "specialist-priority",
            WaitingLine::SpecialistNoPriority => "specialist-no-priority",
        }
    }

    fn index(&self) -> usize {
        match self {
            WaitingLine::GeneralPriority => 0,
            WaitingLine::GeneralNoPriority => 1,
            WaitingLine::SpecialistPriority => 2,
            WaitingLine::SpecialistNoPriority => 3,
        }
    }
}

impl fmt::Display for WaitingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The four waiting lines
///
/// # Example
///
/// ```rust
/// use clinic_simulator_core_rs::{ConsultationType, Patient, Urgency, WaitingLine, WaitingRoom};
///
/// let mut room = WaitingRoom::new();
/// let p1 = Patient::new("P1".to_string(), ConsultationType::General, Urgency::Normal, 2).unwrap();
/// let p2 = Patient::new("P2".to_string(), ConsultationType::General, Urgency::Priority, 2).unwrap();
///
/// room.enqueue(WaitingLine::GeneralNoPriority, p1);
/// room.enqueue(WaitingLine::GeneralPriority, p2);
///
/// let (next, line) = room.next_for_track(ConsultationType::General).unwrap();
/// assert_eq!(next.id(), "P2");
/// assert_eq!(line, WaitingLine::GeneralPriority);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaitingRoom {
    lines: [FifoQueue<Patient>; 4],
}

impl WaitingRoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self, line: WaitingLine) -> &FifoQueue<Patient> {
        &self.lines[line.index()]
    }

    /// Append a patient to the back of `line`
    pub fn enqueue(&mut self, line: WaitingLine, patient: Patient) {
        debug_assert_eq!(
            line.track(),
            patient.consultation_type(),
            "patient routed onto another track's line"
        );
        self.lines[line.index()].enqueue(patient);
    }

    /// Dequeue the next patient for a track, priority line first
    ///
    /// Returns the patient together with the line it left.
    pub fn next_for_track(&mut self, track: ConsultationType) -> Option<(Patient, WaitingLine)> {
        [true, false].into_iter().find_map(|priority| {
            let line = WaitingLine::for_track(track, priority);
            self.lines[line.index()]
                .dequeue()
                .map(|patient| (patient, line))
        })
    }

    /// Number of patients waiting for a track
    pub fn waiting_for_track(&self, track: ConsultationType) -> usize {
        self.line(WaitingLine::for_track(track, true)).len()
            + self.line(WaitingLine::for_track(track, false)).len()
    }

    /// Total patients across all four lines
    pub fn total_waiting(&self) -> usize {
        self.lines.iter().map(FifoQueue::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(FifoQueue::is_empty)
    }

    /// Iterate every waiting patient with its line, line by line
    pub fn iter(&self) -> impl Iterator<Item = (WaitingLine, &Patient)> {
        WaitingLine::ALL
            .into_iter()
            .flat_map(move |line| self.line(line).iter().map(move |p| (line, p)))
    }
}
