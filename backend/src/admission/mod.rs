//! Admission classifier
//!
//! Routes an admitted patient onto exactly one of the four waiting lines:
//!
//! | type       | urgency = priority OR priority flag | otherwise                |
//! |------------|-------------------------------------|--------------------------|
//! | general    | `general-priority`                  | `general-no-priority`    |
//! | specialist | `specialist-priority`               | `specialist-no-priority` |
//!
//! Classification cannot fail: patients are validated when constructed.

use crate::models::line::{WaitingLine, WaitingRoom};
use crate::models::patient::Patient;

/// Line a patient belongs on, given its current urgency and priority flag
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::admission::line_for;
/// use clinic_simulator_core_rs::{ConsultationType, Patient, Urgency, WaitingLine};
///
/// let mut patient = Patient::new("P1".to_string(), ConsultationType::Specialist, Urgency::Normal, 3).unwrap();
/// assert_eq!(line_for(&patient), WaitingLine::SpecialistNoPriority);
///
/// patient.mark_promoted();
/// assert_eq!(line_for(&patient), WaitingLine::SpecialistPriority);
/// ```
pub fn line_for(patient: &Patient) -> WaitingLine {
    WaitingLine::for_track(patient.consultation_type(), patient.qualifies_for_priority())
}

/// Stamp the arrival tick and enqueue the patient on its line
///
/// Returns the line the patient was placed on.
pub fn classify(mut patient: Patient, current_tick: usize, room: &mut WaitingRoom) -> WaitingLine {
    patient.mark_arrival(current_tick);
    let line = line_for(&patient);
    tracing::debug!(
        patient_id = patient.id(),
        tick = current_tick,
        line = line.as_str(),
        "patient classified"
    );
    room.enqueue(line, patient);
    line
}
