//! Patient model
//!
//! Represents one patient waiting for a consultation.
//! Each patient has:
//! - Identifier (non-empty, immutable)
//! - Consultation type (general or specialist)
//! - Urgency set at intake (priority or normal)
//! - Estimated consultation duration in ticks
//! - Lifecycle ticks (arrival, consultation start)
//! - Priority flag, set when an earlier promotion is applied on re-admission
//!
//! Identity fields are validated once, in [`Patient::new`]. Only the lifecycle
//! fields change afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Consultation track a patient is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    General,
    Specialist,
}

impl ConsultationType {
    /// Both tracks, in the order the scheduler steps them each tick
    pub const ALL: [ConsultationType; 2] = [ConsultationType::General, ConsultationType::Specialist];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationType::General => "general",
            ConsultationType::Specialist => "specialist",
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ConsultationType {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PatientError::EmptyConsultationType);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "general" => Ok(ConsultationType::General),
            "specialist" => Ok(ConsultationType::Specialist),
            _ => Err(PatientError::UnknownConsultationType(trimmed.to_string())),
        }
    }
}

/// Clinical urgency assigned at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Priority,
    Normal,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Priority => "priority",
            Urgency::Normal => "normal",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = PatientError;

    /// Accepts `priority` and `normal`; `no_priority` / `no-priority` are
    /// aliases of `normal`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PatientError::EmptyUrgency);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "priority" => Ok(Urgency::Priority),
            "normal" | "no_priority" | "no-priority" => Ok(Urgency::Normal),
            _ => Err(PatientError::UnknownUrgency(trimmed.to_string())),
        }
    }
}

/// Errors raised while constructing a patient record
#[derive(Debug, Error, PartialEq)]
pub enum PatientError {
    #[error("Patient identifier must not be empty")]
    EmptyId,

    #[error("Consultation type must not be empty")]
    EmptyConsultationType,

    #[error("Unknown consultation type '{0}' (expected general or specialist)")]
    UnknownConsultationType(String),

    #[error("Urgency must not be empty")]
    EmptyUrgency,

    #[error("Unknown urgency '{0}' (expected priority or normal)")]
    UnknownUrgency(String),

    #[error("Estimated duration must be non-negative, got {0}")]
    NegativeDuration(i64),
}

/// A patient record flowing through the scheduler
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::{ConsultationType, Patient, Urgency};
///
/// let patient = Patient::new(
///     "P1".to_string(),
///     ConsultationType::General,
///     Urgency::Normal,
///     5,
/// ).unwrap();
///
/// assert_eq!(patient.id(), "P1");
/// assert_eq!(patient.estimated_duration(), 5);
/// assert!(patient.arrival_tick().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique patient identifier
    id: String,

    /// Track the patient waits for
    consultation_type: ConsultationType,

    /// Urgency set at intake
    urgency: Urgency,

    /// Ticks the consultation occupies once started
    estimated_duration: usize,

    /// Tick of the latest admission from the admission queue
    arrival_tick: Option<usize>,

    /// Tick the current consultation started
    ///
    /// Cleared on every new admission so each waiting cycle starts fresh.
    consultation_start_tick: Option<usize>,

    /// Set when a registry promotion is applied at admission
    ///
    /// Distinct from `urgency`: a normal-urgency patient with this flag is
    /// still classified onto the priority line.
    priority_flag: bool,
}

impl Patient {
    /// Create a validated patient
    ///
    /// # Errors
    /// * `EmptyId` - identifier is empty or whitespace
    /// * `NegativeDuration` - `estimated_duration < 0`
    pub fn new(
        id: String,
        consultation_type: ConsultationType,
        urgency: Urgency,
        estimated_duration: i64,
    ) -> Result<Self, PatientError> {
        if id.trim().is_empty() {
            return Err(PatientError::EmptyId);
        }
        let estimated_duration = usize::try_from(estimated_duration)
            .map_err(|_| PatientError::NegativeDuration(estimated_duration))?;

        Ok(Self {
            id,
            consultation_type,
            urgency,
            estimated_duration,
            arrival_tick: None,
            consultation_start_tick: None,
            priority_flag: false,
        })
    }

    /// Create a patient from raw intake strings
    ///
    /// # Example
    /// ```
    /// use clinic_simulator_core_rs::{ConsultationType, Patient, PatientError, Urgency};
    ///
    /// let patient = Patient::from_fields("P7", "specialist", "priority", 4).unwrap();
    /// assert_eq!(patient.consultation_type(), ConsultationType::Specialist);
    /// assert_eq!(patient.urgency(), Urgency::Priority);
    ///
    /// let err = Patient::from_fields("P8", "", "normal", 4).unwrap_err();
    /// assert_eq!(err, PatientError::EmptyConsultationType);
    /// ```
    pub fn from_fields(
        id: &str,
        consultation_type: &str,
        urgency: &str,
        estimated_duration: i64,
    ) -> Result<Self, PatientError> {
        if id.trim().is_empty() {
            return Err(PatientError::EmptyId);
        }
        let consultation_type = consultation_type.parse()?;
        let urgency = urgency.parse()?;
        Self::new(id.to_string(), consultation_type, urgency, estimated_duration)
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn consultation_type(&self) -> ConsultationType {
        self.consultation_type
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn estimated_duration(&self) -> usize {
        self.estimated_duration
    }

    pub fn arrival_tick(&self) -> Option<usize> {
        self.arrival_tick
    }

    pub fn consultation_start_tick(&self) -> Option<usize> {
        self.consultation_start_tick
    }

    pub fn priority_flag(&self) -> bool {
        self.priority_flag
    }

    /// True if the patient belongs on its track's priority line
    pub fn qualifies_for_priority(&self) -> bool {
        self.urgency == Urgency::Priority || self.priority_flag
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Record an admission at `tick`, starting a new waiting cycle
    pub fn mark_arrival(&mut self, tick: usize) {
        self.arrival_tick = Some(tick);
        self.consultation_start_tick = None;
    }

    /// Apply a registry promotion
    pub fn mark_promoted(&mut self) {
        self.priority_flag = true;
    }

    /// Start the consultation at `tick` and return the wait in ticks
    ///
    /// A patient that was never admitted counts as arriving at `tick`.
    pub fn begin_consultation(&mut self, tick: usize) -> usize {
        let arrival = self.arrival_tick.unwrap_or(tick);
        debug_assert!(tick >= arrival, "consultation cannot start before arrival");
        self.consultation_start_tick = Some(tick);
        tick.saturating_sub(arrival)
    }

    /// Ticks waited between the latest arrival and the consultation start
    pub fn wait_duration(&self) -> Option<usize> {
        match (self.arrival_tick, self.consultation_start_tick) {
            (Some(arrival), Some(start)) => Some(start.saturating_sub(arrival)),
            _ => None,
        }
    }

    /// Check whether the consultation has run its estimated duration by `tick`
    ///
    /// Returns false while the patient is not in consultation.
    pub fn is_consultation_complete(&self, tick: usize) -> bool {
        self.consultation_start_tick
            .map(|start| tick >= start + self.estimated_duration)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general_normal(est: i64) -> Patient {
        Patient::new("P1".to_string(), ConsultationType::General, Urgency::Normal, est).unwrap()
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = Patient::new("   ".to_string(), ConsultationType::General, Urgency::Normal, 1)
            .unwrap_err();
        assert_eq!(err, PatientError::EmptyId);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = Patient::new("P1".to_string(), ConsultationType::General, Urgency::Normal, -2)
            .unwrap_err();
        assert_eq!(err, PatientError::NegativeDuration(-2));
    }

    #[test]
    fn test_zero_duration_allowed() {
        assert_eq!(general_normal(0).estimated_duration(), 0);
    }

    #[test]
    fn test_parse_urgency_aliases() {
        assert_eq!("PRIORITY".parse::<Urgency>().unwrap(), Urgency::Priority);
        assert_eq!("no_priority".parse::<Urgency>().unwrap(), Urgency::Normal);
        assert_eq!("no-priority".parse::<Urgency>().unwrap(), Urgency::Normal);
        assert_eq!(
            "urgent".parse::<Urgency>().unwrap_err(),
            PatientError::UnknownUrgency("urgent".to_string())
        );
    }

    #[test]
    fn test_lifecycle_wait_and_completion() {
        let mut patient = general_normal(3);
        patient.mark_arrival(2);
        assert!(!patient.is_consultation_complete(100));

        let wait = patient.begin_consultation(6);
        assert_eq!(wait, 4);
        assert_eq!(patient.wait_duration(), Some(4));
        assert!(!patient.is_consultation_complete(8));
        assert!(patient.is_consultation_complete(9));
    }

    #[test]
    fn test_rearrival_clears_consultation_start() {
        let mut patient = general_normal(3);
        patient.mark_arrival(0);
        patient.begin_consultation(1);
        patient.mark_arrival(9);
        assert_eq!(patient.consultation_start_tick(), None);
        assert_eq!(patient.arrival_tick(), Some(9));
    }

    #[test]
    fn test_priority_flag_qualifies_normal_patient() {
        let mut patient = general_normal(1);
        assert!(!patient.qualifies_for_priority());
        patient.mark_promoted();
        assert!(patient.qualifies_for_priority());
        assert_eq!(patient.urgency(), Urgency::Normal);
    }
}
