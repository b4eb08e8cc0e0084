//! Output records
//!
//! One [`OutputRecord`] is appended each time a patient enters consultation.
//! The [`OutputLog`] is append-only and ordered by consultation entry, which
//! is the only ordering downstream reporting relies on.

use crate::models::line::WaitingLine;
use crate::models::patient::ConsultationType;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single consultation-entry row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub patient_id: String,
    pub consultation_type: ConsultationType,
    /// Registry membership observed right after the entry-time aging check
    pub priority_at_entry: bool,
    /// Priority line if the patient's promotion was applied at admission,
    /// otherwise the track's non-priority line
    pub queue_origin: WaitingLine,
    /// `consultation_start_tick - arrival_tick`
    pub wait_duration: usize,
    /// Tick the consultation started
    pub entry_tick: usize,
}

/// Append-only sequence of output records
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::{ConsultationType, OutputLog, OutputRecord, WaitingLine};
///
/// let mut log = OutputLog::new();
/// log.append(OutputRecord {
///     patient_id: "P1".to_string(),
///     consultation_type: ConsultationType::General,
///     priority_at_entry: false,
///     queue_origin: WaitingLine::GeneralNoPriority,
///     wait_duration: 0,
///     entry_tick: 0,
/// });
///
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.digest().len(), 64);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputLog {
    records: Vec<OutputRecord>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn append(&mut self, record: OutputRecord) {
        debug_assert!(
            self.records
                .last()
                .map_or(true, |last| last.entry_tick <= record.entry_tick),
            "output records must be appended in entry order"
        );
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputRecord> {
        self.records.iter()
    }

    /// Records for one patient identifier, in entry order
    pub fn for_patient(&self, patient_id: &str) -> Vec<&OutputRecord> {
        self.records
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .collect()
    }

    /// SHA-256 over the ordered records, hex encoded
    ///
    /// Two runs over the same roster and configuration produce the same
    /// digest.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for r in &self.records {
            hasher.update(r.patient_id.as_bytes());
            hasher.update([0u8]);
            hasher.update(r.consultation_type.as_str().as_bytes());
            hasher.update([0u8, u8::from(r.priority_at_entry), 0u8]);
            hasher.update(r.queue_origin.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update((r.wait_duration as u64).to_le_bytes());
            hasher.update((r.entry_tick as u64).to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

impl<'a> IntoIterator for &'a OutputLog {
    type Item = &'a OutputRecord;
    type IntoIter = std::slice::Iter<'a, OutputRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, line: WaitingLine, wait: usize, tick: usize) -> OutputRecord {
        OutputRecord {
            patient_id: id.to_string(),
            consultation_type: line.track(),
            priority_at_entry: false,
            queue_origin: line,
            wait_duration: wait,
            entry_tick: tick,
        }
    }

    #[test]
    fn test_for_patient_keeps_entry_order() {
        let mut log = OutputLog::new();
        log.append(record("P1", WaitingLine::GeneralNoPriority, 0, 0));
        log.append(record("S1", WaitingLine::SpecialistNoPriority, 0, 3));
        log.append(record("P1", WaitingLine::GeneralPriority, 9, 20));

        let rows = log.for_patient("P1");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].entry_tick, 20);
        assert_eq!(rows[1].queue_origin, WaitingLine::GeneralPriority);
    }

    #[test]
    fn test_digest_depends_on_order() {
        let mut a = OutputLog::new();
        a.append(record("P1", WaitingLine::GeneralNoPriority, 0, 0));
        a.append(record("P2", WaitingLine::GeneralNoPriority, 0, 0));

        let mut b = OutputLog::new();
        b.append(record("P2", WaitingLine::GeneralNoPriority, 0, 0));
        b.append(record("P1", WaitingLine::GeneralNoPriority, 0, 0));

        assert_ne!(a.digest(), b.digest());
        assert_eq!(a.digest(), a.clone().digest());
    }

    #[test]
    fn test_serializes_as_array_of_rows() {
        let mut log = OutputLog::new();
        log.append(record("P1", WaitingLine::GeneralNoPriority, 2, 5));
        let json = serde_json::to_value(&log).unwrap();

        assert_eq!(json[0]["patient_id"], "P1");
        assert_eq!(json[0]["consultation_type"], "general");
        assert_eq!(json[0]["queue_origin"], "general-no-priority");
        assert_eq!(json[0]["wait_duration"], 2);
    }
}
