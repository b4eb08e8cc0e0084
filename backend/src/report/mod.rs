//! Output log summary
//!
//! Aggregates an [`OutputLog`] the way the clinic reports it:
//! - mean priority-at-entry (as 0/1) per consultation type
//! - mean wait per queue origin
//!
//! Groups are kept in `BTreeMap`s so rendering order is stable.

use crate::models::line::WaitingLine;
use crate::models::patient::ConsultationType;
use crate::models::record::OutputLog;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Running mean over one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GroupStat {
    pub count: usize,
    pub mean: f64,
}

impl GroupStat {
    fn from_values(values: &[usize]) -> Self {
        let count = values.len();
        let mean = if count == 0 {
            0.0
        } else {
            values.iter().sum::<usize>() as f64 / count as f64
        };
        Self { count, mean }
    }
}

/// Aggregate view of a finished run
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::report::Summary;
/// use clinic_simulator_core_rs::{simulate, FifoQueue, Patient, SchedulerConfig, WaitingLine};
///
/// let admission: FifoQueue<Patient> = vec![
///     Patient::from_fields("P1", "general", "normal", 5).unwrap(),
///     Patient::from_fields("P2", "general", "priority", 3).unwrap(),
/// ]
/// .into();
/// let log = simulate(SchedulerConfig::default(), admission).unwrap();
///
/// let summary = Summary::from_log(&log);
/// assert_eq!(summary.total_records, 2);
/// assert_eq!(summary.wait_by_origin[&WaitingLine::GeneralNoPriority].mean, 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_records: usize,
    /// Records with `priority_at_entry == true`
    pub promoted_at_entry: usize,
    pub max_wait: usize,
    pub priority_by_type: BTreeMap<ConsultationType, GroupStat>,
    pub wait_by_origin: BTreeMap<WaitingLine, GroupStat>,
}

impl Summary {
    pub fn from_log(log: &OutputLog) -> Self {
        let mut priority: BTreeMap<ConsultationType, Vec<usize>> = BTreeMap::new();
        let mut waits: BTreeMap<WaitingLine, Vec<usize>> = BTreeMap::new();

        for record in log {
            priority
                .entry(record.consultation_type)
                .or_default()
                .push(usize::from(record.priority_at_entry));
            waits
                .entry(record.queue_origin)
                .or_default()
                .push(record.wait_duration);
        }

        Self {
            total_records: log.len(),
            promoted_at_entry: log.iter().filter(|r| r.priority_at_entry).count(),
            max_wait: log.iter().map(|r| r.wait_duration).max().unwrap_or(0),
            priority_by_type: priority
                .into_iter()
                .map(|(k, v)| (k, GroupStat::from_values(&v)))
                .collect(),
            wait_by_origin: waits
                .into_iter()
                .map(|(k, v)| (k, GroupStat::from_values(&v)))
                .collect(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean priority at entry by consultation type")?;
        for (kind, stat) in &self.priority_by_type {
            writeln!(f, "  {:<24} {:>6.3}  (n={})", kind, stat.mean, stat.count)?;
        }
        writeln!(f)?;
        writeln!(f, "Mean wait by queue origin")?;
        for (line, stat) in &self.wait_by_origin {
            writeln!(f, "  {:<24} {:>6.2}  (n={})", line, stat.mean, stat.count)?;
        }
        writeln!(f)?;
        write!(
            f,
            "{} consultations, {} promoted at entry, max wait {}",
            self.total_records, self.promoted_at_entry, self.max_wait
        )
    }
}

/// Render the output log as a fixed-width table
pub fn render_table(log: &OutputLog) -> String {
    let mut out = format!(
        "{:<12} {:<11} {:<9} {:<24} {:>5} {:>5}\n",
        "patient", "type", "priority", "queue", "wait", "tick"
    );
    for r in log {
        out.push_str(&format!(
            "{:<12} {:<11} {:<9} {:<24} {:>5} {:>5}\n",
            r.patient_id, r.consultation_type, r.priority_at_entry, r.queue_origin, r.wait_duration, r.entry_tick
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::OutputRecord;

    fn record(id: &str, line: WaitingLine, priority: bool, wait: usize) -> OutputRecord {
        OutputRecord {
            patient_id: id.to_string(),
            consultation_type: line.track(),
            priority_at_entry: priority,
            queue_origin: line,
            wait_duration: wait,
            entry_tick: 0,
        }
    }

    #[test]
    fn test_empty_log() {
        let summary = Summary::from_log(&OutputLog::new());
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.max_wait, 0);
        assert!(summary.wait_by_origin.is_empty());
    }

    #[test]
    fn test_grouped_means() {
        let mut log = OutputLog::new();
        log.append(record("G1", WaitingLine::GeneralNoPriority, false, 2));
        log.append(record("G2", WaitingLine::GeneralNoPriority, true, 10));
        log.append(record("S1", WaitingLine::SpecialistPriority, false, 1));

        let summary = Summary::from_log(&log);
        assert_eq!(summary.promoted_at_entry, 1);
        assert_eq!(summary.max_wait, 10);

        let general = summary.priority_by_type[&ConsultationType::General];
        assert_eq!(general.count, 2);
        assert!((general.mean - 0.5).abs() < f64::EPSILON);

        let waits = summary.wait_by_origin[&WaitingLine::GeneralNoPriority];
        assert!((waits.mean - 6.0).abs() < f64::EPSILON);
        assert!(!summary.wait_by_origin.contains_key(&WaitingLine::GeneralPriority));
    }

    #[test]
    fn test_render_table_has_row_per_record() {
        let mut log = OutputLog::new();
        log.append(record("G1", WaitingLine::GeneralNoPriority, false, 2));
        let table = render_table(&log);

        assert_eq!(table.lines().count(), 2);
        assert!(table.contains("general-no-priority"));
    }
}
