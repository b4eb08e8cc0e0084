//! Roster intake
//!
//! Parses a line-oriented patient roster into the admission queue.
//!
//! # Format
//!
//! One patient per line, four whitespace-separated fields:
//!
//! ```text
//! # id   type        urgency   estimated-duration
//! P001   general     normal    5
//! P002   specialist  priority  3
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Identifiers may repeat;
//! a repeated identifier is the same patient coming back through admission.

use crate::models::patient::{Patient, PatientError};
use crate::models::queue::FifoQueue;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a roster
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("line {line}: estimated duration '{value}' is not an integer")]
    InvalidDuration { line: usize, value: String },

    #[error("line {line}: {source}")]
    InvalidPatient {
        line: usize,
        #[source]
        source: PatientError,
    },

    #[error("cannot read roster {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a single roster line (1-based `line` for error messages)
pub fn parse_line(line: usize, text: &str) -> Result<Patient, IntakeError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [id, consultation_type, urgency, duration] = fields[..] else {
        return Err(IntakeError::MalformedLine {
            line,
            reason: format!("expected 4 fields, found {}", fields.len()),
        });
    };

    let duration: i64 = duration.parse().map_err(|_| IntakeError::InvalidDuration {
        line,
        value: duration.to_string(),
    })?;

    Patient::from_fields(id, consultation_type, urgency, duration)
        .map_err(|source| IntakeError::InvalidPatient { line, source })
}

/// Parse a whole roster into an admission queue, in file order
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::intake::parse_roster;
///
/// let queue = parse_roster("P1 general normal 5\n\n# comment\nP2 general priority 3\n").unwrap();
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.peek().unwrap().id(), "P1");
/// ```
pub fn parse_roster(input: &str) -> Result<FifoQueue<Patient>, IntakeError> {
    let mut queue = FifoQueue::new();
    for (idx, text) in input.lines().enumerate() {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        queue.enqueue(parse_line(idx + 1, trimmed)?);
    }
    tracing::debug!(patients = queue.len(), "roster parsed");
    Ok(queue)
}

/// Read and parse a roster file
pub fn load_roster(path: impl AsRef<Path>) -> Result<FifoQueue<Patient>, IntakeError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| IntakeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_roster(&contents)
}
