//! Aging/promotion bookkeeping
//!
//! Two identifier sets shared by the scheduler loop and both track
//! controllers:
//!
//! - [`PromotionRegistry`]: patients that waited too long before entering
//!   consultation. Membership survives across ticks and across admission
//!   cycles; an identifier only leaves when the patient is admitted again.
//! - [`AdmissionPromotions`]: identifiers whose registry promotion was applied
//!   at admission and whose consultation entry has not been recorded yet.
//!   Consuming an entry is what makes the output record report the priority
//!   line as queue origin.
//!
//! Both are owned by the scheduler and lent to the controllers by `&mut`, so
//! there is a single writer at any time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifiers flagged for priority escalation
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::PromotionRegistry;
///
/// let mut registry = PromotionRegistry::new();
/// assert!(registry.promote("P1"));
/// assert!(!registry.promote("P1")); // already flagged
/// assert!(registry.contains("P1"));
///
/// assert!(registry.release("P1"));
/// assert!(!registry.contains("P1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionRegistry {
    flagged: BTreeSet<String>,
}

impl PromotionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, patient_id: &str) -> bool {
        self.flagged.contains(patient_id)
    }

    /// Flag a patient; returns false if it was already flagged
    pub fn promote(&mut self, patient_id: &str) -> bool {
        if self.flagged.contains(patient_id) {
            return false;
        }
        self.flagged.insert(patient_id.to_string())
    }

    /// Remove a flag at re-admission; returns false if it was not flagged
    pub fn release(&mut self, patient_id: &str) -> bool {
        self.flagged.remove(patient_id)
    }

    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }

    /// Flagged identifiers in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flagged.iter().map(String::as_str)
    }
}

/// Identifiers promoted at admission, awaiting their consultation entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionPromotions {
    pending: BTreeSet<String>,
}

impl AdmissionPromotions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, patient_id: &str) {
        self.pending.insert(patient_id.to_string());
    }

    /// Consume the entry for `patient_id`; returns whether it was present
    pub fn take(&mut self, patient_id: &str) -> bool {
        self.pending.remove(patient_id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_unknown_is_noop() {
        let mut registry = PromotionRegistry::new();
        assert!(!registry.release("ghost"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_iter_sorted() {
        let mut registry = PromotionRegistry::new();
        registry.promote("P9");
        registry.promote("P10");
        registry.promote("P2");
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["P10", "P2", "P9"]);
    }

    #[test]
    fn test_admission_promotions_take_once() {
        let mut promoted = AdmissionPromotions::new();
        promoted.insert("P1");
        assert!(promoted.take("P1"));
        assert!(!promoted.take("P1"));
        assert!(promoted.is_empty());
    }
}
