//! Time management for the simulation
//!
//! The scheduler operates in discrete ticks. Admissions are throttled to
//! every `admission_interval`-th tick. This module provides deterministic
//! time advancement.

use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete ticks
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::TickClock;
///
/// let mut clock = TickClock::new(3); // admit every 3rd tick
/// assert_eq!(clock.current_tick(), 0);
/// assert!(clock.is_admission_tick());
///
/// clock.advance_tick();
/// assert_eq!(clock.current_tick(), 1);
/// assert!(!clock.is_admission_tick());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickClock {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
    /// Admission cadence in ticks
    admission_interval: usize,
}

impl TickClock {
    /// Create a new TickClock
    ///
    /// # Arguments
    /// * `admission_interval` - Number of ticks between two admission steps
    ///
    /// # Panics
    /// Panics if `admission_interval` is zero. The scheduler validates its
    /// configuration before building a clock.
    pub fn new(admission_interval: usize) -> Self {
        assert!(admission_interval > 0, "admission_interval must be positive");
        Self {
            current_tick: 0,
            admission_interval,
        }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Check whether the admission step runs on the current tick
    ///
    /// # Example
    /// ```
    /// use clinic_simulator_core_rs::TickClock;
    ///
    /// let mut clock = TickClock::new(3);
    /// let mut admission_ticks = Vec::new();
    /// for _ in 0..10 {
    ///     if clock.is_admission_tick() {
    ///         admission_ticks.push(clock.current_tick());
    ///     }
    ///     clock.advance_tick();
    /// }
    /// assert_eq!(admission_ticks, vec![0, 3, 6, 9]);
    /// ```
    pub fn is_admission_tick(&self) -> bool {
        self.current_tick % self.admission_interval == 0
    }

    /// Get the admission cadence
    pub fn admission_interval(&self) -> usize {
        self.admission_interval
    }
}
