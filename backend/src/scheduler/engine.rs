//! Scheduler Engine
//!
//! Main tick loop integrating all components:
//! - Admission (throttled to every `admission_interval`-th tick)
//! - General track controller
//! - Specialist track controller
//! - Termination detection
//! - Output record and event accumulation
//!
//! # Architecture
//!
//! ```text
//! For each tick t (starting at 0):
//! 1. Admission step (only when t % admission_interval == 0)
//!    - dequeue one patient from the admission queue
//!    - if flagged in the registry: set priority flag, release the flag,
//!      remember the admission-time promotion
//!    - classify onto a waiting line
//! 2. Step the general track
//! 3. Step the specialist track
//! 4. Terminate if the admission queue, all waiting lines and both slots
//!    are empty; otherwise advance to t + 1
//! ```
//!
//! The order within a tick is fixed; it decides which patients can be
//! admitted and routed in time to be served on the same tick.
//!
//! # Example
//!
//! ```rust
//! use clinic_simulator_core_rs::{FifoQueue, Patient, Scheduler, SchedulerConfig, WaitingLine};
//!
//! let admission: FifoQueue<Patient> = vec![
//!     Patient::from_fields("P1", "general", "normal", 5).unwrap(),
//!     Patient::from_fields("P2", "general", "priority", 3).unwrap(),
//! ]
//! .into();
//!
//! let mut scheduler = Scheduler::new(SchedulerConfig::default(), admission).unwrap();
//! let log = scheduler.run().unwrap();
//!
//! let rows: Vec<_> = log
//!     .iter()
//!     .map(|r| (r.patient_id.as_str(), r.queue_origin, r.wait_duration))
//!     .collect();
//! assert_eq!(
//!     rows,
//!     vec![
//!         ("P1", WaitingLine::GeneralNoPriority, 0),
//!         ("P2", WaitingLine::GeneralNoPriority, 2),
//!     ]
//! );
//! ```

use crate::admission;
use crate::core::time::TickClock;
use crate::models::event::{Event, EventLog};
use crate::models::line::WaitingRoom;
use crate::models::patient::{ConsultationType, Patient};
use crate::models::queue::FifoQueue;
use crate::models::record::OutputLog;
use crate::models::registry::{AdmissionPromotions, PromotionRegistry};
use crate::track::{TrackContext, TrackController, TrackStep};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Scheduler configuration
///
/// # Fields
///
/// * `admission_interval` - Ticks between admission steps
/// * `aging_threshold` - Wait (in ticks) that must be exceeded to promote
/// * `max_ticks` - Optional bound on the number of ticks `run` may execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// One patient is admitted every `admission_interval` ticks (default 3)
    pub admission_interval: usize,

    /// Promotion triggers when `wait > aging_threshold` (default 7)
    pub aging_threshold: usize,

    /// Fail `run` with `TickLimitExceeded` after this many ticks
    pub max_ticks: Option<usize>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            admission_interval: 3,
            aging_threshold: 7,
            max_ticks: None,
        }
    }
}

impl SchedulerConfig {
    /// Load a configuration from JSON; missing fields take defaults
    ///
    /// # Example
    /// ```
    /// use clinic_simulator_core_rs::SchedulerConfig;
    ///
    /// let config = SchedulerConfig::from_json(r#"{ "aging_threshold": 4 }"#).unwrap();
    /// assert_eq!(config.aging_threshold, 4);
    /// assert_eq!(config.admission_interval, 3);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SchedulerError> {
        let config: SchedulerConfig = serde_json::from_str(json)
            .map_err(|e| SchedulerError::InvalidConfig(format!("malformed JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.admission_interval == 0 {
            return Err(SchedulerError::InvalidConfig(
                "admission_interval must be > 0".to_string(),
            ));
        }

        if self.max_ticks == Some(0) {
            return Err(SchedulerError::InvalidConfig(
                "max_ticks must be > 0 when set".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Tick number
    pub tick: usize,

    /// Patient admitted this tick
    pub admitted: Option<String>,

    /// Patients that entered consultation this tick (general first)
    pub entries: Vec<String>,

    /// Patients whose consultation finished this tick (general first)
    pub departures: Vec<String>,

    /// Number of registry promotions this tick
    pub promotions: usize,

    /// True if this tick ended the run
    pub terminated: bool,
}

impl TickResult {
    fn absorb(&mut self, step: TrackStep) {
        self.departures.extend(step.departed);
        self.entries.extend(step.entered);
        self.promotions += usize::from(step.promoted);
    }
}

/// Where every supplied patient currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    /// Still in the admission queue
    pub admission: usize,
    /// On one of the four waiting lines
    pub waiting: usize,
    /// In a service slot
    pub in_service: usize,
    /// Consultation finished
    pub completed: usize,
}

impl Occupancy {
    pub fn total(&self) -> usize {
        self.admission + self.waiting + self.in_service + self.completed
    }
}

/// Scheduler error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Scheduler already terminated")]
    AlreadyTerminated,

    #[error("Tick limit of {limit} reached before all patients were served")]
    TickLimitExceeded { limit: usize },

    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

// ============================================================================
// Scheduler
// ============================================================================

/// Main scheduler owning all queues, both tracks and the promotion state
///
/// # Determinism
///
/// There is no randomness and no wall-clock time. The same admission queue
/// and configuration always produce the same output log.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: SchedulerConfig,

    clock: TickClock,

    /// Patients not yet admitted, in roster order
    admission: FifoQueue<Patient>,

    /// The four waiting lines
    room: WaitingRoom,

    general: TrackController,

    specialist: TrackController,

    registry: PromotionRegistry,

    /// Admission-time promotions awaiting consultation entry
    promoted: AdmissionPromotions,

    output: OutputLog,

    event_log: EventLog,

    /// Patients supplied at construction
    total_patients: usize,

    terminated: bool,
}

impl Scheduler {
    /// Create a scheduler over an admission queue
    ///
    /// # Returns
    ///
    /// * `Ok(Scheduler)` - ready to tick from tick 0
    /// * `Err(SchedulerError::InvalidConfig)` - configuration validation failed
    pub fn new(config: SchedulerConfig, admission: FifoQueue<Patient>) -> Result<Self, SchedulerError> {
        config.validate()?;

        let total_patients = admission.len();
        let clock = TickClock::new(config.admission_interval);

        Ok(Self {
            config,
            clock,
            admission,
            room: WaitingRoom::new(),
            general: TrackController::new(ConsultationType::General),
            specialist: TrackController::new(ConsultationType::Specialist),
            registry: PromotionRegistry::new(),
            promoted: AdmissionPromotions::new(),
            output: OutputLog::new(),
            event_log: EventLog::new(),
            total_patients,
            terminated: false,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Tick the next call to `tick` will execute, or the final tick once
    /// terminated
    pub fn current_tick(&self) -> usize {
        self.clock.current_tick()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn admission_queue(&self) -> &FifoQueue<Patient> {
        &self.admission
    }

    pub fn waiting_room(&self) -> &WaitingRoom {
        &self.room
    }

    /// Controller for a track
    pub fn track(&self, track: ConsultationType) -> &TrackController {
        match track {
            ConsultationType::General => &self.general,
            ConsultationType::Specialist => &self.specialist,
        }
    }

    pub fn registry(&self) -> &PromotionRegistry {
        &self.registry
    }

    pub fn pending_promotions(&self) -> &AdmissionPromotions {
        &self.promoted
    }

    pub fn output_log(&self) -> &OutputLog {
        &self.output
    }

    /// Consume the scheduler and keep only its output log
    pub fn into_output_log(self) -> OutputLog {
        self.output
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Where every supplied patient currently is
    pub fn occupancy(&self) -> Occupancy {
        let slots = [&self.general, &self.specialist];
        Occupancy {
            admission: self.admission.len(),
            waiting: self.room.total_waiting(),
            in_service: slots.iter().filter(|t| !t.is_idle()).count(),
            completed: slots.iter().map(|t| t.completed()).sum(),
        }
    }

    /// Check that no patient was lost or duplicated
    ///
    /// Also checks that every waiting line only holds patients of its own
    /// track.
    pub fn check_integrity(&self) -> Result<(), SchedulerError> {
        let occupancy = self.occupancy();
        if occupancy.total() != self.total_patients {
            return Err(SchedulerError::IntegrityViolation(format!(
                "{} patients supplied but {} accounted for ({:?})",
                self.total_patients,
                occupancy.total(),
                occupancy
            )));
        }

        if let Some((line, patient)) = self
            .room
            .iter()
            .find(|(line, p)| line.track() != p.consultation_type())
        {
            return Err(SchedulerError::IntegrityViolation(format!(
                "patient {} waiting on {} line",
                patient.id(),
                line
            )));
        }

        if self.output.len() != occupancy.in_service + occupancy.completed {
            return Err(SchedulerError::IntegrityViolation(format!(
                "{} output records for {} consultations",
                self.output.len(),
                occupancy.in_service + occupancy.completed
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one scheduler tick
    ///
    /// # Returns
    ///
    /// * `Ok(TickResult)` - Tick executed; `terminated` tells if it was the last
    /// * `Err(SchedulerError::AlreadyTerminated)` - the run is already over
    pub fn tick(&mut self) -> Result<TickResult, SchedulerError> {
        if self.terminated {
            return Err(SchedulerError::AlreadyTerminated);
        }

        let tick = self.clock.current_tick();
        let mut result = TickResult {
            tick,
            ..Default::default()
        };

        // STEP 1: ADMISSION
        if self.clock.is_admission_tick() {
            result.admitted = self.admit_next(tick);
        }

        // STEP 2-3: TRACKS (general strictly before specialist)
        let mut ctx = TrackContext {
            tick,
            aging_threshold: self.config.aging_threshold,
            room: &mut self.room,
            registry: &mut self.registry,
            promoted: &mut self.promoted,
            output: &mut self.output,
            events: &mut self.event_log,
        };
        result.absorb(self.general.step(&mut ctx));
        result.absorb(self.specialist.step(&mut ctx));

        // STEP 4: TERMINATION
        if self.is_drained() {
            self.terminated = true;
            result.terminated = true;
            tracing::debug!(tick, records = self.output.len(), "scheduler drained");
        } else {
            self.clock.advance_tick();
        }

        Ok(result)
    }

    /// Run until every patient has been served
    ///
    /// # Errors
    ///
    /// * `TickLimitExceeded` - `max_ticks` ticks ran without draining
    ///
    /// Calling `run` on a finished scheduler returns the existing log.
    pub fn run(&mut self) -> Result<&OutputLog, SchedulerError> {
        while !self.terminated {
            if let Some(limit) = self.config.max_ticks {
                if self.clock.current_tick() >= limit {
                    return Err(SchedulerError::TickLimitExceeded { limit });
                }
            }
            self.tick()?;
        }
        Ok(&self.output)
    }

    /// Admission queue, waiting lines and both slots are all empty
    fn is_drained(&self) -> bool {
        self.admission.is_empty()
            && self.room.is_empty()
            && self.general.is_idle()
            && self.specialist.is_idle()
    }

    /// Move one patient from the admission queue onto a waiting line
    fn admit_next(&mut self, tick: usize) -> Option<String> {
        let mut patient = self.admission.dequeue()?;
        let patient_id = patient.id().to_string();

        if self.registry.release(&patient_id) {
            patient.mark_promoted();
            self.promoted.insert(&patient_id);
            tracing::info!(
                patient_id = patient_id.as_str(),
                tick,
                "registry promotion applied on re-admission"
            );
            self.event_log.log(Event::PromotionApplied {
                tick,
                patient_id: patient_id.clone(),
            });
        }

        let line = admission::classify(patient, tick, &mut self.room);
        self.event_log.log(Event::Admitted {
            tick,
            patient_id: patient_id.clone(),
            line,
        });

        Some(patient_id)
    }
}

/// Run a whole roster through a fresh scheduler
pub fn simulate(
    config: SchedulerConfig,
    admission: FifoQueue<Patient>,
) -> Result<OutputLog, SchedulerError> {
    let mut scheduler = Scheduler::new(config, admission)?;
    scheduler.run()?;
    Ok(scheduler.into_output_log())
}
