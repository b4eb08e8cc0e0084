//! Consultation track controller
//!
//! One controller per track (general, specialist). Each tick the controller
//! either keeps its current patient in consultation or, once the estimated
//! duration has elapsed, releases it and immediately backfills the slot from
//! the track's waiting lines.
//!
//! # Per-tick behavior
//!
//! ```text
//! slot occupied, consultation not finished -> nothing happens
//! slot occupied, consultation finished     -> departure, then fill slot
//! slot empty                               -> fill slot
//!
//! fill slot:
//!   1. dequeue priority line, else non-priority line, else stay empty
//!   2. consultation_start = tick, wait = tick - arrival
//!   3. wait > aging threshold and not flagged -> flag in registry (promotion)
//!   4. priority_at_entry = registry membership after step 3
//!   5. queue origin = priority line if the id was pending in the
//!      admission promotions (consumed here), else non-priority line
//!   6. append output record
//! ```
//!
//! At most one patient departs per track per tick, so the slot is filled at
//! most once after a departure. The step is a straight-line sequence; no
//! re-entry is needed.

use crate::models::event::{Event, EventLog};
use crate::models::line::{WaitingLine, WaitingRoom};
use crate::models::patient::{ConsultationType, Patient};
use crate::models::record::{OutputLog, OutputRecord};
use crate::models::registry::{AdmissionPromotions, PromotionRegistry};

/// Shared state lent to a controller for one step
///
/// The scheduler owns everything referenced here and hands it to one
/// controller at a time.
pub struct TrackContext<'a> {
    pub tick: usize,
    pub aging_threshold: usize,
    pub room: &'a mut WaitingRoom,
    pub registry: &'a mut PromotionRegistry,
    pub promoted: &'a mut AdmissionPromotions,
    pub output: &'a mut OutputLog,
    pub events: &'a mut EventLog,
}

/// What a controller did during one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackStep {
    /// Patient whose consultation finished this tick
    pub departed: Option<String>,
    /// Patient that entered the slot this tick
    pub entered: Option<String>,
    /// True if the entering patient was newly flagged in the registry
    pub promoted: bool,
}

/// Service slot for one consultation track
#[derive(Debug, Clone)]
pub struct TrackController {
    track: ConsultationType,
    current: Option<Patient>,
    completed: usize,
}

impl TrackController {
    pub fn new(track: ConsultationType) -> Self {
        Self {
            track,
            current: None,
            completed: 0,
        }
    }

    pub fn track(&self) -> ConsultationType {
        self.track
    }

    /// Patient currently in consultation
    pub fn current_patient(&self) -> Option<&Patient> {
        self.current.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Consultations finished on this track so far
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Run the controller for one tick
    pub fn step(&mut self, ctx: &mut TrackContext<'_>) -> TrackStep {
        let mut outcome = TrackStep::default();

        match self.current.take() {
            Some(patient) if !patient.is_consultation_complete(ctx.tick) => {
                self.current = Some(patient);
                return outcome;
            }
            Some(patient) => {
                self.completed += 1;
                tracing::info!(
                    patient_id = patient.id(),
                    track = self.track.as_str(),
                    tick = ctx.tick,
                    "patient left consultation"
                );
                ctx.events.log(Event::Departed {
                    tick: ctx.tick,
                    patient_id: patient.id().to_string(),
                    track: self.track,
                });
                outcome.departed = Some(patient.id().to_string());
            }
            None => {}
        }

        self.fill_slot(ctx, &mut outcome);
        outcome
    }

    /// Pull the next waiting patient into the empty slot, if any
    fn fill_slot(&mut self, ctx: &mut TrackContext<'_>, outcome: &mut TrackStep) {
        debug_assert!(self.current.is_none(), "slot must be empty before filling");

        let Some((mut patient, line)) = ctx.room.next_for_track(self.track) else {
            return;
        };

        let wait = patient.begin_consultation(ctx.tick);

        if wait > ctx.aging_threshold && ctx.registry.promote(patient.id()) {
            outcome.promoted = true;
            tracing::info!(
                patient_id = patient.id(),
                track = self.track.as_str(),
                tick = ctx.tick,
                wait,
                "patient promoted after waiting past the aging threshold"
            );
            ctx.events.log(Event::Promoted {
                tick: ctx.tick,
                patient_id: patient.id().to_string(),
                wait,
            });
        }

        let priority_at_entry = ctx.registry.contains(patient.id());
        let origin = WaitingLine::for_track(self.track, ctx.promoted.take(patient.id()));

        tracing::debug!(
            patient_id = patient.id(),
            track = self.track.as_str(),
            line = line.as_str(),
            origin = origin.as_str(),
            tick = ctx.tick,
            wait,
            "consultation started"
        );
        ctx.events.log(Event::ConsultationStarted {
            tick: ctx.tick,
            patient_id: patient.id().to_string(),
            track: self.track,
            line,
            origin,
            wait,
            priority_at_entry,
        });
        ctx.output.append(OutputRecord {
            patient_id: patient.id().to_string(),
            consultation_type: self.track,
            priority_at_entry,
            queue_origin: origin,
            wait_duration: wait,
            entry_tick: ctx.tick,
        });

        outcome.entered = Some(patient.id().to_string());
        self.current = Some(patient);
    }
}
