//! Two-phase EXIT -> swap -> ENTER sequencer.
//!
//! The sequencer only knows about phases and deadlines. Swapping the active
//! section, history and observer notification are done by the controller in
//! response to the steps returned from [`Sequencer::step`].

use std::time::Duration;

use shared::domain::SectionId;

pub const EXIT_DURATION: Duration = Duration::from_millis(150);
pub const ENTER_DURATION: Duration = Duration::from_millis(600);

/// Vertical slide distance, in logical pixels, of a section leaving or entering.
pub const SLIDE_DISTANCE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOrigin {
    /// Menu link, button, keyboard or programmatic request.
    Direct,
    /// Session history back/forward. Never appends a history entry.
    HistoryPop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: SectionId,
    pub to: SectionId,
    pub origin: TransitionOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Exiting {
        transition: Transition,
        started: Duration,
        deadline: Duration,
    },
    Swapping {
        transition: Transition,
        at: Duration,
    },
    Entering {
        transition: Transition,
        started: Duration,
        deadline: Duration,
    },
}

impl TransitionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            TransitionPhase::Idle => "idle",
            TransitionPhase::Exiting { .. } => "exiting",
            TransitionPhase::Swapping { .. } => "swapping",
            TransitionPhase::Entering { .. } => "entering",
        }
    }

    pub fn transition(&self) -> Option<&Transition> {
        match self {
            TransitionPhase::Idle => None,
            TransitionPhase::Exiting { transition, .. }
            | TransitionPhase::Swapping { transition, .. }
            | TransitionPhase::Entering { transition, .. } => Some(transition),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerStep {
    ExitElapsed(Transition),
    Swapped(Transition),
    Settled(Transition),
}

#[derive(Debug, Default)]
pub struct Sequencer {
    phase: TransitionPhase,
}

impl Sequencer {
    pub fn phase(&self) -> &TransitionPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, TransitionPhase::Idle)
    }

    /// Starts the exit phase. Hands the transition back when one is already
    /// in flight.
    pub fn begin(&mut self, transition: Transition, now: Duration) -> Result<(), Transition> {
        if !self.is_idle() {
            return Err(transition);
        }
        self.phase = TransitionPhase::Exiting {
            transition,
            started: now,
            deadline: now + EXIT_DURATION,
        };
        Ok(())
    }

    /// Advances at most one phase. Deadlines chain from the previous
    /// deadline, not from `now`, so late polls keep the fixed durations.
    pub fn step(&mut self, now: Duration) -> Option<SequencerStep> {
        match std::mem::take(&mut self.phase) {
            TransitionPhase::Exiting {
                transition,
                deadline,
                ..
            } if now >= deadline => {
                self.phase = TransitionPhase::Swapping {
                    transition: transition.clone(),
                    at: deadline,
                };
                Some(SequencerStep::ExitElapsed(transition))
            }
            TransitionPhase::Swapping { transition, at } => {
                self.phase = TransitionPhase::Entering {
                    transition: transition.clone(),
                    started: at,
                    deadline: at + ENTER_DURATION,
                };
                Some(SequencerStep::Swapped(transition))
            }
            TransitionPhase::Entering {
                transition,
                deadline,
                ..
            } if now >= deadline => Some(SequencerStep::Settled(transition)),
            phase => {
                self.phase = phase;
                None
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        match &self.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::Exiting { deadline, .. }
            | TransitionPhase::Entering { deadline, .. } => Some(*deadline),
            TransitionPhase::Swapping { at, .. } => Some(*at),
        }
    }

    /// Opacity and downward offset of the visible section at `now`.
    pub fn fade(&self, now: Duration) -> (f32, f32) {
        match &self.phase {
            TransitionPhase::Idle => (1.0, 0.0),
            TransitionPhase::Exiting {
                started, deadline, ..
            } => {
                let p = progress(*started, *deadline, now);
                (1.0 - p, SLIDE_DISTANCE * p)
            }
            TransitionPhase::Swapping { .. } => (0.0, SLIDE_DISTANCE),
            TransitionPhase::Entering {
                started, deadline, ..
            } => {
                let p = progress(*started, *deadline, now);
                (p, SLIDE_DISTANCE * (1.0 - p))
            }
        }
    }
}

fn progress(started: Duration, deadline: Duration, now: Duration) -> f32 {
    let total = deadline.saturating_sub(started).as_secs_f32();
    if total <= f32::EPSILON {
        return 1.0;
    }
    (now.saturating_sub(started).as_secs_f32() / total).clamp(0.0, 1.0)
}
