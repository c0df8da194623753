//! Notifications for collaborators that react to navigation without
//! mutating it.

use crossbeam_channel::{Sender, TrySendError};
use shared::domain::SectionId;

use crate::sequencer::TransitionOrigin;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    TransitionAccepted {
        from: SectionId,
        to: SectionId,
        origin: TransitionOrigin,
    },
    /// Exit finished; `section` is now the only active section.
    SectionSwapped { section: SectionId },
    /// Enter finished; fired once per accepted transition.
    SectionSettled {
        section: SectionId,
        origin: TransitionOrigin,
    },
}

impl NavigationEvent {
    pub fn section(&self) -> &SectionId {
        match self {
            NavigationEvent::TransitionAccepted { to, .. } => to,
            NavigationEvent::SectionSwapped { section }
            | NavigationEvent::SectionSettled { section, .. } => section,
        }
    }
}

pub trait NavigationObserver {
    fn on_event(&mut self, event: &NavigationEvent);
}

impl<F> NavigationObserver for F
where
    F: FnMut(&NavigationEvent),
{
    fn on_event(&mut self, event: &NavigationEvent) {
        self(event)
    }
}

/// Forwards events into a bounded channel drained by a frame loop.
pub struct ChannelObserver {
    tx: Sender<NavigationEvent>,
}

impl ChannelObserver {
    pub fn new(tx: Sender<NavigationEvent>) -> Self {
        Self { tx }
    }
}

impl NavigationObserver for ChannelObserver {
    fn on_event(&mut self, event: &NavigationEvent) {
        match self.tx.try_send(event.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(section = %event.section(), "navigation event queue is full; dropping event");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("navigation event receiver dropped");
            }
        }
    }
}
