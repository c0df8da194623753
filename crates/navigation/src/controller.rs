//! Section navigation controller: the single writer of navigation state.

use std::{collections::HashMap, sync::Arc, time::Duration};

use shared::domain::SectionId;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    catalog::SectionCatalog,
    clock::Clock,
    history::{HistoryEntry, SessionHistory},
    input::{NavKey, NavigationInput},
    observer::{NavigationEvent, NavigationObserver},
    sequencer::{Sequencer, SequencerStep, Transition, TransitionOrigin, TransitionPhase},
};

/// Why a navigation request was dropped. Both cases are silent for the
/// user; callers that do not care use [`NavigationController::go_to`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationRejection {
    #[error("unknown section '{0}'")]
    UnknownSection(String),
    #[error("transition to '{in_flight}' already in flight; dropped request for '{requested}'")]
    TransitionInFlight {
        requested: SectionId,
        in_flight: SectionId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub current_section_id: SectionId,
    pub is_transitioning: bool,
}

/// How the visible section should be drawn right now.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionVisual {
    pub section: SectionId,
    pub opacity: f32,
    pub offset_y: f32,
}

type EnterHook = Box<dyn FnMut(&SectionId)>;

pub struct NavigationController {
    catalog: SectionCatalog,
    clock: Arc<dyn Clock>,
    sequencer: Sequencer,
    current: SectionId,
    visible: SectionId,
    history: SessionHistory,
    observers: Vec<Box<dyn NavigationObserver>>,
    enter_hooks: HashMap<SectionId, Vec<EnterHook>>,
}

impl NavigationController {
    /// Controller showing the catalog's first section.
    pub fn new(catalog: SectionCatalog, clock: Arc<dyn Clock>) -> Self {
        let initial = catalog.first().clone();
        Self::starting_at(catalog, clock, initial)
    }

    /// Controller showing the section named by a deep-link fragment, or the
    /// first section when the fragment matches nothing.
    pub fn with_deep_link(catalog: SectionCatalog, clock: Arc<dyn Clock>, fragment: &str) -> Self {
        let initial = catalog.resolve_initial_section(fragment).clone();
        Self::starting_at(catalog, clock, initial)
    }

    fn starting_at(catalog: SectionCatalog, clock: Arc<dyn Clock>, initial: SectionId) -> Self {
        info!(section = %initial, sections = catalog.len(), "navigation controller ready");
        Self {
            catalog,
            clock,
            sequencer: Sequencer::default(),
            current: initial.clone(),
            visible: initial.clone(),
            history: SessionHistory::new(initial),
            observers: Vec::new(),
            enter_hooks: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    pub fn resolve_initial_section(&self, fragment: &str) -> &SectionId {
        self.catalog.resolve_initial_section(fragment)
    }

    pub fn subscribe(&mut self, observer: impl NavigationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Registers a hook run each time `section` finishes entering. Returns
    /// false (and drops the hook) for sections outside the catalog.
    pub fn on_section_entered(
        &mut self,
        section: &str,
        hook: impl FnMut(&SectionId) + 'static,
    ) -> bool {
        let Some(id) = self.catalog.get(section).cloned() else {
            return false;
        };
        self.enter_hooks.entry(id).or_default().push(Box::new(hook));
        true
    }

    pub fn go_to(&mut self, section: &str) {
        let _ = self.request(section, TransitionOrigin::Direct);
    }

    pub fn try_go_to(&mut self, section: &str) -> Result<(), NavigationRejection> {
        self.request(section, TransitionOrigin::Direct)
    }

    pub fn next(&mut self) {
        self.poll();
        let target = self.catalog.next_after(self.current.as_str()).clone();
        self.go_to(target.as_str());
    }

    pub fn previous(&mut self) {
        self.poll();
        let target = self.catalog.previous_before(self.current.as_str()).clone();
        self.go_to(target.as_str());
    }

    pub fn first(&mut self) {
        let target = self.catalog.first().clone();
        self.go_to(target.as_str());
    }

    pub fn last(&mut self) {
        let target = self.catalog.last().clone();
        self.go_to(target.as_str());
    }

    /// Navigation caused by history back/forward. Never appends history;
    /// on settle the history cursor moves to the entry for the shown
    /// section. `None` means the first section.
    pub fn handle_history_pop(&mut self, section: Option<&str>) {
        let target = match section {
            Some(section) => section.to_string(),
            None => self.catalog.first().as_str().to_string(),
        };
        let _ = self.request(&target, TransitionOrigin::HistoryPop);
    }

    pub fn history_back(&mut self) {
        if self.busy("history back") {
            return;
        }
        if let Some(entry) = self.history.back().cloned() {
            self.handle_history_pop(Some(entry.section_id.as_str()));
        }
    }

    pub fn history_forward(&mut self) {
        if self.busy("history forward") {
            return;
        }
        if let Some(entry) = self.history.forward().cloned() {
            self.handle_history_pop(Some(entry.section_id.as_str()));
        }
    }

    pub fn dispatch(&mut self, input: NavigationInput) {
        debug!(input = input.kind(), "navigation input");
        match input {
            NavigationInput::Link(section) | NavigationInput::Button(section) => {
                self.go_to(section.as_str())
            }
            NavigationInput::Key(NavKey::Next) => self.next(),
            NavigationInput::Key(NavKey::Previous) => self.previous(),
            NavigationInput::Key(NavKey::First) => self.first(),
            NavigationInput::Key(NavKey::Last) => self.last(),
            NavigationInput::HistoryBack => self.history_back(),
            NavigationInput::HistoryForward => self.history_forward(),
            NavigationInput::HistoryPop(section) => {
                self.handle_history_pop(section.as_ref().map(SectionId::as_str))
            }
        }
    }

    /// Runs every phase whose deadline has passed. Returns whether anything
    /// changed.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let mut advanced = false;
        while let Some(step) = self.sequencer.step(now) {
            advanced = true;
            match step {
                SequencerStep::ExitElapsed(transition) => {
                    debug!(from = %transition.from, to = %transition.to, "exit phase elapsed");
                }
                SequencerStep::Swapped(transition) => {
                    self.visible = transition.to.clone();
                    debug!(section = %transition.to, "section swapped in");
                    self.notify(&NavigationEvent::SectionSwapped {
                        section: transition.to,
                    });
                }
                SequencerStep::Settled(transition) => self.settle(transition),
            }
        }
        advanced
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_section_id: self.current.clone(),
            is_transitioning: self.is_transitioning(),
        }
    }

    pub fn current_section(&self) -> &SectionId {
        &self.current
    }

    /// Section currently drawn; differs from the current section between the
    /// swap and the settle of a transition.
    pub fn visible_section(&self) -> &SectionId {
        &self.visible
    }

    pub fn is_transitioning(&self) -> bool {
        !self.sequencer.is_idle()
    }

    pub fn is_active(&self, section: &str) -> bool {
        self.visible.as_str() == section
    }

    pub fn phase(&self) -> &TransitionPhase {
        self.sequencer.phase()
    }

    pub fn visual(&self) -> SectionVisual {
        let (opacity, offset_y) = self.sequencer.fade(self.clock.now());
        SectionVisual {
            section: self.visible.clone(),
            opacity,
            offset_y,
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.sequencer.next_deadline()
    }

    pub fn time_until_next_deadline(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(self.clock.now()))
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn history_location(&self) -> String {
        self.catalog.location_of(&self.history.current().section_id)
    }

    fn busy(&mut self, what: &str) -> bool {
        self.poll();
        if self.is_transitioning() {
            debug!(action = what, "ignoring input while a transition is in flight");
            return true;
        }
        false
    }

    fn request(
        &mut self,
        requested: &str,
        origin: TransitionOrigin,
    ) -> Result<(), NavigationRejection> {
        self.poll();

        let Some(target) = self.catalog.get(requested).cloned() else {
            debug!(requested, "ignoring navigation to unknown section");
            return Err(NavigationRejection::UnknownSection(requested.to_string()));
        };

        let transition = Transition {
            from: self.visible.clone(),
            to: target.clone(),
            origin,
        };
        if let Err(dropped) = self.sequencer.begin(transition, self.clock.now()) {
            let in_flight = self
                .sequencer
                .phase()
                .transition()
                .map(|t| t.to.clone())
                .unwrap_or_else(|| self.current.clone());
            debug!(
                requested = %dropped.to,
                in_flight = %in_flight,
                "ignoring navigation while a transition is in flight"
            );
            return Err(NavigationRejection::TransitionInFlight {
                requested: dropped.to,
                in_flight,
            });
        }

        debug!(from = %self.visible, to = %target, ?origin, "transition accepted");
        let event = NavigationEvent::TransitionAccepted {
            from: self.visible.clone(),
            to: target,
            origin,
        };
        self.notify(&event);
        Ok(())
    }

    fn settle(&mut self, transition: Transition) {
        let Transition { to, origin, .. } = transition;
        self.current = to.clone();
        info!(section = %to, ?origin, "section settled");

        if let Some(hooks) = self.enter_hooks.get_mut(&to) {
            for hook in hooks.iter_mut() {
                hook(&to);
            }
        }
        self.notify(&NavigationEvent::SectionSettled {
            section: to.clone(),
            origin,
        });

        match origin {
            TransitionOrigin::Direct => self.history.push(HistoryEntry::new(to)),
            TransitionOrigin::HistoryPop => self.history.sync_to(&to),
        }
    }

    fn notify(&mut self, event: &NavigationEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(event);
        }
    }
}
