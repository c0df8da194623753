//! Section navigation for the presenter: ordered catalog, two-phase
//! transition sequencer, session history and change notifications.

pub mod catalog;
pub mod clock;
pub mod controller;
pub mod history;
pub mod input;
pub mod observer;
pub mod sequencer;

pub use catalog::{CatalogError, SectionCatalog};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use controller::{NavigationController, NavigationRejection, NavigationState, SectionVisual};
pub use history::{HistoryEntry, SessionHistory};
pub use input::{NavKey, NavigationInput};
pub use observer::{ChannelObserver, NavigationEvent, NavigationObserver};
pub use sequencer::{
    Transition, TransitionOrigin, TransitionPhase, ENTER_DURATION, EXIT_DURATION, SLIDE_DISTANCE,
};

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
