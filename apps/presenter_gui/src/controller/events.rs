//! Navigation events as seen by the cosmetic layer.

use navigation::{NavigationEvent, TransitionOrigin};
use shared::domain::SectionId;

/// What the effect layer should do in reaction to a navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectCue {
    /// Flash the navigation entry of the section being navigated to.
    GlowNav(SectionId),
    /// The section was just swapped in; its staggered items start hidden.
    HideReveal(SectionId),
    /// The section settled; run its staggered reveal.
    StartReveal(SectionId),
    /// Status line text.
    Status(String),
}

pub fn cues_for(event: &NavigationEvent) -> Vec<EffectCue> {
    match event {
        NavigationEvent::TransitionAccepted { to, origin, .. } => {
            let mut cues = vec![EffectCue::GlowNav(to.clone())];
            if *origin == TransitionOrigin::HistoryPop {
                cues.push(EffectCue::Status(format!("Historique: {to}")));
            }
            cues
        }
        NavigationEvent::SectionSwapped { section } => {
            vec![EffectCue::HideReveal(section.clone())]
        }
        NavigationEvent::SectionSettled { section, .. } => {
            vec![EffectCue::StartReveal(section.clone())]
        }
    }
}
