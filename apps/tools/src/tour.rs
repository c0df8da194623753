//! Headless tour: drives the navigation controller through every section
//! on tokio timers.

use std::{sync::Arc, time::Duration};

use crossbeam_channel::bounded;
use navigation::{
    ChannelObserver, Clock, NavigationController, NavigationEvent, SectionCatalog,
};
use shared::{deck::Deck, domain::SectionId};
use tokio::time::Instant;

/// Clock reading tokio's time source, so paused test time drives phases.
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourStop {
    pub section: SectionId,
    pub settled_at: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourReport {
    pub stops: Vec<TourStop>,
    pub locations: Vec<String>,
}

pub async fn run_tour(deck: &Deck, dwell: Duration) -> anyhow::Result<TourReport> {
    let catalog = SectionCatalog::new(deck.section_ids())?;
    let clock = Arc::new(TokioClock::new());
    let mut controller = NavigationController::new(catalog.clone(), clock.clone());
    let (tx, rx) = bounded(16);
    controller.subscribe(ChannelObserver::new(tx));

    let mut stops = Vec::with_capacity(catalog.len());
    for _ in 0..catalog.len() {
        controller.next();
        while let Some(wait) = controller.time_until_next_deadline() {
            tokio::time::sleep(wait).await;
            controller.poll();
        }

        for event in rx.try_iter() {
            if let NavigationEvent::SectionSettled { section, .. } = event {
                let settled_at = clock.now();
                tracing::info!(
                    section = %section,
                    location = %catalog.location_of(&section),
                    elapsed_ms = settled_at.as_millis() as u64,
                    "tour stop"
                );
                stops.push(TourStop {
                    section,
                    settled_at,
                });
            }
        }
        tokio::time::sleep(dwell).await;
    }

    let locations = controller
        .history()
        .entries()
        .iter()
        .map(|entry| catalog.location_of(&entry.section_id))
        .collect();
    Ok(TourReport { stops, locations })
}
