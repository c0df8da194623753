use std::{path::PathBuf, sync::Arc};

mod config;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use navigation::{ChannelObserver, MonotonicClock, NavigationController, SectionCatalog};
use shared::deck::Deck;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{CliOverrides, LoadedSettings, Settings},
    ui::PresenterApp,
};

#[derive(Debug, Parser)]
#[command(name = "presenter_gui", about = "Executive PMO portfolio presenter")]
struct Args {
    /// Settings file (defaults to ./presenter.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Deck file replacing the built-in portfolio.
    #[arg(long)]
    deck: Option<PathBuf>,
    /// Initial section link such as '#plan-90j'.
    #[arg(long)]
    link: Option<String>,
    /// Skip counters, reveals and ripples.
    #[arg(long)]
    reduced_motion: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            deck_path: self.deck.clone(),
            initial_link: self.link.clone(),
            reduced_motion: self.reduced_motion,
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_deck(settings: &Settings) -> anyhow::Result<Deck> {
    match &settings.deck_path {
        Some(path) => Deck::load(path)
            .with_context(|| format!("failed to load deck '{}'", path.display())),
        None => Ok(Deck::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let LoadedSettings {
        mut settings,
        warnings,
    } = config::load_settings(args.config.as_deref());
    settings.apply_overrides(args.overrides());

    init_tracing(&settings.log_filter);
    for warning in warnings {
        tracing::warn!("{warning}");
    }

    let deck = load_deck(&settings)?;
    let catalog = SectionCatalog::new(deck.section_ids()).context("invalid section catalog")?;
    let clock = Arc::new(MonotonicClock::new());
    let mut navigation = NavigationController::with_deep_link(
        catalog,
        clock.clone(),
        settings.initial_link.as_deref().unwrap_or_default(),
    );

    let (event_tx, event_rx) = bounded(256);
    navigation.subscribe(ChannelObserver::new(event_tx));

    tracing::info!(
        sections = deck.sections.len(),
        initial = %navigation.current_section(),
        reduced_motion = settings.reduced_motion,
        "starting presenter"
    );

    let app = PresenterApp::new(deck, navigation, event_rx, clock, &settings);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Portfolio PMO")
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([960.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Portfolio PMO",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("presenter window failed: {err}"))
}
