use std::{
    collections::{HashMap, HashSet},
    fs,
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use chrono::Utc;
use crossbeam_channel::Receiver;
use navigation::{
    Clock, MonotonicClock, NavigationController, NavigationEvent, NavigationInput,
};
use shared::{
    deck::{Deck, RoiBreakdown, SectionBody},
    domain::SectionId,
};

use crate::{
    config::Settings,
    controller::{
        events::{cues_for, EffectCue},
        orchestration::{dispatch_navigation_input, inputs_from_frame, press_button},
    },
    ui::{
        effects::{Flash, KpiCounter, Reveal, Ripple},
        sections::{SectionAction, SectionView},
        theme::{executive_style, nav_row, Palette},
    },
};

const IDLE_REPAINT: Duration = Duration::from_millis(250);
const ANIMATION_REPAINT: Duration = Duration::from_millis(16);
pub const EXPORT_FILE_NAME: &str = "portfolio-export.json";

pub struct PresenterApp {
    deck: Deck,
    navigation: NavigationController,
    nav_events: Receiver<NavigationEvent>,
    clock: Arc<MonotonicClock>,
    palette: Palette,
    style_applied: bool,
    reduced_motion: bool,
    export_dir: PathBuf,

    counters: Vec<KpiCounter>,
    counters_started: Duration,
    reveals: HashMap<SectionId, Reveal>,
    nav_glow: Option<(SectionId, Flash)>,
    ripple: Option<Ripple>,
    expanded_phases: HashSet<usize>,
    skill_highlights: HashMap<usize, Flash>,
    roi_popup: Option<RoiBreakdown>,
    status: String,
}

impl PresenterApp {
    pub fn new(
        deck: Deck,
        navigation: NavigationController,
        nav_events: Receiver<NavigationEvent>,
        clock: Arc<MonotonicClock>,
        settings: &Settings,
    ) -> Self {
        let counters = deck
            .sections
            .iter()
            .find_map(|section| match &section.body {
                SectionBody::Home { stats, .. } => Some(
                    stats
                        .iter()
                        .map(|stat| KpiCounter::new(stat.value.clone()))
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default();

        let now = clock.now();
        let mut app = Self {
            deck,
            navigation,
            nav_events,
            clock,
            palette: Palette::executive(),
            style_applied: false,
            reduced_motion: settings.reduced_motion,
            export_dir: settings.export_dir.clone(),
            counters,
            counters_started: now,
            reveals: HashMap::new(),
            nav_glow: None,
            ripple: None,
            expanded_phases: HashSet::new(),
            skill_highlights: HashMap::new(),
            roi_popup: None,
            status: String::new(),
        };
        let initial = app.navigation.current_section().clone();
        app.start_reveal(initial, now);
        app
    }

    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn apply_style_if_needed(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }
        let style = executive_style(&ctx.style(), self.palette);
        ctx.set_style(style);
        self.style_applied = true;
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let (inputs, export_requested) = ctx.input(|i| {
            (
                inputs_from_frame(i),
                i.modifiers.command && i.key_pressed(egui::Key::E),
            )
        });
        for input in inputs {
            self.dispatch(input);
        }
        if export_requested {
            self.export_portfolio();
        }
    }

    fn dispatch(&mut self, input: NavigationInput) {
        dispatch_navigation_input(&mut self.navigation, input);
    }

    fn process_navigation_events(&mut self) {
        let now = self.now();
        while let Ok(event) = self.nav_events.try_recv() {
            for cue in cues_for(&event) {
                self.apply_cue(cue, now);
            }
        }
    }

    fn apply_cue(&mut self, cue: EffectCue, now: Duration) {
        match cue {
            EffectCue::GlowNav(section) => {
                if !self.reduced_motion {
                    self.nav_glow = Some((section, Flash::new(now)));
                }
            }
            EffectCue::HideReveal(section) => {
                self.reveals.remove(&section);
                if self.is_timeline(&section) {
                    self.expanded_phases.clear();
                }
            }
            EffectCue::StartReveal(section) => self.start_reveal(section, now),
            EffectCue::Status(text) => self.status = text,
        }
    }

    fn is_timeline(&self, section: &SectionId) -> bool {
        self.deck
            .section(section.as_str())
            .is_some_and(|content| matches!(content.body, SectionBody::Timeline { .. }))
    }

    fn start_reveal(&mut self, section: SectionId, now: Duration) {
        let Some(content) = self.deck.section(section.as_str()) else {
            return;
        };
        let kind = content.body.kind();
        let reveal = if self.reduced_motion {
            Reveal::completed(kind)
        } else {
            Reveal::start(kind, now)
        };
        self.reveals.insert(section, reveal);
    }

    fn apply_section_actions(&mut self, actions: Vec<SectionAction>) {
        let now = self.now();
        for action in actions {
            match action {
                SectionAction::Navigate { target, button, at } => {
                    if press_button(&mut self.navigation, &target) && !self.reduced_motion {
                        self.ripple = Some(Ripple::new(button, at, now));
                    }
                }
                SectionAction::ShowRoi(metric) => {
                    self.roi_popup = Some(RoiBreakdown::for_metric(&metric));
                }
                SectionAction::TogglePhase(index) => {
                    if !self.expanded_phases.remove(&index) {
                        self.expanded_phases.insert(index);
                    }
                }
                SectionAction::HighlightSkill(index) => {
                    self.skill_highlights.insert(index, Flash::new(now));
                }
            }
        }
    }

    fn export_portfolio(&mut self) {
        match write_export(&self.deck, &self.export_dir) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "portfolio exported");
                self.status = format!("Export: {}", path.display());
            }
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "portfolio export failed");
                self.status = format!("Export impossible: {err}");
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        let frame = egui::Frame::NONE
            .fill(self.palette.card)
            .inner_margin(egui::Margin::symmetric(16, 8));
        let mut requested = None;

        egui::TopBottomPanel::top("presenter_top_bar")
            .frame(frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let idle = !self.navigation.is_transitioning();
                    let history = self.navigation.history();
                    if ui
                        .add_enabled(idle && history.can_go_back(), egui::Button::new("◀"))
                        .on_hover_text("Précédent (Alt+←)")
                        .clicked()
                    {
                        requested = Some(NavigationInput::HistoryBack);
                    }
                    if ui
                        .add_enabled(idle && history.can_go_forward(), egui::Button::new("▶"))
                        .on_hover_text("Suivant (Alt+→)")
                        .clicked()
                    {
                        requested = Some(NavigationInput::HistoryForward);
                    }
                    ui.monospace(self.navigation.history_location());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button("Exporter")
                            .on_hover_text("Exporter les données du portfolio (Ctrl+E)")
                            .clicked()
                        {
                            self.export_portfolio();
                        }
                        if !self.status.is_empty() {
                            ui.label(
                                egui::RichText::new(&self.status)
                                    .small()
                                    .color(self.palette.muted_text),
                            );
                        }
                    });
                });
            });

        if let Some(input) = requested {
            self.dispatch(input);
        }
    }

    fn show_nav_panel(&mut self, ctx: &egui::Context) {
        let now = self.now();
        let frame = egui::Frame::NONE
            .fill(self.palette.navy)
            .inner_margin(egui::Margin::symmetric(12, 16));
        let mut clicked = None;

        egui::SidePanel::left("presenter_nav")
            .exact_width(240.0)
            .resizable(false)
            .frame(frame)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(&self.deck.profile.name)
                        .size(18.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                ui.label(
                    egui::RichText::new(&self.deck.profile.role)
                        .small()
                        .color(self.palette.gold),
                );
                ui.add_space(16.0);

                for section in &self.deck.sections {
                    let glow = match &self.nav_glow {
                        Some((id, flash)) if *id == section.id => flash.strength(now),
                        _ => 0.0,
                    };
                    let selected = self.navigation.is_active(section.id.as_str());
                    let response = nav_row(ui, self.palette, &section.nav_label, selected, glow);
                    if response.clicked() {
                        clicked = Some(section.id.clone());
                    }
                    ui.add_space(4.0);
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.label(
                        egui::RichText::new("← → naviguer · Début/Fin · Alt+← historique")
                            .small()
                            .color(self.palette.card_border),
                    );
                });
            });

        if let Some(section) = clicked {
            self.dispatch(NavigationInput::Link(section));
        }
    }

    fn show_section(&mut self, ctx: &egui::Context) {
        let now = self.now();
        let visual = self.navigation.visual();
        let frame = egui::Frame::NONE
            .fill(self.palette.background)
            .inner_margin(egui::Margin::symmetric(32, 24));

        let actions = egui::CentralPanel::default()
            .frame(frame)
            .show(ctx, |ui| {
                let Some(content) = self.deck.section(visual.section.as_str()) else {
                    return Vec::new();
                };
                // Hidden until settled, so items do not flash before the reveal.
                let reveal = self
                    .reveals
                    .get(&visual.section)
                    .copied()
                    .unwrap_or_else(|| Reveal::hidden(content.body.kind()));
                let counter_elapsed = if self.reduced_motion {
                    Duration::MAX
                } else {
                    now.saturating_sub(self.counters_started)
                };
                let view = SectionView {
                    content,
                    profile: &self.deck.profile,
                    glossary: &self.deck.glossary,
                    palette: self.palette,
                    now,
                    reveal,
                    counters: &self.counters,
                    counter_elapsed,
                    expanded_phases: &self.expanded_phases,
                    skill_highlights: &self.skill_highlights,
                };

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.multiply_opacity(visual.opacity);
                        ui.add_space(visual.offset_y);
                        view.show(ui)
                    })
                    .inner
            })
            .inner;

        self.apply_section_actions(actions);
    }

    fn paint_ripple(&mut self, ctx: &egui::Context) {
        let now = self.now();
        let Some(ripple) = self.ripple else {
            return;
        };
        if ripple.is_done(now) {
            self.ripple = None;
            return;
        }
        let (radius, alpha) = ripple.shape(now);
        let painter = ctx
            .layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("cta_ripple"),
            ))
            .with_clip_rect(ripple.clip);
        painter.circle_filled(
            ripple.center,
            radius,
            egui::Color32::WHITE.gamma_multiply(0.45 * alpha),
        );
    }

    fn show_roi_window(&mut self, ctx: &egui::Context) {
        let Some(breakdown) = self.roi_popup.clone() else {
            return;
        };

        let window_frame = egui::Frame::NONE
            .fill(self.palette.card)
            .stroke(egui::Stroke::new(1.0, self.palette.gold))
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(20, 16));

        let mut open = true;
        let mut close_requested = false;
        egui::Window::new("roi_breakdown")
            .title_bar(false)
            .frame(window_frame)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(&breakdown.title)
                        .size(20.0)
                        .strong()
                        .color(self.palette.navy),
                );
                ui.add_space(8.0);
                egui::Grid::new("roi_items")
                    .num_columns(2)
                    .spacing(egui::vec2(16.0, 6.0))
                    .show(ui, |ui| {
                        for item in &breakdown.items {
                            ui.label(egui::RichText::new(&item.label).strong());
                            ui.label(egui::RichText::new(&item.value).color(self.palette.success));
                            ui.end_row();
                        }
                    });
                ui.add_space(12.0);
                if ui.button("Fermer").clicked() {
                    close_requested = true;
                }
            });

        let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if !open || close_requested || escape {
            self.roi_popup = None;
        }
    }

    fn expire_effects(&mut self) {
        let now = self.now();
        if self.nav_glow.as_ref().is_some_and(|(_, flash)| flash.is_done(now)) {
            self.nav_glow = None;
        }
        self.skill_highlights.retain(|_, flash| !flash.is_done(now));
    }

    fn effects_animating(&self) -> bool {
        if self.reduced_motion {
            return false;
        }
        let now = self.now();
        let counting = self
            .counters
            .iter()
            .any(|counter| now.saturating_sub(self.counters_started) < counter.total_duration());
        let visible = self.navigation.visible_section();
        let revealing = match (self.reveals.get(visible), self.deck.section(visible.as_str())) {
            (Some(reveal), Some(content)) => !reveal.finished(content.body.reveal_count(), now),
            _ => false,
        };
        counting
            || revealing
            || self.ripple.is_some()
            || self.nav_glow.is_some()
            || !self.skill_highlights.is_empty()
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        let next = if self.navigation.is_transitioning() || self.effects_animating() {
            ANIMATION_REPAINT
        } else {
            IDLE_REPAINT
        };
        let next = self
            .navigation
            .time_until_next_deadline()
            .map_or(next, |deadline| deadline.min(next));
        ctx.request_repaint_after(next);
    }
}

/// Writes the portfolio export as pretty JSON into `dir`.
pub fn write_export(deck: &Deck, dir: &std::path::Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory '{}'", dir.display()))?;
    let path = dir.join(EXPORT_FILE_NAME);
    let json = serde_json::to_string_pretty(&deck.export(Utc::now()))
        .context("failed to serialize portfolio export")?;
    fs::write(&path, json).with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(path)
}

impl eframe::App for PresenterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_style_if_needed(ctx);
        self.handle_input(ctx);

        self.navigation.poll();
        self.process_navigation_events();
        self.expire_effects();

        self.show_top_bar(ctx);
        self.show_nav_panel(ctx);
        self.show_section(ctx);
        self.paint_ripple(ctx);
        self.show_roi_window(ctx);

        self.process_navigation_events();
        self.schedule_repaint(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_portfolio_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("exports");

        let path = write_export(&Deck::default(), &nested).expect("export");

        let raw = fs::read_to_string(&path).expect("read export");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(EXPORT_FILE_NAME));
        assert_eq!(value["profile"]["name"], "Mouad JOUID");
        assert_eq!(value["competencies"].as_array().map(Vec::len), Some(4));
        assert!(value["timestamp"].is_string());
    }
}
