//! Rendering of section bodies. Views only read state; anything the user
//! does comes back as a [`SectionAction`] for the app to apply.

use std::{
    collections::{HashMap, HashSet},
    f32::consts::PI,
    time::Duration,
};

use shared::{
    deck::{
        describe_term, GlossaryTerm, ImpactMetric, ProblemCard, Profile, SectionBody,
        SectionContent, SkillCategory, Stat, TimelinePhase, ValueCard,
    },
    domain::SectionId,
};

use super::{
    effects::{Flash, KpiCounter, Reveal},
    theme::{card, chip, lighten_color, Palette},
};

#[derive(Debug, Clone, PartialEq)]
pub enum SectionAction {
    Navigate {
        target: SectionId,
        button: egui::Rect,
        at: egui::Pos2,
    },
    ShowRoi(ImpactMetric),
    TogglePhase(usize),
    HighlightSkill(usize),
}

pub struct SectionView<'a> {
    pub content: &'a SectionContent,
    pub profile: &'a Profile,
    pub glossary: &'a [GlossaryTerm],
    pub palette: Palette,
    pub now: Duration,
    pub reveal: Reveal,
    pub counters: &'a [KpiCounter],
    pub counter_elapsed: Duration,
    pub expanded_phases: &'a HashSet<usize>,
    pub skill_highlights: &'a HashMap<usize, Flash>,
}

impl SectionView<'_> {
    pub fn show(&self, ui: &mut egui::Ui) -> Vec<SectionAction> {
        let mut actions = Vec::new();
        self.header(ui);
        ui.add_space(12.0);

        match &self.content.body {
            SectionBody::Home {
                headline,
                stats,
                badges,
            } => self.home(ui, headline, stats, badges),
            SectionBody::Timeline { phases } => self.timeline(ui, phases, &mut actions),
            SectionBody::ProblemsSolutions { cards, impacts } => {
                self.problems(ui, cards, impacts, &mut actions)
            }
            SectionBody::SkillsResults { categories } => {
                self.skills(ui, categories, &mut actions)
            }
            SectionBody::CulturalFit { values } => self.values(ui, values),
        }

        ui.add_space(20.0);
        self.call_to_action(ui, &mut actions);
        actions
    }

    fn header(&self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new(&self.content.title)
                .size(30.0)
                .strong()
                .color(self.palette.navy),
        );
        if let Some(subtitle) = &self.content.subtitle {
            ui.label(
                egui::RichText::new(subtitle)
                    .size(16.0)
                    .color(self.palette.muted_text),
            );
        }
    }

    fn term_chip(&self, ui: &mut egui::Ui, label: &str) {
        let response = chip(ui, self.palette, label);
        if let Some(description) = describe_term(self.glossary, label) {
            response.on_hover_text(description);
        }
    }

    fn chips(&self, ui: &mut egui::Ui, labels: &[String]) {
        if labels.is_empty() {
            return;
        }
        ui.horizontal_wrapped(|ui| {
            for label in labels {
                self.term_chip(ui, label);
            }
        });
    }

    fn home(&self, ui: &mut egui::Ui, headline: &str, stats: &[Stat], badges: &[String]) {
        ui.label(
            egui::RichText::new(&self.profile.name)
                .size(22.0)
                .strong()
                .color(self.palette.text),
        );
        ui.label(egui::RichText::new(&self.profile.role).color(self.palette.royal_blue));
        if !self.profile.tagline.is_empty() {
            ui.label(egui::RichText::new(&self.profile.tagline).italics());
        }
        ui.add_space(8.0);
        ui.label(egui::RichText::new(headline).size(17.0));
        ui.add_space(14.0);

        if !stats.is_empty() {
            ui.columns(stats.len(), |columns| {
                for (index, (column, stat)) in columns.iter_mut().zip(stats).enumerate() {
                    let value = self
                        .counters
                        .get(index)
                        .map(|counter| counter.display_at(self.counter_elapsed))
                        .unwrap_or_else(|| stat.value.clone());
                    let id = egui::Id::new((self.content.id.as_str(), "stat", index));
                    card(column, self.palette, id, 1.0, 0.0, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new(value)
                                    .size(28.0)
                                    .strong()
                                    .color(self.palette.gold),
                            );
                            ui.label(
                                egui::RichText::new(&stat.label).color(self.palette.muted_text),
                            );
                        });
                    });
                }
            });
        }

        ui.add_space(12.0);
        self.chips(ui, badges);
        self.chips(ui, &self.profile.expertise);
    }

    fn timeline(
        &self,
        ui: &mut egui::Ui,
        phases: &[TimelinePhase],
        actions: &mut Vec<SectionAction>,
    ) {
        for (index, phase) in phases.iter().enumerate() {
            let id = egui::Id::new((self.content.id.as_str(), "phase", index));
            let pulse = (self.reveal.detail(index, self.now) * PI).sin().max(0.0);
            let expanded = self.expanded_phases.contains(&index);
            let response = card(
                ui,
                self.palette,
                id,
                self.reveal.item(index, self.now),
                pulse,
                |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(&phase.period)
                                .strong()
                                .color(self.palette.gold),
                        );
                        ui.label(
                            egui::RichText::new(&phase.title)
                                .size(18.0)
                                .strong()
                                .color(self.palette.navy),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(if expanded { "▲" } else { "▼" });
                        });
                    });
                    if expanded {
                        for detail in &phase.details {
                            ui.label(format!("• {detail}"));
                        }
                    }
                    self.chips(ui, &phase.tools);
                },
            )
            .response;
            if response.clicked() {
                actions.push(SectionAction::TogglePhase(index));
            }
            ui.add_space(6.0);
        }
    }

    fn problems(
        &self,
        ui: &mut egui::Ui,
        cards: &[ProblemCard],
        impacts: &[ImpactMetric],
        actions: &mut Vec<SectionAction>,
    ) {
        for (index, problem) in cards.iter().enumerate() {
            let id = egui::Id::new((self.content.id.as_str(), "problem", index));
            let icon_scale = 0.6 + 0.4 * self.reveal.detail(index, self.now);
            card(
                ui,
                self.palette,
                id,
                self.reveal.item(index, self.now),
                0.0,
                |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&problem.icon).size(28.0 * icon_scale));
                        ui.vertical(|ui| {
                            ui.label(
                                egui::RichText::new(&problem.problem)
                                    .strong()
                                    .color(self.palette.navy),
                            );
                            ui.label(&problem.solution);
                        });
                    });
                    self.chips(ui, &problem.methods);
                },
            );
            ui.add_space(6.0);
        }

        if impacts.is_empty() {
            return;
        }
        ui.add_space(10.0);
        ui.columns(impacts.len(), |columns| {
            for (index, (column, metric)) in columns.iter_mut().zip(impacts).enumerate() {
                let id = egui::Id::new((self.content.id.as_str(), "impact", index));
                let response = card(column, self.palette, id, 1.0, 0.0, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new(&metric.value)
                                .size(26.0)
                                .strong()
                                .color(self.palette.success),
                        );
                        ui.label(&metric.label);
                    });
                })
                .response
                .on_hover_text("Cliquer pour le détail ROI");
                if response.clicked() {
                    actions.push(SectionAction::ShowRoi(metric.clone()));
                }
            }
        });
    }

    fn skills(
        &self,
        ui: &mut egui::Ui,
        categories: &[SkillCategory],
        actions: &mut Vec<SectionAction>,
    ) {
        for (index, category) in categories.iter().enumerate() {
            let id = egui::Id::new((self.content.id.as_str(), "skill", index));
            let highlight = self
                .skill_highlights
                .get(&index)
                .map(|flash| flash.strength(self.now))
                .unwrap_or(0.0);
            let fill = self.reveal.detail(index, self.now);
            let response = card(
                ui,
                self.palette,
                id,
                self.reveal.item(index, self.now),
                highlight,
                |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(&category.name)
                                .strong()
                                .color(self.palette.navy),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(format!("{}%", category.level))
                                    .strong()
                                    .color(self.palette.gold),
                            );
                        });
                    });
                    ui.add(
                        egui::ProgressBar::new(f32::from(category.level) / 100.0 * fill)
                            .fill(self.palette.royal_blue)
                            .desired_height(10.0),
                    );
                    ui.label(egui::RichText::new(&category.result).color(self.palette.success));
                    self.chips(ui, &category.tools);
                },
            )
            .response;
            if response.clicked() {
                actions.push(SectionAction::HighlightSkill(index));
            }
            ui.add_space(6.0);
        }
    }

    fn values(&self, ui: &mut egui::Ui, values: &[ValueCard]) {
        for (index, value) in values.iter().enumerate() {
            let id = egui::Id::new((self.content.id.as_str(), "value", index));
            let testimonial_opacity = self.reveal.detail(index, self.now);
            card(
                ui,
                self.palette,
                id,
                self.reveal.item(index, self.now),
                0.0,
                |ui| {
                    ui.label(
                        egui::RichText::new(&value.title)
                            .size(18.0)
                            .strong()
                            .color(self.palette.navy),
                    );
                    ui.label(&value.description);
                    if let Some(testimonial) = &value.testimonial {
                        ui.scope(|ui| {
                            ui.multiply_opacity(testimonial_opacity);
                            ui.label(
                                egui::RichText::new(format!("« {testimonial} »"))
                                    .italics()
                                    .color(self.palette.muted_text),
                            );
                        });
                    }
                },
            );
            ui.add_space(6.0);
        }
    }

    fn call_to_action(&self, ui: &mut egui::Ui, actions: &mut Vec<SectionAction>) {
        let Some(cta) = &self.content.call_to_action else {
            return;
        };
        let button = egui::Button::new(
            egui::RichText::new(&cta.label)
                .strong()
                .color(egui::Color32::WHITE),
        )
        .fill(self.palette.navy)
        .stroke(egui::Stroke::new(1.0, lighten_color(self.palette.gold, 0.2)))
        .min_size(egui::vec2(220.0, 40.0));

        let response = ui.add(button);
        if response.clicked() {
            let at = response
                .interact_pointer_pos()
                .unwrap_or_else(|| response.rect.center());
            actions.push(SectionAction::Navigate {
                target: cta.target.clone(),
                button: response.rect,
                at,
            });
        }
    }
}
