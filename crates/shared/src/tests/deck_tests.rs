use std::io::Write as _;

use chrono::{TimeZone, Utc};

use crate::{
    deck::{describe_term, Deck, ImpactMetric, RoiBreakdown, SectionBody},
    domain::{sections, SectionKind},
    error::ContentError,
};

const TWO_SECTION_DECK: &str = r#"
[profile]
name = "Test Person"
role = "PMO"

[[sections]]
id = "intro"
nav_label = "Intro"
title = "Introduction"

[sections.call_to_action]
label = "Next"
target = "skills"

[sections.body]
kind = "home"
headline = "Hello"

[[sections.body.stats]]
value = "12"
label = "Projects"

[[sections]]
id = "skills"
nav_label = "Skills"
title = "Skills"

[sections.body]
kind = "skills_results"

[[sections.body.categories]]
name = "Planning"
level = 80
result = "On time"
"#;

#[test]
fn builtin_deck_follows_presentation_order_and_validates() {
    let deck = Deck::default();
    deck.validate().expect("builtin deck is valid");

    let ids: Vec<String> = deck
        .section_ids()
        .into_iter()
        .map(|id| id.as_str().to_string())
        .collect();
    assert_eq!(ids, sections::ORDER);
    assert_eq!(
        deck.section(sections::SKILLS_RESULTS)
            .map(|s| s.body.kind()),
        Some(SectionKind::SkillsResults)
    );
}

#[test]
fn parses_toml_deck_with_default_glossary() {
    let deck = Deck::from_toml_str(TWO_SECTION_DECK).expect("parse deck");

    assert_eq!(deck.sections.len(), 2);
    assert_eq!(deck.glossary.len(), 8);
    match &deck.sections[0].body {
        SectionBody::Home { stats, badges, .. } => {
            assert_eq!(stats[0].value, "12");
            assert!(badges.is_empty());
        }
        other => panic!("unexpected body {other:?}"),
    }
    assert_eq!(
        deck.sections[0]
            .call_to_action
            .as_ref()
            .map(|cta| cta.target.as_str()),
        Some("skills")
    );
}

#[test]
fn rejects_skill_level_above_hundred() {
    let raw = TWO_SECTION_DECK.replace("level = 80", "level = 101");
    let err = Deck::from_toml_str(&raw).expect_err("level out of range");
    assert!(matches!(
        err,
        ContentError::SkillLevelOutOfRange { level: 101, .. }
    ));
}

#[test]
fn rejects_duplicate_section_ids() {
    let raw = TWO_SECTION_DECK.replace("id = \"skills\"", "id = \"intro\"");
    let err = Deck::from_toml_str(&raw).expect_err("duplicate id");
    assert!(matches!(err, ContentError::DuplicateSection(id) if id == "intro"));
}

#[test]
fn rejects_call_to_action_pointing_nowhere() {
    let raw = TWO_SECTION_DECK.replace("target = \"skills\"", "target = \"ghost\"");
    let err = Deck::from_toml_str(&raw).expect_err("dangling link");
    assert!(matches!(err, ContentError::UnknownLinkTarget { target, .. } if target == "ghost"));
}

#[test]
fn rejects_deck_without_sections() {
    let mut deck = Deck::default();
    deck.sections.clear();
    assert!(matches!(deck.validate(), Err(ContentError::EmptyDeck)));
}

#[test]
fn loads_deck_from_file_and_reports_missing_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(TWO_SECTION_DECK.as_bytes()).expect("write deck");

    let deck = Deck::load(file.path()).expect("load deck");
    assert_eq!(deck.profile.name, "Test Person");

    let missing = file.path().with_extension("missing");
    let err = Deck::load(&missing).expect_err("missing file");
    assert!(matches!(err, ContentError::Io { .. }));
}

#[test]
fn glossary_matches_first_term_contained_in_label() {
    let deck = Deck::default();
    assert_eq!(
        deck.describe_term("Certification PSPO I (2023)"),
        Some("Professional Scrum Product Owner - Certification Agile/Scrum pour la gestion de produit")
    );
    assert_eq!(deck.describe_term("Excel"), None);
    assert_eq!(describe_term(&[], "Power BI"), None);
}

#[test]
fn roi_breakdown_titles_metric_and_lists_fixed_items() {
    let breakdown = RoiBreakdown::for_metric(&ImpactMetric {
        value: "-60%".to_string(),
        label: "temps de reporting".to_string(),
    });

    assert_eq!(breakdown.title, "Détail ROI: -60% temps de reporting");
    let labels: Vec<&str> = breakdown.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(
        labels,
        ["Temps économisé:", "Coût évité:", "Amélioration qualité:"]
    );
}

#[test]
fn export_collects_competencies_and_results() {
    let deck = Deck::default();
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    let export = deck.export(at);

    assert_eq!(export.profile.name, "Mouad JOUID");
    assert_eq!(export.competencies.len(), 4);
    assert_eq!(export.competencies[0].level, 92);
    assert_eq!(export.results.len(), 3);

    let json = serde_json::to_value(&export).expect("serialize export");
    assert_eq!(json["timestamp"], "2024-03-01T09:30:00Z");
    assert_eq!(json["profile"]["expertise"][0], "Gouvernance Projet");
}
