use std::{collections::HashSet, fs, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    builtin,
    domain::{SectionId, SectionKind},
    error::ContentError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub profile: Profile,
    pub sections: Vec<SectionContent>,
    #[serde(default = "builtin::glossary")]
    pub glossary: Vec<GlossaryTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub expertise: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionContent {
    pub id: SectionId,
    pub nav_label: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<CallToAction>,
    pub body: SectionBody,
}

/// Button inside a section that navigates to another section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    pub target: SectionId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Home {
        headline: String,
        #[serde(default)]
        stats: Vec<Stat>,
        #[serde(default)]
        badges: Vec<String>,
    },
    Timeline {
        phases: Vec<TimelinePhase>,
    },
    ProblemsSolutions {
        cards: Vec<ProblemCard>,
        #[serde(default)]
        impacts: Vec<ImpactMetric>,
    },
    SkillsResults {
        categories: Vec<SkillCategory>,
    },
    CulturalFit {
        values: Vec<ValueCard>,
    },
}

impl SectionBody {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionBody::Home { .. } => SectionKind::Home,
            SectionBody::Timeline { .. } => SectionKind::Timeline,
            SectionBody::ProblemsSolutions { .. } => SectionKind::ProblemsSolutions,
            SectionBody::SkillsResults { .. } => SectionKind::SkillsResults,
            SectionBody::CulturalFit { .. } => SectionKind::CulturalFit,
        }
    }

    /// Number of items revealed one after another once the section is shown.
    pub fn reveal_count(&self) -> usize {
        match self {
            SectionBody::Home { stats, .. } => stats.len(),
            SectionBody::Timeline { phases } => phases.len(),
            SectionBody::ProblemsSolutions { cards, .. } => cards.len(),
            SectionBody::SkillsResults { categories } => categories.len(),
            SectionBody::CulturalFit { values } => values.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub period: String,
    pub title: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemCard {
    pub icon: String,
    pub problem: String,
    pub solution: String,
    #[serde(default)]
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactMetric {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub level: u8,
    pub result: String,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCard {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub description: String,
}

impl Deck {
    pub fn from_toml_str(raw: &str) -> Result<Self, ContentError> {
        let deck: Deck = toml::from_str(raw)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.sections.is_empty() {
            return Err(ContentError::EmptyDeck);
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.clone()) {
                return Err(ContentError::DuplicateSection(section.id.clone()));
            }
            if let SectionBody::SkillsResults { categories } = &section.body {
                if let Some(category) = categories.iter().find(|c| c.level > 100) {
                    return Err(ContentError::SkillLevelOutOfRange {
                        name: category.name.clone(),
                        level: category.level,
                    });
                }
            }
        }

        for section in &self.sections {
            if let Some(cta) = &section.call_to_action {
                if !seen.contains(&cta.target) {
                    return Err(ContentError::UnknownLinkTarget {
                        section: section.id.clone(),
                        target: cta.target.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    pub fn section(&self, id: &str) -> Option<&SectionContent> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn describe_term(&self, label: &str) -> Option<&str> {
        describe_term(&self.glossary, label)
    }

    pub fn impact_metrics(&self) -> impl Iterator<Item = &ImpactMetric> {
        self.sections.iter().flat_map(|s| match &s.body {
            SectionBody::ProblemsSolutions { impacts, .. } => impacts.as_slice(),
            _ => &[],
        })
    }

    pub fn skill_categories(&self) -> impl Iterator<Item = &SkillCategory> {
        self.sections.iter().flat_map(|s| match &s.body {
            SectionBody::SkillsResults { categories } => categories.as_slice(),
            _ => &[],
        })
    }

    pub fn export(&self, timestamp: DateTime<Utc>) -> PortfolioExport {
        PortfolioExport {
            profile: ExportProfile {
                name: self.profile.name.clone(),
                role: self.profile.role.clone(),
                expertise: self.profile.expertise.clone(),
            },
            competencies: self
                .skill_categories()
                .map(|c| Competency {
                    name: c.name.clone(),
                    level: c.level,
                    impact: c.result.clone(),
                })
                .collect(),
            results: self.impact_metrics().cloned().collect(),
            timestamp,
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        builtin::portfolio_deck()
    }
}

/// First glossary entry whose term occurs in `label`.
pub fn describe_term<'a>(glossary: &'a [GlossaryTerm], label: &str) -> Option<&'a str> {
    glossary
        .iter()
        .find(|entry| label.contains(entry.term.as_str()))
        .map(|entry| entry.description.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiBreakdown {
    pub title: String,
    pub items: Vec<RoiItem>,
}

impl RoiBreakdown {
    /// Simulated breakdown; the line items are the same for every metric.
    pub fn for_metric(metric: &ImpactMetric) -> Self {
        let item = |label: &str, value: &str| RoiItem {
            label: label.to_string(),
            value: value.to_string(),
        };
        Self {
            title: format!("Détail ROI: {} {}", metric.value, metric.label),
            items: vec![
                item("Temps économisé:", "2h/jour par équipe"),
                item("Coût évité:", "€15k/trimestre"),
                item("Amélioration qualité:", "-80% erreurs"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioExport {
    pub profile: ExportProfile,
    pub competencies: Vec<Competency>,
    pub results: Vec<ImpactMetric>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportProfile {
    pub name: String,
    pub role: String,
    pub expertise: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    pub name: String,
    pub level: u8,
    pub impact: String,
}
