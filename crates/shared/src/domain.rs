use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Stable identifier of one top-level panel of the presentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Section ids of the built-in portfolio deck, in presentation order.
pub mod sections {
    pub const HOME: &str = "accueil";
    pub const PLAN_90_DAYS: &str = "plan-90j";
    pub const PROBLEMS_SOLUTIONS: &str = "problemes-solutions";
    pub const SKILLS_RESULTS: &str = "competences-resultats";
    pub const CULTURAL_FIT: &str = "fit-culturel";

    pub const ORDER: [&str; 5] = [
        HOME,
        PLAN_90_DAYS,
        PROBLEMS_SOLUTIONS,
        SKILLS_RESULTS,
        CULTURAL_FIT,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Home,
    Timeline,
    ProblemsSolutions,
    SkillsResults,
    CulturalFit,
}
