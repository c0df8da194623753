use std::path::PathBuf;

use thiserror::Error;

use crate::domain::SectionId;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read deck file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse deck: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("deck has no sections")]
    EmptyDeck,
    #[error("duplicate section id '{0}'")]
    DuplicateSection(SectionId),
    #[error("skill '{name}' level {level} exceeds 100")]
    SkillLevelOutOfRange { name: String, level: u8 },
    #[error("section '{section}' links to unknown section '{target}'")]
    UnknownLinkTarget {
        section: SectionId,
        target: SectionId,
    },
}
