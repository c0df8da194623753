//! Ordered, immutable catalog of the sections a presentation can show.

use std::{collections::HashSet, sync::Arc};

use shared::domain::SectionId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("section catalog must contain at least one section")]
    Empty,
    #[error("section '{0}' is registered more than once")]
    Duplicate(SectionId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalog {
    sections: Arc<[SectionId]>,
}

impl SectionCatalog {
    pub fn new<I, S>(ids: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        let sections: Vec<SectionId> = ids.into_iter().map(Into::into).collect();
        if sections.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(sections.len());
        for id in &sections {
            if !seen.insert(id.as_str()) {
                return Err(CatalogError::Duplicate(id.clone()));
            }
        }

        Ok(Self {
            sections: sections.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter()
    }

    pub fn first(&self) -> &SectionId {
        &self.sections[0]
    }

    pub fn last(&self) -> &SectionId {
        &self.sections[self.sections.len() - 1]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.as_str() == id)
    }

    pub fn get(&self, id: &str) -> Option<&SectionId> {
        self.index_of(id).map(|index| &self.sections[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Section after `id`, wrapping to the first one. Unknown ids resolve
    /// as if they were the first section.
    pub fn next_after(&self, id: &str) -> &SectionId {
        let index = self.index_of(id).unwrap_or(0);
        &self.sections[(index + 1) % self.sections.len()]
    }

    /// Section before `id`, wrapping to the last one.
    pub fn previous_before(&self, id: &str) -> &SectionId {
        let index = self.index_of(id).unwrap_or(0);
        let previous = if index == 0 {
            self.sections.len() - 1
        } else {
            index - 1
        };
        &self.sections[previous]
    }

    /// Section addressed by a deep-link fragment, `#` prefix optional.
    pub fn resolve_initial_section(&self, fragment: &str) -> &SectionId {
        let fragment = fragment.trim();
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        self.get(fragment).unwrap_or_else(|| self.first())
    }

    /// History location for a section: the root for the first section,
    /// a fragment otherwise.
    pub fn location_of(&self, id: &SectionId) -> String {
        if id == self.first() {
            "/".to_string()
        } else {
            format!("/#{id}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SectionCatalog {
        SectionCatalog::new([
            "accueil",
            "plan-90j",
            "problemes-solutions",
            "competences-resultats",
            "fit-culturel",
        ])
        .expect("catalog")
    }

    #[test]
    fn rejects_empty_and_duplicate_catalogs() {
        assert_eq!(
            SectionCatalog::new(Vec::<&str>::new()),
            Err(CatalogError::Empty)
        );
        assert_eq!(
            SectionCatalog::new(["a", "b", "a"]),
            Err(CatalogError::Duplicate(SectionId::new("a")))
        );
    }

    #[test]
    fn resolves_deep_links_with_or_without_hash() {
        let catalog = catalog();
        assert_eq!(catalog.resolve_initial_section("plan-90j"), "plan-90j");
        assert_eq!(catalog.resolve_initial_section("#fit-culturel"), "fit-culturel");
        assert_eq!(catalog.resolve_initial_section("nonexistent"), "accueil");
        assert_eq!(catalog.resolve_initial_section(""), "accueil");
    }

    #[test]
    fn wraps_at_both_ends() {
        let catalog = catalog();
        assert_eq!(catalog.next_after("fit-culturel"), "accueil");
        assert_eq!(catalog.previous_before("accueil"), "fit-culturel");
        assert_eq!(catalog.next_after("plan-90j"), "problemes-solutions");
        assert_eq!(catalog.previous_before("plan-90j"), "accueil");
    }

    #[test]
    fn first_section_lives_at_root_location() {
        let catalog = catalog();
        assert_eq!(catalog.location_of(catalog.first()), "/");
        assert_eq!(
            catalog.location_of(&SectionId::new("plan-90j")),
            "/#plan-90j"
        );
    }
}
