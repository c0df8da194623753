//! In-process session history with browser-style back/forward.

use serde::{Deserialize, Serialize};
use shared::domain::SectionId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub section_id: SectionId,
}

impl HistoryEntry {
    pub fn new(section_id: SectionId) -> Self {
        Self { section_id }
    }
}

/// Ordered entries plus a cursor. Pushing while the cursor is behind the
/// newest entry discards the forward entries.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl SessionHistory {
    /// History holding only the page-load entry.
    pub fn new(initial: SectionId) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial)],
            cursor: 0,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Makes the entry for `section` nearest the cursor current, preferring
    /// earlier entries on a tie. With no such entry the current entry is
    /// replaced, so the cursor always names the shown section.
    pub fn sync_to(&mut self, section: &SectionId) {
        if self.current().section_id == *section {
            return;
        }
        let nearest = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.section_id == *section)
            .min_by_key(|(index, _)| (index.abs_diff(self.cursor), *index > self.cursor))
            .map(|(index, _)| index);
        match nearest {
            Some(index) => self.cursor = index,
            None => self.entries[self.cursor] = HistoryEntry::new(section.clone()),
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
