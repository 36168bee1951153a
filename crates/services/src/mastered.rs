use std::collections::BTreeSet;

use prep_core::mastery::ProgressMap;
use prep_core::model::{CardRecord, Section};

/// Filter state of the mastered-cards list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasteredQuery {
    pub search: String,
    pub section: Option<Section>,
}

impl MasteredQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `section`, or clear the filter if it is already selected.
    pub fn toggle_section(&mut self, section: &Section) {
        if self.section.as_ref() == Some(section) {
            self.section = None;
        } else {
            self.section = Some(section.clone());
        }
    }

    /// Mastered cards that pass the search and section filters, in source order.
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [CardRecord], progress: &ProgressMap) -> Vec<&'a CardRecord> {
        let needle = self.search.trim().to_lowercase();
        records
            .iter()
            .filter(|card| progress.is_mastered(card.mastery_key()))
            .filter(|card| card.matches_search(&needle))
            .filter(|card| self.section.as_ref().is_none_or(|s| &card.section == s))
            .collect()
    }
}

/// Distinct sections among mastered cards, sorted.
#[must_use]
pub fn mastered_sections(records: &[CardRecord], progress: &ProgressMap) -> Vec<Section> {
    records
        .iter()
        .filter(|card| progress.is_mastered(card.mastery_key()))
        .map(|card| card.section.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
