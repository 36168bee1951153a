use prep_core::mastery::ProgressMap;
use prep_core::model::{CardRecord, Section};
use services::{MasteredQuery, mastered_sections};

use super::theme::{SectionTheme, section_theme};

#[derive(Clone, Debug, PartialEq)]
pub struct MasteredRowVm {
    pub key: String,
    pub content: String,
    pub section: Section,
    pub details: String,
    pub link: Option<String>,
    pub theme: SectionTheme,
    pub expanded: bool,
}

/// List state for the mastered-cards screen: filters, the expanded row, and
/// the row waiting for un-master confirmation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MasteredVm {
    query: MasteredQuery,
    expanded: Option<String>,
    pending_unmaster: Option<String>,
}

impl MasteredVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.query.search
    }

    pub fn set_search(&mut self, search: String) {
        self.query.search = search;
    }

    #[must_use]
    pub fn selected_section(&self) -> Option<&Section> {
        self.query.section.as_ref()
    }

    pub fn toggle_section(&mut self, section: &Section) {
        self.query.toggle_section(section);
    }

    pub fn toggle_expanded(&mut self, key: &str) {
        if self.expanded.as_deref() == Some(key) {
            self.expanded = None;
        } else {
            self.expanded = Some(key.to_owned());
        }
    }

    #[must_use]
    pub fn pending_unmaster(&self) -> Option<&str> {
        self.pending_unmaster.as_deref()
    }

    pub fn request_unmaster(&mut self, key: &str) {
        self.pending_unmaster = Some(key.to_owned());
    }

    pub fn cancel_unmaster(&mut self) {
        self.pending_unmaster = None;
    }

    /// Take the confirmed key; collapses its row if it was open.
    pub fn confirm_unmaster(&mut self) -> Option<String> {
        let key = self.pending_unmaster.take()?;
        if self.expanded.as_deref() == Some(key.as_str()) {
            self.expanded = None;
        }
        Some(key)
    }

    #[must_use]
    pub fn sections(&self, records: &[CardRecord], progress: &ProgressMap) -> Vec<Section> {
        mastered_sections(records, progress)
    }

    #[must_use]
    pub fn rows(&self, records: &[CardRecord], progress: &ProgressMap) -> Vec<MasteredRowVm> {
        self.query
            .apply(records, progress)
            .into_iter()
            .map(|card| MasteredRowVm {
                key: card.mastery_key().to_owned(),
                content: card.content.clone(),
                section: card.section.clone(),
                details: card.details.clone(),
                link: card.link.as_ref().map(ToString::to_string),
                theme: section_theme(card.section.as_str()),
                expanded: self.expanded.as_deref() == Some(card.mastery_key()),
            })
            .collect()
    }
}
