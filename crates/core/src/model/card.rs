use thiserror::Error;
use url::Url;

use crate::model::{ids::CardId, section::Section};

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// Raw card fields as they come out of a tabular source, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub section: String,
    pub content: String,
    pub details: String,
    pub link: Option<Url>,
}

impl CardDraft {
    /// Validate the draft into a `CardRecord`.
    ///
    /// `index` is the row position reported in errors. Text fields are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `CardError::MissingContent` if the content is empty.
    pub fn validate(self, index: usize) -> Result<CardRecord, CardError> {
        let content = self.content.trim().to_owned();
        // Rows without content are dropped, so the id is always the content.
        let id = CardId::new(content.as_str()).map_err(|_| CardError::MissingContent { index })?;
        let section = Section::for_row(self.section.trim(), &content);

        Ok(CardRecord {
            id,
            section,
            content,
            details: self.details.trim().to_owned(),
            link: self.link,
        })
    }
}

/// One flashcard: the prompt (`content`), its answer (`details`), and the
/// topic section it belongs to.
///
/// `content` doubles as the key under which mastery progress is tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub id: CardId,
    pub section: Section,
    pub content: String,
    pub details: String,
    pub link: Option<Url>,
}

impl CardRecord {
    /// Key used by the progress store for this card.
    #[must_use]
    pub fn mastery_key(&self) -> &str {
        &self.content
    }

    /// Case-insensitive match of a lowercased needle against content or section.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.content.to_lowercase().contains(needle_lower)
            || self.section.contains_ignore_case(needle_lower)
    }
}

/// Parse a reference link column. Empty cells mean "no link".
///
/// # Errors
///
/// Returns `CardError::InvalidLink` if the value is not an absolute URL.
pub fn parse_link(raw: &str) -> Result<Option<Url>, CardError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Url::parse(trimmed)
        .map(Some)
        .map_err(|_| CardError::InvalidLink(trimmed.to_owned()))
}

//
// ─── CARD ERRORS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("row {index} has no content")]
    MissingContent { index: usize },

    #[error("invalid reference link: {0}")]
    InvalidLink(String),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
