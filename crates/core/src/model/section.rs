use serde::{Deserialize, Serialize};
use std::fmt;

/// Known malformed row in the published deck: the section column holds a
/// stray `1` for this card.
const MISLABELED_SECTION: &str = "1";
const MISLABELED_CONTENT: &str = "AWS Audit Manager";
const MISLABELED_FIX: &str = "Security, Identity, and Compliance";

/// Topic grouping label for a card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(String);

impl Section {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Builds the section for a row, repairing the one known mislabeled row.
    #[must_use]
    pub fn for_row(label: &str, content: &str) -> Self {
        if label == MISLABELED_SECTION && content == MISLABELED_CONTENT {
            return Self::new(MISLABELED_FIX);
        }
        Self::new(label)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match used by list filters.
    #[must_use]
    pub fn contains_ignore_case(&self, needle_lower: &str) -> bool {
        self.0.to_lowercase().contains(needle_lower)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Section {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
