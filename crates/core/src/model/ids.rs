use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier for a card.
///
/// Cards in the bundled deck carry no numeric key, so the identifier is the
/// card's display text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Creates a new `CardId` from a non-empty label.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the label is empty or whitespace only.
    pub fn new(id: impl Into<String>) -> Result<Self, ParseIdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ParseIdError);
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({:?})", self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for parsing a `CardId` from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseIdError;

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("card id cannot be empty")
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for CardId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardId::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_id_displays_its_label() {
        let id = CardId::new("Amazon S3").unwrap();
        assert_eq!(id.to_string(), "Amazon S3");
        assert_eq!(format!("{id:?}"), "CardId(\"Amazon S3\")");
    }

    #[test]
    fn blank_card_id_is_rejected() {
        assert_eq!("   ".parse::<CardId>(), Err(ParseIdError));
    }
}
