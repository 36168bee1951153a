use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MasteryError {
    #[error("mastery key cannot be empty")]
    InvalidKey,
}

/// Number of consecutive successes that marks a card as mastered.
pub const MASTERY_THRESHOLD: u32 = 3;

//
// ─── JUDGMENT ─────────────────────────────────────────────────────────────────
//

/// Learner's verdict on the card currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Judgment {
    /// Recalled correctly. Counts toward the mastery streak.
    Success,
    /// Missed. Drops the card straight back to zero.
    Failure,
    /// "I already know this": mastered in one step.
    InstantMaster,
}

impl Judgment {
    /// Whether this judgment counts as a correct answer in session stats.
    #[must_use]
    pub fn is_correct(self) -> bool {
        !matches!(self, Judgment::Failure)
    }
}

//
// ─── MASTERY RECORD ───────────────────────────────────────────────────────────
//

/// Study progress for one card.
///
/// Serialized with the camelCase field names of the persisted slot:
/// `{ "correctCount": 2, "mastered": false, "encounters": 5 }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
    pub correct_count: u32,
    pub mastered: bool,
    pub encounters: u32,
}

impl MasteryRecord {
    #[must_use]
    pub fn new(correct_count: u32, mastered: bool, encounters: u32) -> Self {
        Self {
            correct_count,
            mastered,
            encounters,
        }
    }

    /// Apply one judgment and return the next record.
    ///
    /// Any failure resets the streak to zero. Successes past the threshold
    /// keep counting; `mastered` stays true.
    #[must_use]
    pub fn apply(self, judgment: Judgment) -> Self {
        let encounters = self.encounters.saturating_add(1);
        match judgment {
            Judgment::InstantMaster => Self {
                correct_count: MASTERY_THRESHOLD,
                mastered: true,
                encounters,
            },
            Judgment::Success => {
                let correct_count = self.correct_count.saturating_add(1);
                Self {
                    correct_count,
                    mastered: self.mastered || correct_count >= MASTERY_THRESHOLD,
                    encounters,
                }
            }
            Judgment::Failure => Self {
                correct_count: 0,
                mastered: false,
                encounters,
            },
        }
    }

    /// Clear the mastered flag only. The streak and encounter count are left
    /// as they were, so `mastered` may disagree with `correct_count` until the
    /// next judgment.
    #[must_use]
    pub fn unmastered(self) -> Self {
        Self {
            mastered: false,
            ..self
        }
    }

    /// True when `mastered` agrees with the streak threshold.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.mastered == (self.correct_count >= MASTERY_THRESHOLD)
    }
}

//
// ─── PROGRESS MAP ─────────────────────────────────────────────────────────────
//

/// Mastery records keyed by card content.
///
/// Serializes as a flat JSON object so the whole map fits one storage slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<String, MasteryRecord>);

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MasteryRecord> {
        self.0.get(key)
    }

    #[must_use]
    pub fn is_mastered(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|record| record.mastered)
    }

    /// Current streak for a card, 0 when it was never judged.
    #[must_use]
    pub fn correct_count(&self, key: &str) -> u32 {
        self.0.get(key).map_or(0, |record| record.correct_count)
    }

    /// Apply a judgment to `key`, creating the record on first sight.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::InvalidKey` for an empty or blank key.
    pub fn record(&mut self, key: &str, judgment: Judgment) -> Result<MasteryRecord, MasteryError> {
        validate_key(key)?;
        let next = self
            .0
            .get(key)
            .copied()
            .unwrap_or_default()
            .apply(judgment);
        self.0.insert(key.to_owned(), next);
        Ok(next)
    }

    /// Clear the mastered flag of an existing record.
    ///
    /// Returns the updated record, or `None` if the key was never judged.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::InvalidKey` for an empty or blank key.
    pub fn reset_mastery(&mut self, key: &str) -> Result<Option<MasteryRecord>, MasteryError> {
        validate_key(key)?;
        Ok(self.0.get_mut(key).map(|record| {
            *record = record.unmastered();
            *record
        }))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MasteryRecord)> {
        self.0.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Number of records currently flagged mastered.
    #[must_use]
    pub fn mastered_count(&self) -> usize {
        self.0.values().filter(|record| record.mastered).count()
    }
}

impl FromIterator<(String, MasteryRecord)> for ProgressMap {
    fn from_iter<T: IntoIterator<Item = (String, MasteryRecord)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn validate_key(key: &str) -> Result<(), MasteryError> {
    if key.trim().is_empty() {
        return Err(MasteryError::InvalidKey);
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
