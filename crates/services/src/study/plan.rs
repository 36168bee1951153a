use rand::rng;
use rand::seq::SliceRandom;
use std::fmt;

use prep_core::mastery::ProgressMap;
use prep_core::model::{CardRecord, Section};

use crate::error::StudyError;

/// Which cards a session draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StudyScope {
    #[default]
    All,
    Section(Section),
}

impl StudyScope {
    #[must_use]
    pub fn includes(&self, card: &CardRecord) -> bool {
        match self {
            StudyScope::All => true,
            StudyScope::Section(section) => &card.section == section,
        }
    }
}

impl fmt::Display for StudyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyScope::All => f.write_str("all"),
            StudyScope::Section(section) => write!(f, "section:{section}"),
        }
    }
}

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyPlan {
    pub cards: Vec<CardRecord>,
    /// True when every card in scope was already mastered and the plan fell
    /// back to reviewing all of them.
    pub review_all: bool,
}

impl StudyPlan {
    /// Build a shuffled plan for `scope`.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Empty` if no card falls in the scope.
    pub fn build(
        records: &[CardRecord],
        progress: &ProgressMap,
        scope: &StudyScope,
    ) -> Result<Self, StudyError> {
        StudyPlanBuilder::new(scope).build(records, progress)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.cards.len()
    }
}

/// Picks the cards for a session: unmastered ones first, all of them once
/// nothing is left to learn.
pub struct StudyPlanBuilder<'a> {
    scope: &'a StudyScope,
    shuffle: bool,
}

impl<'a> StudyPlanBuilder<'a> {
    #[must_use]
    pub fn new(scope: &'a StudyScope) -> Self {
        Self {
            scope,
            shuffle: true,
        }
    }

    /// Enable or disable shuffling; disabled plans keep source order.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Build a plan from the full card list and the current progress.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Empty` if no card falls in the scope.
    pub fn build(
        self,
        records: &[CardRecord],
        progress: &ProgressMap,
    ) -> Result<StudyPlan, StudyError> {
        let in_scope: Vec<&CardRecord> = records
            .iter()
            .filter(|card| self.scope.includes(card))
            .collect();
        if in_scope.is_empty() {
            return Err(StudyError::Empty);
        }

        let unmastered: Vec<CardRecord> = in_scope
            .iter()
            .filter(|card| !progress.is_mastered(card.mastery_key()))
            .map(|card| (*card).clone())
            .collect();

        let review_all = unmastered.is_empty();
        let mut cards = if review_all {
            in_scope.into_iter().cloned().collect()
        } else {
            unmastered
        };

        if self.shuffle {
            shuffle_cards(&mut cards);
        }

        Ok(StudyPlan { cards, review_all })
    }
}

pub(crate) fn shuffle_cards(cards: &mut [CardRecord]) {
    let mut rng = rng();
    cards.shuffle(&mut rng);
}
