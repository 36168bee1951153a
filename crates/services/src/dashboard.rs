use std::collections::HashMap;

use prep_core::mastery::ProgressMap;
use prep_core::model::{CardRecord, Section};

/// Mastery totals for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStats {
    pub section: Section,
    pub total: usize,
    pub mastered: usize,
}

impl SectionStats {
    #[must_use]
    pub fn percentage(&self) -> u8 {
        percentage(self.mastered, self.total)
    }
}

/// Overall and per-section mastery, as shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub mastered: usize,
    /// Sections in order of first appearance in the card list.
    pub sections: Vec<SectionStats>,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(records: &[CardRecord], progress: &ProgressMap) -> Self {
        let mut sections: Vec<SectionStats> = Vec::new();
        let mut index: HashMap<&Section, usize> = HashMap::new();
        let mut mastered = 0;

        for card in records {
            let is_mastered = progress.is_mastered(card.mastery_key());
            if is_mastered {
                mastered += 1;
            }

            let slot = *index.entry(&card.section).or_insert_with(|| {
                sections.push(SectionStats {
                    section: card.section.clone(),
                    total: 0,
                    mastered: 0,
                });
                sections.len() - 1
            });
            let entry = &mut sections[slot];
            entry.total += 1;
            if is_mastered {
                entry.mastered += 1;
            }
        }

        Self {
            total: records.len(),
            mastered,
            sections,
        }
    }

    /// Overall mastered share, rounded to a whole percent; 0 with no cards.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        percentage(self.mastered, self.total)
    }
}

/// `round(part / whole * 100)` with halves rounded up.
fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part.min(whole) * 200 + whole) / (whole * 2);
    u8::try_from(rounded).unwrap_or(100)
}
