use chrono::{DateTime, Utc};

use prep_core::mastery::{Judgment, MasteryRecord, ProgressMap};
use prep_core::model::CardRecord;

use super::plan::{StudyPlan, StudyScope, shuffle_cards};
use super::progress::{SessionProgress, SessionStats};
use crate::error::StudyError;
use crate::progress_service::ProgressStore;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory study run over a fixed queue of cards.
///
/// Steps through the queue one card at a time. Each judgment goes through the
/// `ProgressStore`; the session itself only tracks position and tallies.
#[derive(Debug)]
pub struct StudySession {
    scope: StudyScope,
    cards: Vec<CardRecord>,
    current: usize,
    flipped: bool,
    stats: SessionStats,
    shuffle: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl StudySession {
    /// Start a session over a built plan.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Empty` if the plan has no cards.
    pub fn new(
        scope: StudyScope,
        plan: StudyPlan,
        started_at: DateTime<Utc>,
    ) -> Result<Self, StudyError> {
        if plan.cards.is_empty() {
            return Err(StudyError::Empty);
        }
        Ok(Self {
            scope,
            cards: plan.cards,
            current: 0,
            flipped: false,
            stats: SessionStats::default(),
            shuffle: true,
            started_at,
            completed_at: None,
        })
    }

    /// Keep queue order on `restart` instead of reshuffling.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn scope(&self) -> &StudyScope {
        &self.scope
    }

    #[must_use]
    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Toggle between the prompt and answer faces of the current card.
    pub fn flip(&mut self) {
        if !self.is_complete() {
            self.flipped = !self.flipped;
        }
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&CardRecord> {
        if self.is_complete() {
            return None;
        }
        self.cards.get(self.current)
    }

    /// Stored correct count of the current card, 0 when there is none.
    #[must_use]
    pub fn current_correct_count(&self, progress: &ProgressMap) -> u32 {
        self.current_card()
            .map_or(0, |card| progress.correct_count(card.mastery_key()))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.cards.len();
        SessionProgress {
            total,
            answered: self.stats.total,
            remaining: total.saturating_sub(self.stats.total),
            is_complete: self.is_complete(),
        }
    }

    /// Judge the current card, record it in `store`, and advance.
    ///
    /// `judged_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Completed` if the session is already finished.
    /// Propagates progress store rejections via `StudyError::Progress`.
    pub async fn judge(
        &mut self,
        store: &ProgressStore,
        judgment: Judgment,
        judged_at: DateTime<Utc>,
    ) -> Result<(MasteryRecord, ProgressMap), StudyError> {
        let key = self
            .current_card()
            .ok_or(StudyError::Completed)?
            .mastery_key()
            .to_owned();

        let map = store.record_judgment(&key, judgment).await?;
        let record = map.get(&key).copied().unwrap_or_default();
        self.advance(judgment, judged_at);
        Ok((record, map))
    }

    /// Start over on the same cards with zeroed stats.
    pub fn restart(&mut self, started_at: DateTime<Utc>) {
        if self.shuffle {
            shuffle_cards(&mut self.cards);
        }
        self.current = 0;
        self.flipped = false;
        self.stats = SessionStats::default();
        self.started_at = started_at;
        self.completed_at = None;
    }

    fn advance(&mut self, judgment: Judgment, judged_at: DateTime<Utc>) {
        self.stats.total += 1;
        if judgment.is_correct() {
            self.stats.correct += 1;
        }
        self.flipped = false;
        self.current += 1;
        if self.current >= self.cards.len() {
            self.completed_at = Some(judged_at);
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::CardDraft;
    use prep_core::time::fixed_now;
    use std::sync::Arc;
    use storage::repository::InMemoryRepository;

    fn card(content: &str) -> CardRecord {
        CardDraft {
            section: "Compute".to_string(),
            content: content.to_string(),
            details: String::new(),
            link: None,
        }
        .validate(0)
        .unwrap()
    }

    fn session(contents: &[&str]) -> StudySession {
        let plan = StudyPlan {
            cards: contents.iter().map(|c| card(c)).collect(),
            review_all: false,
        };
        StudySession::new(StudyScope::All, plan, fixed_now())
            .unwrap()
            .with_shuffle(false)
    }

    async fn store() -> ProgressStore {
        ProgressStore::open(Arc::new(InMemoryRepository::new())).await
    }

    #[test]
    fn empty_plan_is_rejected() {
        let plan = StudyPlan {
            cards: Vec::new(),
            review_all: false,
        };
        assert!(matches!(
            StudySession::new(StudyScope::All, plan, fixed_now()),
            Err(StudyError::Empty)
        ));
    }

    #[tokio::test]
    async fn judging_advances_and_completes_after_last_card() {
        let store = store().await;
        let mut session = session(&["AWS Lambda", "Amazon EC2"]);

        session.flip();
        assert!(session.is_flipped());
        session
            .judge(&store, Judgment::Success, fixed_now())
            .await
            .unwrap();
        assert!(!session.is_flipped());
        assert_eq!(session.current_card().unwrap().content, "Amazon EC2");

        session
            .judge(&store, Judgment::Failure, fixed_now())
            .await
            .unwrap();
        assert!(session.is_complete());
        assert_eq!(session.completed_at(), Some(fixed_now()));
        assert_eq!(session.stats(), SessionStats { correct: 1, total: 2 });
        assert_eq!(
            session.progress(),
            SessionProgress {
                total: 2,
                answered: 2,
                remaining: 0,
                is_complete: true,
            }
        );
    }

    #[tokio::test]
    async fn judging_a_completed_session_fails() {
        let store = store().await;
        let mut session = session(&["AWS Lambda"]);
        session
            .judge(&store, Judgment::InstantMaster, fixed_now())
            .await
            .unwrap();
        let err = session
            .judge(&store, Judgment::Success, fixed_now())
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::Completed));
        assert_eq!(store.get("AWS Lambda").await.unwrap().encounters, 1);
    }

    #[tokio::test]
    async fn instant_master_counts_as_correct() {
        let store = store().await;
        let mut session = session(&["AWS Lambda"]);
        let (record, map) = session
            .judge(&store, Judgment::InstantMaster, fixed_now())
            .await
            .unwrap();
        assert_eq!(record, MasteryRecord::new(3, true, 1));
        assert!(map.is_mastered("AWS Lambda"));
        assert_eq!(session.stats().correct, 1);
    }

    #[tokio::test]
    async fn restart_zeroes_stats_and_keeps_cards() {
        let store = store().await;
        let mut session = session(&["AWS Lambda", "Amazon EC2"]);
        while !session.is_complete() {
            session
                .judge(&store, Judgment::Success, fixed_now())
                .await
                .unwrap();
        }

        session.restart(fixed_now());
        assert!(!session.is_complete());
        assert_eq!(session.stats(), SessionStats::default());
        assert_eq!(session.current_card().unwrap().content, "AWS Lambda");
        assert_eq!(session.cards().len(), 2);
    }

    #[tokio::test]
    async fn current_correct_count_reads_progress() {
        let store = store().await;
        store
            .record_judgment("AWS Lambda", Judgment::Success)
            .await
            .unwrap();
        let session = session(&["AWS Lambda"]);
        assert_eq!(session.current_correct_count(&store.snapshot().await), 1);
    }
}
