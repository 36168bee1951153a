use std::sync::Arc;

use prep_core::mastery::{Judgment, MasteryRecord, ProgressMap};
use prep_core::model::CardRecord;

use super::plan::{StudyPlanBuilder, StudyScope};
use super::session::StudySession;
use crate::Clock;
use crate::error::StudyError;
use crate::progress_service::ProgressStore;

/// Result of judging a single card in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyAnswerResult {
    pub record: MasteryRecord,
    pub progress: ProgressMap,
    pub is_complete: bool,
}

/// Orchestrates session start and persisted judging.
#[derive(Clone)]
pub struct StudyLoopService {
    clock: Clock,
    progress: Arc<ProgressStore>,
    shuffle: bool,
}

impl StudyLoopService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<ProgressStore>) -> Self {
        Self {
            clock,
            progress,
            shuffle: true,
        }
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn progress_store(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    /// Start a session over `records` restricted to `scope`.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Empty` if the scope selects no cards.
    pub async fn start_session(
        &self,
        records: &[CardRecord],
        scope: StudyScope,
    ) -> Result<StudySession, StudyError> {
        let progress = self.progress.snapshot().await;
        let plan = StudyPlanBuilder::new(&scope)
            .with_shuffle(self.shuffle)
            .build(records, &progress)?;
        tracing::debug!(
            %scope,
            cards = plan.total(),
            review_all = plan.review_all,
            "starting study session"
        );
        let session = StudySession::new(scope, plan, self.clock.now())?;
        Ok(session.with_shuffle(self.shuffle))
    }

    /// Judge the current card and persist the updated progress.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Completed` if the session is already finished.
    pub async fn judge_current(
        &self,
        session: &mut StudySession,
        judgment: Judgment,
    ) -> Result<StudyAnswerResult, StudyError> {
        let (record, progress) = session
            .judge(self.progress.as_ref(), judgment, self.clock.now())
            .await?;
        if session.is_complete() {
            let stats = session.stats();
            tracing::debug!(
                correct = stats.correct,
                total = stats.total,
                "study session complete"
            );
        }
        Ok(StudyAnswerResult {
            record,
            progress,
            is_complete: session.is_complete(),
        })
    }

    /// Run the same cards again from the top.
    pub fn restart(&self, session: &mut StudySession) {
        session.restart(self.clock.now());
    }
}
