use prep_core::mastery::{Judgment, MASTERY_THRESHOLD, ProgressMap};
use prep_core::model::CardRecord;
use services::{SessionProgress, SessionStats, StudyError, StudyLoopService, StudyScope, StudySession};

use crate::views::ViewError;

/// Horizontal drag distance, in pixels, that counts as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 120.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StudyIntent {
    Flip,
    Judge(Judgment),
    /// Card released after a horizontal drag of `delta_x` pixels.
    Swipe { delta_x: f64 },
    Restart,
}

/// Right past the threshold is a success, left past it a failure.
#[must_use]
pub fn swipe_judgment(delta_x: f64) -> Option<Judgment> {
    if delta_x > SWIPE_THRESHOLD_PX {
        Some(Judgment::Success)
    } else if delta_x < -SWIPE_THRESHOLD_PX {
        Some(Judgment::Failure)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyOutcome {
    Continue,
    Completed(SessionStats),
}

pub struct StudyVm {
    session: StudySession,
    progress: ProgressMap,
}

impl StudyVm {
    #[must_use]
    pub fn new(session: StudySession, progress: ProgressMap) -> Self {
        Self { session, progress }
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&CardRecord> {
        self.session.current_card()
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.session.is_flipped()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.session.progress()
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.session.stats()
    }

    /// Streak of the card on screen, capped at the mastery threshold.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.session
            .current_correct_count(&self.progress)
            .min(MASTERY_THRESHOLD)
    }

    pub fn flip(&mut self) {
        self.session.flip();
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` for service failures.
    pub async fn judge(
        &mut self,
        study_loop: &StudyLoopService,
        judgment: Judgment,
    ) -> Result<StudyOutcome, ViewError> {
        let result = study_loop
            .judge_current(&mut self.session, judgment)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "judgment failed");
                ViewError::Unknown
            })?;
        self.progress = result.progress;

        if result.is_complete {
            return Ok(StudyOutcome::Completed(self.session.stats()));
        }
        Ok(StudyOutcome::Continue)
    }

    pub fn restart(&mut self, study_loop: &StudyLoopService) {
        study_loop.restart(&mut self.session);
    }
}

/// Start a session over `records` and pair it with the current progress.
///
/// # Errors
///
/// Returns `ViewError::EmptySession` if the scope has no cards.
pub async fn start_study(
    study_loop: &StudyLoopService,
    records: &[CardRecord],
    scope: StudyScope,
) -> Result<StudyVm, ViewError> {
    let session = study_loop
        .start_session(records, scope)
        .await
        .map_err(|err| match err {
            StudyError::Empty => ViewError::EmptySession,
            other => {
                tracing::warn!(error = %other, "failed to start study session");
                ViewError::Unknown
            }
        })?;
    let progress = study_loop.progress_store().snapshot().await;
    Ok(StudyVm::new(session, progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::mastery::MasteryRecord;
    use prep_core::model::CardDraft;
    use prep_core::time::fixed_now;
    use services::{Clock, ProgressStore};
    use std::sync::Arc;
    use storage::repository::InMemoryRepository;

    fn records() -> Vec<CardRecord> {
        ["AWS Lambda", "Amazon EC2"]
            .into_iter()
            .map(|content| {
                CardDraft {
                    section: "Compute".to_string(),
                    content: content.to_string(),
                    ..CardDraft::default()
                }
                .validate(0)
                .unwrap()
            })
            .collect()
    }

    async fn study_loop() -> StudyLoopService {
        let store = ProgressStore::open(Arc::new(InMemoryRepository::new())).await;
        StudyLoopService::new(Clock::fixed(fixed_now()), Arc::new(store)).with_shuffle(false)
    }

    #[tokio::test]
    async fn judging_updates_streak_and_completes() {
        let study_loop = study_loop().await;
        let mut vm = start_study(&study_loop, &records(), StudyScope::All)
            .await
            .unwrap();
        assert_eq!(vm.streak(), 0);

        vm.flip();
        assert!(vm.is_flipped());
        let outcome = vm.judge(&study_loop, Judgment::Success).await.unwrap();
        assert_eq!(outcome, StudyOutcome::Continue);
        assert!(!vm.is_flipped());

        let outcome = vm.judge(&study_loop, Judgment::Failure).await.unwrap();
        assert_eq!(
            outcome,
            StudyOutcome::Completed(SessionStats { correct: 1, total: 2 })
        );
        assert_eq!(
            study_loop.progress_store().get("AWS Lambda").await,
            Some(MasteryRecord::new(1, false, 1))
        );
    }

    #[tokio::test]
    async fn streak_is_capped_for_cards_past_the_threshold() {
        let study_loop = study_loop().await;
        let store = study_loop.progress_store();
        for _ in 0..5 {
            store
                .record_judgment("AWS Lambda", Judgment::Success)
                .await
                .unwrap();
        }
        let mut vm = start_study(&study_loop, &records()[..1], StudyScope::All)
            .await
            .unwrap();

        assert_eq!(vm.streak(), MASTERY_THRESHOLD);
        assert_eq!(store.get("AWS Lambda").await.unwrap().correct_count, 5);

        vm.judge(&study_loop, Judgment::Success).await.unwrap();
        assert_eq!(store.get("AWS Lambda").await.unwrap().correct_count, 6);
    }

    #[test]
    fn swipes_past_the_threshold_judge_the_card() {
        assert_eq!(swipe_judgment(121.0), Some(Judgment::Success));
        assert_eq!(swipe_judgment(-121.0), Some(Judgment::Failure));
        assert_eq!(swipe_judgment(120.0), None);
        assert_eq!(swipe_judgment(-40.0), None);
    }

    #[tokio::test]
    async fn empty_scope_maps_to_empty_session() {
        let study_loop = study_loop().await;
        let err = start_study(&study_loop, &[], StudyScope::All)
            .await
            .err()
            .unwrap();
        assert_eq!(err, ViewError::EmptySession);
    }

    #[tokio::test]
    async fn judging_after_completion_is_an_error() {
        let study_loop = study_loop().await;
        let mut vm = start_study(&study_loop, &records()[..1], StudyScope::All)
            .await
            .unwrap();
        vm.judge(&study_loop, Judgment::Success).await.unwrap();
        let err = vm.judge(&study_loop, Judgment::Success).await.unwrap_err();
        assert_eq!(err, ViewError::Unknown);

        vm.restart(&study_loop);
        assert!(!vm.is_complete());
        assert_eq!(vm.streak(), 1);
    }
}
