use std::sync::Arc;

use dioxus::prelude::ReadableExt;

use prep_core::mastery::{Judgment, MasteryRecord};
use prep_core::model::Locale;
use services::PROGRESS_SLOT;
use storage::repository::{InMemoryRepository, SlotRepository};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_slots};
use crate::vm::{StudyIntent, StudyVm};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_empty_progress() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Locale::En).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("AWS Cloud Practitioner Prep"), "missing title in {html}");
    assert!(html.contains("0%"), "missing percentage in {html}");
    assert!(html.contains("0 / 32"), "missing totals in {html}");
    assert!(html.contains("Storage"), "missing section tile in {html}");
    assert!(html.contains("0 / 3 mastered"), "missing tile count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_reads_stored_progress() {
    let repo = InMemoryRepository::new();
    let record = r#"{"correctCount":3,"mastered":true,"encounters":1}"#;
    let stored = format!(
        r#"{{"Amazon S3":{record},"Amazon EBS":{record},"Amazon S3 Glacier":{record}}}"#
    );
    repo.write_slot(PROGRESS_SLOT, &stored).await.expect("seed progress");

    let mut harness =
        setup_view_harness_with_slots(ViewKind::Dashboard, Locale::En, Arc::new(repo)).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("9%"), "missing rounded percentage in {html}");
    assert!(html.contains("3 / 32"), "missing totals in {html}");
    assert!(html.contains("3 / 3 mastered"), "missing storage tile in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_survives_corrupt_progress() {
    let repo = InMemoryRepository::new();
    repo.write_slot(PROGRESS_SLOT, "not json").await.expect("seed progress");

    let mut harness =
        setup_view_harness_with_slots(ViewKind::Dashboard, Locale::En, Arc::new(repo)).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("0 / 32"), "missing totals in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_japanese() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Locale::Ja).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("AWS クラウドプラクティショナー 復習"), "missing title in {html}");
    assert!(html.contains("ストレージ"), "missing section in {html}");
    assert!(html.contains("English"), "missing language toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_smoke_judging_advances_the_card() {
    let mut harness = setup_view_harness(ViewKind::Study, Locale::En).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Amazon Athena"), "missing first card in {html}");
    assert!(html.contains("Card 1 of 32"), "missing progress in {html}");
    assert!(html.contains("judge-failure"), "missing judge buttons in {html}");
    assert!(html.contains("Streak 0 / 3"), "missing streak in {html}");

    harness.dispatch(StudyIntent::Flip).await;
    let html = harness.render();
    assert!(html.contains("Serverless interactive query"), "missing details in {html}");

    harness.dispatch(StudyIntent::Judge(Judgment::Success)).await;
    let html = harness.render();
    assert!(html.contains("Amazon Kinesis"), "missing second card in {html}");
    assert!(html.contains("Card 2 of 32"), "missing progress in {html}");

    assert_eq!(
        harness.progress.get("Amazon Athena").await,
        Some(MasteryRecord::new(1, false, 1))
    );
}

#[tokio::test(flavor = "current_thread")]
async fn study_smoke_swipes_judge_without_flipping() {
    let mut harness = setup_view_harness(ViewKind::Study, Locale::En).await;
    harness.settle().await;

    harness.dispatch(StudyIntent::Swipe { delta_x: 40.0 }).await;
    let html = harness.render();
    assert!(html.contains("Card 1 of 32"), "short drag advanced in {html}");
    assert!(!html.contains("Serverless interactive query"), "short drag flipped in {html}");
    assert_eq!(harness.progress.get("Amazon Athena").await, None);

    harness.dispatch(StudyIntent::Swipe { delta_x: 180.0 }).await;
    let html = harness.render();
    assert!(html.contains("Amazon Kinesis"), "missing second card in {html}");
    assert!(html.contains("flashcard--front"), "swiped card left flipped in {html}");

    harness.dispatch(StudyIntent::Swipe { delta_x: -180.0 }).await;
    let html = harness.render();
    assert!(html.contains("Card 3 of 32"), "missing progress in {html}");

    assert_eq!(
        harness.progress.get("Amazon Athena").await,
        Some(MasteryRecord::new(1, false, 1))
    );
    assert_eq!(
        harness.progress.get("Amazon Kinesis").await,
        Some(MasteryRecord::new(0, false, 1))
    );
}

#[tokio::test(flavor = "current_thread")]
async fn study_smoke_caps_streak_for_mastered_cards() {
    let mut harness =
        setup_view_harness(ViewKind::StudySection("Containers".to_string()), Locale::En).await;
    for _ in 0..5 {
        harness
            .progress
            .record_judgment("Amazon ECS", Judgment::Success)
            .await
            .expect("record");
    }
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Amazon ECS"), "missing card in {html}");
    assert!(html.contains("Streak 3 / 3"), "missing capped streak in {html}");
    assert!(!html.contains("Streak 5 / 3"), "uncapped streak in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_section_smoke_completes_and_restarts() {
    let mut harness =
        setup_view_harness(ViewKind::StudySection("Storage".to_string()), Locale::En).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Amazon S3"), "missing first card in {html}");
    assert!(html.contains("Card 1 of 3"), "missing progress in {html}");

    for _ in 0..3 {
        harness
            .dispatch(StudyIntent::Judge(Judgment::InstantMaster))
            .await;
    }
    let html = harness.render();
    assert!(html.contains("Session Complete!"), "missing completion in {html}");
    assert!(
        html.contains("You mastered 3 out of 3 cards"),
        "missing result in {html}"
    );
    assert_eq!(harness.progress.snapshot().await.mastered_count(), 3);

    harness.dispatch(StudyIntent::Restart).await;
    let html = harness.render();
    assert!(!html.contains("Session Complete!"), "still complete in {html}");
    assert!(html.contains("Card 1 of 3"), "missing restarted progress in {html}");

    let vm = harness.study_handles().vm();
    let stats = harness
        .dom
        .in_runtime(|| vm.peek().as_ref().map(StudyVm::stats));
    assert_eq!(stats.map(|s| s.total), Some(0));
}

#[tokio::test(flavor = "current_thread")]
async fn study_section_smoke_renders_empty_section() {
    let mut harness =
        setup_view_harness(ViewKind::StudySection("Quantum".to_string()), Locale::En).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("No cards to study here."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn mastered_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Mastered, Locale::En).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Mastered Cards"), "missing title in {html}");
    assert!(html.contains("No cards mastered yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn mastered_smoke_lists_mastered_cards_with_pills() {
    let mut harness = setup_view_harness(ViewKind::Mastered, Locale::En).await;
    harness
        .progress
        .record_judgment("Amazon S3", Judgment::InstantMaster)
        .await
        .expect("record");
    harness
        .progress
        .record_judgment("AWS Lambda", Judgment::InstantMaster)
        .await
        .expect("record");
    harness
        .progress
        .record_judgment("Amazon EC2", Judgment::Success)
        .await
        .expect("record");

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Amazon S3"), "missing S3 row in {html}");
    assert!(html.contains("AWS Lambda"), "missing Lambda row in {html}");
    assert!(!html.contains("Amazon EC2"), "unmastered card listed in {html}");
    assert!(html.contains("pill"), "missing section pills in {html}");
    assert!(!html.contains("No cards mastered yet."), "unexpected empty state in {html}");
}
