use prep_core::mastery::{Judgment, MasteryRecord};
use prep_core::model::{Locale, Section};
use prep_core::time::fixed_now;
use services::{AppServices, Clock, DashboardStats, MasteredQuery, RecordLoader, StudyScope};

fn sqlite_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("prep.sqlite3").display())
}

#[tokio::test]
async fn section_session_masters_cards_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = sqlite_url(&dir);

    {
        let app = AppServices::new_sqlite(&url, Clock::fixed(fixed_now()), RecordLoader::bundled())
            .await
            .unwrap();
        let records = app.catalog().records(Locale::En);
        let scope = StudyScope::Section(Section::new("Storage"));
        let study = app.study_loop();

        let mut session = study.start_session(&records, scope).await.unwrap();
        let total = session.progress().total;
        assert!(total > 0);
        while !session.is_complete() {
            study
                .judge_current(&mut session, Judgment::InstantMaster)
                .await
                .unwrap();
        }
        assert_eq!(session.stats().correct, total);

        let progress = app.progress().snapshot().await;
        let stats = DashboardStats::compute(&records, &progress);
        let storage = stats
            .sections
            .iter()
            .find(|s| s.section.as_str() == "Storage")
            .unwrap();
        assert_eq!(storage.mastered, storage.total);
        assert_eq!(storage.percentage(), 100);
    }

    let reopened = AppServices::new_sqlite(&url, Clock::fixed(fixed_now()), RecordLoader::bundled())
        .await
        .unwrap();
    let records = reopened.catalog().records(Locale::En);
    let progress = reopened.progress().load_all().await;
    let listed = MasteredQuery::new().apply(&records, &progress);
    assert!(listed.iter().all(|card| card.section.as_str() == "Storage"));
    assert_eq!(progress.get("Amazon S3"), Some(&MasteryRecord::new(3, true, 1)));
}

#[tokio::test]
async fn unmastering_from_the_list_keeps_the_streak() {
    let app = AppServices::new_in_memory(Clock::fixed(fixed_now()), RecordLoader::bundled()).await;
    let store = app.progress();
    for _ in 0..3 {
        store.record_judgment("Amazon S3", Judgment::Success).await.unwrap();
    }

    let records = app.catalog().records(Locale::En);
    let listed = MasteredQuery::new().apply(&records, &store.snapshot().await).len();
    assert_eq!(listed, 1);

    let progress = store.reset_mastery("Amazon S3").await.unwrap();
    assert_eq!(progress.get("Amazon S3"), Some(&MasteryRecord::new(3, false, 3)));
    assert!(MasteredQuery::new().apply(&records, &progress).is_empty());

    let next = app
        .study_loop()
        .start_session(&records, StudyScope::All)
        .await
        .unwrap();
    assert_eq!(next.progress().total, records.len());
}
