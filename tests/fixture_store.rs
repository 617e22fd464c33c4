use std::path::PathBuf;

use manual_grading::{
    FixtureStore, GradeService, ManualGradingError, ReviewerDirectory,
    model::SubmissionStatus,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/release.json")
}

/// Copies the sample fixture somewhere writable.
async fn scratch_fixture() -> anyhow::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("manual-grading-{}", uuid::Uuid::new_v4()));
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join("release.json");
    tokio::fs::copy(fixture_path(), &path).await?;
    Ok(path)
}

#[tokio::test]
async fn loads_the_sample_fixture() -> anyhow::Result<()> {
    let store = FixtureStore::load(fixture_path()).await?;
    let fixture = store.snapshot().await;

    assert_eq!(fixture.assignment.name, "lab3");
    assert_eq!(fixture.assignment.reviewers, 2);
    assert_eq!(fixture.submissions.len(), 4);
    assert!(fixture.submissions[2].submission.is_none());

    let grace = fixture.submissions[1].submission.as_ref().unwrap();
    assert_eq!(grace.status, SubmissionStatus::Revision);
    Ok(())
}

#[tokio::test]
async fn reviewers_come_in_course_order() -> anyhow::Result<()> {
    let store = FixtureStore::load(fixture_path()).await?;

    let ids: Vec<u64> = store
        .reviewers_for_submission(1)
        .await
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![101, 102]);

    assert!(store.reviewers_for_submission(42).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn releasing_below_quota_is_refused() -> anyhow::Result<()> {
    let path = scratch_fixture().await?;
    let store = FixtureStore::load(&path).await?;

    let err = store.set_released(2, true).await.unwrap_err();
    assert!(matches!(err, ManualGradingError::QuotaNotMet {
        required: 2,
        actual:   1,
    }));

    store.set_released(1, true).await?;
    let reloaded = FixtureStore::load(&path).await?.snapshot().await;
    let ada = reloaded.submissions[0].submission.as_ref().unwrap();
    assert!(ada.released);
    Ok(())
}

#[tokio::test]
async fn status_changes_are_written_back() -> anyhow::Result<()> {
    let path = scratch_fixture().await?;
    let store = FixtureStore::load(&path).await?;

    assert!(
        store
            .submission(2)
            .set_grade_status(SubmissionStatus::Approved, true)
            .await
    );

    let reloaded = FixtureStore::load(&path).await?.snapshot().await;
    let grace = reloaded.submissions[1].submission.as_ref().unwrap();
    assert_eq!(grace.status, SubmissionStatus::Approved);
    assert!(grace.approved);
    Ok(())
}

#[tokio::test]
async fn unknown_submissions_are_refused() -> anyhow::Result<()> {
    let store = FixtureStore::load(fixture_path()).await?;
    let fixture = store.snapshot().await;
    let in_memory = FixtureStore::new(fixture);

    assert!(
        !in_memory
            .submission(42)
            .set_grade_status(SubmissionStatus::Approved, true)
            .await
    );
    assert!(matches!(
        in_memory.set_released(42, false).await,
        Err(ManualGradingError::UnknownSubmission(42))
    ));
    Ok(())
}

#[tokio::test]
async fn failed_writes_leave_the_fixture_unchanged() -> anyhow::Result<()> {
    let path = scratch_fixture().await?;
    let store = FixtureStore::load(&path).await?;
    let before = store.snapshot().await;
    if let Some(dir) = path.parent() {
        tokio::fs::remove_dir_all(dir).await?;
    }

    assert!(
        !store
            .submission(2)
            .set_grade_status(SubmissionStatus::Approved, true)
            .await
    );
    assert!(matches!(
        store.set_released(1, true).await,
        Err(ManualGradingError::WriteFixture { .. })
    ));

    assert_eq!(store.snapshot().await, before);
    Ok(())
}

#[tokio::test]
async fn missing_fixture_is_reported() {
    let result = FixtureStore::load("does/not/exist/release.json").await;
    assert!(matches!(result, Err(ManualGradingError::ReadFixture { .. })));
}
