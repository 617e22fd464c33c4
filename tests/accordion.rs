mod common;

use std::sync::Arc;

use common::{RecordingDirectory, assignment, review, reviewer, submission};
use manual_grading::{
    AccordionParent, AccordionRegistry, PanelProps, PanelView, ReleasePanel, ReviewerDirectory,
    release::Toggle,
};

fn panel(registry: &Arc<AccordionRegistry>, number: usize) -> ReleasePanel {
    ReleasePanel::new(
        PanelProps::builder()
            .assignment(assignment(1))
            .submission(Some(submission(vec![review(101, true, 75.0)])))
            .author_name(format!("Student {number}"))
            .student_number(number)
            .parent(registry.clone())
            .build(),
    )
}

fn directory() -> RecordingDirectory {
    RecordingDirectory {
        reviewers: vec![reviewer(101, "Alice")],
        ..Default::default()
    }
}

#[tokio::test]
async fn opening_a_panel_closes_its_siblings() {
    let registry = Arc::new(AccordionRegistry::new());
    let directory = directory();
    let mut first = panel(&registry, 1);
    let mut second = panel(&registry, 2);

    assert!(first.toggle_and_load(&directory).await);
    assert!(second.toggle_and_load(&directory).await);

    assert!(!first.is_open());
    assert!(matches!(first.view(), PanelView::Hidden));
    assert!(second.is_open());
}

#[tokio::test]
async fn close_all_collapses_every_panel() {
    let registry = Arc::new(AccordionRegistry::new());
    let mut first = panel(&registry, 1);
    first.toggle_and_load(&directory()).await;

    registry.close_all();
    assert!(!first.is_open());
}

#[tokio::test]
async fn a_panel_closed_by_a_sibling_reopens_on_one_click() {
    let registry = Arc::new(AccordionRegistry::new());
    let directory = directory();
    let mut first = panel(&registry, 1);
    let mut second = panel(&registry, 2);

    first.toggle_and_load(&directory).await;
    second.toggle_and_load(&directory).await;

    assert!(first.toggle_and_load(&directory).await);
    assert!(!second.is_open());
    assert!(matches!(first.view(), PanelView::Reviews(_)));
}

#[tokio::test]
async fn a_lookup_finishing_after_a_sibling_opened_stays_hidden() {
    let registry = Arc::new(AccordionRegistry::new());
    let directory = directory();
    let mut first = panel(&registry, 1);
    let mut second = panel(&registry, 2);

    let (Toggle::Load(a), Toggle::Load(b)) = (first.toggle(), second.toggle()) else {
        panic!("both panels should start a lookup");
    };
    assert_eq!(registry.epoch(), 2);

    let (for_first, for_second) = futures::join!(
        directory.reviewers_for_submission(a.submission_id()),
        directory.reviewers_for_submission(b.submission_id()),
    );
    assert!(second.complete_load(b, for_second));
    assert!(first.complete_load(a, for_first));

    assert!(second.is_open());
    assert!(!first.is_open());
    assert!(matches!(first.view(), PanelView::Hidden));
}
