mod common;

use common::{graded, overlay, review, template};
use manual_grading::{
    model::{Grade, GradingCriterion, Review},
    overlay::{Indicator, IndexedReview, resolve_benchmark, resolve_criterion},
};

fn with_overlay(benchmarks: Vec<manual_grading::model::GradingBenchmark>) -> IndexedReview {
    let mut r: Review = review(101, true, 80.0);
    r.benchmarks = benchmarks;
    IndexedReview::new(r)
}

#[test]
fn untouched_entries_resolve_to_template() {
    let template = template();
    let partial = with_overlay(vec![overlay(2, "tests", vec![graded(21, Grade::Passed, "")])]);

    for reviewer in [None, Some(&partial)] {
        let bm = &template[0];
        assert!(std::ptr::eq(resolve_benchmark(reviewer, bm), bm));
        for c in &bm.criteria {
            let resolved = resolve_criterion(reviewer, c);
            assert!(std::ptr::eq(resolved, c));
            assert_eq!(resolved.grade, Grade::None);
        }
    }
}

#[test]
fn matching_overlay_wins_regardless_of_order() {
    let template = template();
    let reviewer = with_overlay(vec![
        overlay(2, "thin", vec![graded(21, Grade::Failed, "no empty input")]),
        overlay(1, "clean", vec![graded(12, Grade::Passed, "")]),
    ]);

    assert_eq!(resolve_benchmark(Some(&reviewer), &template[0]).comment, "clean");
    assert_eq!(resolve_benchmark(Some(&reviewer), &template[1]).comment, "thin");

    let c12 = resolve_criterion(Some(&reviewer), &template[0].criteria[1]);
    assert_eq!(c12.grade, Grade::Passed);
    let c21 = resolve_criterion(Some(&reviewer), &template[1].criteria[0]);
    assert_eq!(c21.grade, Grade::Failed);
    assert_eq!(c21.comment, "no empty input");

    // 11 is not in the overlay
    let c11 = resolve_criterion(Some(&reviewer), &template[0].criteria[0]);
    assert!(std::ptr::eq(c11, &template[0].criteria[0]));
}

#[test]
fn criteria_are_found_under_any_overlay_benchmark() {
    let template = template();
    let reviewer = with_overlay(vec![overlay(1, "", vec![graded(21, Grade::Passed, "moved")])]);

    let resolved = resolve_criterion(Some(&reviewer), &template[1].criteria[0]);
    assert_eq!(resolved.comment, "moved");
    assert!(std::ptr::eq(resolve_benchmark(Some(&reviewer), &template[1]), &template[1]));
}

#[test]
fn stale_overlay_ids_are_ignored() {
    let template = template();
    let reviewer = with_overlay(vec![overlay(99, "gone", vec![graded(991, Grade::Failed, "gone")])]);

    for bm in &template {
        assert!(std::ptr::eq(resolve_benchmark(Some(&reviewer), bm), bm));
        for c in &bm.criteria {
            assert!(std::ptr::eq(resolve_criterion(Some(&reviewer), c), c));
        }
    }
    assert!(reviewer.benchmark(99).is_some());
}

#[test]
fn first_duplicate_overlay_wins() {
    let template = template();
    let reviewer = with_overlay(vec![
        overlay(1, "first", vec![graded(11, Grade::Passed, "first")]),
        overlay(1, "second", vec![graded(11, Grade::Failed, "second")]),
    ]);

    assert_eq!(resolve_benchmark(Some(&reviewer), &template[0]).comment, "first");
    assert_eq!(resolve_criterion(Some(&reviewer), &template[0].criteria[0]).comment, "first");
}

#[test]
fn unknown_grades_read_as_none() {
    let parse = |json: &str| serde_json::from_str::<GradingCriterion>(json).expect("criterion");

    assert_eq!(parse(r#"{"id": 1, "grade": 1}"#).grade, Grade::Passed);
    assert_eq!(parse(r#"{"id": 1, "grade": "FAILED"}"#).grade, Grade::Failed);
    assert_eq!(parse(r#"{"id": 1, "grade": 7}"#).grade, Grade::None);
    assert_eq!(parse(r#"{"id": 1, "grade": "EXCELLENT"}"#).grade, Grade::None);
    assert_eq!(parse(r#"{"id": 1}"#).grade, Grade::None);
}

#[test]
fn grades_map_to_indicators() {
    assert_eq!(Indicator::from(Grade::Passed), Indicator::Success);
    assert_eq!(Indicator::from(Grade::Failed), Indicator::Failure);
    assert_eq!(Indicator::from(Grade::None), Indicator::Neutral);
}
