#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use manual_grading::{
    AccordionParent, AccordionRegistry, GradeService, ReviewerDirectory,
    model::{
        Assignment, Grade, GradingBenchmark, GradingCriterion, Review, Reviewer, Submission,
        SubmissionStatus,
    },
};

/// Calls made to the collaborators, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Broadcast,
    Fetch(u64),
    SetStatus(SubmissionStatus, bool),
    SetReleased(bool),
}

#[derive(Debug, Clone, Default)]
pub struct Log(Arc<Mutex<Vec<Event>>>);

impl Log {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }
}

/// Accordion parent that records broadcasts.
#[derive(Debug, Default)]
pub struct RecordingParent {
    pub registry: AccordionRegistry,
    pub log:      Log,
}

impl AccordionParent for RecordingParent {
    fn request_close_all(&self) -> u64 {
        self.log.push(Event::Broadcast);
        self.registry.request_close_all()
    }

    fn epoch(&self) -> u64 {
        self.registry.epoch()
    }
}

/// Reviewer directory returning a fixed list.
#[derive(Debug, Clone, Default)]
pub struct RecordingDirectory {
    pub reviewers: Vec<Reviewer>,
    pub log:       Log,
}

#[async_trait]
impl ReviewerDirectory for RecordingDirectory {
    async fn reviewers_for_submission(&self, submission_id: u64) -> Vec<Reviewer> {
        self.log.push(Event::Fetch(submission_id));
        self.reviewers.clone()
    }
}

/// Grade service that accepts or refuses every status change.
#[derive(Debug, Clone, Default)]
pub struct RecordingGrades {
    pub accept: bool,
    pub log:    Log,
}

#[async_trait]
impl GradeService for RecordingGrades {
    async fn set_grade_status(&self, status: SubmissionStatus, approved: bool) -> bool {
        self.log.push(Event::SetStatus(status, approved));
        self.accept
    }

    async fn set_released(&self, released: bool) {
        self.log.push(Event::SetReleased(released));
    }
}

pub fn criterion(id: u64, description: &str) -> GradingCriterion {
    GradingCriterion::builder()
        .id(id)
        .description(description)
        .build()
}

pub fn graded(id: u64, grade: Grade, comment: &str) -> GradingCriterion {
    GradingCriterion::builder()
        .id(id)
        .grade(grade)
        .comment(comment)
        .build()
}

pub fn benchmark(id: u64, heading: &str, criteria: Vec<GradingCriterion>) -> GradingBenchmark {
    GradingBenchmark::builder()
        .id(id)
        .heading(heading)
        .criteria(criteria)
        .build()
}

pub fn overlay(id: u64, comment: &str, criteria: Vec<GradingCriterion>) -> GradingBenchmark {
    GradingBenchmark::builder()
        .id(id)
        .comment(comment)
        .criteria(criteria)
        .build()
}

/// Two benchmarks: 1 (criteria 11, 12) and 2 (criterion 21).
pub fn template() -> Vec<GradingBenchmark> {
    vec![
        benchmark(1, "Code quality", vec![
            criterion(11, "Readable names"),
            criterion(12, "No duplication"),
        ]),
        benchmark(2, "Tests", vec![criterion(21, "Covers edge cases")]),
    ]
}

pub fn assignment(quota: u32) -> Arc<Assignment> {
    Arc::new(
        Assignment::builder()
            .id(3u64)
            .name("lab3")
            .reviewers(quota)
            .grading_benchmarks(template())
            .build(),
    )
}

pub fn review(reviewer_id: u64, ready: bool, score: f64) -> Review {
    Review::builder()
        .id(1000 + reviewer_id)
        .submission_id(7u64)
        .reviewer_id(reviewer_id)
        .ready(ready)
        .score(score)
        .build()
}

pub fn submission(reviews: Vec<Review>) -> Submission {
    Submission::builder().id(7u64).reviews(reviews).build()
}

pub fn reviewer(id: u64, name: &str) -> Reviewer {
    Reviewer::builder().id(id).name(name).build()
}
