#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Text rendering of release panels.

use std::{fmt::Display, iter};

use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

use crate::{
    model::{GradingBenchmark, SubmissionStatus},
    overlay::{Indicator, resolve_benchmark, resolve_criterion},
    release::{ReleaseControl, ReviewerMap},
    score::ScoreDisplay,
};

/// The clickable header line of a teacher-view panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelHeader {
    /// Position in the list.
    pub number:  usize,
    /// Student or group name.
    pub author:  String,
    /// Total score of all reviews, or N/A.
    pub score:   ScoreDisplay,
    /// Reviews so far and reviews required; `None` when not manually graded.
    pub reviews: Option<(usize, u32)>,
    /// The release toggle.
    pub release: ReleaseControl,
}

impl Display for PanelHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}  Score: {}  ", self.number, self.author, self.score)?;
        match self.reviews {
            Some((count, quota)) => write!(f, "Reviews: {count}/{quota}")?,
            None => write!(f, "N/A")?,
        }
        write!(f, "  {}", self.release)
    }
}

/// Row of the reviewer overview next to the status.
#[derive(Tabled)]
struct ReviewerScoreRow {
    /// Reviewer name.
    #[tabled(rename = "Reviewers:")]
    reviewer: String,
    /// The reviewer's score.
    #[tabled(rename = "Score:")]
    score:    f64,
}

/// Renders the status, whether the submission counts as approved, and each
/// reviewer's score.
pub fn info_table(status: SubmissionStatus, approved: bool, reviewers: &ReviewerMap) -> String {
    let rows: Vec<ReviewerScoreRow> = reviewers
        .iter()
        .map(|(reviewer, review)| ReviewerScoreRow {
            reviewer: reviewer.name.clone(),
            score:    review.review().score,
        })
        .collect();

    Table::new(&rows)
        .with(Panel::header(format!(
            "Status: {status}  Approved: {}",
            if approved { "yes" } else { "no" }
        )))
        .with(Style::modern())
        .to_string()
}

/// Kind of a matrix row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Benchmark heading with benchmark comments.
    Benchmark,
    /// Criterion with each reviewer's grade.
    Criterion,
    /// Each reviewer's feedback.
    Feedback,
    /// Each reviewer's score.
    Score,
}

/// One reviewer's cell in a matrix row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixCell {
    /// Grade marker, on criterion rows only.
    pub indicator: Option<Indicator>,
    /// Comment or value text, possibly empty.
    pub comment:   String,
}

impl MatrixCell {
    /// A cell with text only.
    fn text(comment: impl Into<String>) -> Self {
        Self {
            indicator: None,
            comment:   comment.into(),
        }
    }

    /// Cell text, with the indicator colored if `color` is set.
    fn render(&self, color: bool) -> String {
        let text = match self.indicator {
            Some(indicator) if color => format!("{} {}", indicator.paint(), self.comment),
            Some(indicator) => format!("{indicator} {}", self.comment),
            None => self.comment.clone(),
        };
        text.trim_end().to_string()
    }
}

/// A labelled row with one cell per reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    /// Kind of row.
    pub kind:  RowKind,
    /// Text in the first column.
    pub label: String,
    /// One cell per reviewer, in column order.
    pub cells: Vec<MatrixCell>,
}

/// The template with every reviewer's overlay merged in, one column per
/// reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseMatrix {
    /// Column headings: each reviewer's score.
    pub columns: Vec<String>,
    /// Benchmark and criterion rows in template order, then feedback and
    /// score rows.
    pub rows:    Vec<MatrixRow>,
}

impl ReleaseMatrix {
    /// Merges `reviewers`' overlays onto `template`. Overlay entries whose id
    /// is not in the template do not show up.
    pub fn build(
        template: &[GradingBenchmark],
        reviewers: &ReviewerMap,
        submission_score: f64,
    ) -> Self {
        let columns = reviewers
            .iter()
            .map(|(_, review)| format!("{}%", review.review().score))
            .collect();

        let mut rows = Vec::new();
        for bm in template {
            rows.push(MatrixRow {
                kind:  RowKind::Benchmark,
                label: bm.heading.clone(),
                cells: reviewers
                    .iter()
                    .map(|(_, review)| {
                        MatrixCell::text(resolve_benchmark(Some(review), bm).comment.clone())
                    })
                    .collect(),
            });

            for c in &bm.criteria {
                rows.push(MatrixRow {
                    kind:  RowKind::Criterion,
                    label: c.description.clone(),
                    cells: reviewers
                        .iter()
                        .map(|(_, review)| {
                            let resolved = resolve_criterion(Some(review), c);
                            MatrixCell {
                                indicator: Some(resolved.into()),
                                comment:   resolved.comment.clone(),
                            }
                        })
                        .collect(),
                });
            }
        }

        rows.push(MatrixRow {
            kind:  RowKind::Feedback,
            label: "Feedbacks:".to_string(),
            cells: reviewers
                .iter()
                .map(|(_, review)| MatrixCell::text(review.review().feedback.clone()))
                .collect(),
        });
        rows.push(MatrixRow {
            kind:  RowKind::Score,
            label: format!("Score: {submission_score}"),
            cells: reviewers
                .iter()
                .map(|(_, review)| MatrixCell::text(review.review().score.to_string()))
                .collect(),
        });

        Self { columns, rows }
    }

    /// Returns true if at least one reviewer column exists. A matrix without
    /// columns still has its label column and should be shown as such.
    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Builds the table, coloring grade indicators if `color` is set.
    pub fn to_table(&self, color: bool) -> Table {
        let mut builder = Builder::default();
        builder.push_record(iter::once("Reviews:".to_string()).chain(self.columns.iter().cloned()));
        for row in &self.rows {
            builder.push_record(
                iter::once(row.label.clone()).chain(row.cells.iter().map(|c| c.render(color))),
            );
        }

        let mut table = builder.build();
        table
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(32).keep_words(true)))
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Style::modern());
        table
    }
}

impl Display for ReleaseMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_table(false))
    }
}
