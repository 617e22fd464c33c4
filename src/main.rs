#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # manual-grading
//!
//! Shows the release panels of a manually graded assignment and performs
//! release and status changes against a `release.json` fixture.
//!
//! The fixture is looked up in `MANUAL_GRADING_DATA_DIR` (or `--data-dir`),
//! which may also be set in a `.env` file.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use bpaf::*;
use dotenvy::dotenv;
use manual_grading::{
    AccordionRegistry, FixtureStore, PanelMode, PanelProps, PanelView, ReadyReviewReviewers,
    ReleasePanel, StatusAction, StatusUpdate, config, fixture::Fixture, model::Assignment,
    release::Notice, render::info_table,
};
use tracing::metadata::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Show every panel, optionally opening one
    Show {
        /// Number of the panel to open
        open: Option<usize>,
    },
    /// Show one submission the way its student sees it
    Student(usize),
    /// Toggle the release of a submission
    Release(u64),
    /// Set the grading status of a submission
    Status(u64, String),
}

/// Parsed command line.
#[derive(Debug, Clone)]
struct Opts {
    /// Overrides the configured data directory
    data_dir: Option<PathBuf>,
    /// Disables colored grade indicators
    no_color: bool,
    /// The command to run
    cmd:      Cmd,
}

/// Parse the command line arguments and return the options
fn options() -> Opts {
    /// parses a panel number
    fn n() -> impl Parser<usize> {
        positional("N").help("Panel number, starting at 1")
    }

    /// parses a submission id
    fn id() -> impl Parser<u64> {
        positional("SUBMISSION").help("Submission id")
    }

    /// parses a status action
    fn action() -> impl Parser<String> {
        positional("ACTION").help("One of none, approve, reject, revision")
    }

    let data_dir = short('d')
        .long("data-dir")
        .help("Directory containing release.json")
        .argument::<PathBuf>("DIR")
        .optional();

    let no_color = long("no-color")
        .help("Print grade indicators without colors")
        .switch();

    let open = long("open")
        .help("Open the panel with this number")
        .argument::<usize>("N")
        .optional();

    let show = construct!(Cmd::Show { open })
        .to_options()
        .command("show")
        .help("Show the release panels of all students");

    let student = construct!(Cmd::Student(n()))
        .to_options()
        .command("student")
        .help("Show the reviews of one student as the student sees them");

    let release = construct!(Cmd::Release(id()))
        .to_options()
        .command("release")
        .help("Release or withdraw the reviews of a submission");

    let status = construct!(Cmd::Status(id(), action()))
        .to_options()
        .command("status")
        .help("Set the grading status of a submission");

    let cmd = construct!([show, student, release, status]);

    construct!(Opts {
        data_dir,
        no_color,
        cmd
    })
        .to_options()
        .descr("Review aggregation and release for manually graded assignments")
        .run()
}

/// Builds the panel of the student at `index` in `fixture`.
fn panel_at(
    fixture: &Fixture,
    assignment: &Arc<Assignment>,
    registry: &Arc<AccordionRegistry>,
    index: usize,
    mode: PanelMode,
) -> Option<ReleasePanel> {
    let record = fixture.submissions.get(index)?;
    Some(ReleasePanel::new(
        PanelProps::builder()
            .assignment(Arc::clone(assignment))
            .submission(record.submission.clone())
            .author_name(record.author_name.clone())
            .author_login(record.author_login.clone())
            .student_number(index + 1)
            .mode(mode)
            .parent(registry.clone())
            .build(),
    ))
}

/// Finds the position of the submission with `id`.
fn position_of(fixture: &Fixture, id: u64) -> Result<usize> {
    fixture
        .submissions
        .iter()
        .position(|r| r.submission.as_ref().is_some_and(|s| s.id == id))
        .with_context(|| format!("No submission with id {id}"))
}

/// Prints a panel: header for teachers, then whatever the panel shows.
fn print_panel(panel: &ReleasePanel) {
    if panel.mode() == PanelMode::Teacher {
        println!("{}", panel.header());
    }

    match panel.view() {
        PanelView::Hidden => {}
        PanelView::Loading => println!("Loading reviews..."),
        PanelView::Notice(notice) => println!("{}", notice.message(&panel.assignment().name)),
        PanelView::Reviews(snapshot) => {
            if panel.mode() == PanelMode::Teacher {
                println!(
                    "{}",
                    info_table(panel.status(), panel.is_approved(), snapshot.reviewers())
                );
            }
            if let Some(matrix) = panel.matrix() {
                println!("{}", matrix.to_table(config::color()));
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let opts = options();
    let mut state = (*config::get()).clone();
    if let Some(dir) = opts.data_dir {
        state = state.with_data_dir(dir);
    }
    if opts.no_color {
        state = state.with_color(false);
    }
    config::set(state);

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(config::log_level());
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let path = config::fixture_path();
    let store = FixtureStore::load(&path)
        .await
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let fixture = store.snapshot().await;
    let assignment = Arc::new(fixture.assignment.clone());
    let registry = Arc::new(AccordionRegistry::new());

    match opts.cmd {
        Cmd::Show { open } => {
            let mut panels: Vec<ReleasePanel> = (0..fixture.submissions.len())
                .filter_map(|i| panel_at(&fixture, &assignment, &registry, i, PanelMode::Teacher))
                .collect();

            if let Some(n) = open {
                let panel = n
                    .checked_sub(1)
                    .and_then(|i| panels.get_mut(i))
                    .with_context(|| format!("No panel number {n}"))?;
                panel.toggle_and_load(&store).await;
            }

            for panel in &panels {
                print_panel(panel);
            }
        }
        Cmd::Student(n) => {
            let mut panel = n
                .checked_sub(1)
                .and_then(|i| panel_at(&fixture, &assignment, &registry, i, PanelMode::Student))
                .with_context(|| format!("No panel number {n}"))?;

            let ready = panel.submission().map(ReadyReviewReviewers::new);
            match ready {
                Some(reviewers) => panel.mount(&reviewers).await,
                None => panel.mount(&store).await,
            }
            if panel.is_open() {
                print_panel(&panel);
            } else if panel.submission().is_none() {
                println!("{}", Notice::NoSubmission.message(&panel.assignment().name));
            } else {
                println!("Reviews for {} are not released", panel.assignment().name);
            }
        }
        Cmd::Release(id) => {
            let index = position_of(&fixture, id)?;
            let panel = panel_at(&fixture, &assignment, &registry, index, PanelMode::Teacher)
                .with_context(|| format!("No submission with id {id}"))?;

            match panel.click_release(&store.submission(id)).await {
                Some(target) => {
                    let stored = store
                        .snapshot()
                        .await
                        .submissions
                        .get(index)
                        .and_then(|r| r.submission.as_ref())
                        .is_some_and(|s| s.released == target);
                    if stored {
                        println!("Submission {id}: released = {target}");
                    } else {
                        eprintln!("Submission {id}: release change was not stored");
                    }
                }
                None => eprintln!("Release is not available for submission {id}"),
            }
        }
        Cmd::Status(id, action) => {
            let index = position_of(&fixture, id)?;
            let mut panel = panel_at(&fixture, &assignment, &registry, index, PanelMode::Teacher)
                .with_context(|| format!("No submission with id {id}"))?;

            match panel
                .update_status(StatusAction::from(action.as_str()), &store.submission(id))
                .await
            {
                StatusUpdate::Applied(status) => println!("Submission {id}: status = {status}"),
                StatusUpdate::Rejected => eprintln!("Submission {id}: status change was refused"),
                StatusUpdate::NoSubmission => eprintln!("No submission with id {id}"),
            }
        }
    }

    Ok(())
}
