use std::path::PathBuf;

/// Errors raised at the edges of the crate: loading and storing fixtures.
/// The release workflow itself does not fail.
#[derive(thiserror::Error, Debug)]
pub enum ManualGradingError {
    /// The fixture file could not be read.
    #[error("Could not read fixture {}", path.display())]
    ReadFixture {
        /// Fixture path.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The fixture file is not valid JSON for a [`crate::fixture::Fixture`].
    #[error("Could not parse fixture {}", path.display())]
    ParseFixture {
        /// Fixture path.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The fixture file could not be written.
    #[error("Could not write fixture {}", path.display())]
    WriteFixture {
        /// Fixture path.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The fixture could not be serialized.
    #[error("Could not serialize fixture")]
    Serialize(#[from] serde_json::Error),
    /// No submission has the requested id.
    #[error("No submission with id {0}")]
    UnknownSubmission(u64),
    /// Releasing needs more reviews.
    #[error("Cannot release with {actual} of {required} required reviews")]
    QuotaNotMet {
        /// Reviews required by the assignment.
        required: u32,
        /// Reviews the submission has.
        actual:   usize,
    },
}
