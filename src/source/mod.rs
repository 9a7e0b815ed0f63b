//! Sample source abstraction for fetching patient readings.
//!
//! A [`SampleSource`] performs one round trip per call and returns either a
//! [`Reading`] or a [`SourceError`]. The store treats every error the same
//! way (skip this tick), so implementations only need to classify errors for
//! logging.

mod error;
mod file;
mod http;
mod wire;

pub use error::SourceError;
pub use file::FileSource;
pub use http::{HttpSource, HttpSourceBuilder, DEFAULT_ENDPOINT};
pub use wire::MonitorResponse;

use std::fmt::Debug;

use async_trait::async_trait;
use gaitwatch_types::{PatientId, Reading};

/// Trait for fetching the current reading of a patient.
///
/// # Example
///
/// ```no_run
/// use gaitwatch::{HttpSource, SampleSource};
/// use gaitwatch_types::PatientId;
///
/// # tokio_test::block_on(async {
/// let source = HttpSource::builder().build()?;
/// match source.fetch(PatientId(1)).await {
///     Ok(reading) => println!("{}", reading.sample.trace_time()),
///     Err(e) => eprintln!("no data: {e}"),
/// }
/// # Ok::<_, gaitwatch::SourceError>(())
/// # });
/// ```
#[async_trait]
pub trait SampleSource: Send + Sync + Debug {
    /// Fetch the latest reading for `id`.
    async fn fetch(&self, id: PatientId) -> Result<Reading, SourceError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
