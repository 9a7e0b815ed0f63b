//! # gaitwatch
//!
//! A live terminal monitor for insole pressure telemetry.
//!
//! Each patient wears two insoles with three pressure sensors apiece. A
//! monitoring endpoint reports the latest reading per patient; gaitwatch
//! polls it several times a second, keeps a bounded, deduplicated, expiring
//! history per patient, and draws it as live charts.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌─────────┐    ┌─────────┐    ┌──────────┐   │
//! │  │ source  │───▶│ poller  │───▶│  data   │◀───│   app    │   │
//! │  │ (fetch) │    │ (tick)  │    │ (Store) │    │ (state)  │   │
//! │  └─────────┘    └─────────┘    └─────────┘    └────┬─────┘   │
//! │       ▲                                            │         │
//! │  HttpSource | FileSource                           ▼         │
//! │                                               ┌─────────┐    │
//! │                                               │   ui    │    │
//! │                                               └─────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`SampleSource`] trait with an HTTP client and a
//!   file replay implementation
//! - **[`poller`]**: Background task that fetches every patient each tick,
//!   ingests the results, and expires old entries
//! - **[`data`]**: The per-patient time-series [`Store`], snapshots, and
//!   chart derivations
//! - **[`app`]**, **[`events`]**, **[`ui`]**: Terminal presentation with
//!   ratatui
//! - **[`config`]**: Layered [`Settings`]
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Monitor patients 1-5 on the default endpoint
//! gaitwatch
//!
//! # Pick patients and a faster refresh
//! gaitwatch --patients 1,3 --refresh 500ms
//!
//! # Replay recorded readings from a directory of {id}.json files
//! gaitwatch --replay recordings/
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use gaitwatch::{HttpSource, PatientId, Poller, Store};
//!
//! # tokio_test::block_on(async {
//! let store = Store::new();
//! let source = Arc::new(HttpSource::builder().build().unwrap());
//! let poller = Poller::new(source, store.clone(), vec![PatientId(1), PatientId(2)]);
//!
//! let summary = poller.poll_once().await;
//! println!("{} patients answered", summary.succeeded());
//!
//! if let Some(snapshot) = store.snapshot(PatientId(1)) {
//!     println!("{} entries for {}", snapshot.len(), snapshot.identity.full_name());
//! }
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod poller;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::Settings;
pub use data::{ChartSeries, Histogram, IngestOutcome, PatientSnapshot, SnapshotExport, Store};
pub use poller::{PollSummary, Poller, PollerHandle};
pub use source::{FileSource, HttpSource, HttpSourceBuilder, SampleSource, SourceError};

pub use gaitwatch_types::{Channel, Identity, PatientId, Reading, Sample};
