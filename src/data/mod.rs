//! Trace buffering and chart data derivation.
//!
//! ## Submodules
//!
//! - [`record`]: Per-patient rolling buffer with same-second smoothing and expiry
//! - [`store`]: Thread-safe [`Store`] of records shared by the poller and the UI
//! - [`series`]: Chart points and anomaly markers derived from a snapshot
//! - [`histogram`]: Per-channel value distributions
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "200ms", "600s")
//!
//! ## Data Flow
//!
//! ```text
//! SampleSource::fetch()
//!        │
//!        ▼
//! Store::ingest() ──▶ PatientRecord::push() (append or smooth)
//!        │
//! Store::expire() ──▶ PatientRecord::expire() (drop from front)
//!        │
//!        ▼
//! Store::snapshot() ──▶ ChartSeries / Histogram (for rendering)
//! ```

pub mod duration;
pub mod histogram;
pub mod record;
pub mod series;
pub mod store;

pub use histogram::Histogram;
pub use record::{Entry, PatientRecord, PushOutcome};
pub use series::ChartSeries;
pub use store::{IngestOutcome, PatientSnapshot, SnapshotExport, Store};
