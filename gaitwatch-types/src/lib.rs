//! # gaitwatch-types
//!
//! Core types for pressure-insole telemetry. A monitored patient wears a pair
//! of insoles with three pressure sensors each; a monitoring endpoint reports
//! one [`Reading`] per patient per request.
//!
//! ## Features
//!
//! - `serde`: serialization of all public types via serde
//!
//! ## Example
//!
//! ```rust
//! use gaitwatch_types::{Channel, Identity, Reading, Sample};
//!
//! let reading = Reading::new(
//!     Identity::new("Jan", "Kowalski", "1982", false, "walking"),
//!     Sample::new(123456789012345, [512.0; 6], [false; 6]),
//! );
//!
//! assert_eq!(reading.sample.trace_time(), "123:45:67");
//! assert_eq!(reading.sample.value(Channel::R2), 512.0);
//! ```

mod channel;
mod patient;
mod reading;
mod trace_time;

pub use channel::*;
pub use patient::*;
pub use reading::*;
pub use trace_time::*;

/// Number of pressure sensors reported per reading (three per foot).
pub const CHANNEL_COUNT: usize = 6;

/// Upper bound of the sensor pressure range used for chart scaling.
pub const PRESSURE_MAX: f64 = 1100.0;
