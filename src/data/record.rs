//! Per-patient rolling trace buffer.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use gaitwatch_types::{Identity, Sample, CHANNEL_COUNT};

/// One buffered trace entry (one second-granularity bucket).
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Trace time formatted as `H:MM:SS`.
    pub time: String,
    pub values: [f64; CHANNEL_COUNT],
    pub anomalies: [bool; CHANNEL_COUNT],
    /// When the entry last received data. Only used for expiry.
    pub arrived: Instant,
}

/// What [`PatientRecord::push`] did with a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// A new trailing entry was appended.
    Appended,
    /// The sample fell into the last entry's second and was averaged into it.
    Smoothed,
}

/// Identity plus a time-ordered buffer of entries for one patient.
///
/// Entries are ordered by arrival. New data is appended at the back, or
/// merged into the last entry when it shares the same trace second;
/// expiry drops from the front.
#[derive(Debug, Clone)]
pub struct PatientRecord {
    identity: Identity,
    entries: VecDeque<Entry>,
}

impl PatientRecord {
    /// Create a record holding a single entry for its first sample.
    pub fn new(identity: Identity, sample: &Sample, arrived: Instant) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(Entry {
            time: sample.trace_time(),
            values: sample.values,
            anomalies: sample.anomalies,
            arrived,
        });
        Self { identity, entries }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn entries(&self) -> &VecDeque<Entry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest entry, if any.
    pub fn latest(&self) -> Option<&Entry> {
        self.entries.back()
    }

    /// Add a sample that arrived at `arrived`.
    ///
    /// If the sample's trace time equals the last entry's, the last entry's
    /// values become the element-wise mean of old and new, anomaly flags are
    /// OR-ed and the arrival instant moves to the newer one. Otherwise a new
    /// entry is appended.
    ///
    /// Arrival instants never go backwards: an `arrived` earlier than the
    /// last entry's is clamped up to it.
    pub fn push(&mut self, sample: &Sample, arrived: Instant) -> PushOutcome {
        let time = sample.trace_time();

        let arrived = match self.entries.back() {
            Some(last) => arrived.max(last.arrived),
            None => arrived,
        };

        if let Some(last) = self.entries.back_mut() {
            if last.time == time {
                last.values = smooth(&sample.values, &last.values);
                for (flag, &new) in last.anomalies.iter_mut().zip(sample.anomalies.iter()) {
                    *flag |= new;
                }
                last.arrived = arrived;
                return PushOutcome::Smoothed;
            }
        }

        self.entries.push_back(Entry {
            time,
            values: sample.values,
            anomalies: sample.anomalies,
            arrived,
        });
        PushOutcome::Appended
    }

    /// Drop entries that arrived strictly before `now - max_age`.
    ///
    /// Returns the number of entries removed.
    pub fn expire(&mut self, max_age: Duration, now: Instant) -> usize {
        let Some(cutoff) = now.checked_sub(max_age) else {
            return 0;
        };

        let mut removed = 0;
        while let Some(front) = self.entries.front() {
            if front.arrived >= cutoff {
                break;
            }
            self.entries.pop_front();
            removed += 1;
        }
        removed
    }
}

/// Element-wise mean of two channel arrays.
fn smooth(a: &[f64; CHANNEL_COUNT], b: &[f64; CHANNEL_COUNT]) -> [f64; CHANNEL_COUNT] {
    std::array::from_fn(|i| (a[i] + b[i]) / 2.0)
}
