//! Shared, thread-safe trace store.
//!
//! The poller writes into the store; the UI reads snapshots out of it. All
//! mutation of a record happens inside a single write-lock critical section,
//! so a reader never sees a half-applied ingest or expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, warn};

use gaitwatch_types::{Identity, PatientId, Reading, CHANNEL_COUNT};

use super::record::{PatientRecord, PushOutcome};
use crate::source::SourceError;

/// Result of a single [`Store::ingest`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// First reading for the patient; a record was created.
    Created,
    /// A new entry was appended.
    Appended,
    /// The reading was averaged into the last entry.
    Smoothed,
    /// The source failed; nothing changed.
    Skipped,
}

impl From<PushOutcome> for IngestOutcome {
    fn from(outcome: PushOutcome) -> Self {
        match outcome {
            PushOutcome::Appended => IngestOutcome::Appended,
            PushOutcome::Smoothed => IngestOutcome::Smoothed,
        }
    }
}

/// Read-only copy of a patient's buffer.
///
/// The four sequences are parallel: index `i` of each describes the same
/// entry, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientSnapshot {
    pub id: PatientId,
    pub identity: Identity,
    pub times: Vec<String>,
    pub values: Vec<[f64; CHANNEL_COUNT]>,
    pub anomalies: Vec<[bool; CHANNEL_COUNT]>,
    pub arrivals: Vec<Instant>,
}

impl PatientSnapshot {
    fn from_record(id: PatientId, record: &PatientRecord) -> Self {
        let entries = record.entries();
        Self {
            id,
            identity: record.identity().clone(),
            times: entries.iter().map(|e| e.time.clone()).collect(),
            values: entries.iter().map(|e| e.values).collect(),
            anomalies: entries.iter().map(|e| e.anomalies).collect(),
            arrivals: entries.iter().map(|e| e.arrived).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Values of the newest entry.
    pub fn latest_values(&self) -> Option<&[f64; CHANNEL_COUNT]> {
        self.values.last()
    }

    /// Serializable form with entry ages measured from `now`.
    pub fn to_export(&self, now: Instant) -> SnapshotExport {
        SnapshotExport {
            id: self.id,
            identity: self.identity.clone(),
            entries: (0..self.len())
                .map(|i| EntryExport {
                    time: self.times[i].clone(),
                    values: self.values[i],
                    anomalies: self.anomalies[i],
                    age_secs: now.saturating_duration_since(self.arrivals[i]).as_secs_f64(),
                })
                .collect(),
        }
    }
}

/// JSON export shape of a [`PatientSnapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotExport {
    pub id: PatientId,
    pub identity: Identity,
    pub entries: Vec<EntryExport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryExport {
    pub time: String,
    pub values: [f64; CHANNEL_COUNT],
    pub anomalies: [bool; CHANNEL_COUNT],
    pub age_secs: f64,
}

/// Rolling per-patient trace buffer shared between the poller and the UI.
///
/// Cloning a `Store` yields another handle to the same data.
///
/// # Example
///
/// ```
/// use gaitwatch::Store;
/// use gaitwatch_types::{Identity, PatientId, Reading, Sample};
///
/// let store = Store::new();
/// let reading = Reading::new(
///     Identity::new("Jan", "Kowalski", "1982", false, "walk"),
///     Sample::new(14_05_09_00000000, [0.0; 6], [false; 6]),
/// );
/// store.ingest(PatientId(1), Ok(reading));
///
/// let snapshot = store.snapshot(PatientId(1)).unwrap();
/// assert_eq!(snapshot.times, vec!["14:05:09".to_string()]);
/// assert!(store.snapshot(PatientId(2)).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Store {
    records: Arc<RwLock<HashMap<PatientId, PatientRecord>>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of one fetch for `id`, stamped with the current time.
    pub fn ingest(&self, id: PatientId, outcome: Result<Reading, SourceError>) -> IngestOutcome {
        self.ingest_at(id, outcome, Instant::now())
    }

    /// Record the result of one fetch for `id` that arrived at `now`.
    ///
    /// A failed fetch is logged and leaves the store untouched. The first
    /// successful reading for a patient fixes its identity; identity fields
    /// on later readings are ignored.
    pub fn ingest_at(
        &self,
        id: PatientId,
        outcome: Result<Reading, SourceError>,
        now: Instant,
    ) -> IngestOutcome {
        let reading = match outcome {
            Ok(reading) => reading,
            Err(e) => {
                warn!(patient = %id, error = %e, "no data from sample source");
                return IngestOutcome::Skipped;
            }
        };

        let mut records = self.records.write();
        let result = match records.get_mut(&id) {
            Some(record) => record.push(&reading.sample, now).into(),
            None => {
                records.insert(id, PatientRecord::new(reading.identity, &reading.sample, now));
                IngestOutcome::Created
            }
        };

        debug!(patient = %id, outcome = ?result, "ingested reading");
        result
    }

    /// Drop every entry older than `max_age`, measured from the current time.
    pub fn expire(&self, max_age: Duration) -> usize {
        self.expire_at(max_age, Instant::now())
    }

    /// Drop every entry that arrived strictly before `now - max_age`.
    ///
    /// Sweeps all patients and returns the total number of entries removed.
    /// Records are kept even when emptied so their identity survives.
    pub fn expire_at(&self, max_age: Duration, now: Instant) -> usize {
        let mut records = self.records.write();
        let removed: usize = records.values_mut().map(|r| r.expire(max_age, now)).sum();
        if removed > 0 {
            debug!(removed, "expired entries");
        }
        removed
    }

    /// Copy out the current state of one patient, or `None` if it has never
    /// received a successful reading.
    pub fn snapshot(&self, id: PatientId) -> Option<PatientSnapshot> {
        let records = self.records.read();
        records.get(&id).map(|record| PatientSnapshot::from_record(id, record))
    }

    /// Snapshots of every known patient, ordered by id.
    pub fn snapshot_all(&self) -> Vec<PatientSnapshot> {
        let records = self.records.read();
        let mut snapshots: Vec<PatientSnapshot> = records
            .iter()
            .map(|(id, record)| PatientSnapshot::from_record(*id, record))
            .collect();
        snapshots.sort_by_key(|s| s.id);
        snapshots
    }

    /// Known patient ids, sorted.
    pub fn keys(&self) -> Vec<PatientId> {
        let mut keys: Vec<PatientId> = self.records.read().keys().copied().collect();
        keys.sort();
        keys
    }

    /// Number of known patients.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Total buffered entries across all patients.
    pub fn total_entries(&self) -> usize {
        self.records.read().values().map(|r| r.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaitwatch_types::Sample;

    const T0: u64 = 14_05_09_00000000;

    fn reading(firstname: &str, timestamp: u64, value: f64) -> Reading {
        Reading::new(
            Identity::new(firstname, "Kowalski", "1982", false, "walk"),
            Sample::new(timestamp, [value; CHANNEL_COUNT], [false; CHANNEL_COUNT]),
        )
    }

    /// Trace id for the given second past 14:05:00.
    fn tick(second: u64) -> u64 {
        T0 - 9 * 100_000_000 + second * 100_000_000
    }

    fn assert_parallel(snapshot: &PatientSnapshot) {
        let n = snapshot.times.len();
        assert_eq!(snapshot.values.len(), n);
        assert_eq!(snapshot.anomalies.len(), n);
        assert_eq!(snapshot.arrivals.len(), n);
        assert!(snapshot.arrivals.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_failure_for_new_key_is_absent() {
        let store = Store::new();
        let outcome = store.ingest(PatientId(7), Err(SourceError::Connection("refused".into())));

        assert_eq!(outcome, IngestOutcome::Skipped);
        assert!(store.snapshot(PatientId(7)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_failure_for_known_key_changes_nothing() {
        let store = Store::new();
        store.ingest(PatientId(1), Ok(reading("Jan", T0, 1.0)));
        let before = store.snapshot(PatientId(1)).unwrap();

        store.ingest(PatientId(1), Err(SourceError::Timeout));

        assert_eq!(store.snapshot(PatientId(1)).unwrap(), before);
    }

    #[test]
    fn test_same_tick_smoothing() {
        let store = Store::new();
        assert_eq!(store.ingest(PatientId(1), Ok(reading("Jan", T0, 0.0))), IngestOutcome::Created);
        assert_eq!(
            store.ingest(PatientId(1), Ok(reading("Jan", T0 + 1, 100.0))),
            IngestOutcome::Smoothed
        );

        let snapshot = store.snapshot(PatientId(1)).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.values[0], [50.0; CHANNEL_COUNT]);
        assert_parallel(&snapshot);
    }

    #[test]
    fn test_distinct_tick_append() {
        let store = Store::new();
        store.ingest(PatientId(1), Ok(reading("Jan", tick(9), 10.0)));
        let outcome = store.ingest(PatientId(1), Ok(reading("Jan", tick(10), 20.0)));

        assert_eq!(outcome, IngestOutcome::Appended);
        let snapshot = store.snapshot(PatientId(1)).unwrap();
        assert_eq!(snapshot.times, vec!["14:05:09", "14:05:10"]);
        assert_eq!(snapshot.values, vec![[10.0; CHANNEL_COUNT], [20.0; CHANNEL_COUNT]]);
        assert_parallel(&snapshot);
    }

    #[test]
    fn test_identity_captured_once() {
        let store = Store::new();
        store.ingest(PatientId(1), Ok(reading("Jan", tick(1), 0.0)));
        store.ingest(PatientId(1), Ok(reading("Piotr", tick(2), 0.0)));

        let snapshot = store.snapshot(PatientId(1)).unwrap();
        assert_eq!(snapshot.identity.firstname, "Jan");
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_expiry_removes_exactly_old_entries() {
        let store = Store::new();
        let start = Instant::now();
        for s in 0..6u64 {
            let at = start + Duration::from_secs(s);
            store.ingest_at(PatientId(1), Ok(reading("Jan", tick(s), s as f64)), at);
            store.ingest_at(PatientId(2), Ok(reading("Ola", tick(s), s as f64)), at);
        }

        // cutoff = start + 3s; entries at 0, 1, 2 are strictly older.
        let removed = store.expire_at(Duration::from_secs(7), start + Duration::from_secs(10));

        assert_eq!(removed, 6);
        for id in [PatientId(1), PatientId(2)] {
            let snapshot = store.snapshot(id).unwrap();
            assert_eq!(snapshot.len(), 3);
            assert_eq!(snapshot.values[0], [3.0; CHANNEL_COUNT]);
            assert_parallel(&snapshot);
        }
    }

    #[test]
    fn test_expiry_is_idempotent() {
        let store = Store::new();
        let start = Instant::now();
        for s in 0..4u64 {
            store.ingest_at(
                PatientId(1),
                Ok(reading("Jan", tick(s), 0.0)),
                start + Duration::from_secs(s),
            );
        }
        let now = start + Duration::from_secs(5);

        store.expire_at(Duration::from_secs(3), now);
        let once = store.snapshot(PatientId(1)).unwrap();
        assert_eq!(store.expire_at(Duration::from_secs(3), now), 0);

        assert_eq!(store.snapshot(PatientId(1)).unwrap(), once);
    }

    #[test]
    fn test_expired_record_keeps_identity() {
        let store = Store::new();
        let start = Instant::now();
        store.ingest_at(PatientId(3), Ok(reading("Ola", tick(1), 0.0)), start);

        store.expire_at(Duration::from_secs(1), start + Duration::from_secs(60));

        let snapshot = store.snapshot(PatientId(3)).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.identity.firstname, "Ola");
        assert_eq!(store.keys(), vec![PatientId(3)]);
    }

    #[test]
    fn test_parallel_invariant_under_mixed_operations() {
        let store = Store::new();
        let start = Instant::now();
        let mut now = start;
        for step in 0..200u64 {
            now += Duration::from_millis(200);
            let id = PatientId((step % 3) as u32);
            let outcome = if step % 7 == 0 {
                Err(SourceError::Timeout)
            } else {
                Ok(reading("Jan", tick(step / 5), step as f64))
            };
            store.ingest_at(id, outcome, now);
            if step % 10 == 0 {
                store.expire_at(Duration::from_secs(5), now);
            }
        }

        for snapshot in store.snapshot_all() {
            assert_parallel(&snapshot);
        }
        assert_eq!(store.keys(), vec![PatientId(0), PatientId(1), PatientId(2)]);
    }

    #[test]
    fn test_concurrent_reader_never_sees_torn_record() {
        let store = Store::new();
        let writer = store.clone();

        let handle = std::thread::spawn(move || {
            for s in 0..2_000u64 {
                writer.ingest(PatientId(1), Ok(reading("Jan", tick(s), s as f64)));
                if s % 50 == 0 {
                    writer.expire(Duration::from_millis(1));
                }
            }
        });

        for _ in 0..2_000 {
            if let Some(snapshot) = store.snapshot(PatientId(1)) {
                assert_parallel(&snapshot);
            }
        }
        handle.join().unwrap();
    }

    #[test]
    fn test_export_shape() {
        let store = Store::new();
        let start = Instant::now();
        store.ingest_at(PatientId(1), Ok(reading("Jan", tick(1), 5.0)), start);

        let export = store.snapshot(PatientId(1)).unwrap().to_export(start + Duration::from_secs(2));
        let json = serde_json::to_value(&export).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["identity"]["firstname"], "Jan");
        assert_eq!(json["entries"][0]["time"], "14:05:01");
        assert_eq!(json["entries"][0]["age_secs"], 2.0);
    }
}
