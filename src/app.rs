//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;

use gaitwatch_types::PatientId;

use crate::data::histogram::DEFAULT_BINS;
use crate::data::{ChartSeries, Histogram, PatientSnapshot, SnapshotExport, Store};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// All six channels on one chart with anomaly markers.
    Trace,
    /// One chart per channel in a 3x2 grid.
    Channels,
    /// Distribution of values per channel.
    Histogram,
    /// Latest pressure drawn at each sensor's position on the feet.
    Feet,
}

impl View {
    pub const ALL: [View; 4] = [View::Trace, View::Channels, View::Histogram, View::Feet];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Trace => View::Channels,
            View::Channels => View::Histogram,
            View::Histogram => View::Feet,
            View::Feet => View::Trace,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Trace => View::Feet,
            View::Channels => View::Trace,
            View::Histogram => View::Channels,
            View::Feet => View::Histogram,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Trace => "Trace",
            View::Channels => "Channels",
            View::Histogram => "Histogram",
            View::Feet => "Feet",
        }
    }

    /// Position of this view in the tab bar.
    pub fn index(&self) -> usize {
        match self {
            View::Trace => 0,
            View::Channels => 1,
            View::Histogram => 2,
            View::Feet => 3,
        }
    }
}

/// Main application state.
///
/// The app only ever reads from the [`Store`]; the poller owns writing.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data
    store: Store,
    source_description: String,
    pub patients: Vec<PatientId>,
    pub selected_patient: usize,
    pub snapshot: Option<PatientSnapshot>,
    pub series: ChartSeries,
    pub histogram: Histogram,
    pub last_refresh: Option<Instant>,
    /// Width of the chart time axis.
    pub window: Duration,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `store`, with theme auto-detection.
    pub fn new(store: Store, patients: Vec<PatientId>, source_description: &str) -> Self {
        Self::with_theme(store, patients, source_description, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(
        store: Store,
        patients: Vec<PatientId>,
        source_description: &str,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Trace,
            show_help: false,
            store,
            source_description: source_description.to_string(),
            patients,
            selected_patient: 0,
            snapshot: None,
            series: ChartSeries::default(),
            histogram: Histogram {
                bin_width: 0.0,
                counts: Default::default(),
            },
            last_refresh: None,
            window: crate::poller::DEFAULT_RETENTION,
            theme,
            status_message: None,
        }
    }

    /// Set the width of the chart time axis.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// The patient currently on screen.
    pub fn selected_patient_id(&self) -> Option<PatientId> {
        self.patients.get(self.selected_patient).copied()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Re-read the selected patient from the store and rebuild chart data.
    ///
    /// Returns true if the patient has received data.
    pub fn refresh(&mut self) -> bool {
        self.snapshot = self.selected_patient_id().and_then(|id| self.store.snapshot(id));
        self.last_refresh = Some(Instant::now());

        match self.snapshot {
            Some(ref snapshot) => {
                self.series = ChartSeries::from_snapshot(snapshot, self.window);
                self.histogram = Histogram::from_snapshot(snapshot, DEFAULT_BINS);
                true
            }
            None => {
                self.series = ChartSeries::default();
                self.histogram.counts = Default::default();
                false
            }
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Show the next patient in the list (wraps around).
    pub fn select_next_patient(&mut self) {
        if self.patients.is_empty() {
            return;
        }
        self.selected_patient = (self.selected_patient + 1) % self.patients.len();
        self.refresh();
    }

    /// Show the previous patient in the list (wraps around).
    pub fn select_prev_patient(&mut self) {
        if self.patients.is_empty() {
            return;
        }
        self.selected_patient =
            (self.selected_patient + self.patients.len() - 1) % self.patients.len();
        self.refresh();
    }

    /// Jump to a patient by list position; out-of-range positions are ignored.
    pub fn select_patient(&mut self, index: usize) {
        if index < self.patients.len() {
            self.selected_patient = index;
            self.refresh();
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Navigate back: close the help overlay, otherwise return to the Trace view.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else {
            self.current_view = View::Trace;
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export every buffered patient to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<usize> {
        export_store(&self.store, path)
    }
}

/// Write snapshots of every patient in `store` to `path` as pretty JSON.
///
/// Returns the number of patients written.
pub fn export_store(store: &Store, path: &Path) -> Result<usize> {
    let now = Instant::now();
    let patients: Vec<SnapshotExport> =
        store.snapshot_all().iter().map(|s| s.to_export(now)).collect();

    let export = serde_json::json!({
        "exported_at_ms": unix_millis(SystemTime::now()),
        "patients": patients,
    });

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)?;

    Ok(patients.len())
}

/// Milliseconds since the Unix epoch, saturating at both ends.
fn unix_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaitwatch_types::{Identity, Reading, Sample, CHANNEL_COUNT};

    fn app_with_data() -> App {
        let store = Store::new();
        for id in [1u32, 3] {
            let reading = Reading::new(
                Identity::new(format!("P{}", id), "Test", "1990", id == 3, "walk"),
                Sample::new(14_05_09_00000000, [id as f64; CHANNEL_COUNT], [false; CHANNEL_COUNT]),
            );
            store.ingest(PatientId(id), Ok(reading));
        }
        App::with_theme(store, (1..=3).map(PatientId).collect(), "test", Theme::dark())
    }

    #[test]
    fn test_view_cycle() {
        for view in View::ALL {
            assert_eq!(view.next().prev(), view);
            assert_eq!(View::ALL[view.index()], view);
        }
        assert_eq!(View::Feet.next(), View::Trace);
    }

    #[test]
    fn test_refresh_loads_selected_patient() {
        let mut app = app_with_data();

        assert!(app.refresh());
        let snapshot = app.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.identity.firstname, "P1");
        assert_eq!(app.series.lines[0], vec![(0.0, 1.0)]);
        assert_eq!(app.histogram.max_count(), 1);
    }

    #[test]
    fn test_patient_without_data_is_absent() {
        let mut app = app_with_data();

        app.select_patient(1);

        assert_eq!(app.selected_patient_id(), Some(PatientId(2)));
        assert!(app.snapshot.is_none());
        assert!(app.series.is_empty());
    }

    #[test]
    fn test_patient_navigation_wraps() {
        let mut app = app_with_data();

        app.select_prev_patient();
        assert_eq!(app.selected_patient_id(), Some(PatientId(3)));
        assert!(app.snapshot.as_ref().unwrap().identity.disabled);

        app.select_next_patient();
        assert_eq!(app.selected_patient_id(), Some(PatientId(1)));

        app.select_patient(10);
        assert_eq!(app.selected_patient_id(), Some(PatientId(1)));
    }

    #[test]
    fn test_go_back_closes_help_first() {
        let mut app = app_with_data();
        app.set_view(View::Histogram);
        app.toggle_help();

        app.go_back();
        assert!(!app.show_help);
        assert_eq!(app.current_view, View::Histogram);

        app.go_back();
        assert_eq!(app.current_view, View::Trace);
    }

    #[test]
    fn test_status_message() {
        let mut app = app_with_data();
        assert!(app.get_status_message().is_none());
        app.set_status_message("hello".to_string());
        assert_eq!(app.get_status_message(), Some("hello"));
    }

    #[test]
    fn test_export_state() {
        let app = app_with_data();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        let written = app.export_state(&path).unwrap();

        assert_eq!(written, 2);
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["patients"][0]["id"], 1);
        assert_eq!(json["patients"][1]["identity"]["disabled"], true);
        assert_eq!(json["patients"][0]["entries"][0]["time"], "14:05:09");
        assert!(json["exported_at_ms"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_unix_millis_saturates() {
        assert_eq!(unix_millis(UNIX_EPOCH + Duration::from_millis(1500)), 1500);
        assert_eq!(unix_millis(UNIX_EPOCH - Duration::from_secs(1)), 0);

        let far = UNIX_EPOCH
            .checked_add(Duration::from_millis(u64::MAX) + Duration::from_millis(1))
            .unwrap();
        assert_eq!(unix_millis(far), u64::MAX);
    }
}
