//! Chart series derived from a patient snapshot.

use std::time::Duration;

use gaitwatch_types::{Channel, CHANNEL_COUNT};

use super::store::PatientSnapshot;

/// Summary statistics for one channel over the buffered window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub anomalies: usize,
}

/// Plot-ready data for one patient.
///
/// The x coordinate of each point is its age in seconds relative to the
/// newest entry, so the newest point sits at `0.0` and older points are
/// negative. Chart x bounds span the full retention window.
#[derive(Debug, Clone, Default)]
pub struct ChartSeries {
    /// `(x, value)` per channel, oldest first.
    pub lines: [Vec<(f64, f64)>; CHANNEL_COUNT],
    /// `(x, value)` of flagged entries per channel.
    pub anomalies: [Vec<(f64, f64)>; CHANNEL_COUNT],
    pub x_bounds: [f64; 2],
    /// Trace time of the oldest and newest entry.
    pub first_time: Option<String>,
    pub last_time: Option<String>,
}

impl ChartSeries {
    /// Build chart series for `snapshot` over a window of `window`.
    pub fn from_snapshot(snapshot: &PatientSnapshot, window: Duration) -> Self {
        let mut series = Self {
            x_bounds: [-window.as_secs_f64(), 0.0],
            first_time: snapshot.times.first().cloned(),
            last_time: snapshot.times.last().cloned(),
            ..Self::default()
        };

        let Some(&newest) = snapshot.arrivals.last() else {
            return series;
        };

        for ((values, flags), arrived) in
            snapshot.values.iter().zip(&snapshot.anomalies).zip(&snapshot.arrivals)
        {
            let x = 0.0 - newest.saturating_duration_since(*arrived).as_secs_f64();
            for channel in Channel::ALL {
                let i = channel.index();
                series.lines[i].push((x, values[i]));
                if flags[i] {
                    series.anomalies[i].push((x, values[i]));
                }
            }
        }

        series
    }

    pub fn is_empty(&self) -> bool {
        self.lines[0].is_empty()
    }

    pub fn line(&self, channel: Channel) -> &[(f64, f64)] {
        &self.lines[channel.index()]
    }

    pub fn anomaly_points(&self, channel: Channel) -> &[(f64, f64)] {
        &self.anomalies[channel.index()]
    }

    /// Anomaly markers of every channel in one list.
    pub fn all_anomalies(&self) -> Vec<(f64, f64)> {
        self.anomalies.iter().flatten().copied().collect()
    }

    /// Min/max/mean and anomaly count for a channel, if it has data.
    pub fn stats(&self, channel: Channel) -> Option<ChannelStats> {
        let line = self.line(channel);
        if line.is_empty() {
            return None;
        }

        let (min, max, sum) = line.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &(_, v)| (min.min(v), max.max(v), sum + v),
        );

        Some(ChannelStats {
            min,
            max,
            mean: sum / line.len() as f64,
            anomalies: self.anomaly_points(channel).len(),
        })
    }
}
