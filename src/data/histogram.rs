//! Per-channel value distributions for the histogram view.

use gaitwatch_types::{Channel, CHANNEL_COUNT, PRESSURE_MAX};

use super::store::PatientSnapshot;

/// Default number of bins across the pressure range.
pub const DEFAULT_BINS: usize = 11;

/// Counts of buffered values per channel, bucketed over `0..PRESSURE_MAX`.
///
/// Values outside the range land in the first or last bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bin_width: f64,
    pub counts: [Vec<u64>; CHANNEL_COUNT],
}

impl Histogram {
    pub fn from_snapshot(snapshot: &PatientSnapshot, bins: usize) -> Self {
        let bins = bins.max(1);
        let bin_width = PRESSURE_MAX / bins as f64;
        let mut counts: [Vec<u64>; CHANNEL_COUNT] = std::array::from_fn(|_| vec![0; bins]);

        for values in &snapshot.values {
            for (i, &v) in values.iter().enumerate() {
                let bin = if v.is_nan() || v <= 0.0 {
                    0
                } else {
                    ((v / bin_width) as usize).min(bins - 1)
                };
                counts[i][bin] += 1;
            }
        }

        Self { bin_width, counts }
    }

    pub fn bins(&self, channel: Channel) -> &[u64] {
        &self.counts[channel.index()]
    }

    /// Lower edge of bin `index`.
    pub fn bin_start(&self, index: usize) -> f64 {
        index as f64 * self.bin_width
    }

    /// Highest count over all channels, for a shared y scale.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaitwatch_types::{Identity, PatientId};

    fn snapshot(values: Vec<[f64; CHANNEL_COUNT]>) -> PatientSnapshot {
        let n = values.len();
        PatientSnapshot {
            id: PatientId(1),
            identity: Identity::default(),
            times: vec![String::new(); n],
            values,
            anomalies: vec![[false; CHANNEL_COUNT]; n],
            arrivals: vec![std::time::Instant::now(); n],
        }
    }

    #[test]
    fn test_binning() {
        let snap = snapshot(vec![[0.0; 6], [150.0; 6], [199.9; 6], [1099.0; 6]]);

        let hist = Histogram::from_snapshot(&snap, 11);

        assert_eq!(hist.bin_width, 100.0);
        assert_eq!(hist.bins(Channel::L0), &[1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(hist.max_count(), 2);
        assert_eq!(hist.bin_start(3), 300.0);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let snap = snapshot(vec![[-5.0; 6], [5000.0; 6], [f64::NAN; 6]]);

        let hist = Histogram::from_snapshot(&snap, 4);

        assert_eq!(hist.bins(Channel::R2), &[2, 0, 0, 1]);
    }

    #[test]
    fn test_empty() {
        let hist = Histogram::from_snapshot(&snapshot(Vec::new()), 0);
        assert_eq!(hist.bins(Channel::L1), &[0]);
        assert_eq!(hist.max_count(), 0);
    }
}
