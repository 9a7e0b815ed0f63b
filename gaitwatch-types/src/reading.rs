//! Readings reported by the monitoring endpoint.

use crate::{format_trace_time, Channel, CHANNEL_COUNT};

/// Who a trace belongs to.
///
/// Captured from the first reading received for a patient and kept for the
/// lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identity {
    pub firstname: String,
    pub lastname: String,
    pub birthdate: String,
    pub disabled: bool,
    /// Name of the trace (activity) being recorded.
    pub trace_name: String,
}

impl Identity {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        birthdate: impl Into<String>,
        disabled: bool,
        trace_name: impl Into<String>,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            birthdate: birthdate.into(),
            disabled,
            trace_name: trace_name.into(),
        }
    }

    /// "Firstname Lastname".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Six sensor values and anomaly flags at one trace timestamp.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Raw trace timestamp as reported by the endpoint.
    pub timestamp: u64,
    /// Pressure per channel, in [`Channel`] order.
    pub values: [f64; CHANNEL_COUNT],
    /// Anomaly flag per channel, index-aligned with `values`.
    pub anomalies: [bool; CHANNEL_COUNT],
}

impl Sample {
    pub fn new(
        timestamp: u64,
        values: [f64; CHANNEL_COUNT],
        anomalies: [bool; CHANNEL_COUNT],
    ) -> Self {
        Self {
            timestamp,
            values,
            anomalies,
        }
    }

    /// Timestamp formatted to one-second granularity.
    pub fn trace_time(&self) -> String {
        format_trace_time(self.timestamp)
    }

    pub fn value(&self, channel: Channel) -> f64 {
        self.values[channel.index()]
    }

    pub fn is_anomalous(&self, channel: Channel) -> bool {
        self.anomalies[channel.index()]
    }
}

/// One successful response from the monitoring endpoint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    pub identity: Identity,
    pub sample: Sample,
}

impl Reading {
    pub fn new(identity: Identity, sample: Sample) -> Self {
        Self { identity, sample }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_accessors() {
        let mut anomalies = [false; CHANNEL_COUNT];
        anomalies[Channel::R1.index()] = true;
        let sample = Sample::new(14_05_09_00000000, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0], anomalies);

        assert_eq!(sample.value(Channel::L2), 3.0);
        assert!(sample.is_anomalous(Channel::R1));
        assert!(!sample.is_anomalous(Channel::R2));
        assert_eq!(sample.trace_time(), "14:05:09");
    }

    #[test]
    fn test_identity_full_name() {
        let identity = Identity::new("Anna", "Nowak", "1990", true, "stairs");
        assert_eq!(identity.full_name(), "Anna Nowak");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_reading_serializes_channel_arrays() {
        let reading = Reading::new(
            Identity::new("Anna", "Nowak", "1990", false, "walk"),
            Sample::new(1, [0.0; CHANNEL_COUNT], [false; CHANNEL_COUNT]),
        );
        let value = serde_json::to_value(&reading).unwrap();
        assert_eq!(value["sample"]["values"].as_array().unwrap().len(), CHANNEL_COUNT);
        assert_eq!(value["identity"]["trace_name"], "walk");
    }
}
