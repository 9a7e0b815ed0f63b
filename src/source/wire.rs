//! JSON shape returned by the monitoring endpoint.

use serde::Deserialize;

use gaitwatch_types::{Identity, Reading, Sample, CHANNEL_COUNT};

use super::SourceError;

/// Body of `GET /v2/monitor/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorResponse {
    pub birthdate: String,
    pub disabled: bool,
    pub firstname: String,
    pub lastname: String,
    pub trace: TraceInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraceInfo {
    pub name: String,
    /// Trace timestamp; its trailing digits encode the time of day.
    pub id: u64,
    pub sensors: Vec<SensorInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorInfo {
    pub value: f64,
    pub anomaly: bool,
}

impl TryFrom<MonitorResponse> for Reading {
    type Error = SourceError;

    fn try_from(response: MonitorResponse) -> Result<Self, Self::Error> {
        let sensors = response.trace.sensors;
        if sensors.len() != CHANNEL_COUNT {
            return Err(SourceError::Malformed(format!(
                "expected {} sensors, got {}",
                CHANNEL_COUNT,
                sensors.len()
            )));
        }

        let values = std::array::from_fn(|i| sensors[i].value);
        let anomalies = std::array::from_fn(|i| sensors[i].anomaly);

        Ok(Reading::new(
            Identity {
                firstname: response.firstname,
                lastname: response.lastname,
                birthdate: response.birthdate,
                disabled: response.disabled,
                trace_name: response.trace.name,
            },
            Sample::new(response.trace.id, values, anomalies),
        ))
    }
}

/// Decode a response body into a reading.
pub(crate) fn decode(body: &str) -> Result<Reading, SourceError> {
    let response: MonitorResponse = serde_json::from_str(body)?;
    Reading::try_from(response)
}
