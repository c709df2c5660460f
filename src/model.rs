//! Typed view of the NETIO `netio.json` schema.
//!
//! Everything beyond the output IDs is optional: firmware revisions differ in
//! which fields they send, and a check must degrade to Unknown instead of
//! failing to parse the whole document over one absent field.

use serde::Deserialize;

/// Top-level document returned by `GET /netio.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PduStatus {
    pub agent: Agent,
    #[serde(default)]
    pub global_measure: Option<GlobalMeasure>,
    #[serde(default)]
    pub outputs: Vec<Output>,
}

impl PduStatus {
    /// Looks up an output by its device-assigned ID (1-based).
    pub fn output(&self, id: u32) -> Option<&Output> {
        self.outputs.iter().find(|o| o.id == id)
    }
}

/// Device identity and lifetime counters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Agent {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(rename = "MAC", default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Firmware version string.
    #[serde(default)]
    pub version: Option<String>,
    /// Seconds since the device booted.
    #[serde(default)]
    pub uptime: Option<u64>,
    #[serde(default)]
    pub num_outputs: Option<u32>,
}

impl Agent {
    pub fn display_name(&self) -> &str {
        self.device_name.as_deref().unwrap_or("unknown")
    }
}

/// Aggregate measurements over the whole device.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalMeasure {
    #[serde(default)]
    pub voltage: Option<f64>,
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub total_current: Option<f64>,
    #[serde(default)]
    pub total_load: Option<f64>,
    #[serde(default)]
    pub total_energy: Option<f64>,
    #[serde(default)]
    pub overall_power_factor: Option<f64>,
}

/// One switchable, individually metered socket.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    #[serde(rename = "ID")]
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    /// 1 = powered on, 0 = powered off.
    #[serde(default)]
    pub state: Option<u8>,
    /// Milliamps.
    #[serde(default)]
    pub current: Option<f64>,
    /// Watts.
    #[serde(default)]
    pub load: Option<f64>,
    #[serde(default)]
    pub power_factor: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    /// Seconds since the last state change, where the firmware reports it.
    #[serde(default)]
    pub uptime: Option<u64>,
}

impl Output {
    pub fn is_on(&self) -> Option<bool> {
        self.state.map(|s| s != 0)
    }

    /// The device reports milliamps; thresholds and output are in amperes.
    pub fn current_amps(&self) -> Option<f64> {
        self.current.map(|ma| ma / 1000.0)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Trimmed-down capture of a NETIO 4PS response.
    pub(crate) const SAMPLE: &str = r#"{
        "Agent": {
            "Model": "4PS",
            "Version": "3.1.2",
            "DeviceName": "pdu-rack-1",
            "MAC": "24:A4:2C:39:F1:8F",
            "SerialNumber": "24A42C39F18F",
            "Uptime": 1054799,
            "NumOutputs": 4
        },
        "GlobalMeasure": {
            "Voltage": 230.1,
            "Frequency": 50.0,
            "TotalCurrent": 271,
            "TotalLoad": 50,
            "TotalEnergy": 12345,
            "OverallPowerFactor": 0.81
        },
        "Outputs": [
            {
                "ID": 1,
                "Name": "router",
                "State": 1,
                "Action": 6,
                "Delay": 5000,
                "Current": 50,
                "PowerFactor": 0.5,
                "Load": 11,
                "Energy": 7913
            },
            {
                "ID": 2,
                "Name": "switch",
                "State": 0,
                "Current": 0,
                "PowerFactor": 0,
                "Load": 0,
                "Energy": 4432
            }
        ]
    }"#;

    pub(crate) fn sample_status() -> PduStatus {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn parses_full_document() {
        let status = sample_status();
        assert_eq!(status.agent.model.as_deref(), Some("4PS"));
        assert_eq!(status.agent.display_name(), "pdu-rack-1");
        assert_eq!(status.agent.uptime, Some(1054799));
        assert_eq!(status.outputs.len(), 2);

        let out = status.output(1).unwrap();
        assert_eq!(out.is_on(), Some(true));
        assert_eq!(out.current_amps(), Some(0.05));
        assert_eq!(out.load, Some(11.0));

        let global = status.global_measure.unwrap();
        assert_eq!(global.voltage, Some(230.1));
    }

    #[test]
    fn missing_output_id_is_none() {
        let status = sample_status();
        assert!(status.output(7).is_none());
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let status: PduStatus = serde_json::from_str(
            r#"{"Agent": {"Uptime": 12}, "Outputs": [{"ID": 1}]}"#,
        )
        .unwrap();
        assert_eq!(status.agent.display_name(), "unknown");
        assert!(status.global_measure.is_none());

        let out = status.output(1).unwrap();
        assert_eq!(out.is_on(), None);
        assert_eq!(out.current_amps(), None);
        assert_eq!(out.display_name(), "unnamed");
    }

    #[test]
    fn tolerates_missing_outputs_array() {
        let status: PduStatus = serde_json::from_str(r#"{"Agent": {}}"#).unwrap();
        assert!(status.outputs.is_empty());
        assert_eq!(status.agent.uptime, None);
    }
}
