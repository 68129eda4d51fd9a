// src/core/telemetry.rs
// Turns the ten-field robot info report into the text block shown in the info table.

use log::debug;
use serde::{Deserialize, Serialize};

/// Number of text fields carried by a robot info report.
pub const FIELD_COUNT: usize = 10;

/// Ten-field status report published by the robot (`robotinfo_msgs/msg/RobotInfo10Fields`).
///
/// Each field is expected to read `label: value`, but nothing here enforces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotInfo10Fields {
    /// Field 1
    pub data_field_01: String,
    /// Field 2
    pub data_field_02: String,
    /// Field 3
    pub data_field_03: String,
    /// Field 4
    pub data_field_04: String,
    /// Field 5
    pub data_field_05: String,
    /// Field 6
    pub data_field_06: String,
    /// Field 7
    pub data_field_07: String,
    /// Field 8
    pub data_field_08: String,
    /// Field 9
    pub data_field_09: String,
    /// Field 10
    pub data_field_10: String,
}

impl RobotInfo10Fields {
    /// Builds a report from fields given in order.
    pub fn from_fields<S: Into<String>>(fields: [S; FIELD_COUNT]) -> Self {
        let [f01, f02, f03, f04, f05, f06, f07, f08, f09, f10] = fields;
        RobotInfo10Fields {
            data_field_01: f01.into(),
            data_field_02: f02.into(),
            data_field_03: f03.into(),
            data_field_04: f04.into(),
            data_field_05: f05.into(),
            data_field_06: f06.into(),
            data_field_07: f07.into(),
            data_field_08: f08.into(),
            data_field_09: f09.into(),
            data_field_10: f10.into(),
        }
    }

    /// Fields in wire order.
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.data_field_01,
            &self.data_field_02,
            &self.data_field_03,
            &self.data_field_04,
            &self.data_field_05,
            &self.data_field_06,
            &self.data_field_07,
            &self.data_field_08,
            &self.data_field_09,
            &self.data_field_10,
        ]
    }
}

/// Latest formatted robot info report, one field per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryText {
    text: String,
}

impl TelemetryText {
    /// Empty text, before any report has arrived.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole text with the formatted report.
    pub fn update(&mut self, info: &RobotInfo10Fields) {
        self.text = format_report(info);
        debug!("Robot info updated ({} bytes)", self.text.len());
    }

    /// Current text block.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True until the first report.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Joins the report fields, each followed by a line break.
///
/// Fields are copied verbatim: a field containing `\n` yields extra lines.
pub fn format_report(info: &RobotInfo10Fields) -> String {
    let fields = info.fields();
    let mut out = String::with_capacity(fields.iter().map(|f| f.len() + 1).sum());
    for field in fields {
        out.push_str(field);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RobotInfo10Fields {
        RobotInfo10Fields::from_fields([
            "robot_description: Mir100",
            "serial_number: 567A359",
            "ip_address: 169.254.5.180",
            "firmware_version: 3.5.8",
            "maximum_payload: 100 kg",
            "hydraulic_oil_temperature: 45C",
            "hydraulic_oil_tank_fill_level: 100%",
            "hydraulic_oil_pressure: 250 bar",
            "",
            "",
        ])
    }

    #[test]
    fn formats_one_line_per_field_in_order() {
        let text = format_report(&sample());
        let lines: Vec<&str> = text.split_terminator('\n').collect();
        assert_eq!(lines.len(), FIELD_COUNT);
        assert_eq!(lines[0], "robot_description: Mir100");
        assert_eq!(lines[7], "hydraulic_oil_pressure: 250 bar");
        assert_eq!(lines[8], "");
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn update_overwrites_previous_text() {
        let mut telemetry = TelemetryText::new();
        assert!(telemetry.is_empty());

        telemetry.update(&sample());
        let mut second = sample();
        second.data_field_01 = "robot_description: Other".to_string();
        telemetry.update(&second);

        assert!(telemetry.as_str().starts_with("robot_description: Other\n"));
        assert_eq!(telemetry.as_str().matches('\n').count(), FIELD_COUNT);
    }

    #[test]
    fn embedded_line_breaks_pass_through() {
        let mut info = RobotInfo10Fields::default();
        info.data_field_03 = "a: 1\nb: 2".to_string();
        let text = format_report(&info);
        assert_eq!(text.split_terminator('\n').count(), FIELD_COUNT + 1);
    }
}
