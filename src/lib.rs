//! Robot GUI - teleoperation panel for ROS 2 mobile robots
//!
//! This library provides the pieces of an immediate-mode teleop dashboard:
//! velocity buttons publishing `cmd_vel`, an odometry pose readout, a
//! travelled-distance service client, and an info table built from the
//! robot's ten-field status report.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod core;
pub mod gui;
pub mod panel;
#[cfg(feature = "ros")]
pub mod ros_interface;

// Re-export commonly used items for easier access
pub use crate::core::{
    CommandPublisher, DistanceOutcome, DistanceService, Inbound, PoseSnapshot, RobotInfo10Fields,
    VelocityCommand,
};
pub use gui::{Canvas, Pointer, Ui};
pub use panel::TeleopPanel;

use std::path::Path;
use std::time::Duration;

/// Main configuration structure for the panel
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// ROS 2 names and QoS
    pub ros: RosConfig,
    /// Button step sizes
    pub teleop: TeleopConfig,
    /// Window settings
    pub display: DisplayConfig,
}

/// ROS 2 specific configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RosConfig {
    /// Node name
    pub node_name: String,
    /// Node namespace
    pub namespace: String,
    /// Outbound velocity topic
    pub cmd_vel_topic: String,
    /// Inbound odometry topic
    pub odom_topic: String,
    /// Inbound robot info topic
    pub robot_info_topic: String,
    /// Message type of the robot info topic
    pub robot_info_type: String,
    /// Travelled-distance service
    pub distance_service: String,
    /// QoS history depth
    pub qos_depth: usize,
    /// Upper bound on a distance request (ms)
    pub service_timeout_ms: u64,
}

impl RosConfig {
    /// Distance request timeout.
    pub fn service_timeout(&self) -> Duration {
        Duration::from_millis(self.service_timeout_ms)
    }
}

impl Default for RosConfig {
    fn default() -> Self {
        RosConfig {
            node_name: "robot_gui".to_string(),
            namespace: String::new(),
            cmd_vel_topic: "cmd_vel".to_string(),
            odom_topic: "/odom".to_string(),
            robot_info_topic: "robot_info".to_string(),
            robot_info_type: "robotinfo_msgs/msg/RobotInfo10Fields".to_string(),
            distance_service: "/get_distance".to_string(),
            qos_depth: 10,
            service_timeout_ms: 2000,
        }
    }
}

/// Teleop button configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TeleopConfig {
    /// Linear speed change per Forward/Backward click (m/s)
    pub linear_step: f64,
    /// Angular speed change per Left/Right click (rad/s)
    pub angular_step: f64,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        TeleopConfig {
            linear_step: 0.1,
            angular_step: 0.1,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title
    pub title: String,
    /// Frame width (px)
    pub width: u32,
    /// Frame height (px)
    pub height: u32,
    /// Frame rate cap
    pub fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            title: "Robot GUI".to_string(),
            width: gui::FRAME_WIDTH,
            height: gui::FRAME_HEIGHT,
            fps: 30,
        }
    }
}

impl PanelConfig {
    /// Parses a YAML document; missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PanelError> {
        let config: PanelConfig =
            serde_yaml::from_str(yaml).map_err(|e| PanelError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PanelError> {
        let path = path.as_ref();
        log::info!("Loading configuration from {}", path.display());
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Rejects settings the panel cannot run with.
    pub fn validate(&self) -> Result<(), PanelError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(PanelError::ConfigError(format!(
                "frame size must be non-zero, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self.ros.qos_depth == 0 {
            return Err(PanelError::ConfigError("qos_depth must be at least 1".to_string()));
        }
        if !self.teleop.linear_step.is_finite() || !self.teleop.angular_step.is_finite() {
            return Err(PanelError::ConfigError("velocity steps must be finite".to_string()));
        }
        Ok(())
    }
}

/// Panel error types
#[derive(Debug)]
pub enum PanelError {
    /// ROS interface error
    RosError(String),
    /// Window creation or presentation error
    WindowError(String),
    /// Configuration error
    ConfigError(String),
    /// File access error
    Io(std::io::Error),
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PanelError::RosError(msg) => write!(f, "ROS error: {}", msg),
            PanelError::WindowError(msg) => write!(f, "Window error: {}", msg),
            PanelError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            PanelError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanelError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PanelError {
    fn from(e: std::io::Error) -> Self {
        PanelError::Io(e)
    }
}

#[cfg(feature = "ros")]
impl From<r2r::Error> for PanelError {
    fn from(e: r2r::Error) -> Self {
        PanelError::RosError(e.to_string())
    }
}
