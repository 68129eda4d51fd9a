// core/mod.rs

// State owned by the teleop panel: telemetry text, odometry, the distance
// reading and the velocity command, plus the outbound seams they talk through.

pub mod distance;
pub mod odometry;
pub mod telemetry;
pub mod velocity;

pub use distance::{DistanceOutcome, DistanceQuery, DistanceService, FAILURE_SENTINEL};
pub use odometry::{OdometryCache, PoseSnapshot};
pub use telemetry::{RobotInfo10Fields, TelemetryText, format_report};
pub use velocity::{CommandPublisher, VelocityCommand};

/// Message delivered from the middleware thread to the render loop.
#[derive(Debug, Clone)]
pub enum Inbound {
    /// New robot info report
    RobotInfo(RobotInfo10Fields),
    /// New odometry pose
    Odometry(PoseSnapshot),
}
