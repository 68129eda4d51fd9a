// src/core/odometry.rs
// Keeps the most recent odometry pose for display.

use log::debug;
use nalgebra::{UnitQuaternion, Vector3};

/// Pose and twist copied out of a `nav_msgs/msg/Odometry` message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSnapshot {
    /// Position in the odometry frame (m)
    pub position: Vector3<f64>,
    /// Orientation in the odometry frame
    pub orientation: UnitQuaternion<f64>,
    /// Linear velocity (m/s), not displayed
    pub linear_velocity: Vector3<f64>,
    /// Angular velocity (rad/s), not displayed
    pub angular_velocity: Vector3<f64>,
}

impl Default for PoseSnapshot {
    fn default() -> Self {
        PoseSnapshot {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl PoseSnapshot {
    /// Snapshot at `(x, y, z)` with identity orientation and zero twist.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        PoseSnapshot {
            position: Vector3::new(x, y, z),
            ..Default::default()
        }
    }

    /// Heading around z (rad).
    pub fn yaw(&self) -> f64 {
        self.orientation.euler_angles().2
    }
}

/// Last received pose. No filtering, no staleness tracking.
#[derive(Debug, Clone, Default)]
pub struct OdometryCache {
    latest: PoseSnapshot,
}

impl OdometryCache {
    /// Cache holding the origin pose.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored snapshot, even if it is older than the current one.
    pub fn update(&mut self, snapshot: PoseSnapshot) {
        debug!(
            "Odometry: x={:.3} y={:.3} z={:.3} yaw={:.3}",
            snapshot.position.x,
            snapshot.position.y,
            snapshot.position.z,
            snapshot.yaw()
        );
        self.latest = snapshot;
    }

    /// The stored snapshot.
    pub fn latest(&self) -> &PoseSnapshot {
        &self.latest
    }
}
