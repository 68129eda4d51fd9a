// src/ros_interface/subscriber.rs
// Turns subscription streams into Inbound messages for the render loop.

use std::sync::mpsc::Sender;

use futures::{Stream, StreamExt};
use log::{info, warn};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use r2r::nav_msgs::msg::Odometry;

use crate::core::{Inbound, PoseSnapshot, RobotInfo10Fields};

/// Copies pose and twist out of an odometry message.
///
/// A degenerate (zero) quaternion maps to the identity orientation.
pub fn pose_from_odometry(msg: &Odometry) -> PoseSnapshot {
    let p = &msg.pose.pose.position;
    let q = &msg.pose.pose.orientation;
    let v = &msg.twist.twist;
    PoseSnapshot {
        position: Vector3::new(p.x, p.y, p.z),
        orientation: UnitQuaternion::try_new(Quaternion::new(q.w, q.x, q.y, q.z), f64::EPSILON)
            .unwrap_or_else(UnitQuaternion::identity),
        linear_velocity: Vector3::new(v.linear.x, v.linear.y, v.linear.z),
        angular_velocity: Vector3::new(v.angular.x, v.angular.y, v.angular.z),
    }
}

/// Decodes an untyped `RobotInfo10Fields` message.
pub fn robot_info_from_json(value: serde_json::Value) -> Result<RobotInfo10Fields, serde_json::Error> {
    serde_json::from_value(value)
}

/// Forwards every odometry message until the render loop goes away.
pub(crate) async fn forward_odometry<S>(mut stream: S, inbound: Sender<Inbound>)
where
    S: Stream<Item = Odometry> + Unpin,
{
    while let Some(msg) = stream.next().await {
        if inbound.send(Inbound::Odometry(pose_from_odometry(&msg))).is_err() {
            break;
        }
    }
    info!("Odometry forwarding stopped");
}

/// Forwards every decodable robot info report until the render loop goes away.
pub(crate) async fn forward_robot_info<S>(mut stream: S, inbound: Sender<Inbound>)
where
    S: Stream<Item = r2r::Result<serde_json::Value>> + Unpin,
{
    while let Some(item) = stream.next().await {
        let report = match item.map(robot_info_from_json) {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => {
                warn!("Malformed robot info message: {}", e);
                continue;
            }
            Err(e) => {
                warn!("Robot info subscription error: {}", e);
                continue;
            }
        };
        if inbound.send(Inbound::RobotInfo(report)).is_err() {
            break;
        }
    }
    info!("Robot info forwarding stopped");
}
