// src/ros_interface/publisher.rs
// Hands velocity commands to the ROS thread, which publishes them on cmd_vel.

use std::sync::mpsc::Sender;

use r2r::geometry_msgs::msg::{Twist, Vector3};

use crate::PanelError;
use crate::core::{CommandPublisher, VelocityCommand};

/// Render-thread end of the `cmd_vel` publisher.
#[derive(Clone)]
pub struct CmdVelPublisher {
    commands: Sender<VelocityCommand>,
}

impl CmdVelPublisher {
    pub(crate) fn new(commands: Sender<VelocityCommand>) -> Self {
        CmdVelPublisher { commands }
    }
}

impl CommandPublisher for CmdVelPublisher {
    fn publish(&self, command: &VelocityCommand) -> Result<(), PanelError> {
        self.commands
            .send(*command)
            .map_err(|_| PanelError::RosError("ROS thread is not running".to_string()))
    }
}

/// Convert to ROS Twist message
pub fn to_twist(command: &VelocityCommand) -> Twist {
    Twist {
        linear: Vector3 {
            x: command.linear,
            y: 0.0,
            z: 0.0,
        },
        angular: Vector3 {
            x: 0.0,
            y: 0.0,
            z: command.angular,
        },
    }
}
