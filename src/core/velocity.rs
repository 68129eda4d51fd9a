// src/core/velocity.rs
// Velocity command accumulated by the teleop buttons.

use serde::{Deserialize, Serialize};

use crate::PanelError;

/// Linear/angular speed sent on `cmd_vel`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityCommand {
    /// Linear velocity along x (m/s)
    pub linear: f64,
    /// Angular velocity around z (rad/s)
    pub angular: f64,
}

impl VelocityCommand {
    /// Adds `step` to the linear speed.
    pub fn accelerate(&mut self, step: f64) {
        self.linear += step;
    }

    /// Adds `step` to the angular speed (positive turns left).
    pub fn turn(&mut self, step: f64) {
        self.angular += step;
    }

    /// Zeroes both speeds.
    pub fn stop(&mut self) {
        self.linear = 0.0;
        self.angular = 0.0;
    }
}

/// Outbound seam for velocity commands.
///
/// Publishing is fire-and-forget: implementations report local failures only,
/// there is no delivery confirmation.
#[cfg_attr(test, mockall::automock)]
pub trait CommandPublisher {
    /// Sends the full command.
    fn publish(&self, command: &VelocityCommand) -> Result<(), PanelError>;
}
