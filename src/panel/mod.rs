//! Teleop panel controller
//!
//! Owns the panel state (velocity command, telemetry text, odometry and the
//! distance reading) and composes one frame per [`TeleopPanel::update`] call:
//! the info table first, then every [`LAYOUT`] entry in order. Button clicks
//! are applied immediately, with no debounce or queueing.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info, warn};

use crate::PanelConfig;
use crate::core::{
    CommandPublisher, DistanceQuery, DistanceService, Inbound, OdometryCache, PoseSnapshot,
    RobotInfo10Fields, TelemetryText, VelocityCommand,
};
use crate::gui::widgets::TITLE_BAR_HEIGHT;
use crate::gui::{Canvas, LAYOUT, LayoutEntry, TextSize, Ui, WidgetId, WidgetKind, draw_table, hex};

const SPEED_TEXT: Rgb888 = hex(0xff0000);
const VALUE_TEXT: Rgb888 = hex(0xffffff);
const BOX_BORDER: Rgb888 = hex(0x000000);

/// The teleoperation panel.
pub struct TeleopPanel<P, D> {
    linear_step: f64,
    angular_step: f64,
    command: VelocityCommand,
    telemetry: TelemetryText,
    odometry: OdometryCache,
    distance: DistanceQuery,
    publisher: P,
    service: D,
}

impl<P, D> TeleopPanel<P, D>
where
    P: CommandPublisher,
    D: DistanceService,
{
    /// Creates a panel with zero velocity and no telemetry.
    pub fn new(config: &PanelConfig, publisher: P, service: D) -> Self {
        TeleopPanel {
            linear_step: config.teleop.linear_step,
            angular_step: config.teleop.angular_step,
            command: VelocityCommand::default(),
            telemetry: TelemetryText::new(),
            odometry: OdometryCache::new(),
            distance: DistanceQuery::new(config.ros.service_timeout()),
            publisher,
            service,
        }
    }

    /// Applies a message forwarded by the middleware thread.
    pub fn handle(&mut self, message: Inbound) {
        match message {
            Inbound::RobotInfo(report) => self.on_robot_info(&report),
            Inbound::Odometry(pose) => self.on_odometry(pose),
        }
    }

    /// Reformats the info table text.
    pub fn on_robot_info(&mut self, report: &RobotInfo10Fields) {
        self.telemetry.update(report);
    }

    /// Replaces the displayed pose.
    pub fn on_odometry(&mut self, pose: PoseSnapshot) {
        self.odometry.update(pose);
    }

    /// Draws the whole panel and applies at most one button click.
    ///
    /// Returns the button clicked this frame, if any. A click on "Call" blocks
    /// until the distance service answers or the configured timeout expires.
    pub fn update(&mut self, ui: &Ui, canvas: &mut Canvas) -> Option<WidgetId> {
        draw_table(ui, canvas, self.telemetry.as_str());

        let mut clicked = None;
        for entry in LAYOUT.iter() {
            match entry.kind {
                WidgetKind::Button => {
                    if ui.button(canvas, entry.area, entry.label) {
                        self.press(entry.id);
                        clicked = Some(entry.id);
                    }
                }
                WidgetKind::Window => {
                    ui.window(canvas, entry.area, entry.label);
                    if let Some(value) = self.readout(entry.id) {
                        ui.text(canvas, entry.area.top_left + Point::new(25, 25), &value, TextSize::Small, SPEED_TEXT);
                    }
                }
                WidgetKind::Boxed => {
                    ui.rect(canvas, entry.area, BOX_BORDER);
                    ui.window(canvas, title_strip(entry), entry.label);
                    if let Some(value) = self.readout(entry.id) {
                        ui.text(canvas, entry.area.top_left + Point::new(6, 30), &value, TextSize::Large, VALUE_TEXT);
                    }
                }
                WidgetKind::Framed => {
                    ui.rect(canvas, entry.area, BOX_BORDER);
                    ui.text(canvas, entry.area.top_left + Point::new(8, 5), entry.label, TextSize::Normal, VALUE_TEXT);
                    if let Some(value) = self.readout(entry.id) {
                        ui.text(canvas, entry.area.top_left + Point::new(8, 35), &value, TextSize::Huge, VALUE_TEXT);
                    }
                }
                WidgetKind::Caption => {
                    ui.text(canvas, entry.area.top_left, entry.label, TextSize::Small, VALUE_TEXT);
                }
            }
        }
        clicked
    }

    /// Runs the action bound to a button, exactly as a click would.
    pub fn press(&mut self, id: WidgetId) {
        match id {
            WidgetId::Forward => {
                self.command.accelerate(self.linear_step);
                self.publish();
            }
            WidgetId::Stop => {
                self.command.stop();
                self.publish();
            }
            WidgetId::Left => {
                self.command.turn(self.angular_step);
                self.publish();
            }
            WidgetId::Right => {
                self.command.turn(-self.angular_step);
                self.publish();
            }
            WidgetId::Backward => {
                self.command.accelerate(-self.linear_step);
                self.publish();
            }
            WidgetId::Call => {
                info!("Requesting travelled distance");
                self.distance.fetch(&self.service);
            }
            other => debug!("{:?} is not a button", other),
        }
    }

    fn publish(&self) {
        debug!(
            "Publishing cmd_vel: linear={:.2}, angular={:.2}",
            self.command.linear, self.command.angular
        );
        if let Err(e) = self.publisher.publish(&self.command) {
            warn!("Failed to publish command: {}", e);
        }
    }

    /// Text shown inside a readout widget.
    fn readout(&self, id: WidgetId) -> Option<String> {
        let position = &self.odometry.latest().position;
        match id {
            WidgetId::LinearVelocity => Some(format!("{:.2} m/sec", self.command.linear)),
            WidgetId::AngularVelocity => Some(format!("{:.2} rad/sec", self.command.angular)),
            WidgetId::PoseX => Some(format!("{:.6}", position.x)),
            WidgetId::PoseY => Some(format!("{:.6}", position.y)),
            WidgetId::PoseZ => Some(format!("{:.6}", position.z)),
            WidgetId::DistanceReading => Some(self.distance.reading().to_string()),
            _ => None,
        }
    }

    /// Current velocity command.
    pub fn command(&self) -> VelocityCommand {
        self.command
    }

    /// Current info table text.
    pub fn telemetry(&self) -> &str {
        self.telemetry.as_str()
    }

    /// Last odometry pose.
    pub fn pose(&self) -> &PoseSnapshot {
        self.odometry.latest()
    }

    /// Last distance reading or the failure sentinel.
    pub fn distance_reading(&self) -> &str {
        self.distance.reading()
    }
}

// Window strip drawn one pixel inside the box outline.
fn title_strip(entry: &LayoutEntry) -> Rectangle {
    Rectangle::new(
        entry.area.top_left + Point::new(1, 0),
        Size::new(entry.area.size.width, TITLE_BAR_HEIGHT),
    )
}
