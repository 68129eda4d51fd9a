// src/main.rs
// Entry point for the robot GUI: starts the ROS thread, opens the window and
// runs the per-frame draw/update loop until the window is closed.

use std::error::Error;

use log::{error, info};
use robot_gui::gui::{Canvas, PanelWindow, Ui};
use robot_gui::ros_interface::RosInterface;
use robot_gui::{PanelConfig, TeleopPanel};

/// Usage: `robot_gui [config.yaml]`
fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging for debugging
    env_logger::init();
    info!("Starting robot GUI...");

    let config = match std::env::args().nth(1) {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };

    let (mut ros, links) = RosInterface::start(&config.ros)?;
    let mut panel = TeleopPanel::new(&config, links.publisher, links.distance);

    let display = &config.display;
    let mut window = PanelWindow::new(&display.title, display.width, display.height, display.fps)?;
    let mut canvas = Canvas::new(display.width, display.height);
    let mut ui = Ui::new();

    while window.is_open() {
        for message in links.inbound.try_iter() {
            panel.handle(message);
        }

        canvas.reset();
        ui.begin_frame(window.pointer());
        if let Some(clicked) = panel.update(&ui, &mut canvas) {
            info!("{:?} clicked", clicked);
        }

        if let Err(e) = window.present(&canvas) {
            error!("Failed to present frame: {}", e);
            break;
        }
        window.wait_frame(&mut ui);
    }

    ros.shutdown();
    info!("Robot GUI closed");
    Ok(())
}
