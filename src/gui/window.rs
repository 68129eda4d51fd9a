// src/gui/window.rs
// Presents the canvas in a desktop window and samples the mouse for the widgets.

use std::time::{Duration, Instant};

use embedded_graphics::prelude::Point;
use log::info;
use minifb::{Key, MouseButton, MouseMode, WindowOptions};

use super::canvas::Canvas;
use super::widgets::{Pointer, Ui};
use crate::PanelError;

// Input is pumped this often while waiting for the next frame.
const INPUT_POLL: Duration = Duration::from_millis(2);

/// Desktop window showing one [`Canvas`] per frame.
pub struct PanelWindow {
    window: minifb::Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    frame_period: Duration,
    next_frame: Instant,
}

impl PanelWindow {
    /// Opens a window of the canvas size, capped at `fps` frames per second.
    pub fn new(title: &str, width: u32, height: u32, fps: u32) -> Result<Self, PanelError> {
        let (width, height) = (width as usize, height as usize);
        let mut window = minifb::Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| PanelError::WindowError(e.to_string()))?;

        // frames are paced by wait_frame so that input keeps flowing in between
        window.set_target_fps(0);
        let frame_period = if fps > 0 {
            Duration::from_secs(1) / fps
        } else {
            Duration::ZERO
        };
        info!("Opened window '{}' ({}x{} @ {} fps)", title, width, height, fps);

        Ok(PanelWindow {
            window,
            buffer: Vec::with_capacity(width * height),
            width,
            height,
            frame_period,
            next_frame: Instant::now(),
        })
    }

    /// False once the window was closed or Esc was pressed.
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Mouse position (inside the frame) and left button state.
    pub fn pointer(&self) -> Pointer {
        let position = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x as i32, y as i32));
        Pointer {
            position,
            left_down: self.window.get_mouse_down(MouseButton::Left),
        }
    }

    /// Shows the canvas and pumps window events.
    pub fn present(&mut self, canvas: &Canvas) -> Result<(), PanelError> {
        canvas.write_argb(&mut self.buffer);
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| PanelError::WindowError(e.to_string()))
    }

    /// Pumps events and feeds pointer samples to `ui` until the next frame is due.
    pub fn wait_frame(&mut self, ui: &mut Ui) {
        self.next_frame += self.frame_period;
        let now = Instant::now();
        if self.next_frame < now {
            self.next_frame = now;
        }

        ui.sample(self.pointer());
        while self.is_open() {
            let now = Instant::now();
            if now >= self.next_frame {
                break;
            }
            std::thread::sleep(INPUT_POLL.min(self.next_frame - now));
            self.window.update();
            ui.sample(self.pointer());
        }
    }
}
