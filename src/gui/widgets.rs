//! Immediate-mode widgets drawn directly into a [`Canvas`].
//!
//! Every call draws its widget for the current frame. [`Ui::button`] also
//! hit-tests the pointer and reports a click when the left button was
//! released inside the button's rectangle since the previous frame. Pointer
//! samples taken between frames with [`Ui::sample`] keep press/release edges
//! that would otherwise fall between two frames.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_7X13, FONT_8X13, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

use super::canvas::{Canvas, hex};

/// Height of a window's title bar.
pub const TITLE_BAR_HEIGHT: u32 = 20;

const BUTTON_IDLE: Rgb888 = hex(0x424242);
const BUTTON_HOVER: Rgb888 = hex(0x4a4a4a);
const BUTTON_PRESSED: Rgb888 = hex(0x2c2c2c);
const BUTTON_BORDER: Rgb888 = hex(0x1c1c1c);
const TITLE_BAR: Rgb888 = hex(0x212121);
const WINDOW_BODY: Rgb888 = hex(0x313131);
const WINDOW_BORDER: Rgb888 = hex(0x2d2d2d);
const LABEL: Rgb888 = hex(0xcecece);

const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Glyph size for [`Ui::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// 6x10, table rows and captions
    Small,
    /// 7x13, box headings
    Normal,
    /// 8x13, pose readouts
    Large,
    /// 10x20, table title and distance reading
    Huge,
}

impl TextSize {
    fn font(self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &FONT_6X10,
            TextSize::Normal => &FONT_7X13,
            TextSize::Large => &FONT_8X13,
            TextSize::Huge => &FONT_10X20,
        }
    }
}

/// Pointer state read from the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pointer {
    /// Cursor position inside the frame, if any
    pub position: Option<Point>,
    /// Whether the left button is held
    pub left_down: bool,
}

/// Per-window input state shared by all widgets of a frame.
#[derive(Debug, Default)]
pub struct Ui {
    pointer: Pointer,
    previous_down: bool,
    pending_release: Option<Point>,
    released_at: Option<Point>,
}

impl Ui {
    /// Input state with no pointer activity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer sample taken between frames.
    ///
    /// The first release seen since the last frame is kept until
    /// [`Ui::begin_frame`] hands it to the widgets.
    pub fn sample(&mut self, pointer: Pointer) {
        if self.previous_down && !pointer.left_down && self.pending_release.is_none() {
            self.pending_release = pointer.position;
        }
        self.previous_down = pointer.left_down;
        self.pointer = pointer;
    }

    /// Starts a frame with the latest pointer sample.
    pub fn begin_frame(&mut self, pointer: Pointer) {
        self.sample(pointer);
        self.released_at = self.pending_release.take();
    }

    /// Position of a click completed since the previous frame.
    pub fn released_at(&self) -> Option<Point> {
        self.released_at
    }

    /// True if a click completed inside `area` since the previous frame.
    pub fn clicked(&self, area: &Rectangle) -> bool {
        self.released_at.is_some_and(|p| area.contains(p))
    }

    /// Draws a push button and reports whether it was clicked.
    pub fn button(&self, canvas: &mut Canvas, area: Rectangle, label: &str) -> bool {
        let hovered = self.pointer.position.is_some_and(|p| area.contains(p));
        let fill = match (hovered, self.pointer.left_down) {
            (true, true) => BUTTON_PRESSED,
            (true, false) => BUTTON_HOVER,
            _ => BUTTON_IDLE,
        };
        let style = PrimitiveStyleBuilder::new()
            .fill_color(fill)
            .stroke_color(BUTTON_BORDER)
            .stroke_width(1)
            .build();
        area.into_styled(style).draw(canvas).ok();

        let font = MonoTextStyle::new(TextSize::Small.font(), LABEL);
        Text::with_text_style(label, area.center(), font, CENTERED)
            .draw(canvas)
            .ok();

        self.clicked(&area)
    }

    /// Draws a window: a title bar with `title` over a plain body.
    pub fn window(&self, canvas: &mut Canvas, area: Rectangle, title: &str) {
        let body = PrimitiveStyleBuilder::new()
            .fill_color(WINDOW_BODY)
            .stroke_color(WINDOW_BORDER)
            .stroke_width(1)
            .build();
        area.into_styled(body).draw(canvas).ok();

        let bar = Rectangle::new(
            area.top_left,
            Size::new(area.size.width, TITLE_BAR_HEIGHT.min(area.size.height)),
        );
        bar.into_styled(PrimitiveStyle::with_fill(TITLE_BAR))
            .draw(canvas)
            .ok();

        let font = MonoTextStyle::new(TextSize::Small.font(), LABEL);
        Text::with_text_style(title, area.top_left + Point::new(4, 5), font, TOP_LEFT)
            .draw(canvas)
            .ok();
    }

    /// Draws a 1px rectangle outline.
    pub fn rect(&self, canvas: &mut Canvas, area: Rectangle, border: Rgb888) {
        area.into_styled(PrimitiveStyle::with_stroke(border, 1))
            .draw(canvas)
            .ok();
    }

    /// Draws `text` with its top-left corner at `origin`.
    pub fn text(&self, canvas: &mut Canvas, origin: Point, text: &str, size: TextSize, color: Rgb888) {
        let font = MonoTextStyle::new(size.font(), color);
        Text::with_text_style(text, origin, font, TOP_LEFT)
            .draw(canvas)
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rectangle {
        Rectangle::new(Point::new(10, 10), Size::new(40, 20))
    }

    fn click(ui: &mut Ui, at: Point) {
        ui.begin_frame(Pointer { position: Some(at), left_down: true });
        ui.begin_frame(Pointer { position: Some(at), left_down: false });
    }

    #[test]
    fn click_fires_once_on_release() {
        let mut ui = Ui::new();
        let mut canvas = Canvas::new(64, 64);

        ui.begin_frame(Pointer { position: Some(Point::new(20, 15)), left_down: true });
        assert!(!ui.button(&mut canvas, area(), "Go"));

        ui.begin_frame(Pointer { position: Some(Point::new(20, 15)), left_down: false });
        assert!(ui.button(&mut canvas, area(), "Go"));

        ui.begin_frame(Pointer { position: Some(Point::new(20, 15)), left_down: false });
        assert!(!ui.button(&mut canvas, area(), "Go"));
    }

    #[test]
    fn tap_between_frames_is_a_click() {
        let mut ui = Ui::new();
        let mut canvas = Canvas::new(64, 64);
        let at = Some(Point::new(20, 15));

        ui.begin_frame(Pointer { position: at, left_down: false });
        ui.sample(Pointer { position: at, left_down: true });
        ui.sample(Pointer { position: at, left_down: false });
        ui.begin_frame(Pointer { position: at, left_down: false });
        assert!(ui.button(&mut canvas, area(), "Go"));

        ui.begin_frame(Pointer { position: at, left_down: false });
        assert!(!ui.button(&mut canvas, area(), "Go"));
    }

    #[test]
    fn first_release_between_frames_wins() {
        let mut ui = Ui::new();
        ui.sample(Pointer { position: Some(Point::new(20, 15)), left_down: true });
        ui.sample(Pointer { position: Some(Point::new(20, 15)), left_down: false });
        ui.sample(Pointer { position: Some(Point::new(5, 5)), left_down: true });
        ui.begin_frame(Pointer { position: Some(Point::new(5, 5)), left_down: false });

        assert_eq!(ui.released_at(), Some(Point::new(20, 15)));
        assert!(ui.clicked(&area()));
    }

    #[test]
    fn release_outside_is_ignored() {
        let mut ui = Ui::new();
        click(&mut ui, Point::new(5, 5));
        assert!(!ui.clicked(&area()));
        assert_eq!(ui.released_at(), Some(Point::new(5, 5)));
    }

    #[test]
    fn button_paints_its_area() {
        let ui = Ui::new();
        let mut canvas = Canvas::new(64, 64);
        ui.button(&mut canvas, area(), "Go");
        assert_eq!(canvas.pixel(10, 10), Some(BUTTON_BORDER));
        assert_eq!(canvas.pixel(12, 12), Some(BUTTON_IDLE));
    }

    #[test]
    fn window_has_title_bar() {
        let ui = Ui::new();
        let mut canvas = Canvas::new(128, 64);
        ui.window(&mut canvas, Rectangle::new(Point::new(0, 0), Size::new(100, 40)), "X");
        assert_eq!(canvas.pixel(90, 2), Some(TITLE_BAR));
        assert_eq!(canvas.pixel(90, 30), Some(WINDOW_BODY));
    }
}
