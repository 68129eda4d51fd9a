//! Declarative placement of every panel widget.
//!
//! Both the draw pass and the click hit-test read rectangles from [`LAYOUT`],
//! so a widget's position is defined exactly once.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Default frame width.
pub const FRAME_WIDTH: u32 = 340;
/// Default frame height.
pub const FRAME_HEIGHT: u32 = 700;

/// Every widget the panel draws outside the info table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    /// Increase linear speed
    Forward,
    /// Zero both speeds
    Stop,
    /// Increase angular speed
    Left,
    /// Decrease angular speed
    Right,
    /// Decrease linear speed
    Backward,
    /// Linear speed readout
    LinearVelocity,
    /// Angular speed readout
    AngularVelocity,
    /// Caption above the pose boxes
    PoseCaption,
    /// Odometry x
    PoseX,
    /// Odometry y
    PoseY,
    /// Odometry z
    PoseZ,
    /// Caption above the distance controls
    DistanceCaption,
    /// Query the distance service
    Call,
    /// Distance reading box
    DistanceReading,
}

/// How a layout entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Clickable push button
    Button,
    /// Titled window with a value inside
    Window,
    /// Outlined box topped by a titled window strip
    Boxed,
    /// Outlined box with a plain heading
    Framed,
    /// Free text; only the top-left corner is used
    Caption,
}

/// One row of the layout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    /// Widget identity
    pub id: WidgetId,
    /// Draw style
    pub kind: WidgetKind,
    /// Screen rectangle
    pub area: Rectangle,
    /// Button label, window title or caption text
    pub label: &'static str,
}

const fn entry(id: WidgetId, kind: WidgetKind, x: i32, y: i32, w: u32, h: u32, label: &'static str) -> LayoutEntry {
    LayoutEntry {
        id,
        kind,
        area: Rectangle::new(Point::new(x, y), Size::new(w, h)),
        label,
    }
}

use WidgetId::*;
use WidgetKind::{Boxed, Button, Caption, Framed, Window};

/// Panel layout below the info table, in draw order.
pub const LAYOUT: [LayoutEntry; 14] = [
    entry(Forward, Button, 100, 380, 90, 28, "Forward"),
    entry(Stop, Button, 100, 410, 90, 28, "Stop"),
    entry(Left, Button, 30, 410, 65, 28, "Left"),
    entry(Right, Button, 195, 410, 75, 28, "Right"),
    entry(Backward, Button, 100, 440, 90, 28, "Backward"),
    entry(LinearVelocity, Window, 30, 470, 120, 40, "Linear velocity:"),
    entry(AngularVelocity, Window, 150, 470, 120, 40, "Angular velocity:"),
    entry(PoseCaption, Caption, 15, 518, 0, 0, "Estimated robot position off odometry"),
    entry(PoseX, Boxed, 14, 532, 100, 60, "X"),
    entry(PoseY, Boxed, 116, 532, 100, 60, "Y"),
    entry(PoseZ, Boxed, 216, 532, 100, 60, "Z"),
    entry(DistanceCaption, Caption, 15, 598, 0, 0, "Distance travelled"),
    entry(Call, Button, 30, 615, 75, 75, "Call"),
    entry(DistanceReading, Framed, 115, 612, 175, 80, "Distance in meters:"),
];

/// Lookup over [`LAYOUT`].
pub fn layout_entry(id: WidgetId) -> &'static LayoutEntry {
    LAYOUT
        .iter()
        .find(|e| e.id == id)
        .unwrap_or_else(|| unreachable!("every WidgetId has a layout entry"))
}

/// Button under `point`, if any.
pub fn button_at(point: Point) -> Option<WidgetId> {
    use embedded_graphics::primitives::ContainsPoint;

    LAYOUT
        .iter()
        .filter(|e| e.kind == WidgetKind::Button)
        .find(|e| e.area.contains(point))
        .map(|e| e.id)
}
