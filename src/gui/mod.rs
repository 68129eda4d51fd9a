//! Immediate-mode drawing layer: canvas, widgets, layout table and info table.

pub mod canvas;
pub mod layout;
pub mod table;
pub mod widgets;
#[cfg(feature = "window")]
pub mod window;

pub use canvas::{BACKGROUND, Canvas, hex};
pub use layout::{FRAME_HEIGHT, FRAME_WIDTH, LAYOUT, LayoutEntry, WidgetId, WidgetKind, button_at, layout_entry};
pub use table::{TableGeometry, TableRow, draw_table, parse_rows};
pub use widgets::{Pointer, TextSize, Ui};
#[cfg(feature = "window")]
pub use window::PanelWindow;
