//! Two-column info table built from the telemetry text.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use super::canvas::{Canvas, hex};
use super::widgets::{TextSize, Ui};

/// Top of the title band.
pub const TABLE_TOP: i32 = 20;
/// Height of the title band above the rows.
pub const TITLE_HEIGHT: i32 = 30;
/// Vertical distance between rows.
pub const ROW_STRIDE: i32 = 30;
/// Left edge of the label column.
pub const LABEL_X: i32 = 15;
/// Left edge of the value column.
pub const VALUE_X: i32 = 200;
/// Gap between the table background and the frame edges.
pub const SIDE_MARGIN: i32 = 10;

const TEXT_INSET: i32 = 8;
/// Fill behind the table rows.
pub const ROW_BACKGROUND: Rgb888 = hex(0x313431);
const TITLE_COLOR: Rgb888 = hex(0x000000);
const ROW_TEXT: Rgb888 = hex(0xffffff);

/// A line split at its first colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow<'a> {
    /// Text up to and including the colon
    pub label: &'a str,
    /// Text after the colon, minus the one separator character
    pub value: &'a str,
}

/// Splits one line into label and value; `None` if it has no colon.
pub fn split_row(line: &str) -> Option<TableRow<'_>> {
    let colon = line.find(':')?;
    let (label, rest) = line.split_at(colon + 1);
    let mut chars = rest.chars();
    chars.next();
    Some(TableRow {
        label,
        value: chars.as_str(),
    })
}

/// One entry per line; lines without a colon map to `None` but keep their slot.
///
/// A trailing line break does not start an extra line, and empty text has no lines.
pub fn parse_rows(text: &str) -> Vec<Option<TableRow<'_>>> {
    text.split_terminator('\n').map(split_row).collect()
}

/// Where the table landed on the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableGeometry {
    /// First row's top edge, just below the title band
    pub rows_top: i32,
    /// Height of the row area (`ROW_STRIDE` per line)
    pub height: u32,
    /// Number of lines, including those without a colon
    pub lines: usize,
    /// Number of lines that produced label/value text
    pub labelled: usize,
}

/// Draws the title, the row background and each label/value pair.
pub fn draw_table(ui: &Ui, canvas: &mut Canvas, text: &str) -> TableGeometry {
    let rows = parse_rows(text);

    ui.text(
        canvas,
        Point::new(LABEL_X, TABLE_TOP + TEXT_INSET),
        "Info",
        TextSize::Huge,
        TITLE_COLOR,
    );

    let rows_top = TABLE_TOP + TITLE_HEIGHT;
    let height = ROW_STRIDE as u32 * rows.len() as u32;

    if height > 0 {
        let width = (canvas.width() as i32 - 2 * SIDE_MARGIN).max(0) as u32;
        Rectangle::new(Point::new(SIDE_MARGIN, rows_top), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(ROW_BACKGROUND))
            .draw(canvas)
            .ok();
    }

    let mut labelled = 0;
    let mut y = rows_top;
    for row in rows.iter() {
        if let Some(row) = row {
            ui.text(canvas, Point::new(LABEL_X, y + TEXT_INSET), row.label, TextSize::Small, ROW_TEXT);
            ui.text(canvas, Point::new(VALUE_X, y + TEXT_INSET), row.value, TextSize::Small, ROW_TEXT);
            labelled += 1;
        }
        y += ROW_STRIDE;
    }

    TableGeometry {
        rows_top,
        height,
        lines: rows.len(),
        labelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("speed: 1.5 m/s", "speed:", "1.5 m/s")]
    #[case("a:b", "a:", "")]
    #[case("time: 12:30", "time:", "12:30")]
    #[case("name:", "name:", "")]
    #[case(":  x", ":", " x")]
    #[case("temp: 45°C", "temp:", "45°C")]
    fn splits_at_first_colon(#[case] line: &str, #[case] label: &str, #[case] value: &str) {
        assert_eq!(split_row(line), Some(TableRow { label, value }));
    }

    #[test]
    fn multibyte_separator_is_skipped_whole() {
        assert_eq!(split_row("k:éx"), Some(TableRow { label: "k:", value: "x" }));
    }

    #[test]
    fn lines_without_colon_keep_their_slot() {
        let rows = parse_rows("a: 1\nno colon\nb: 2\n");
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_none());
        assert_eq!(rows[2].map(|r| r.value), Some("2"));
    }

    #[rstest]
    #[case("", 0)]
    #[case("\n", 1)]
    #[case("a: 1", 1)]
    #[case("a: 1\n", 1)]
    #[case("a: 1\n\nb: 2\n", 3)]
    fn line_counting(#[case] text: &str, #[case] lines: usize) {
        assert_eq!(parse_rows(text).len(), lines);
    }

    #[test]
    fn empty_text_draws_title_only() {
        let ui = Ui::new();
        let mut canvas = Canvas::new(340, 400);
        let geometry = draw_table(&ui, &mut canvas, "");
        assert_eq!(geometry.height, 0);
        assert_eq!(geometry.lines, 0);
        assert_eq!(geometry.rows_top, TABLE_TOP + TITLE_HEIGHT);
    }

    #[test]
    fn row_area_scales_with_lines() {
        let ui = Ui::new();
        let mut canvas = Canvas::new(340, 400);
        let geometry = draw_table(&ui, &mut canvas, "a: 1\nskip\nc: 3\n");
        assert_eq!(geometry.height, 90);
        assert_eq!(geometry.lines, 3);
        assert_eq!(geometry.labelled, 2);
    }
}
