use super::days::DayRecord;
use super::grid::{GridLayout, Rect};
use super::Canvas;
use crate::lang::Language;
use crate::theme::Rgb;

/// Colors and print-unit geometry shared by every cell, already converted to
/// points
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CellStyle {
    pub(crate) border_color: Rgb,
    pub(crate) text_color: Rgb,
    pub(crate) line_width: f32,
    pub(crate) padding: f32,
}

/// Draws a year of days onto a grid, one bordered cell per grid position
#[derive(Clone, Copy, Debug)]
pub(crate) struct GridRenderer<'a> {
    layout: &'a GridLayout,
    language: &'a Language,
    style: CellStyle,
}

impl<'a> GridRenderer<'a> {
    pub(crate) fn new(layout: &'a GridLayout, language: &'a Language, style: CellStyle) -> Self {
        GridRenderer {
            layout,
            language,
            style,
        }
    }

    /// Fills the grid row by row.  Cells past the last day get a border and
    /// nothing else.
    pub(crate) fn render<C: Canvas>(&self, days: &[DayRecord], canvas: &mut C) {
        let font_size = self.layout.font_size();
        for (i, pos) in self.layout.cells().enumerate() {
            let rect = self.layout.cell(pos);
            self.draw_cell(canvas, rect, days.get(i), font_size);
        }
    }

    fn draw_cell<C: Canvas>(
        &self,
        canvas: &mut C,
        rect: Rect,
        day: Option<&DayRecord>,
        font_size: f32,
    ) {
        let CellStyle {
            border_color,
            text_color,
            line_width,
            padding,
        } = self.style;
        canvas.stroke_rect(rect, border_color, line_width);
        let Some(day) = day else {
            return;
        };

        let date = date_label(day, self.language);
        canvas.draw_text(
            rect.x + padding,
            rect.top() - padding - font_size,
            &date,
            font_size,
            text_color,
        );

        let number = day.day_number.to_string();
        let width = canvas.text_width(&number, font_size);
        canvas.draw_text(
            rect.right() - padding - width,
            rect.y + padding,
            &number,
            font_size,
            text_color,
        );
    }
}

/// Zero-padded day of month followed by the month's label, e.g. "07 Mär"
pub(crate) fn date_label(day: &DayRecord, language: &Language) -> String {
    format!(
        "{:02} {}",
        day.day_of_month,
        language.month_label(day.month)
    )
}
