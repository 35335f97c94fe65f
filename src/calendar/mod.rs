mod days;
mod grid;
mod render;
pub(crate) use self::days::year_days;
pub(crate) use self::grid::{GridError, GridLayout, Rect};
pub(crate) use self::render::{CellStyle, GridRenderer};
use crate::theme::Rgb;

/// A drawing surface in PDF points, origin at the bottom-left of the page
pub(crate) trait Canvas {
    /// Outlines `rect` without filling it
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32);

    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Draws `text` with its baseline starting at `(x, y)`
    fn draw_text(&mut self, x: f32, y: f32, text: &str, size: f32, color: Rgb);
}
