use crate::config::Config;
use thiserror::Error;

/// Font size as a fraction of the cell height
const FONT_HEIGHT_RATIO: f32 = 0.18;

/// Font size as a fraction of the cell width
const FONT_WIDTH_RATIO: f32 = 0.12;

/// A rectangle in PDF points; `(x, y)` is the bottom-left corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Rect {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Rect {
    pub(crate) fn right(&self) -> f32 {
        self.x + self.width
    }

    pub(crate) fn top(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) struct CellPos {
    pub(crate) row: u16,
    pub(crate) col: u16,
}

/// Geometry of a `columns` × `rows` grid filling the printable area of a
/// page, with row 0 at the top
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GridLayout {
    columns: u16,
    rows: u16,
    /// Left edge of the printable area
    left: f32,
    /// Top edge of the printable area
    top: f32,
    cell_width: f32,
    cell_height: f32,
}

impl GridLayout {
    pub(crate) fn new(config: &Config) -> Result<GridLayout, GridError> {
        if config.columns == 0 || config.rows == 0 {
            return Err(GridError::EmptyGrid {
                columns: config.columns,
                rows: config.rows,
            });
        }
        let (page_width, page_height) = config.page.size_pt();
        let margin = config.margin.to_pt();
        let usable_width = 2.0f32.mul_add(-margin, page_width);
        let usable_height = 2.0f32.mul_add(-margin, page_height);
        if usable_width <= 0.0 || usable_height <= 0.0 {
            return Err(GridError::NoUsableArea);
        }
        Ok(GridLayout {
            columns: config.columns,
            rows: config.rows,
            left: margin,
            top: page_height - margin,
            cell_width: usable_width / f32::from(config.columns),
            cell_height: usable_height / f32::from(config.rows),
        })
    }

    pub(crate) fn columns(&self) -> u16 {
        self.columns
    }

    pub(crate) fn rows(&self) -> u16 {
        self.rows
    }

    pub(crate) fn capacity(&self) -> usize {
        usize::from(self.columns) * usize::from(self.rows)
    }

    /// Fails if the grid has fewer cells than there are days to place
    pub(crate) fn ensure_fits(&self, day_count: usize) -> Result<(), GridError> {
        if day_count > self.capacity() {
            Err(GridError::TooSmall {
                columns: self.columns,
                rows: self.rows,
                capacity: self.capacity(),
                day_count,
            })
        } else {
            Ok(())
        }
    }

    /// Maps a 0-based cell index to its row and column, filling rows left to
    /// right starting from the top
    pub(crate) fn position(&self, index: usize) -> Option<CellPos> {
        if index >= self.capacity() {
            return None;
        }
        let columns = usize::from(self.columns);
        Some(CellPos {
            row: u16::try_from(index / columns).ok()?,
            col: u16::try_from(index % columns).ok()?,
        })
    }

    /// Every cell position in row-major order
    pub(crate) fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        (0..self.capacity()).map_while(|index| self.position(index))
    }

    pub(crate) fn cell(&self, pos: CellPos) -> Rect {
        let x = f32::from(pos.col).mul_add(self.cell_width, self.left);
        let y = f32::from(pos.row + 1).mul_add(-self.cell_height, self.top);
        Rect {
            x,
            y,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Label size that fits a cell of the current dimensions
    pub(crate) fn font_size(&self) -> f32 {
        (self.cell_height * FONT_HEIGHT_RATIO).min(self.cell_width * FONT_WIDTH_RATIO)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: u16, rows: u16 },
    #[error("page margins leave no printable area")]
    NoUsableArea,
    #[error("{columns}x{rows} grid has room for only {capacity} cells, but the year has {day_count} days")]
    TooSmall {
        columns: u16,
        rows: u16,
        capacity: usize,
        day_count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mm;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 0.01,
            "{actual} is not close to {expected}"
        );
    }

    fn layout(columns: u16, rows: u16) -> GridLayout {
        let config = Config {
            columns,
            rows,
            ..Config::default()
        };
        GridLayout::new(&config).unwrap()
    }

    #[test]
    fn test_default_geometry() {
        let grid = layout(25, 15);
        assert_eq!(grid.capacity(), 375);
        // (420mm - 2*15mm) / 25 and (297mm - 2*15mm) / 15, in points
        assert_close(grid.cell_width, 44.22);
        assert_close(grid.cell_height, 50.46);
    }

    #[test]
    fn test_position() {
        let grid = layout(25, 15);
        assert_eq!(grid.position(0), Some(CellPos { row: 0, col: 0 }));
        assert_eq!(grid.position(24), Some(CellPos { row: 0, col: 24 }));
        // day 26
        assert_eq!(grid.position(25), Some(CellPos { row: 1, col: 0 }));
        // day 365
        assert_eq!(grid.position(364), Some(CellPos { row: 14, col: 14 }));
        assert_eq!(grid.position(374), Some(CellPos { row: 14, col: 24 }));
        assert_eq!(grid.position(375), None);
    }

    #[test]
    fn test_cells_match_position() {
        let grid = layout(7, 3);
        let cells = grid.cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), 21);
        assert_eq!(cells[..2], [CellPos { row: 0, col: 0 }, CellPos { row: 0, col: 1 }]);
        assert_eq!(cells[7], CellPos { row: 1, col: 0 });
        assert_eq!(cells.last(), Some(&CellPos { row: 2, col: 6 }));
        for (i, pos) in cells.into_iter().enumerate() {
            assert_eq!(grid.position(i), Some(pos));
        }
    }

    #[test]
    fn test_first_cell_top_left() {
        let config = Config::default();
        let grid = GridLayout::new(&config).unwrap();
        let (_, page_height) = config.page.size_pt();
        let margin = config.margin.to_pt();
        let cell = grid.cell(CellPos { row: 0, col: 0 });
        assert_close(cell.x, margin);
        assert_close(cell.top(), page_height - margin);
    }

    #[test]
    fn test_last_cell_bottom_right() {
        let config = Config::default();
        let grid = GridLayout::new(&config).unwrap();
        let (page_width, _) = config.page.size_pt();
        let margin = config.margin.to_pt();
        let cell = grid.cell(CellPos { row: 14, col: 24 });
        assert_close(cell.right(), page_width - margin);
        assert_close(cell.y, margin);
    }

    #[test]
    fn test_rows_go_down() {
        let grid = layout(25, 15);
        let upper = grid.cell(CellPos { row: 0, col: 3 });
        let lower = grid.cell(CellPos { row: 1, col: 3 });
        assert_close(upper.y - lower.y, grid.cell_height);
        assert_close(upper.x, lower.x);
    }

    #[test]
    fn test_font_size_limited_by_width() {
        let grid = layout(25, 15);
        assert_close(grid.font_size(), grid.cell_width * 0.12);
    }

    #[test]
    fn test_font_size_tracks_density() {
        let sparse = layout(10, 40);
        assert_close(sparse.font_size(), sparse.cell_height * 0.18);
        assert!(sparse.font_size() < layout(10, 20).font_size());
    }

    #[test]
    fn test_font_size_tracks_margins() {
        let wide = Config {
            margin: Mm(40.0),
            ..Config::default()
        };
        let narrow = GridLayout::new(&wide).unwrap();
        assert!(narrow.font_size() < layout(25, 15).font_size());
    }

    #[test]
    fn test_ensure_fits() {
        let grid = layout(25, 15);
        assert_eq!(grid.ensure_fits(366), Ok(()));
        assert_eq!(grid.ensure_fits(375), Ok(()));
        let small = layout(20, 18);
        assert_eq!(
            small.ensure_fits(365),
            Err(GridError::TooSmall {
                columns: 20,
                rows: 18,
                capacity: 360,
                day_count: 365
            })
        );
        assert_eq!(
            small.ensure_fits(365).unwrap_err().to_string(),
            "20x18 grid has room for only 360 cells, but the year has 365 days"
        );
    }

    #[test]
    fn test_empty_grid() {
        let config = Config {
            columns: 0,
            ..Config::default()
        };
        assert_eq!(
            GridLayout::new(&config),
            Err(GridError::EmptyGrid {
                columns: 0,
                rows: 15
            })
        );
    }

    #[test]
    fn test_margins_too_large() {
        let config = Config {
            margin: Mm(150.0),
            ..Config::default()
        };
        assert_eq!(GridLayout::new(&config), Err(GridError::NoUsableArea));
    }
}
