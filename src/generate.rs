use crate::calendar::{year_days, CellStyle, GridError, GridLayout, GridRenderer};
use crate::config::Config;
use crate::font::{Font, FontError};
use crate::lang::Language;
use crate::pdf::PdfCanvas;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::error::ComponentRange;

/// Characters drawn besides the month labels: day numbers and the separator
const LABEL_EXTRA_CHARS: &str = "0123456789 ";

/// Name of the output file for `year`, optionally tagged with a language code
pub(crate) fn output_file_name(year: i32, language: Option<&str>) -> String {
    match language {
        Some(code) => format!("calendar_{year}_{code}.pdf"),
        None => format!("calendar_{year}.pdf"),
    }
}

/// Renders calendars for one configuration and font, one language at a time
#[derive(Clone, Copy, Debug)]
pub(crate) struct Generator<'a> {
    config: &'a Config,
    font: &'a Font,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(config: &'a Config, font: &'a Font) -> Self {
        Generator { config, font }
    }

    /// Produces the complete PDF for `language` without touching the file
    /// system
    pub(crate) fn render(&self, language: &Language) -> Result<Vec<u8>, GenerateError> {
        let config = self.config;
        let days = year_days(config.year).map_err(|source| GenerateError::Year {
            year: config.year,
            source,
        })?;
        let layout = GridLayout::new(config)?;
        layout.ensure_fits(days.len())?;
        self.ensure_font_covers(language)?;
        tracing::debug!(
            year = config.year,
            language = language.code,
            days = days.len(),
            columns = layout.columns(),
            rows = layout.rows(),
            font_size = layout.font_size(),
            border_color = %config.border_color,
            text_color = %config.text_color,
            "Rendering calendar"
        );

        let style = CellStyle {
            border_color: config.border_color,
            text_color: config.text_color,
            line_width: config.line_width.to_pt(),
            padding: config.cell_padding.to_pt(),
        };
        let mut canvas = PdfCanvas::new(self.font);
        GridRenderer::new(&layout, language, style).render(&days, &mut canvas);
        let (page_width, page_height) = config.page.size_pt();
        let title = format!("Calendar {} ({})", config.year, language.code);
        Ok(canvas.finish(page_width, page_height, &title))
    }

    fn ensure_font_covers(&self, language: &Language) -> Result<(), FontError> {
        self.font
            .ensure_covers(language.label_chars().chain(LABEL_EXTRA_CHARS.chars()))
    }

    /// Renders the calendar for `language` and writes it into `out_dir`,
    /// returning the path of the new file.
    ///
    /// The document is written to a temporary file first and then renamed
    /// into place, so a failure never leaves a partial PDF under the final
    /// name.
    pub(crate) fn write(&self, language: &Language, out_dir: &Path) -> anyhow::Result<PathBuf> {
        let pdf = self.render(language).with_context(|| {
            format!("failed to render calendar for language {:?}", language.code)
        })?;
        fs::create_dir_all(out_dir).with_context(|| {
            format!("failed to create output directory {}", out_dir.display())
        })?;
        let path = out_dir.join(output_file_name(self.config.year, Some(language.code)));
        let partial = path.with_extension("pdf.part");
        if let Err(e) = fs::write(&partial, &pdf) {
            // Best effort; the write error is the one worth reporting
            let _ = fs::remove_file(&partial);
            return Err(e).with_context(|| format!("failed to write {}", partial.display()));
        }
        if let Err(e) = fs::rename(&partial, &path) {
            let _ = fs::remove_file(&partial);
            return Err(e).with_context(|| format!("failed to move {} into place", path.display()));
        }
        tracing::info!(path = %path.display(), bytes = pdf.len(), "Wrote calendar");
        Ok(path)
    }

    /// Writes one calendar per supported language, in table order, calling
    /// `on_written` after each file.  Stops at the first failure.
    ///
    /// The font is checked against every language before the first file is
    /// written.
    pub(crate) fn write_all<F>(&self, out_dir: &Path, mut on_written: F) -> anyhow::Result<usize>
    where
        F: FnMut(&Language, &Path),
    {
        for language in Language::all() {
            self.ensure_font_covers(language).with_context(|| {
                format!("font cannot render calendar for language {:?}", language.code)
            })?;
        }
        let mut written = 0;
        for language in Language::all() {
            let path = self.write(language, out_dir)?;
            on_written(language, &path);
            written += 1;
        }
        Ok(written)
    }
}

#[derive(Debug, Error)]
pub(crate) enum GenerateError {
    #[error("year {year} is outside the supported calendar range")]
    Year {
        year: i32,
        #[source]
        source: ComponentRange,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Font(#[from] FontError),
}
