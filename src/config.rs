use crate::theme::{Rgb, BORDER_COLOR, TEXT_COLOR};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// PDF points per millimeter
const PT_PER_MM: f32 = 72.0 / 25.4;

/// A length in millimeters
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub(crate) struct Mm(pub(crate) f32);

impl Mm {
    pub(crate) fn to_pt(self) -> f32 {
        self.0 * PT_PER_MM
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Paper {
    A3,
    A4,
}

impl Paper {
    /// (width, height) in portrait orientation
    fn portrait_size(self) -> (Mm, Mm) {
        match self {
            Paper::A3 => (Mm(297.0), Mm(420.0)),
            Paper::A4 => (Mm(210.0), Mm(297.0)),
        }
    }
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paper::A3 => write!(f, "A3"),
            Paper::A4 => write!(f, "A4"),
        }
    }
}

impl FromStr for Paper {
    type Err = ParsePaperError;

    fn from_str(s: &str) -> Result<Paper, ParsePaperError> {
        match s.to_ascii_lowercase().as_str() {
            "a3" => Ok(Paper::A3),
            "a4" => Ok(Paper::A4),
            _ => Err(ParsePaperError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unsupported paper size {0:?}; expected a3 or a4")]
pub(crate) struct ParsePaperError(String);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Orientation {
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PageSetup {
    pub(crate) paper: Paper,
    pub(crate) orientation: Orientation,
}

impl PageSetup {
    /// Page (width, height) in points
    pub(crate) fn size_pt(self) -> (f32, f32) {
        let (w, h) = self.paper.portrait_size();
        match self.orientation {
            Orientation::Portrait => (w.to_pt(), h.to_pt()),
            Orientation::Landscape => (h.to_pt(), w.to_pt()),
        }
    }
}

impl fmt::Display for PageSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.paper, self.orientation)
    }
}

/// Everything that determines what a calendar looks like and where it goes.
///
/// Relative paths are resolved by the caller; nothing here touches the file
/// system.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Config {
    pub(crate) year: i32,
    pub(crate) columns: u16,
    pub(crate) rows: u16,
    pub(crate) page: PageSetup,
    /// Blank space kept on every side of the page
    pub(crate) margin: Mm,
    /// Inset of both labels from the edges of their cell
    pub(crate) cell_padding: Mm,
    pub(crate) line_width: Mm,
    pub(crate) border_color: Rgb,
    pub(crate) text_color: Rgb,
    pub(crate) font_file: PathBuf,
    pub(crate) default_language: &'static str,
    pub(crate) output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            year: 2026,
            columns: 25,
            rows: 15,
            page: PageSetup {
                paper: Paper::A3,
                orientation: Orientation::Landscape,
            },
            margin: Mm(15.0),
            cell_padding: Mm(0.5),
            // ~0.25pt
            line_width: Mm(0.09),
            border_color: BORDER_COLOR,
            text_color: TEXT_COLOR,
            font_file: PathBuf::from("Roboto Font").join("Roboto-Regular.ttf"),
            default_language: "en",
            output_dir: PathBuf::from("calendars"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 0.01,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn test_mm_to_pt() {
        assert_close(Mm(25.4).to_pt(), 72.0);
        assert_close(Mm(15.0).to_pt(), 42.52);
    }

    #[test]
    fn test_a3_landscape() {
        let (w, h) = Config::default().page.size_pt();
        assert_close(w, 1190.55);
        assert_close(h, 841.89);
    }

    #[test]
    fn test_a4_portrait() {
        let page = PageSetup {
            paper: Paper::A4,
            orientation: Orientation::Portrait,
        };
        let (w, h) = page.size_pt();
        assert_close(w, 595.28);
        assert_close(h, 841.89);
        assert_eq!(page.to_string(), "A4 portrait");
    }

    #[test]
    fn test_parse_paper() {
        assert_eq!("a3".parse::<Paper>(), Ok(Paper::A3));
        assert_eq!("A4".parse::<Paper>(), Ok(Paper::A4));
        assert!("letter".parse::<Paper>().is_err());
    }
}
