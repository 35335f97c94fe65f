use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use ttf_parser::{name_id, Face, FaceParsingError, GlyphId};

/// Base font name used when a font does not carry a usable PostScript name
const FALLBACK_NAME: &str = "EmbeddedFont";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Glyph {
    pub(crate) id: u16,
    /// Horizontal advance in font units
    pub(crate) advance: u16,
}

/// A loaded TrueType font: the raw file, for embedding, plus the metrics
/// needed to lay out text with it
#[derive(Clone, PartialEq)]
pub(crate) struct Font {
    postscript_name: String,
    data: Vec<u8>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    cap_height: i16,
    bbox: [i16; 4],
    notdef: Glyph,
    glyphs: HashMap<char, Glyph>,
}

impl Font {
    pub(crate) fn load(path: &Path) -> Result<Font, FontError> {
        let data = fs::read(path).map_err(|source| FontError::Read {
            path: path.to_owned(),
            source,
        })?;
        let font = Font::from_data(data)?;
        tracing::debug!(
            path = %path.display(),
            name = %font.postscript_name,
            glyphs = font.glyphs.len(),
            "Loaded font"
        );
        Ok(font)
    }

    pub(crate) fn from_data(data: Vec<u8>) -> Result<Font, FontError> {
        let face = Face::parse(&data, 0)?;
        let postscript_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string())
            .map(|name| sanitize_name(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| String::from(FALLBACK_NAME));
        let advance = |id: GlyphId| face.glyph_hor_advance(id).unwrap_or(0);
        let mut glyphs = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    if let Some(ch) = char::from_u32(cp) {
                        if let Some(id) = face.glyph_index(ch) {
                            glyphs.entry(ch).or_insert_with(|| Glyph {
                                id: id.0,
                                advance: advance(id),
                            });
                        }
                    }
                });
            }
        }
        let bbox = face.global_bounding_box();
        Ok(Font {
            postscript_name,
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            cap_height: face.capital_height().unwrap_or_else(|| face.ascender()),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            notdef: Glyph {
                id: 0,
                advance: advance(GlyphId(0)),
            },
            glyphs,
            data,
        })
    }

    pub(crate) fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn glyph(&self, ch: char) -> Option<Glyph> {
        self.glyphs.get(&ch).copied()
    }

    /// Like `glyph()`, but falls back to the `.notdef` glyph
    pub(crate) fn glyph_or_notdef(&self, ch: char) -> Glyph {
        self.glyph(ch).unwrap_or(self.notdef)
    }

    /// Width of `text` set at `size` points, without kerning
    pub(crate) fn text_width(&self, text: &str, size: f32) -> f32 {
        let units = text
            .chars()
            .map(|ch| f32::from(self.glyph_or_notdef(ch).advance))
            .sum::<f32>();
        units * size / f32::from(self.units_per_em)
    }

    /// Fails on the first character in `chars` that the font cannot draw
    pub(crate) fn ensure_covers<I>(&self, chars: I) -> Result<(), FontError>
    where
        I: IntoIterator<Item = char>,
    {
        match chars.into_iter().find(|&ch| self.glyph(ch).is_none()) {
            Some(ch) => Err(FontError::MissingGlyph {
                font: self.postscript_name.clone(),
                ch,
            }),
            None => Ok(()),
        }
    }

    /// Converts a value in font units to the thousandths of an em that PDF
    /// font dictionaries use
    pub(crate) fn to_pdf_units(&self, value: f32) -> f32 {
        value * 1000.0 / f32::from(self.units_per_em)
    }

    pub(crate) fn ascender(&self) -> f32 {
        self.to_pdf_units(f32::from(self.ascender))
    }

    pub(crate) fn descender(&self) -> f32 {
        self.to_pdf_units(f32::from(self.descender))
    }

    pub(crate) fn cap_height(&self) -> f32 {
        self.to_pdf_units(f32::from(self.cap_height))
    }

    /// Font bounding box as `[x_min, y_min, x_max, y_max]`
    pub(crate) fn bbox(&self) -> [f32; 4] {
        self.bbox.map(|v| self.to_pdf_units(f32::from(v)))
    }

    /// A font with fixed-width glyphs for every character of `chars` and no
    /// real font program
    #[cfg(test)]
    pub(crate) fn synthetic<I: IntoIterator<Item = char>>(chars: I) -> Font {
        let glyphs = chars
            .into_iter()
            .zip(1u16..)
            .map(|(ch, id)| (ch, Glyph { id, advance: 500 }))
            .collect();
        Font {
            postscript_name: String::from("Synthetic-Regular"),
            data: b"not really a font".to_vec(),
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            cap_height: 700,
            bbox: [-100, -250, 1100, 950],
            notdef: Glyph { id: 0, advance: 500 },
            glyphs,
        }
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("postscript_name", &self.postscript_name)
            .field("units_per_em", &self.units_per_em)
            .field("glyphs", &self.glyphs.len())
            .finish_non_exhaustive()
    }
}

// PDF names may not contain whitespace or delimiters
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[derive(Debug, Error)]
pub(crate) enum FontError {
    #[error("failed to read font file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse font data")]
    Parse(#[from] FaceParsingError),
    #[error("font {font} has no glyph for {ch:?}")]
    MissingGlyph { font: String, ch: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.ttf");
        let e = Font::load(&path).unwrap_err();
        assert!(matches!(e, FontError::Read { .. }));
        assert!(e.to_string().contains("nope.ttf"));
    }

    #[test]
    fn test_not_a_font() {
        let e = Font::from_data(b"definitely not a TrueType file".to_vec()).unwrap_err();
        assert!(matches!(e, FontError::Parse(_)));
    }

    #[test]
    fn test_text_width() {
        let font = Font::synthetic("0123456789".chars());
        let width = font.text_width("365", 10.0);
        assert!((width - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_chars_use_notdef() {
        let font = Font::synthetic("0123456789".chars());
        assert_eq!(font.glyph('x'), None);
        assert_eq!(font.glyph_or_notdef('x'), Glyph { id: 0, advance: 500 });
    }

    #[test]
    fn test_ensure_covers() {
        let font = Font::synthetic("Jan 0123456789".chars());
        assert!(font.ensure_covers("01 Jan".chars()).is_ok());
        let e = font.ensure_covers("01 янв.".chars()).unwrap_err();
        assert_eq!(e.to_string(), "font Synthetic-Regular has no glyph for 'я'");
    }

    #[test]
    fn test_pdf_units() {
        let font = Font::synthetic([]);
        assert_eq!(font.bbox(), [-100.0, -250.0, 1100.0, 950.0]);
        assert_eq!(font.ascender(), 800.0);
        assert_eq!(font.descender(), -200.0);
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Roboto-Regular"), "Roboto-Regular");
        assert_eq!(sanitize_name("My Font (Bold)"), "MyFontBold");
    }
}
