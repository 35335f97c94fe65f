use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cell border color
pub(crate) const BORDER_COLOR: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// Color of the date label and the day number
pub(crate) const TEXT_COLOR: Rgb = Rgb::new(0x55, 0x55, 0x55);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Returns the color's components scaled to `0.0..=1.0`, as PDF color
    /// operators expect
    pub(crate) fn to_unit(self) -> (f32, f32, f32) {
        let scale = |c: u8| f32::from(c) / 255.0;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    // Accepts `#RRGGBB` or `RRGGBB`
    fn from_str(s: &str) -> Result<Rgb, ParseColorError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_owned()));
        }
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| ParseColorError(s.to_owned()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid color {0:?}; expected a hex triplet like #555555")]
pub(crate) struct ParseColorError(String);
