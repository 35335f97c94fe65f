use thiserror::Error;
use time::Month;

/// Month abbreviations for one language, January first
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Language {
    pub(crate) code: &'static str,
    pub(crate) months: [&'static str; 12],
}

static LANGUAGES: &[Language] = &[
    Language {
        code: "en",
        months: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
    },
    Language {
        code: "de",
        months: [
            "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
        ],
    },
    Language {
        code: "fr",
        months: [
            "jan.", "fév.", "mars", "avr.", "mai", "juin", "juil.", "août", "sep.", "oct.",
            "nov.", "déc.",
        ],
    },
    Language {
        code: "ru",
        months: [
            "янв.", "фев.", "мар.", "апр.", "май", "июн.", "июл.", "авг.", "сен.", "окт.",
            "ноя.", "дек.",
        ],
    },
    Language {
        code: "es",
        months: [
            "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
        ],
    },
    Language {
        code: "it",
        months: [
            "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
        ],
    },
    Language {
        code: "pt",
        months: [
            "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
        ],
    },
];

impl Language {
    /// All supported languages, in table order
    pub(crate) fn all() -> &'static [Language] {
        LANGUAGES
    }

    pub(crate) fn from_code(code: &str) -> Result<&'static Language, UnknownLanguageError> {
        LANGUAGES
            .iter()
            .find(|lang| lang.code == code)
            .ok_or_else(|| UnknownLanguageError {
                code: code.to_owned(),
            })
    }

    pub(crate) fn month_label(&self, month: Month) -> &'static str {
        // `Month` converts to 1..=12, so this never goes out of bounds
        self.months[usize::from(u8::from(month) - 1)]
    }

    /// Every character the month labels of this language use
    pub(crate) fn label_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.months.iter().flat_map(|m| m.chars())
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unsupported language: {code:?}; available: {}", available_codes())]
pub(crate) struct UnknownLanguageError {
    code: String,
}

fn available_codes() -> String {
    LANGUAGES
        .iter()
        .map(|lang| lang.code)
        .collect::<Vec<_>>()
        .join(", ")
}
