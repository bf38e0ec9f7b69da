//! Output font formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A font format a build can produce.
///
/// `Symbol` is not a font at all but an SVG sprite of `<symbol>` elements; it
/// travels through the pipeline alongside the real formats and gets its own
/// writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFormat {
    /// SVG font.
    Svg,
    /// TrueType.
    Ttf,
    /// WOFF 1.0.
    Woff,
    /// WOFF 2.0.
    Woff2,
    /// Embedded OpenType.
    Eot,
    /// SVG sprite.
    Symbol,
}

impl FontFormat {
    /// Every format, in declaration order.
    pub const ALL: [FontFormat; 6] = [
        FontFormat::Svg,
        FontFormat::Ttf,
        FontFormat::Woff,
        FontFormat::Woff2,
        FontFormat::Eot,
        FontFormat::Symbol,
    ];

    /// The lower-case name, also used as the file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            FontFormat::Svg => "svg",
            FontFormat::Ttf => "ttf",
            FontFormat::Woff => "woff",
            FontFormat::Woff2 => "woff2",
            FontFormat::Eot => "eot",
            FontFormat::Symbol => "symbol",
        }
    }

    /// The hint used in a CSS `format()` function, if this format can be
    /// referenced from `@font-face`.
    pub fn css_format(self) -> Option<&'static str> {
        match self {
            FontFormat::Svg => Some("svg"),
            FontFormat::Ttf => Some("truetype"),
            FontFormat::Woff => Some("woff"),
            FontFormat::Woff2 => Some("woff2"),
            FontFormat::Eot => Some("embedded-opentype"),
            FontFormat::Symbol => None,
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        for format in FontFormat::ALL {
            assert_eq!(format.as_str().parse::<FontFormat>(), Ok(format));
        }
        assert_eq!(
            "otf".parse::<FontFormat>(),
            Err(ConfigError::UnknownFormat("otf".into()))
        );
    }

    #[test]
    fn serde_names() {
        let formats: Vec<FontFormat> = serde_json::from_str(r#"["woff2", "symbol"]"#).unwrap();
        assert_eq!(formats, vec![FontFormat::Woff2, FontFormat::Symbol]);
        assert_eq!(serde_json::to_string(&FontFormat::Eot).unwrap(), r#""eot""#);
    }

    #[test]
    fn symbol_is_not_a_webfont() {
        assert_eq!(FontFormat::Symbol.css_format(), None);
        assert_eq!(FontFormat::Ttf.css_format(), Some("truetype"));
    }
}
