//! Output templates.
//!
//! The stylesheet and preview templates are handlebars templates. The info
//! and symbol templates are plain text with a single literal placeholder,
//! which is replaced with serialized content; they are not run through
//! handlebars.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Placeholder in the info template, replaced with the icon metadata.
pub static ICON_INFO_PLACEHOLDER: &str = "<% ICON_INFO %>";
/// Placeholder in the symbol template, replaced with the SVG sprite.
pub static SVG_SYMBOL_PLACEHOLDER: &str = "<% SVG_SYMBOL_CODE %>";

static CSS: &str = include_str!("../templates/css.hbs");
static SCSS: &str = include_str!("../templates/scss.hbs");
static HTML: &str = include_str!("../templates/html.hbs");
static INFO: &str = include_str!("../templates/info.hbs");
static SYMBOL: &str = include_str!("../templates/symbol.hbs");

/// The templates that ship with this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Plain CSS stylesheet.
    Css,
    /// SCSS stylesheet, with a map of icon names to glyphs.
    Scss,
    /// HTML preview page.
    Html,
    /// `iconfontInfo.js`.
    Info,
    /// `<fontName>Symbol.js`, which injects the sprite into the page.
    Symbol,
}

impl TemplateKind {
    /// Every built-in template.
    pub const ALL: [TemplateKind; 5] = [
        TemplateKind::Css,
        TemplateKind::Scss,
        TemplateKind::Html,
        TemplateKind::Info,
        TemplateKind::Symbol,
    ];

    /// The template text.
    pub fn source(self) -> &'static str {
        match self {
            TemplateKind::Css => CSS,
            TemplateKind::Scss => SCSS,
            TemplateKind::Html => HTML,
            TemplateKind::Info => INFO,
            TemplateKind::Symbol => SYMBOL,
        }
    }
}

/// Where a template comes from.
///
/// Deserializes from a path string.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "PathBuf")]
pub enum TemplateSource {
    /// One of the templates compiled into this crate.
    Builtin(TemplateKind),
    /// A template file, read each time it is rendered.
    Path(PathBuf),
}

impl TemplateSource {
    /// Returns the template text.
    pub fn load(&self) -> Result<Cow<'static, str>, Error> {
        match self {
            TemplateSource::Builtin(kind) => Ok(Cow::Borrowed(kind.source())),
            TemplateSource::Path(path) => fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| Error::TemplateLoad { path: path.clone(), source }),
        }
    }
}

impl From<TemplateKind> for TemplateSource {
    fn from(src: TemplateKind) -> TemplateSource {
        TemplateSource::Builtin(src)
    }
}

impl From<PathBuf> for TemplateSource {
    fn from(src: PathBuf) -> TemplateSource {
        TemplateSource::Path(src)
    }
}

/// Replace the first occurrence of `placeholder` in `template` with `content`
/// serialized as pretty-printed JSON.
///
/// Serializing a string gives a quoted, escaped JavaScript string literal, so
/// markup can be dropped into a script without breaking it.
pub fn fill_placeholder(
    template: &str,
    placeholder: &str,
    content: &(impl Serialize + ?Sized),
) -> Result<String, Error> {
    let content = serde_json::to_string_pretty(content)?;
    Ok(template.replacen(placeholder, &content, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_templates_have_placeholders() {
        assert!(TemplateKind::Info.source().contains(ICON_INFO_PLACEHOLDER));
        assert!(TemplateKind::Symbol.source().contains(SVG_SYMBOL_PLACEHOLDER));
    }

    #[test]
    fn fill_string() {
        let filled = fill_placeholder("var s = <% X %>;", "<% X %>", "<svg a=\"b\"/>").unwrap();
        assert_eq!(filled, r#"var s = "<svg a=\"b\"/>";"#);
    }

    #[test]
    fn fill_only_first() {
        let filled = fill_placeholder("<% X %> <% X %>", "<% X %>", &[1, 2]).unwrap();
        assert_eq!(filled, "[\n  1,\n  2\n] <% X %>");
    }

    #[test]
    fn missing_template_file() {
        let source = TemplateSource::from(PathBuf::from("no/such/template.hbs"));
        assert!(matches!(source.load(), Err(Error::TemplateLoad { .. })));
    }

    #[test]
    fn builtin_templates_load() {
        for kind in TemplateKind::ALL {
            let text = TemplateSource::from(kind).load().unwrap();
            assert!(!text.is_empty());
        }
    }
}
