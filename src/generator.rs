//! The boundary with the font converter.
//!
//! Turning SVG outlines into font binaries is not done here. A
//! [`FontGenerator`] receives the resolved plan and hands back a [`Fonts`]
//! set; everything around that call is this crate's job.

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::codepoints::CodepointMap;
use crate::config::{BuildOptions, FormatOptions, IconSource};
use crate::error::{BoxError, UnsupportedFormats};
use crate::FontFormat;

/// What a [`FontGenerator`] is asked to produce.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct GenerateRequest<'a> {
    /// Font family name.
    pub font_name: &'a str,
    /// Icon names, parallel to `sources`.
    pub names: &'a [String],
    /// Icon sources, parallel to `names`.
    pub sources: &'a [IconSource],
    /// Code point of every name.
    pub codepoints: &'a CodepointMap,
    /// Formats to produce.
    pub types: &'a [FontFormat],
    /// Preferred format order.
    pub order: &'a [FontFormat],
    /// Scale icons to the same height.
    pub normalize: bool,
    /// Emit ligatures for icon names.
    pub ligature: bool,
    /// Per-format settings.
    pub format_options: &'a FormatOptions,
    /// Prefix for `<symbol>` ids in the sprite.
    pub symbol_prefix: &'a str,
}

impl<'a> GenerateRequest<'a> {
    /// Build a request from resolved options with code points assigned.
    pub fn new(options: &'a BuildOptions) -> Self {
        GenerateRequest {
            font_name: &options.font_name,
            names: &options.names,
            sources: &options.files,
            codepoints: &options.codepoints,
            types: &options.types,
            order: &options.order,
            normalize: options.normalize,
            ligature: options.ligature,
            format_options: &options.format_options,
            symbol_prefix: &options.template_options.class_prefix,
        }
    }

    /// The same request, for a different set of formats.
    pub fn with_types(self, types: &'a [FontFormat]) -> Self {
        GenerateRequest { types, ..self }
    }

    /// Iterate over `(name, source)` pairs.
    pub fn icons(&self) -> impl Iterator<Item = (&'a str, &'a IconSource)> + 'a {
        let (names, sources) = (self.names, self.sources);
        names.iter().map(String::as_str).zip(sources)
    }
}

/// Something that converts icons into fonts.
#[async_trait]
pub trait FontGenerator: Send + Sync {
    /// Produce every format in `request.types`.
    async fn generate(&self, request: &GenerateRequest<'_>) -> Result<Fonts, BoxError>;
}

/// A [`FontGenerator`] that cannot produce anything.
///
/// Useful with [`SymbolGenerator`](crate::SymbolGenerator) when only the
/// sprite is wanted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoConverter;

#[async_trait]
impl FontGenerator for NoConverter {
    async fn generate(&self, request: &GenerateRequest<'_>) -> Result<Fonts, BoxError> {
        if request.types.is_empty() {
            return Ok(Fonts::default());
        }
        Err(Box::new(UnsupportedFormats(request.types.to_vec())))
    }
}

/// Generated content, keyed by format.
///
/// Iteration follows insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fonts(IndexMap<FontFormat, Vec<u8>>);

impl Fonts {
    /// Returns a new, empty set.
    pub fn new() -> Self {
        Fonts::default()
    }

    /// Return the number of formats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was generated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the content for `format`.
    pub fn get(&self, format: FontFormat) -> Option<&[u8]> {
        self.0.get(&format).map(Vec::as_slice)
    }

    /// Returns true if `format` was generated.
    pub fn contains(&self, format: FontFormat) -> bool {
        self.0.contains_key(&format)
    }

    /// Add content for `format`, returning what was there before.
    pub fn insert(&mut self, format: FontFormat, content: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        self.0.insert(format, content.into())
    }

    /// Iterate over `(format, content)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (FontFormat, &[u8])> + '_ {
        self.0.iter().map(|(format, content)| (*format, content.as_slice()))
    }
}

impl<T: Into<Vec<u8>>> FromIterator<(FontFormat, T)> for Fonts {
    fn from_iter<I: IntoIterator<Item = (FontFormat, T)>>(iter: I) -> Self {
        Fonts(iter.into_iter().map(|(format, content)| (format, content.into())).collect())
    }
}

impl IntoIterator for Fonts {
    type Item = (FontFormat, Vec<u8>);

    type IntoIter = indexmap::map::IntoIter<FontFormat, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::Config;

    #[test]
    fn request_mirrors_options() {
        let mut options = Config::new().dest("out").files(["a.svg", "b.svg"]).resolve().unwrap();
        options.assign_codepoints().unwrap();
        let request = GenerateRequest::new(&options);
        assert_eq!(request.font_name, "iconfont");
        assert_eq!(request.symbol_prefix, "icon-");
        let icons: Vec<_> = request.icons().map(|(name, source)| (name, &source.path)).collect();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[1].0, "b");
        assert_eq!(request.with_types(&[FontFormat::Ttf]).types, &[FontFormat::Ttf]);
    }

    #[test]
    fn no_converter() {
        let options = Config::new().dest("out").files(["a.svg"]).resolve().unwrap();
        let request = GenerateRequest::new(&options);
        assert!(block_on(NoConverter.generate(&request.with_types(&[]))).unwrap().is_empty());
        let err = block_on(NoConverter.generate(&request)).unwrap_err();
        assert!(err.to_string().contains("eot, woff, woff2, symbol"), "{}", err);
    }

    #[test]
    fn fonts_keep_insertion_order() {
        let fonts: Fonts =
            [(FontFormat::Woff2, b"2".to_vec()), (FontFormat::Eot, b"e".to_vec())].into_iter().collect();
        let formats: Vec<_> = fonts.iter().map(|(format, _)| format).collect();
        assert_eq!(formats, vec![FontFormat::Woff2, FontFormat::Eot]);
        assert_eq!(fonts.get(FontFormat::Eot), Some(&b"e"[..]));
        assert!(!fonts.contains(FontFormat::Ttf));
    }
}
