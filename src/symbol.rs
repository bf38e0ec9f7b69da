//! The SVG sprite.
//!
//! Every icon becomes a `<symbol>` inside one hidden `<svg>`, so a page can
//! reference icons with `<use href="#icon-name">`. Building the sprite only
//! needs each source's root attributes and its children, so unlike the font
//! formats it is done here rather than by an external converter.

use std::collections::HashSet;
use std::fs;

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{BoxError, SvgError, SvgErrorKind};
use crate::generator::{FontGenerator, Fonts, GenerateRequest};
use crate::FontFormat;

static SPRITE_OPEN: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" style="position:absolute;width:0;height:0;overflow:hidden">"#;
static SPRITE_CLOSE: &str = "</svg>";

/// A [`FontGenerator`] that builds the `symbol` sprite itself and forwards
/// every other format to `inner`.
///
/// `inner` is not called at all if `symbol` is the only requested format.
#[derive(Clone, Debug, Default)]
pub struct SymbolGenerator<G> {
    inner: G,
}

impl<G> SymbolGenerator<G> {
    /// Wrap a generator for the real font formats.
    pub fn new(inner: G) -> Self {
        SymbolGenerator { inner }
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> G {
        self.inner
    }
}

#[async_trait]
impl<G: FontGenerator> FontGenerator for SymbolGenerator<G> {
    async fn generate(&self, request: &GenerateRequest<'_>) -> Result<Fonts, BoxError> {
        let font_types: Vec<FontFormat> =
            request.types.iter().copied().filter(|format| *format != FontFormat::Symbol).collect();

        let mut fonts = if font_types.is_empty() {
            Fonts::new()
        } else {
            self.inner.generate(&request.with_types(&font_types)).await?
        };

        if request.types.contains(&FontFormat::Symbol) {
            let sprite = build_sprite(request)?;
            fonts.insert(FontFormat::Symbol, sprite);
        }
        Ok(fonts)
    }
}

/// Read every source in `request` and assemble the sprite.
///
/// Symbol ids are `request.symbol_prefix` followed by the icon name. A name
/// that occurs more than once produces a single symbol.
pub fn build_sprite(request: &GenerateRequest<'_>) -> Result<String, SvgError> {
    let mut sprite = String::from(SPRITE_OPEN);
    let mut seen = HashSet::new();
    for (name, source) in request.icons() {
        if !seen.insert(name) {
            continue;
        }
        let id = format!("{}{}", request.symbol_prefix, name);
        let symbol = fs::read_to_string(&source.path)
            .map_err(SvgErrorKind::from)
            .and_then(|svg| symbol_element(&svg, &id))
            .map_err(|kind| SvgError { name: name.to_string(), path: source.path.clone(), kind })?;
        sprite.push_str(&symbol);
    }
    sprite.push_str(SPRITE_CLOSE);
    Ok(sprite)
}

/// Turn one SVG document into a `<symbol>` element with the given `id`.
///
/// The symbol keeps the root's `viewBox` (or one derived from `width` and
/// `height`) and its children, verbatim.
pub fn symbol_element(svg: &str, id: &str) -> Result<String, SvgErrorKind> {
    let mut reader = Reader::from_str(svg);
    let mut root: Option<(Option<String>, usize)> = None;
    let mut depth = 0usize;

    loop {
        let event_start = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(start) => match root {
                None => {
                    let view_box = root_view_box(&start)?;
                    root = Some((view_box, reader.buffer_position() as usize));
                }
                Some(_) => depth += 1,
            },
            Event::Empty(start) if root.is_none() => {
                let view_box = root_view_box(&start)?;
                return Ok(format_symbol(id, view_box.as_deref(), ""));
            }
            Event::End(_) => match root {
                Some((ref view_box, content_start)) if depth == 0 => {
                    let content = svg.get(content_start..event_start).unwrap_or_default();
                    return Ok(format_symbol(id, view_box.as_deref(), content.trim()));
                }
                Some(_) => depth -= 1,
                None => return Err(SvgErrorKind::MissingRoot),
            },
            Event::Eof => {
                return Err(match root {
                    Some(_) => SvgErrorKind::Unclosed,
                    None => SvgErrorKind::MissingRoot,
                })
            }
            _ => (),
        }
    }
}

fn root_view_box(start: &BytesStart<'_>) -> Result<Option<String>, SvgErrorKind> {
    if start.local_name().as_ref() != b"svg" {
        return Err(SvgErrorKind::MissingRoot);
    }
    let mut view_box = None;
    let mut width = None;
    let mut height = None;
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        match attr.key.as_ref() {
            b"viewBox" => view_box = Some(value),
            b"width" => width = Some(value),
            b"height" => height = Some(value),
            _ => (),
        }
    }
    Ok(view_box.or_else(|| match (width, height) {
        (Some(w), Some(h)) => {
            Some(format!("0 0 {} {}", w.trim_end_matches("px"), h.trim_end_matches("px")))
        }
        _ => None,
    }))
}

fn format_symbol(id: &str, view_box: Option<&str>, content: &str) -> String {
    let id = quick_xml::escape::escape(id);
    match view_box {
        Some(view_box) => format!(
            r#"<symbol id="{}" viewBox="{}">{}</symbol>"#,
            id,
            quick_xml::escape::escape(view_box),
            content
        ),
        None => format!(r#"<symbol id="{}">{}</symbol>"#, id, content),
    }
}
