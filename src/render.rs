//! Rendering the stylesheet and the HTML preview.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};

use handlebars::{handlebars_helper, Handlebars};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::config::BuildOptions;
use crate::hooks::{ContextHook, Strategy};
use crate::templates::{TemplateKind, TemplateSource};
use crate::{Error, FontFormat};

/// The URL of each font file, as referenced from `@font-face`.
pub type FontUrls = IndexMap<FontFormat, String>;

// "f101" -> "\f101", a CSS escape for the glyph
handlebars_helper!(css_escape: |hex: str| format!("\\{}", hex));

/// Compute the default URL of every requested font format.
///
/// Each URL is `<fontName>.<ext>?<hash>`, below `css_fonts_url` if one is
/// set. The hash changes whenever the sources, names or code points do, so
/// browsers don't keep serving a stale font.
pub fn font_urls(options: &BuildOptions) -> FontUrls {
    let hash = source_hash(options);
    options
        .types
        .iter()
        .filter(|format| **format != FontFormat::Symbol)
        .map(|format| {
            let file = format!("{}.{}?{}", options.font_name, format.as_str(), hash);
            let url = match &options.css_fonts_url {
                Some(base) => join_url(base, &file),
                None => file,
            };
            (*format, url)
        })
        .collect()
}

fn source_hash(options: &BuildOptions) -> String {
    let mut context = md5::Context::new();
    for source in &options.files {
        match fs::read(&source.path) {
            Ok(bytes) => context.consume(bytes),
            Err(_) => context.consume(source.path.to_string_lossy().as_bytes()),
        }
    }
    context.consume(options.font_name.as_bytes());
    for name in &options.names {
        context.consume(name.as_bytes());
        if let Some(cp) = options.codepoints.get(name) {
            context.consume(format!("{:x}", cp));
        }
    }
    format!("{:x}", context.compute())
}

fn join_url(base: &str, file: &str) -> String {
    let base = base.replace('\\', "/");
    if base.is_empty() {
        return file.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), file)
}

/// The value of the `src` descriptor in `@font-face`.
///
/// Formats are listed in `options.order`, skipping any that were not
/// requested or have no URL.
pub fn font_src(options: &BuildOptions, urls: &FontUrls) -> String {
    options
        .order
        .iter()
        .filter(|format| options.types.contains(format))
        .filter_map(|format| {
            let url = urls.get(format)?;
            let css_format = format.css_format()?;
            Some(match format {
                FontFormat::Eot => format!("url(\"{}?#iefix\") format(\"{}\")", url, css_format),
                FontFormat::Svg => {
                    format!("url(\"{}#{}\") format(\"{}\")", url, options.font_name, css_format)
                }
                _ => format!("url(\"{}\") format(\"{}\")", url, css_format),
            })
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Render the stylesheet.
///
/// If `urls` is `None`, the URLs from [`font_urls`] are used.
pub fn css(options: &BuildOptions, urls: Option<&FontUrls>) -> Result<String, Error> {
    let default_urls;
    let urls = match urls {
        Some(urls) => urls,
        None => {
            default_urls = font_urls(options);
            &default_urls
        }
    };

    let mut codepoints = Map::new();
    for name in &options.names {
        if let Some(cp) = options.codepoints.get(name) {
            codepoints.insert(name.clone(), Value::String(format!("{:x}", cp)));
        }
    }

    let mut context = template_context(options)?;
    context.insert("fontName".into(), options.font_name.clone().into());
    context.insert("src".into(), font_src(options, urls).into());
    context.insert("codepoints".into(), Value::Object(codepoints));

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    render(handlebars, &options.css_template, context, options, &options.css_context)
}

/// Render the HTML preview.
///
/// The page embeds the built-in stylesheet, with font URLs relative to the
/// page itself.
pub fn html(options: &BuildOptions, urls: Option<&FontUrls>) -> Result<String, Error> {
    let mut style_options = options.clone();
    style_options.css_template = TemplateSource::Builtin(TemplateKind::Css);
    let page_dir = options.html_dest.parent().unwrap_or_else(|| Path::new(""));
    style_options.css_fonts_url = Some(relative_url(page_dir, &options.dest));
    let styles = css(&style_options, urls)?;

    let mut seen = HashSet::new();
    let names: Vec<Value> = options
        .names
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .map(|name| Value::String(name.clone()))
        .collect();

    let mut context = template_context(options)?;
    context.insert("names".into(), Value::Array(names));
    context.insert("fontName".into(), options.font_name.clone().into());
    context.insert("styles".into(), styles.into());
    context.insert("baseClass".into(), options.template_options.base_class().into());

    render(Handlebars::new(), &options.html_template, context, options, &options.html_context)
}

fn template_context(options: &BuildOptions) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(&options.template_options)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn render(
    mut handlebars: Handlebars<'static>,
    template: &TemplateSource,
    mut context: Map<String, Value>,
    options: &BuildOptions,
    hook: &Strategy<dyn ContextHook>,
) -> Result<String, Error> {
    let source = template.load()?;
    handlebars.register_helper("codepoint", Box::new(css_escape));
    hook.customize(&mut context, options, &mut handlebars);
    Ok(handlebars.render_template(&source, &context)?)
}

/// The path from directory `from` to `to`, with `/` separators.
///
/// Both paths are compared lexically; an empty string means they are the
/// same directory. If only one of them is rooted there is no common base,
/// and `to` is returned as given.
fn relative_url(from: &Path, to: &Path) -> String {
    fn normal(path: &Path) -> Vec<Component<'_>> {
        path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
    }

    if from.has_root() != to.has_root() {
        return to.to_string_lossy().replace('\\', "/");
    }
    let from = normal(from);
    let to = normal(to);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = from[common..].iter().map(|_| "..".to_string()).collect();
    parts.extend(to[common..].iter().map(|c| c.as_os_str().to_string_lossy().into_owned()));
    parts.join("/")
}
