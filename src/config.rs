//! Build configuration.
//!
//! A [`Config`] is what the user hands us: every field is optional and it can
//! be deserialized from JSON (or anything else serde reads) using the same
//! camelCase keys as the `webfonts-generator` family of tools. Resolving it
//! applies defaults, checks the required fields and derives everything that
//! is implied, producing a [`BuildOptions`].

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codepoints::{CodepointMap, DEFAULT_START_CODEPOINT};
use crate::error::ConfigError;
use crate::hooks::{ContextHook, Prettify, Rename, Strategy};
use crate::migrate;
use crate::templates::{TemplateKind, TemplateSource};
use crate::{Error, FontFormat};

/// The font name used when none is configured.
pub static DEFAULT_FONT_NAME: &str = "iconfont";
/// The CSS selector shared by every icon.
pub static DEFAULT_BASE_SELECTOR: &str = ".icon";
/// The prefix of each icon's own class.
pub static DEFAULT_CLASS_PREFIX: &str = "icon-";

/// The formats built when none are configured.
pub const DEFAULT_TYPES: [FontFormat; 4] =
    [FontFormat::Eot, FontFormat::Woff, FontFormat::Woff2, FontFormat::Symbol];

/// The order in which formats are listed in `@font-face` when none is configured.
pub const DEFAULT_ORDER: [FontFormat; 5] =
    [FontFormat::Eot, FontFormat::Woff2, FontFormat::Woff, FontFormat::Ttf, FontFormat::Svg];

/// Opaque per-format settings, passed through to the font generator.
pub type FormatOptions = IndexMap<FontFormat, Value>;

/// One input icon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSource")]
pub struct IconSource {
    /// Path to the SVG file.
    pub path: PathBuf,
    /// An explicit icon name, used instead of the file name by the default
    /// [`Rename`] strategy.
    pub name: Option<String>,
}

impl IconSource {
    /// A source named after its file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        IconSource { path: path.into(), name: None }
    }

    /// A source with an explicit name.
    pub fn named(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        IconSource { path: path.into(), name: Some(name.into()) }
    }
}

impl From<&str> for IconSource {
    fn from(src: &str) -> IconSource {
        IconSource::new(src)
    }
}

impl From<PathBuf> for IconSource {
    fn from(src: PathBuf) -> IconSource {
        IconSource::new(src)
    }
}

impl From<&Path> for IconSource {
    fn from(src: &Path) -> IconSource {
        IconSource::new(src)
    }
}

// a bare path string, or an object with a path and a name
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Path(PathBuf),
    Named { path: PathBuf, name: Option<String> },
}

impl From<RawSource> for IconSource {
    fn from(src: RawSource) -> IconSource {
        match src {
            RawSource::Path(path) => IconSource { path, name: None },
            RawSource::Named { path, name } => IconSource { path, name },
        }
    }
}

/// Template options as given by the user.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTemplateOptions {
    /// The selector every icon carries, e.g. `.icon`.
    pub base_selector: Option<String>,
    /// The prefix of each icon's own class, e.g. `icon-`.
    pub class_prefix: Option<String>,
    /// Deprecated: a class name without the leading `.`.
    pub base_class: Option<String>,
    /// Anything else is passed through to the templates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resolved presentation options, available to every template.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOptions {
    /// The selector every icon carries, e.g. `.icon`.
    pub base_selector: String,
    /// The prefix of each icon's own class, e.g. `icon-`.
    pub class_prefix: String,
    /// Extra keys passed through to the templates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        TemplateOptions {
            base_selector: DEFAULT_BASE_SELECTOR.to_string(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            extra: Map::new(),
        }
    }
}

impl TemplateOptions {
    fn merged(raw: Option<RawTemplateOptions>) -> Self {
        let defaults = TemplateOptions::default();
        let Some(raw) = raw else {
            return defaults;
        };
        TemplateOptions {
            base_selector: raw.base_selector.unwrap_or(defaults.base_selector),
            class_prefix: raw.class_prefix.unwrap_or(defaults.class_prefix),
            extra: raw.extra,
        }
    }

    /// The base selector without its leading delimiter: `.icon` gives `icon`.
    pub fn base_class(&self) -> &str {
        let mut chars = self.base_selector.chars();
        chars.next();
        chars.as_str()
    }
}

/// A partial build configuration.
///
/// You construct a `Config` either by deserializing it or with builder
/// semantics:
///
/// ```
/// # use iconfont::{Config, FontFormat};
/// let config = Config::new()
///     .dest("dist/fonts")
///     .files(["icons/home.svg", "icons/user.svg"])
///     .font_name("app-icons")
///     .types([FontFormat::Woff2, FontFormat::Symbol])
///     .html(true);
///
/// let options = config.resolve().unwrap();
/// assert_eq!(options.names, vec!["home", "user"]);
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Config {
    /// Output directory. Required.
    pub dest: Option<PathBuf>,
    /// Input icons. Required and non-empty.
    pub files: Option<Vec<IconSource>>,
    /// Font family name and base name of the output files.
    pub font_name: Option<String>,
    /// Whether to write the stylesheet.
    pub css: Option<bool>,
    /// Stylesheet path; defaults to `<dest>/<fontName>.css`.
    pub css_dest: Option<PathBuf>,
    /// Stylesheet template.
    pub css_template: Option<TemplateSource>,
    /// Base URL for the font files referenced from the stylesheet.
    pub css_fonts_url: Option<String>,
    /// Deprecated spelling of `css_fonts_url`.
    pub css_fonts_path: Option<String>,
    /// Whether to write the HTML preview.
    pub html: Option<bool>,
    /// Preview path; defaults to `<dest>/<fontName>.html`.
    pub html_dest: Option<PathBuf>,
    /// Preview template.
    pub html_template: Option<TemplateSource>,
    /// Formats to build.
    pub types: Option<Vec<FontFormat>>,
    /// Order of the formats in `@font-face`.
    pub order: Option<Vec<FontFormat>>,
    /// First automatically assigned code point.
    pub start_codepoint: Option<u32>,
    /// Explicit code points.
    pub codepoints: Option<CodepointMap>,
    /// Presentation options for the templates.
    pub template_options: Option<RawTemplateOptions>,
    /// Passed to the font generator: scale icons to the same height.
    pub normalize: Option<bool>,
    /// Passed to the font generator: emit ligatures for icon names.
    pub ligature: Option<bool>,
    /// Write the outputs to disk, rather than only returning them.
    pub write_files: Option<bool>,
    /// Whether to write `iconfontInfo.js`.
    pub output_info: Option<bool>,
    /// Per-format generator settings.
    pub format_options: Option<FormatOptions>,
    /// How icon names are derived from sources.
    #[serde(skip)]
    pub rename: Option<Strategy<dyn Rename>>,
    /// Stylesheet context hook.
    #[serde(skip)]
    pub css_context: Option<Strategy<dyn ContextHook>>,
    /// Preview context hook.
    #[serde(skip)]
    pub html_context: Option<Strategy<dyn ContextHook>>,
    /// Formatter for `iconfontInfo.js`.
    #[serde(skip)]
    pub prettify: Option<Strategy<dyn Prettify>>,
}

/// A fully resolved build plan.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct BuildOptions {
    /// Output directory.
    pub dest: PathBuf,
    /// Input icons, in order.
    pub files: Vec<IconSource>,
    /// Icon names, one per entry in `files`, in the same order.
    pub names: Vec<String>,
    /// Font family name and base name of the output files.
    pub font_name: String,
    /// Whether to write the stylesheet.
    pub css: bool,
    /// Stylesheet path.
    pub css_dest: PathBuf,
    /// Stylesheet template.
    pub css_template: TemplateSource,
    /// Base URL for the font files referenced from the stylesheet.
    pub css_fonts_url: Option<String>,
    /// Whether to write the HTML preview.
    pub html: bool,
    /// Preview path.
    pub html_dest: PathBuf,
    /// Preview template.
    pub html_template: TemplateSource,
    /// Formats to build.
    pub types: Vec<FontFormat>,
    /// Order of the formats in `@font-face`.
    pub order: Vec<FontFormat>,
    /// First automatically assigned code point.
    pub start_codepoint: u32,
    /// Code points; holds the overrides until
    /// [`assign_codepoints`](BuildOptions::assign_codepoints) fills in the rest.
    pub codepoints: CodepointMap,
    /// Presentation options for the templates.
    pub template_options: TemplateOptions,
    /// Passed to the font generator.
    pub normalize: bool,
    /// Passed to the font generator.
    pub ligature: bool,
    /// Write the outputs to disk.
    pub write_files: bool,
    /// Whether to write `iconfontInfo.js`.
    pub output_info: bool,
    /// Per-format generator settings.
    pub format_options: FormatOptions,
    /// How icon names were derived.
    pub rename: Strategy<dyn Rename>,
    /// Stylesheet context hook.
    pub css_context: Strategy<dyn ContextHook>,
    /// Preview context hook.
    pub html_context: Strategy<dyn ContextHook>,
    /// Formatter for `iconfontInfo.js`.
    pub prettify: Strategy<dyn Prettify>,
}

impl Config {
    /// Returns a new, empty [`Config`].
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the output directory.
    pub fn dest(mut self, dest: impl Into<PathBuf>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    /// Set the input icons.
    pub fn files<T: Into<IconSource>>(mut self, files: impl IntoIterator<Item = T>) -> Self {
        self.files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// Set the font name.
    pub fn font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Set the formats to build.
    pub fn types(mut self, types: impl IntoIterator<Item = FontFormat>) -> Self {
        self.types = Some(types.into_iter().collect());
        self
    }

    /// Set the `@font-face` format order.
    pub fn order(mut self, order: impl IntoIterator<Item = FontFormat>) -> Self {
        self.order = Some(order.into_iter().collect());
        self
    }

    /// Set the first automatically assigned code point.
    pub fn start_codepoint(mut self, start: u32) -> Self {
        self.start_codepoint = Some(start);
        self
    }

    /// Set explicit code points.
    pub fn codepoints(mut self, codepoints: CodepointMap) -> Self {
        self.codepoints = Some(codepoints);
        self
    }

    /// Enable or disable the stylesheet.
    pub fn css(mut self, b: bool) -> Self {
        self.css = Some(b);
        self
    }

    /// Set the stylesheet template.
    pub fn css_template(mut self, template: impl Into<TemplateSource>) -> Self {
        self.css_template = Some(template.into());
        self
    }

    /// Set the base URL for font files in the stylesheet.
    pub fn css_fonts_url(mut self, url: impl Into<String>) -> Self {
        self.css_fonts_url = Some(url.into());
        self
    }

    /// Enable or disable the HTML preview.
    pub fn html(mut self, b: bool) -> Self {
        self.html = Some(b);
        self
    }

    /// Set the preview template.
    pub fn html_template(mut self, template: impl Into<TemplateSource>) -> Self {
        self.html_template = Some(template.into());
        self
    }

    /// Set the base selector and class prefix.
    pub fn template_options(
        mut self,
        base_selector: impl Into<String>,
        class_prefix: impl Into<String>,
    ) -> Self {
        let options = self.template_options.get_or_insert_with(Default::default);
        options.base_selector = Some(base_selector.into());
        options.class_prefix = Some(class_prefix.into());
        self
    }

    /// Enable or disable writing to disk.
    pub fn write_files(mut self, b: bool) -> Self {
        self.write_files = Some(b);
        self
    }

    /// Enable or disable `iconfontInfo.js`.
    pub fn output_info(mut self, b: bool) -> Self {
        self.output_info = Some(b);
        self
    }

    /// Set the [`Rename`] strategy.
    pub fn rename(mut self, rename: impl Rename + 'static) -> Self {
        self.rename = Some(Strategy::renamer(rename));
        self
    }

    /// Set the stylesheet [`ContextHook`].
    pub fn css_context(mut self, hook: impl ContextHook + 'static) -> Self {
        self.css_context = Some(Strategy::hook(hook));
        self
    }

    /// Set the preview [`ContextHook`].
    pub fn html_context(mut self, hook: impl ContextHook + 'static) -> Self {
        self.html_context = Some(Strategy::hook(hook));
        self
    }

    /// Set the [`Prettify`] strategy for `iconfontInfo.js`.
    pub fn prettify(mut self, prettify: impl Prettify + 'static) -> Self {
        self.prettify = Some(Strategy::formatter(prettify));
        self
    }

    /// Resolve this configuration into a [`BuildOptions`].
    ///
    /// Deprecated keys are translated first, logging a warning for each.
    /// Then `dest` and `files` are checked, in that order, and defaults are
    /// filled in for everything else.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDest`], [`ConfigError::MissingFiles`] or
    /// [`ConfigError::EmptyFiles`] for the first required field that is not
    /// satisfied.
    pub fn resolve(mut self) -> Result<BuildOptions, Error> {
        for deprecation in migrate::migrate(&mut self) {
            log::warn!("{}", deprecation);
        }

        let dest = self.dest.ok_or(ConfigError::MissingDest)?;
        let files = self.files.ok_or(ConfigError::MissingFiles)?;
        if files.is_empty() {
            return Err(ConfigError::EmptyFiles.into());
        }

        let font_name = self.font_name.unwrap_or_else(|| DEFAULT_FONT_NAME.to_string());
        let rename = self.rename.unwrap_or_default();
        let names = files.iter().map(|source| rename.rename(source)).collect();
        let css_dest = self.css_dest.unwrap_or_else(|| dest.join(format!("{}.css", font_name)));
        let html_dest = self.html_dest.unwrap_or_else(|| dest.join(format!("{}.html", font_name)));

        Ok(BuildOptions {
            files,
            names,
            css: self.css.unwrap_or(true),
            css_dest,
            css_template: self.css_template.unwrap_or(TemplateSource::Builtin(TemplateKind::Css)),
            css_fonts_url: self.css_fonts_url,
            html: self.html.unwrap_or(false),
            html_dest,
            html_template: self
                .html_template
                .unwrap_or(TemplateSource::Builtin(TemplateKind::Html)),
            types: self.types.unwrap_or_else(|| DEFAULT_TYPES.to_vec()),
            order: self.order.unwrap_or_else(|| DEFAULT_ORDER.to_vec()),
            start_codepoint: self.start_codepoint.unwrap_or(DEFAULT_START_CODEPOINT),
            codepoints: self.codepoints.unwrap_or_default(),
            template_options: TemplateOptions::merged(self.template_options),
            normalize: self.normalize.unwrap_or(true),
            ligature: self.ligature.unwrap_or(true),
            write_files: self.write_files.unwrap_or(true),
            output_info: self.output_info.unwrap_or(true),
            format_options: self.format_options.unwrap_or_default(),
            rename,
            css_context: self.css_context.unwrap_or_default(),
            html_context: self.html_context.unwrap_or_default(),
            prettify: self.prettify.unwrap_or_default(),
            dest,
            font_name,
        })
    }
}

impl BuildOptions {
    /// Give every icon name a code point, keeping any that are already set.
    ///
    /// See [`CodepointMap::allocate`].
    pub fn assign_codepoints(&mut self) -> Result<(), Error> {
        self.codepoints.allocate(self.start_codepoint, &self.names)
    }
}

#[cfg(test)]
mod tests {
    use maplit::hashmap;
    use pretty_assertions::assert_eq;

    use super::*;

    fn minimal() -> Config {
        Config::new().dest("out").files(["icons/home.svg", "icons/user.svg"])
    }

    #[test]
    fn defaults() {
        let options = minimal().resolve().unwrap();
        assert_eq!(options.dest, PathBuf::from("out"));
        assert_eq!(options.font_name, "iconfont");
        assert_eq!(options.names, vec!["home", "user"]);
        assert_eq!(options.css_dest, Path::new("out").join("iconfont.css"));
        assert_eq!(options.html_dest, Path::new("out").join("iconfont.html"));
        assert_eq!(options.types, DEFAULT_TYPES.to_vec());
        assert_eq!(options.order, DEFAULT_ORDER.to_vec());
        assert_eq!(options.start_codepoint, 0xF101);
        assert!(options.codepoints.is_empty());
        assert_eq!(options.template_options, TemplateOptions::default());
        assert!(options.css && !options.html && options.output_info && options.write_files);
        assert!(options.normalize && options.ligature);
        assert_eq!(options.css_template, TemplateSource::Builtin(TemplateKind::Css));
    }

    #[test]
    fn missing_dest_is_checked_first() {
        let err = Config::new().resolve().unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingDest)));
        assert_eq!(err.to_string(), "\"options.dest\" is undefined.");
    }

    #[test]
    fn missing_files() {
        let err = Config::new().dest("out").resolve().unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingFiles)));
    }

    #[test]
    fn empty_files() {
        let err = Config::new().dest("out").files(Vec::<IconSource>::new()).resolve().unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::EmptyFiles)));
        assert_eq!(err.to_string(), "\"options.files\" is empty.");
    }

    #[test]
    fn explicit_paths_are_kept() {
        let mut config = minimal().font_name("glyphs");
        config.css_dest = Some("styles/icons.css".into());
        let options = config.resolve().unwrap();
        assert_eq!(options.css_dest, PathBuf::from("styles/icons.css"));
        assert_eq!(options.html_dest, Path::new("out").join("glyphs.html"));
    }

    #[test]
    fn template_options_merge_shallowly() {
        let json = r#"{
            "dest": "out",
            "files": ["a.svg"],
            "templateOptions": { "classPrefix": "i-", "cssVersion": 3 }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let options = config.resolve().unwrap();
        assert_eq!(options.template_options.base_selector, ".icon");
        assert_eq!(options.template_options.class_prefix, "i-");
        assert_eq!(options.template_options.extra.get("cssVersion"), Some(&Value::from(3)));
    }

    #[test]
    fn deserialize_full() {
        let json = r#"{
            "dest": "dist",
            "files": ["a.svg", { "path": "b.svg", "name": "bee" }],
            "fontName": "app",
            "types": ["woff2", "ttf"],
            "startCodepoint": 57344,
            "codepoints": { "bee": 61697 },
            "html": true,
            "writeFiles": false,
            "cssFontsPath": "/static/"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let options = config.resolve().unwrap();
        assert_eq!(options.names, vec!["a", "bee"]);
        assert_eq!(options.files[1], IconSource::named("b.svg", "bee"));
        assert_eq!(options.types, vec![FontFormat::Woff2, FontFormat::Ttf]);
        assert_eq!(options.start_codepoint, 0xE000);
        assert_eq!(options.codepoints.get("bee"), Some(0xF101));
        assert!(options.html);
        assert!(!options.write_files);
        assert_eq!(options.css_fonts_url.as_deref(), Some("/static/"));
    }

    #[test]
    fn base_class_is_translated() {
        let json = r#"{ "dest": "out", "files": ["a.svg"], "templateOptions": { "baseClass": "glyph" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let options = config.resolve().unwrap();
        assert_eq!(options.template_options.base_selector, ".glyph");
        assert_eq!(options.template_options.base_class(), "glyph");
        assert!(options.template_options.extra.is_empty());
    }

    #[test]
    fn custom_rename() {
        let options = minimal()
            .rename(|source: &IconSource| {
                format!("x-{}", source.path.file_stem().unwrap().to_string_lossy())
            })
            .resolve()
            .unwrap();
        assert_eq!(options.names, vec!["x-home", "x-user"]);
    }

    #[test]
    fn resolution_is_deterministic() {
        let json = r#"{ "dest": "out", "files": ["b.svg", "a.svg"], "codepoints": { "a": 1 } }"#;
        let first = serde_json::from_str::<Config>(json).unwrap().resolve().unwrap();
        let second = serde_json::from_str::<Config>(json).unwrap().resolve().unwrap();
        assert_eq!(first.names, second.names);
        assert_eq!(first.codepoints, second.codepoints);
        assert_eq!(first.css_dest, second.css_dest);
        assert_eq!(first.template_options, second.template_options);
    }

    #[test]
    fn assign_codepoints_respects_overrides() {
        let mut options = minimal()
            .codepoints(CodepointMap::new([("home", 0xF101)]))
            .resolve()
            .unwrap();
        options.assign_codepoints().unwrap();
        let assigned: std::collections::HashMap<&str, u32> = options.codepoints.iter().collect();
        assert_eq!(assigned, hashmap! { "home" => 0xF101, "user" => 0xF102 });
    }
}
