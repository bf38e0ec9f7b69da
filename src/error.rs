//! Error types.

use std::io::Error as IoError;
use std::path::PathBuf;

use crate::FontFormat;

/// A boxed error returned by a [`FontGenerator`](crate::FontGenerator).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that occur while building an icon font.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The configuration is missing something required.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Every code point after the start was already claimed.
    #[error("no free code point left for '{name}'")]
    CodepointsExhausted {
        /// The first icon that could not be assigned a code point.
        name: String,
    },
    /// The font generator failed. The inner error is the generator's own.
    #[error("font generation failed: {0}")]
    Generate(#[source] BoxError),
    /// A template file could not be read.
    #[error("failed to load template '{}'", .path.display())]
    TemplateLoad {
        /// The template path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: IoError,
    },
    /// A handlebars template failed to render.
    #[error("failed to render template")]
    Render(#[from] handlebars::RenderError),
    /// An output file or directory could not be written.
    #[error("failed to write '{}'", .path.display())]
    Write {
        /// The path being written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: IoError,
    },
    /// Icon metadata could not be serialized.
    #[error("failed to serialize icon info")]
    Serialize(#[from] serde_json::Error),
}

/// A problem with the build configuration, detected before any work is done.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No output directory was given.
    #[error("\"options.dest\" is undefined.")]
    MissingDest,
    /// No input files were given.
    #[error("\"options.files\" is undefined.")]
    MissingFiles,
    /// The list of input files is empty.
    #[error("\"options.files\" is empty.")]
    EmptyFiles,
    /// A font format name was not recognized.
    #[error("unknown font format '{0}'")]
    UnknownFormat(String),
}

/// An error building the `<symbol>` for a single icon.
#[derive(Debug, thiserror::Error)]
#[error("failed to build symbol '{name}' from '{}'", .path.display())]
pub struct SvgError {
    /// The icon name.
    pub name: String,
    /// The source file.
    pub path: PathBuf,
    /// What went wrong.
    #[source]
    pub kind: SvgErrorKind,
}

/// The reason a source SVG could not be turned into a symbol.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SvgErrorKind {
    /// The file could not be read.
    #[error("failed to read file")]
    Io(#[from] IoError),
    /// The file is not well-formed XML.
    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),
    /// The document has no `svg` root element.
    #[error("expected an 'svg' root element")]
    MissingRoot,
    /// The root element is never closed.
    #[error("the 'svg' element is not closed")]
    Unclosed,
}

/// Returned by [`NoConverter`](crate::NoConverter) when asked for real font formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no converter available for {}", display_formats(.0))]
pub struct UnsupportedFormats(pub Vec<FontFormat>);

fn display_formats(formats: &[FontFormat]) -> String {
    formats.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", ")
}
