//! Build web icon fonts from a set of [SVG] icons.
//!
//! A build takes a list of icons, gives each one a Private Use Area code
//! point, asks a [`FontGenerator`] for the font binaries, and writes out the
//! fonts along with a stylesheet, an optional HTML preview, an SVG sprite with
//! its injector script, and a JavaScript module describing every icon.
//!
//! Converting outlines into TTF, WOFF and friends is left to the generator.
//! The sprite is built by [`SymbolGenerator`], which wraps whatever generator
//! handles the real formats.
//!
//! [SVG]: https://www.w3.org/TR/SVG2/
//!
//! # Basic usage:
//!
//! ```no_run
//! use iconfont::{Config, FontFormat, NoConverter, SymbolGenerator};
//!
//! # async fn build() -> Result<(), iconfont::Error> {
//! let config = Config::new()
//!     .dest("dist/icons")
//!     .files(["icons/home.svg", "icons/user.svg"])
//!     .types([FontFormat::Symbol])
//!     .html(true);
//!
//! let result = iconfont::generate(config, &SymbolGenerator::new(NoConverter)).await?;
//! assert_eq!(result.options.codepoints.get("home"), Some(0xF101));
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

mod codepoints;
mod config;
mod driver;
pub mod error;
mod format;
mod generator;
pub mod hooks;
mod info;
mod migrate;
pub mod render;
mod symbol;
pub mod templates;
pub mod write;

pub use codepoints::{CodepointMap, DEFAULT_START_CODEPOINT, MAX_CODEPOINT};
pub use config::{
    BuildOptions, Config, FormatOptions, IconSource, RawTemplateOptions, TemplateOptions,
    DEFAULT_BASE_SELECTOR, DEFAULT_CLASS_PREFIX, DEFAULT_FONT_NAME, DEFAULT_ORDER, DEFAULT_TYPES,
};
pub use driver::{generate, generate_with_options, BuildResult};
pub use error::{ConfigError, Error};
pub use format::FontFormat;
pub use generator::{FontGenerator, Fonts, GenerateRequest, NoConverter};
pub use info::{BuildContext, IconInfo};
pub use migrate::{migrate, Deprecation};
pub use symbol::{build_sprite, symbol_element, SymbolGenerator};
