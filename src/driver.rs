//! Running a build.

use crate::config::{BuildOptions, Config};
use crate::generator::{FontGenerator, Fonts, GenerateRequest};
use crate::info::{BuildContext, IconInfo};
use crate::render::{self, FontUrls};
use crate::{write, Error, FontFormat};

/// The outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Everything the generator produced.
    pub fonts: Fonts,
    /// The options the build ran with, code points included.
    pub options: BuildOptions,
    /// Metadata for every icon, in name order.
    pub infos: Vec<IconInfo>,
}

impl BuildResult {
    /// Returns the generated content for `format`.
    pub fn get(&self, format: FontFormat) -> Option<&[u8]> {
        self.fonts.get(format)
    }

    /// Render the stylesheet again, optionally with different font URLs.
    pub fn generate_css(&self, urls: Option<&FontUrls>) -> Result<String, Error> {
        render::css(&self.options, urls)
    }

    /// Render the HTML preview again, optionally with different font URLs.
    pub fn generate_html(&self, urls: Option<&FontUrls>) -> Result<String, Error> {
        render::html(&self.options, urls)
    }
}

/// Build an icon font.
///
/// The configuration is resolved and checked before anything else happens,
/// so a bad configuration never reaches `generator`.
///
/// ```no_run
/// # use iconfont::{Config, NoConverter, SymbolGenerator};
/// # async fn build() -> Result<(), iconfont::Error> {
/// let config = Config::new().dest("dist").files(["icons/home.svg"]);
/// let result = iconfont::generate(config, &SymbolGenerator::new(NoConverter)).await?;
/// println!("{}", result.generate_css(None)?);
/// # Ok(())
/// # }
/// ```
pub async fn generate<G>(config: Config, generator: &G) -> Result<BuildResult, Error>
where
    G: FontGenerator + ?Sized,
{
    let options = config.resolve()?;
    generate_with_options(options, generator).await
}

/// Build an icon font from already resolved options.
///
/// Code points are assigned and the metadata collected first; then
/// `generator` is awaited. If it fails, its error is returned as
/// [`Error::Generate`] and nothing is written. Otherwise the outputs are
/// written if `options.write_files` is set.
pub async fn generate_with_options<G>(
    mut options: BuildOptions,
    generator: &G,
) -> Result<BuildResult, Error>
where
    G: FontGenerator + ?Sized,
{
    options.assign_codepoints()?;
    let mut context = BuildContext::new();
    context.push_icons(&options);

    log::debug!(
        "generating '{}' ({} icons) as {:?}",
        options.font_name,
        options.names.len(),
        options.types
    );
    let fonts = generator.generate(&GenerateRequest::new(&options)).await.map_err(Error::Generate)?;

    if options.write_files {
        write::write_result(&fonts, &options, &context)?;
    }

    Ok(BuildResult { fonts, options, infos: context.into_infos() })
}
