//! Writing build outputs to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BuildOptions;
use crate::generator::Fonts;
use crate::hooks::Prettify;
use crate::info::{BuildContext, IconInfo};
use crate::render;
use crate::templates::{self, TemplateKind};
use crate::{Error, FontFormat};

/// The file name of the icon metadata module, inside `dest`.
pub static INFO_FILE_NAME: &str = "iconfontInfo.js";

/// Write everything a build produced.
///
/// Each generated format goes to `dest`. The sprite is written both as
/// `<fontName>Symbol.svg` and wrapped in the injector script
/// `<fontName>Symbol.js`. Then the stylesheet, the preview and the metadata
/// module are written, each only if enabled.
///
/// Writing stops at the first failure; files written before it are left in
/// place.
pub fn write_result(fonts: &Fonts, options: &BuildOptions, context: &BuildContext) -> Result<(), Error> {
    for (format, content) in fonts.iter() {
        if format == FontFormat::Symbol {
            write_file(&symbol_path(options, "svg"), content)?;
            write_file(&symbol_path(options, "js"), symbol_script(content)?)?;
        } else {
            let path = options.dest.join(format!("{}.{}", options.font_name, format.as_str()));
            write_file(&path, content)?;
        }
    }

    if options.css {
        write_file(&options.css_dest, render::css(options, None)?)?;
    }
    if options.html {
        write_file(&options.html_dest, render::html(options, None)?)?;
    }
    if options.output_info {
        let script = info_script(context.infos(), &*options.prettify)?;
        write_file(&options.dest.join(INFO_FILE_NAME), script)?;
    }
    Ok(())
}

fn symbol_path(options: &BuildOptions, ext: &str) -> PathBuf {
    options.dest.join(format!("{}Symbol.{}", options.font_name, ext))
}

/// The sprite injector script.
///
/// The sprite is embedded as a string literal. The result is not
/// reformatted, so the same sprite always gives the same bytes.
pub fn symbol_script(sprite: &[u8]) -> Result<String, Error> {
    let sprite = String::from_utf8_lossy(sprite);
    templates::fill_placeholder(
        TemplateKind::Symbol.source(),
        templates::SVG_SYMBOL_PLACEHOLDER,
        sprite.as_ref(),
    )
}

/// The icon metadata module, run through `prettify`.
pub fn info_script(infos: &[IconInfo], prettify: &dyn Prettify) -> Result<String, Error> {
    let script =
        templates::fill_placeholder(TemplateKind::Info.source(), templates::ICON_INFO_PLACEHOLDER, infos)?;
    Ok(prettify.prettify(&script))
}

/// Write `content` to `path`, creating missing parent directories first.
pub(crate) fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), Error> {
    let content = content.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| Error::Write { path: parent.to_owned(), source })?;
    }
    close_already::fs::write(path, content)
        .map_err(|source| Error::Write { path: path.to_owned(), source })?;
    log::debug!("wrote {} bytes to '{}'", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::TemplateOptions;
    use crate::hooks::TrimWhitespace;
    use crate::Config;

    fn options(dest: &Path) -> BuildOptions {
        let mut options = Config::new()
            .dest(dest)
            .files(["icons/home.svg", "icons/user.svg"])
            .types([FontFormat::Woff2, FontFormat::Symbol])
            .resolve()
            .unwrap();
        options.assign_codepoints().unwrap();
        options
    }

    #[test]
    fn info_module() {
        let infos = vec![IconInfo::new("home", 0xF101, &TemplateOptions::default())];
        let script = info_script(&infos, &TrimWhitespace).unwrap();
        expect![[r#"
            // Generated by iconfont. Do not edit.
            const iconfontInfo = [
              {
                "name": "home",
                "unicode": "&#xf101;",
                "symbolId": "icon-home",
                "className": "icon icon-home"
              }
            ];

            export default iconfontInfo;
        "#]]
        .assert_eq(&script);
    }

    #[test]
    fn info_uses_prettify() {
        let script = info_script(&[], &|source: &str| source.to_uppercase()).unwrap();
        assert!(script.contains("CONST ICONFONTINFO = [];"));
    }

    #[test]
    fn symbol_script_embeds_string() {
        let script = symbol_script(br#"<svg><symbol id="a"></symbol></svg>"#).unwrap();
        assert!(script.contains(r#"var svgSprite = "<svg><symbol id=\"a\"></symbol></svg>";"#));
        assert_eq!(script, symbol_script(br#"<svg><symbol id="a"></symbol></svg>"#).unwrap());
    }

    #[test]
    fn creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.txt");
        write_file(&path, "hi").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "hi");
    }

    #[test]
    fn write_layout() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let options = options(&dest);
        let mut context = BuildContext::new();
        context.push_icons(&options);
        let fonts: Fonts =
            [(FontFormat::Woff2, b"wOF2".to_vec()), (FontFormat::Symbol, b"<svg></svg>".to_vec())]
                .into_iter()
                .collect();

        write_result(&fonts, &options, &context).unwrap();

        let mut written: Vec<_> = fs::read_dir(&dest)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        written.sort();
        assert_eq!(
            written,
            vec![
                "iconfont.css",
                "iconfont.woff2",
                "iconfontInfo.js",
                "iconfontSymbol.js",
                "iconfontSymbol.svg",
            ]
        );
        assert_eq!(fs::read(dest.join("iconfont.woff2")).unwrap(), b"wOF2");
        assert_eq!(fs::read_to_string(dest.join("iconfontSymbol.svg")).unwrap(), "<svg></svg>");
    }

    #[test]
    fn disabled_outputs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options(dir.path());
        options.css = false;
        options.output_info = false;
        write_result(&Fonts::new(), &options, &BuildContext::new()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
