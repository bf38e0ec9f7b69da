//! Translation of deprecated configuration keys.
//!
//! This runs once over a raw [`Config`] before anything is validated. It only
//! rewrites the configuration and reports what it did; logging the
//! deprecations is left to the caller.

use std::fmt;

use crate::config::Config;

/// A deprecated option that was found and translated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Deprecation {
    /// `cssFontsPath` was copied to `cssFontsUrl`.
    CssFontsPath,
    /// `templateOptions.baseClass` was turned into `baseSelector`.
    BaseClass,
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deprecation::CssFontsPath => {
                write!(f, "Option \"cssFontsPath\" is deprecated. Use \"cssFontsUrl\" instead.")
            }
            Deprecation::BaseClass => write!(
                f,
                "Using deprecated templateOptions 'baseClass'. Use 'baseSelector' instead."
            ),
        }
    }
}

/// Rewrite deprecated keys in `config` into their current form.
///
/// - `cssFontsPath` is copied into `cssFontsUrl`, replacing any value there.
/// - `templateOptions.baseClass` becomes `templateOptions.baseSelector`
///   with a leading `.`, and the old key is removed.
pub fn migrate(config: &mut Config) -> Vec<Deprecation> {
    let mut applied = Vec::new();

    if let Some(path) = &config.css_fonts_path {
        config.css_fonts_url = Some(path.clone());
        applied.push(Deprecation::CssFontsPath);
    }

    if let Some(template_options) = config.template_options.as_mut() {
        if let Some(base_class) = template_options.base_class.take() {
            template_options.base_selector = Some(format!(".{}", base_class));
            applied.push(Deprecation::BaseClass);
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawTemplateOptions;

    #[test]
    fn nothing_to_do() {
        let mut config = Config::default();
        assert!(migrate(&mut config).is_empty());
        assert_eq!(config.css_fonts_url, None);
    }

    #[test]
    fn css_fonts_path() {
        let mut config = Config { css_fonts_path: Some("/fonts/".into()), ..Default::default() };
        assert_eq!(migrate(&mut config), vec![Deprecation::CssFontsPath]);
        assert_eq!(config.css_fonts_url.as_deref(), Some("/fonts/"));
    }

    #[test]
    fn css_fonts_path_wins_over_url() {
        let mut config = Config {
            css_fonts_path: Some("old/".into()),
            css_fonts_url: Some("new/".into()),
            ..Default::default()
        };
        migrate(&mut config);
        assert_eq!(config.css_fonts_url.as_deref(), Some("old/"));
    }

    #[test]
    fn base_class() {
        let mut config = Config {
            template_options: Some(RawTemplateOptions {
                base_class: Some("glyph".into()),
                base_selector: Some(".ignored".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(migrate(&mut config), vec![Deprecation::BaseClass]);
        let template_options = config.template_options.unwrap();
        assert_eq!(template_options.base_selector.as_deref(), Some(".glyph"));
        assert_eq!(template_options.base_class, None);
    }
}
