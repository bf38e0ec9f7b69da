//! Pluggable strategies: naming icons, customizing template contexts, and
//! tidying generated scripts.
//!
//! Each strategy is a single-method trait with a built-in default. Closures
//! with the right signature implement the traits too.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use handlebars::Handlebars;
use serde_json::{Map, Value};

use crate::{BuildOptions, IconSource};

/// Derives an icon name from its source.
pub trait Rename: Send + Sync {
    /// Returns the name for `source`.
    fn rename(&self, source: &IconSource) -> String;
}

impl<F> Rename for F
where
    F: Fn(&IconSource) -> String + Send + Sync,
{
    fn rename(&self, source: &IconSource) -> String {
        self(source)
    }
}

/// The default [`Rename`]: the explicit name if the source has one, otherwise
/// the file name without its extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileStem;

impl Rename for FileStem {
    fn rename(&self, source: &IconSource) -> String {
        if let Some(name) = &source.name {
            return name.clone();
        }
        match source.path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => source.path.to_string_lossy().into_owned(),
        }
    }
}

/// Adjusts a template context right before it is rendered.
///
/// The hook may add or replace keys, and may register helpers or partials on
/// the handlebars registry the template will be rendered with.
pub trait ContextHook: Send + Sync {
    /// Modify `context` in place.
    fn customize(
        &self,
        context: &mut Map<String, Value>,
        options: &BuildOptions,
        handlebars: &mut Handlebars<'static>,
    );
}

impl<F> ContextHook for F
where
    F: Fn(&mut Map<String, Value>, &BuildOptions, &mut Handlebars<'static>) + Send + Sync,
{
    fn customize(
        &self,
        context: &mut Map<String, Value>,
        options: &BuildOptions,
        handlebars: &mut Handlebars<'static>,
    ) {
        self(context, options, handlebars)
    }
}

/// The default [`ContextHook`], which leaves the context alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoContext;

impl ContextHook for NoContext {
    fn customize(&self, _: &mut Map<String, Value>, _: &BuildOptions, _: &mut Handlebars<'static>) {}
}

/// Formats the generated `iconfontInfo.js` before it is written.
pub trait Prettify: Send + Sync {
    /// Returns the formatted source.
    fn prettify(&self, source: &str) -> String;
}

impl<F> Prettify for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn prettify(&self, source: &str) -> String {
        self(source)
    }
}

/// The default [`Prettify`]: normalizes line endings to `\n`, strips trailing
/// whitespace from every line, and ends the file with exactly one newline.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrimWhitespace;

impl Prettify for TrimWhitespace {
    fn prettify(&self, source: &str) -> String {
        let mut result = String::with_capacity(source.len() + 1);
        for line in source.trim_end().lines() {
            result.push_str(line.trim_end());
            result.push('\n');
        }
        result
    }
}

/// A shared strategy object.
///
/// This exists so that option structs holding trait objects can still be
/// `Clone` and `Debug`.
pub struct Strategy<T: ?Sized>(Arc<T>);

impl<T: ?Sized> Strategy<T> {
    pub(crate) fn from_arc(inner: Arc<T>) -> Self {
        Strategy(inner)
    }
}

impl Strategy<dyn Rename> {
    /// Wrap a [`Rename`] implementation.
    pub fn renamer(inner: impl Rename + 'static) -> Self {
        Strategy::from_arc(Arc::new(inner))
    }
}

impl Strategy<dyn ContextHook> {
    /// Wrap a [`ContextHook`] implementation.
    pub fn hook(inner: impl ContextHook + 'static) -> Self {
        Strategy::from_arc(Arc::new(inner))
    }
}

impl Strategy<dyn Prettify> {
    /// Wrap a [`Prettify`] implementation.
    pub fn formatter(inner: impl Prettify + 'static) -> Self {
        Strategy::from_arc(Arc::new(inner))
    }
}

impl Default for Strategy<dyn Rename> {
    fn default() -> Self {
        Strategy::renamer(FileStem)
    }
}

impl Default for Strategy<dyn ContextHook> {
    fn default() -> Self {
        Strategy::hook(NoContext)
    }
}

impl Default for Strategy<dyn Prettify> {
    fn default() -> Self {
        Strategy::formatter(TrimWhitespace)
    }
}

impl<T: ?Sized> Clone for Strategy<T> {
    fn clone(&self) -> Self {
        Strategy(self.0.clone())
    }
}

impl<T: ?Sized> Deref for Strategy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> fmt::Debug for Strategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Strategy(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem() {
        assert_eq!(FileStem.rename(&IconSource::new("icons/arrow-left.svg")), "arrow-left");
        assert_eq!(FileStem.rename(&IconSource::new("a.b.svg")), "a.b");
        assert_eq!(FileStem.rename(&IconSource::new("plain")), "plain");
        assert_eq!(FileStem.rename(&IconSource::named("icons/x.svg", "close")), "close");
    }

    #[test]
    fn closure_rename() {
        let upper = Strategy::renamer(|source: &IconSource| FileStem.rename(source).to_uppercase());
        assert_eq!(upper.rename(&IconSource::new("home.svg")), "HOME");
    }

    #[test]
    fn trim_whitespace() {
        let pretty = TrimWhitespace.prettify("a  \r\n  b\t\n\n\n");
        assert_eq!(pretty, "a\n  b\n");
        assert_eq!(TrimWhitespace.prettify(&pretty), pretty);
    }
}
