//! Per-icon metadata.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::{BuildOptions, TemplateOptions};

/// Presentation details for one icon, as written to `iconfontInfo.js`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconInfo {
    /// The icon name.
    pub name: String,
    /// The code point as an HTML numeric character reference, e.g. `&#xf101;`.
    pub unicode: String,
    /// The id of the icon's `<symbol>` in the sprite.
    pub symbol_id: String,
    /// The classes that display the icon, e.g. `icon icon-home`.
    pub class_name: String,
}

impl IconInfo {
    /// Build the record for `name` at `codepoint`.
    pub fn new(name: &str, codepoint: u32, template_options: &TemplateOptions) -> Self {
        let symbol_id = format!("{}{}", template_options.class_prefix, name);
        IconInfo {
            name: name.to_string(),
            unicode: char_reference(codepoint),
            class_name: format!("{} {}", template_options.base_class(), symbol_id),
            symbol_id,
        }
    }

    /// The code point, parsed back out of [`unicode`](IconInfo::unicode).
    pub fn codepoint(&self) -> Option<u32> {
        let hex = self.unicode.strip_prefix("&#x")?.strip_suffix(';')?;
        u32::from_str_radix(hex, 16).ok()
    }
}

/// Format `codepoint` as a hexadecimal numeric character reference.
pub fn char_reference(codepoint: u32) -> String {
    format!("&#x{:x};", codepoint)
}

/// State owned by a single build.
///
/// Metadata accumulates here and is dropped with the context, so separate
/// builds never see each other's icons.
#[derive(Debug, Default)]
pub struct BuildContext {
    infos: Vec<IconInfo>,
}

impl BuildContext {
    /// Returns a new, empty context.
    pub fn new() -> Self {
        BuildContext::default()
    }

    /// Append one record per icon name, in name order.
    ///
    /// Code points must already be assigned. A name that occurs more than once
    /// gets a single record.
    pub fn push_icons(&mut self, options: &BuildOptions) {
        let mut seen = HashSet::new();
        for name in &options.names {
            if !seen.insert(name.as_str()) {
                continue;
            }
            match options.codepoints.get(name) {
                Some(codepoint) => {
                    self.infos.push(IconInfo::new(name, codepoint, &options.template_options))
                }
                None => log::warn!("icon '{}' has no code point, skipping", name),
            }
        }
    }

    /// The records collected so far.
    pub fn infos(&self) -> &[IconInfo] {
        &self.infos
    }

    /// Consume the context, returning its records.
    pub fn into_infos(self) -> Vec<IconInfo> {
        self.infos
    }
}
