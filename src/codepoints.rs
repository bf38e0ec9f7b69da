//! Code point assignment.
//!
//! Icon names map to code points in the Unicode Private Use Area. We want to
//! preserve the order in which names were claimed (explicit overrides first,
//! then icons as they were listed), so the map is an IndexMap; we don't want
//! that to be part of our public API, so it is wrapped.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Error;

/// The first code point handed out when none is configured.
///
/// This is inside the Basic Multilingual Plane's Private Use Area
/// (`U+E000..=U+F8FF`).
pub const DEFAULT_START_CODEPOINT: u32 = 0xF101;

/// The largest code point the allocator will hand out.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

// UTF-16 surrogates are not scalar values and are never handed out.
const SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDFFF;

/// A mapping from icon name to code point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodepointMap(IndexMap<String, u32>);

impl CodepointMap {
    /// Construct a new map from `(name, codepoint)` pairs.
    ///
    /// ```
    /// # use iconfont::CodepointMap;
    /// let codepoints = CodepointMap::new([("star", 0xF101)]);
    /// assert_eq!(codepoints.get("star"), Some(0xF101));
    /// ```
    pub fn new<K: Into<String>>(src: impl IntoIterator<Item = (K, u32)>) -> Self {
        src.into_iter().collect()
    }

    /// Return the number of assigned names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the code point assigned to `name`.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    /// Returns true if `name` has a code point.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Assign `codepoint` to `name`, returning the previous value.
    ///
    /// A newly inserted name goes at the end; replacing keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, codepoint: u32) -> Option<u32> {
        self.0.insert(name.into(), codepoint)
    }

    /// Iterate over `(name, codepoint)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.0.iter().map(|(name, cp)| (name.as_str(), *cp))
    }

    /// Iterate over the assigned code points.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.values().copied()
    }

    /// Assign a code point to every name in `names` that does not have one.
    ///
    /// Auto-assigned values start at `start` and count upwards, skipping any
    /// value already present in the map when this is called, as well as the
    /// surrogate block `U+D800..=U+DFFF`. Names that are
    /// already in the map keep their value; a name that appears twice is
    /// assigned once.
    ///
    /// The cursor is only checked against the values that were present
    /// before allocation began; the values it hands out are strictly
    /// increasing, so they cannot collide with each other.
    ///
    /// ```
    /// # use iconfont::CodepointMap;
    /// let mut codepoints = CodepointMap::new([("star", 0xF101)]);
    /// codepoints.allocate(0xF101, &["star", "home"]).unwrap();
    /// assert_eq!(codepoints.get("star"), Some(0xF101));
    /// assert_eq!(codepoints.get("home"), Some(0xF102));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::CodepointsExhausted`] if the cursor passes
    /// [`MAX_CODEPOINT`] before every name has a value.
    pub fn allocate<S: AsRef<str>>(&mut self, start: u32, names: &[S]) -> Result<(), Error> {
        let mut cursor = Cursor::new(start, self.values());
        for name in names {
            let name = name.as_ref();
            if self.contains(name) {
                continue;
            }
            let codepoint = cursor
                .next_free()
                .ok_or_else(|| Error::CodepointsExhausted { name: name.to_string() })?;
            log::debug!("assigned U+{:04X} to '{}'", codepoint, name);
            self.insert(name, codepoint);
        }
        Ok(())
    }
}

/// Walks upwards from a start value, stepping over a fixed reserved set.
#[derive(Debug)]
struct Cursor {
    next: u32,
    reserved: HashSet<u32>,
}

impl Cursor {
    fn new(start: u32, reserved: impl IntoIterator<Item = u32>) -> Self {
        Cursor { next: start, reserved: reserved.into_iter().collect() }
    }

    fn next_free(&mut self) -> Option<u32> {
        loop {
            if SURROGATES.contains(&self.next) {
                self.next = SURROGATES.end() + 1;
            } else if self.next <= MAX_CODEPOINT && self.reserved.contains(&self.next) {
                self.next += 1;
            } else {
                break;
            }
        }
        if self.next > MAX_CODEPOINT {
            return None;
        }
        let codepoint = self.next;
        self.next += 1;
        Some(codepoint)
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for CodepointMap {
    fn from_iter<T: IntoIterator<Item = (K, u32)>>(iter: T) -> Self {
        CodepointMap(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for CodepointMap {
    type Item = (String, u32);

    type IntoIter = indexmap::map::IntoIter<String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CodepointMap {
    type Item = (&'a String, &'a u32);

    type IntoIter = indexmap::map::Iter<'a, String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
