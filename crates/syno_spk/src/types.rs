//! Result types produced when reading an SPK package.

use derive_more::derive::{Constructor, Deref};
use indexmap::IndexMap;
use std::{fmt, str::FromStr};

use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{ser::SerializeMap, Serialize};

/// An insertion-ordered map whose keys are compared without regard to case.
///
/// The spelling of a key is the one it was first inserted with. Inserting the same key again in a
/// different case replaces the value but keeps the original spelling.
///
/// ```
/// use syno_spk::CaseInsensitiveMap;
///
/// let mut map = CaseInsensitiveMap::new();
/// map.insert("Foo", 1);
/// map.insert("FOO", 2);
///
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get("foo"), Some(&2));
/// assert_eq!(map.keys().next(), Some("Foo"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CaseInsensitiveMap<V> {
    entries: IndexMap<String, (Box<str>, V)>,
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for CaseInsensitiveMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

fn fold(key: &str) -> String {
    key.to_lowercase()
}

impl<V> CaseInsensitiveMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the value previously stored under the same key in any case
    pub fn insert(&mut self, key: impl Into<Box<str>>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.get_mut(&fold(&key)) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.insert(fold(&key), (key, value));
                None
            }
        }
    }

    /// Look up a value by key in any case
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(&fold(key)).map(|(_, value)| value)
    }

    /// Whether a key is present in any case
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold(key))
    }

    /// Remove a key in any case, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries
            .shift_remove(&fold(key))
            .map(|(_, value)| value)
    }

    /// Number of entries in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the entries in insertion order, with keys as first spelled
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_ref(), value))
    }

    /// Iterate over the keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over the values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

#[cfg(feature = "serde")]
impl<V: Serialize> Serialize for CaseInsensitiveMap<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<Box<str>>, V> FromIterator<(K, V)> for CaseInsensitiveMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a, V> IntoIterator for &'a CaseInsensitiveMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a V)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// A single manifest value
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(untagged))]
pub enum InfoValue {
    /// A quoted value, without its quotes
    Text(String),
    /// An unquoted base-10 value
    Integer(i64),
}

impl InfoValue {
    /// The text of a quoted value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            InfoValue::Text(text) => Some(text),
            InfoValue::Integer(_) => None,
        }
    }

    /// The number of an unquoted value
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            InfoValue::Text(_) => None,
            InfoValue::Integer(value) => Some(*value),
        }
    }
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoValue::Text(text) => write!(f, "\"{text}\""),
            InfoValue::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for InfoValue {
    fn from(value: &str) -> Self {
        InfoValue::Text(value.to_owned())
    }
}

impl From<String> for InfoValue {
    fn from(value: String) -> Self {
        InfoValue::Text(value)
    }
}

impl From<i64> for InfoValue {
    fn from(value: i64) -> Self {
        InfoValue::Integer(value)
    }
}

/// The parsed `INFO` manifest of a package
#[derive(Constructor, Clone, Debug, Default, PartialEq, Eq, Deref)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct PackageInfo(CaseInsensitiveMap<InfoValue>);

impl PackageInfo {
    /// Get a quoted value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(InfoValue::as_str)
    }

    /// Get an unquoted value by key
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(InfoValue::as_integer)
    }

    /// Unwrap the underlying map
    pub fn into_inner(self) -> CaseInsensitiveMap<InfoValue> {
        self.0
    }
}

impl FromStr for PackageInfo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::info::parse_info(s.as_bytes())
    }
}

/// Icons found in a package, keyed by entry name
pub type PackageIcons = CaseInsensitiveMap<Vec<u8>>;

/// Everything read from a package in a single pass
///
/// `info` and `files` are only present when they were requested. `icons` is empty when icons were not
/// requested or the package has none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpkContents {
    /// The `INFO` manifest
    pub info: Option<PackageInfo>,
    /// Icons, keyed by entry name
    pub icons: PackageIcons,
    /// Member names of `package.tgz`, in archive order
    pub files: Option<Vec<String>>,
}

impl SpkContents {
    /// Split into the manifest, icons and file list
    pub fn into_parts(self) -> (Option<PackageInfo>, PackageIcons, Option<Vec<String>>) {
        (self.info, self.icons, self.files)
    }
}
