//! Ordered hierarchical key/value tree.
//!
//! A [`Section`] mirrors the shape of the host's configuration files: named
//! child sections and scalar or list leaves, addressed by dotted paths such
//! as `actions.0.type`. Insertion order is preserved, so index-keyed lists
//! (`0`, `1`, ... `10`) load back in the order they were saved.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Result, RuleError};

/// A leaf or child section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Section(Section),
}

impl Value {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Self::Section(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Section> for Value {
    fn from(value: Section) -> Self {
        Self::Section(value)
    }
}

/// A named-key section of the configuration tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    entries: Vec<(String, Value)>,
}

impl Section {
    /// Create an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct child keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Direct children, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn child(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn child_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn insert(&mut self, key: &str, value: Value) {
        match self.child_mut(key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Child section at `key`, replacing any leaf stored there.
    fn child_section_mut(&mut self, key: &str) -> &mut Section {
        let idx = match self.entries.iter().position(|(k, _)| k == key) {
            Some(idx) => idx,
            None => {
                self.entries.push((key.to_string(), Value::Section(Section::new())));
                self.entries.len() - 1
            }
        };
        force_section(&mut self.entries[idx].1)
    }

    /// Look up a value by dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.child(parts.next()?)?;
        for part in parts {
            current = current.as_section()?.child(part)?;
        }
        Some(current)
    }

    /// True if any value exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Set a value, creating intermediate sections as needed.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let value = value.into();
        match path.rsplit_once('.') {
            Some((parent, key)) => self.section_or_create(parent).insert(key, value),
            None => self.insert(path, value),
        }
    }

    /// Remove and return the value at `path`.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let (parent, key) = match path.rsplit_once('.') {
            Some((parent, key)) => (self.section_mut(parent)?, key),
            None => (self, path),
        };
        let idx = parent.entries.iter().position(|(k, _)| k == key)?;
        Some(parent.entries.remove(idx).1)
    }

    /// Child section at `path`.
    #[must_use]
    pub fn section(&self, path: &str) -> Option<&Section> {
        self.get(path)?.as_section()
    }

    /// Mutable child section at `path`, if it exists.
    pub fn section_mut(&mut self, path: &str) -> Option<&mut Section> {
        let mut current = self;
        for part in path.split('.') {
            current = match current.child_mut(part)? {
                Value::Section(section) => section,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Mutable child section at `path`, creating it if needed.
    pub fn section_or_create(&mut self, path: &str) -> &mut Section {
        let mut current = self;
        for part in path.split('.') {
            current = current.child_section_mut(part);
        }
        current
    }

    /// Replace whatever is at `path` with a fresh empty section.
    pub fn create_section(&mut self, path: &str) -> &mut Section {
        self.set(path, Section::new());
        self.section_or_create(path)
    }

    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str()
    }

    #[must_use]
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path)?.as_i64()
    }

    #[must_use]
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path)?.as_f64()
    }

    #[must_use]
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    /// String at `path`, or a malformed-configuration error.
    pub fn require_str(&self, path: &str) -> Result<&str> {
        match self.get(path) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(RuleError::malformed(path, format!("expected string, found {:?}", other))),
            None => Err(RuleError::malformed(path, "missing field")),
        }
    }

    /// Integer at `path` if present; errors only on a wrong type.
    pub fn optional_i64(&self, path: &str) -> Result<Option<i64>> {
        match self.get(path) {
            None => Ok(None),
            Some(Value::Int(i)) => Ok(Some(*i)),
            Some(other) => Err(RuleError::malformed(path, format!("expected integer, found {:?}", other))),
        }
    }

    /// Boolean at `path` if present; errors only on a wrong type.
    pub fn optional_bool(&self, path: &str) -> Result<Option<bool>> {
        match self.get(path) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(RuleError::malformed(path, format!("expected boolean, found {:?}", other))),
        }
    }
}

/// The section held in `slot`, replacing a leaf with an empty section.
fn force_section(slot: &mut Value) -> &mut Section {
    match slot {
        Value::Section(section) => section,
        other => {
            *other = Value::Section(Section::new());
            force_section(other)
        }
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct SectionVisitor;

impl<'de> Visitor<'de> for SectionVisitor {
    type Value = Section;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map of configuration keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Section, A::Error> {
        let mut section = Section::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            section.insert(&key, value);
        }
        Ok(section)
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SectionVisitor)
    }
}
