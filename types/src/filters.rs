//! Filter catalog and filter value types.
//!
//! A [`FilterMap`] distinguishes three states per key:
//! - key missing: the filter was never touched ("undefined")
//! - `None`: the filter was explicitly reset ("null")
//! - `Some(value)`: the filter holds a value
//!
//! A filter counts as active when it holds a value other than `false`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Control type of a filter. Decides how values are shown and reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Checkbox,
    Select,
    Date,
    Input,
    Search,
}

impl FilterKind {
    /// Value a filter of this kind takes when it is removed.
    ///
    /// Checkboxes go back to `false`, every other kind to null.
    pub fn reset_value(&self) -> Option<FilterValue> {
        match self {
            FilterKind::Checkbox => Some(FilterValue::Bool(false)),
            _ => None,
        }
    }
}

/// A single filter value. Dates are stored as ISO `YYYY-MM-DD` text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    /// `false` counts as absent; `0` and `""` do not.
    pub fn is_active(&self) -> bool {
        !matches!(self, FilterValue::Bool(false))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FilterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

/// One choice of a `select` filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: FilterValue,
    pub name: String,
}

/// Declaration of a single filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub key: String,
    pub kind: FilterKind,
    #[serde(default)]
    pub label: Option<String>,
    /// Choices for `select` filters
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl FilterDefinition {
    pub fn new(key: impl Into<String>, kind: FilterKind, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            label: Some(label.into()),
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<FilterOption>) -> Self {
        self.options = options;
        self
    }

    /// Label shown on chips, falling back to the key.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    /// Resolve a select value to its option name.
    pub fn option_name(&self, value: &FilterValue) -> Option<&str> {
        self.options
            .iter()
            .find(|o| &o.id == value)
            .map(|o| o.name.as_str())
    }
}

/// A titled section of the filter dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub title: String,
    #[serde(default)]
    pub items: Vec<FilterDefinition>,
}

/// Filter key to value mapping, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterMap(BTreeMap<String, Option<FilterValue>>);

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: Option<FilterValue>) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// `None` when the key was never set, `Some(None)` when it is null.
    pub fn get(&self, key: &str) -> Option<&Option<FilterValue>> {
        self.0.get(key)
    }

    /// The value for `key`, treating missing and null alike.
    pub fn value(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key).and_then(Option::as_ref)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Option<FilterValue>) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.value(key).is_some_and(FilterValue::is_active)
    }

    /// Active entries in key order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().filter_map(|(k, v)| match v {
            Some(v) if v.is_active() => Some((k.as_str(), v)),
            _ => None,
        })
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FilterValue>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
