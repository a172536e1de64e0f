use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::zone::{Zone, ZoneSet};

/// Server-assigned carrier identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarrierId(pub i64);

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-editable part of a carrier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierFields {
    pub name: String,
    pub phone: String,
}

impl CarrierFields {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn get(&self, field: CarrierField) -> &str {
        match field {
            CarrierField::Name => &self.name,
            CarrierField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: CarrierField, value: String) {
        match field {
            CarrierField::Name => self.name = value,
            CarrierField::Phone => self.phone = value,
        }
    }
}

/// A saved carrier as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: CarrierId,
    pub name: String,
    pub phone: String,
}

impl Carrier {
    pub fn fields(&self) -> CarrierFields {
        CarrierFields::new(self.name.clone(), self.phone.clone())
    }
}

/// Everything needed to open a carrier for editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierRecord {
    pub carrier: Carrier,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub carrier_zones: ZoneSet,
}

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarrierField {
    Name,
    Phone,
}

impl CarrierField {
    pub fn all() -> &'static [CarrierField] {
        &[CarrierField::Name, CarrierField::Phone]
    }

    /// Key used by the server in validation payloads
    pub fn key(&self) -> &'static str {
        match self {
            CarrierField::Name => "name",
            CarrierField::Phone => "phone",
        }
    }
}

/// Per-field validation messages keyed by field name.
///
/// Keys are kept as strings because the server may report fields this
/// dashboard does not render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.0.insert(key.into(), message.into());
        self
    }

    pub fn get(&self, field: CarrierField) -> Option<&str> {
        self.0.get(field.key()).map(String::as_str)
    }

    pub fn set(&mut self, field: CarrierField, message: impl Into<String>) {
        self.0.insert(field.key().to_string(), message.into());
    }

    pub fn clear_field(&mut self, field: CarrierField) {
        self.0.remove(field.key());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
