use zonedesk_types::{Zone, ZoneId, ZoneSet};

use super::ZoneCatalog;
use crate::error::RelationError;

/// Single-zone picker that only offers zones not yet assigned.
#[derive(Debug, Clone, Default)]
pub struct QuickAddSelector {
    /// Transient combobox text, cleared after every pick
    text: String,
}

impl QuickAddSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Unassigned zones in catalog order, narrowed by the typed text.
    pub fn options<'a>(&self, catalog: &'a ZoneCatalog, working: &ZoneSet) -> Vec<&'a Zone> {
        let needle = self.text.trim().to_lowercase();
        catalog
            .iter()
            .filter(|z| !working.contains(z.id))
            .filter(|z| needle.is_empty() || z.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Validate a pick and clear the text. The caller adds the returned id.
    pub fn select(
        &mut self,
        catalog: &ZoneCatalog,
        working: &ZoneSet,
        id: ZoneId,
    ) -> Result<ZoneId, RelationError> {
        if !catalog.contains(id) {
            return Err(RelationError::UnknownZone(id));
        }
        if working.contains(id) {
            return Err(RelationError::AlreadyAssigned(id));
        }
        self.text.clear();
        Ok(id)
    }
}
