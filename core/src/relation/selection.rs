use zonedesk_types::{Zone, ZoneId, ZoneSet};

use super::ZoneCatalog;
use crate::error::RelationError;
use crate::staging::Staged;

/// One checkbox row of the selection dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRow<'a> {
    pub zone: &'a Zone,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRows<'a> {
    /// The catalog has no zones; render the "no zones available" row
    Empty,
    Rows(Vec<SelectionRow<'a>>),
}

/// Bulk zone picker working on a staged copy of the association set.
///
/// Opening snapshots the current working set (including quick-add picks),
/// toggles only touch the snapshot, and save swaps it in as a whole.
#[derive(Debug, Clone, Default)]
pub struct ZoneSelectionDialog {
    staged: Option<Staged<ZoneSet>>,
}

impl ZoneSelectionDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.staged.is_some()
    }

    pub fn open(&mut self, working: &ZoneSet) {
        self.staged = Some(Staged::begin(working));
        tracing::debug!(assigned = working.len(), "Zone selection opened");
    }

    pub fn is_selected(&self, id: ZoneId) -> bool {
        self.staged.as_ref().is_some_and(|s| s.working().contains(id))
    }

    /// Flip one zone in the staged set, returning its new membership.
    pub fn toggle(&mut self, catalog: &ZoneCatalog, id: ZoneId) -> Result<bool, RelationError> {
        let staged = self.staged.as_mut().ok_or(RelationError::SelectionClosed)?;
        if !catalog.contains(id) {
            return Err(RelationError::UnknownZone(id));
        }
        Ok(staged.stage().toggle(id))
    }

    pub fn rows<'a>(&self, catalog: &'a ZoneCatalog) -> SelectionRows<'a> {
        if catalog.is_empty() {
            return SelectionRows::Empty;
        }
        SelectionRows::Rows(
            catalog
                .iter()
                .map(|zone| SelectionRow {
                    zone,
                    selected: self.is_selected(zone.id),
                })
                .collect(),
        )
    }

    /// Replace the working set with the staged one and close.
    pub fn save(&mut self, working: &mut ZoneSet) -> Result<(), RelationError> {
        let staged = self.staged.take().ok_or(RelationError::SelectionClosed)?;
        staged.apply(working);
        tracing::debug!(assigned = working.len(), "Zone selection saved");
        Ok(())
    }

    /// Close and forget every toggle made since open.
    pub fn cancel(&mut self) {
        if self.staged.take().is_some() {
            tracing::debug!("Zone selection cancelled");
        }
    }
}
