use zonedesk_types::FilterMap;

use super::chips::{self, ChipRow};
use super::{FilterCatalog, FilterDialog, OpenSeed};
use crate::events::DashboardSignal;

/// Committed filters with their chip row, advanced dialog and add action.
///
/// Commits happen through exactly three paths: dialog Apply, Clear, and
/// chip removal. Chip removal writes straight to the committed map and
/// skips the staged copy, so a later Apply of an older staged copy can
/// bring a removed filter back.
pub struct FilterBar {
    catalog: FilterCatalog,
    committed: FilterMap,
    dialog: FilterDialog,
    max_visible_chips: usize,
}

impl FilterBar {
    pub fn new(catalog: FilterCatalog, max_visible_chips: usize) -> Self {
        Self::with_dialog(catalog, max_visible_chips, FilterDialog::new())
    }

    /// Use a dialog whose open flag or staged map is owned elsewhere.
    pub fn with_dialog(catalog: FilterCatalog, max_visible_chips: usize, dialog: FilterDialog) -> Self {
        Self {
            catalog,
            committed: FilterMap::new(),
            dialog,
            max_visible_chips,
        }
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    pub fn committed(&self) -> &FilterMap {
        &self.committed
    }

    pub fn dialog(&self) -> &FilterDialog {
        &self.dialog
    }

    /// Show the "Filters" button only when there is something to filter by
    pub fn has_filters(&self) -> bool {
        !self.catalog.is_empty()
    }

    pub fn chips(&self) -> ChipRow {
        chips::derive_chips(&self.committed, &self.catalog, self.max_visible_chips)
    }

    pub fn open_dialog(&mut self, seed: OpenSeed) {
        self.dialog.open(seed, &self.committed);
    }

    /// The "+N more" button opens the full dialog.
    pub fn open_overflow(&mut self) {
        self.open_dialog(OpenSeed::LastStaged);
    }

    /// Staged edits go through the dialog with the bar's catalog.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut FilterDialog, &FilterCatalog) -> R) -> R {
        f(&mut self.dialog, &self.catalog)
    }

    pub fn apply(&mut self) -> Option<DashboardSignal> {
        self.dialog
            .apply(&mut self.committed)
            .then_some(DashboardSignal::RefreshRequested)
    }

    pub fn cancel(&mut self) {
        self.dialog.cancel();
    }

    /// Reset committed filters to empty, whether or not the dialog is open.
    pub fn clear(&mut self) -> DashboardSignal {
        self.committed.clear();
        tracing::debug!("Filters cleared");
        DashboardSignal::RefreshRequested
    }

    /// Remove one chip. `None` when the key has no declaration.
    pub fn remove_chip(&mut self, key: &str) -> Option<DashboardSignal> {
        if !chips::remove_chip(&mut self.committed, &self.catalog, key) {
            return None;
        }
        tracing::debug!(key, "Filter chip removed");
        Some(DashboardSignal::RefreshRequested)
    }

    pub fn click_add(&self) -> DashboardSignal {
        DashboardSignal::OpenCreateForm
    }
}
