//! Active filter chips
//!
//! A chip is shown for every committed filter holding a value other than
//! null or `false`. Only the first few are shown; the rest collapse into an
//! overflow button that opens the filter dialog.

use zonedesk_types::{FilterKind, FilterMap, FilterValue};

use super::FilterCatalog;

/// One removable chip in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub key: String,
    pub label: String,
    /// Value text after the label; checkboxes show none
    pub value: Option<String>,
    /// `None` when the committed key has no declaration in the catalog
    pub kind: Option<FilterKind>,
}

/// The visible chips plus the number of active filters left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipRow {
    pub chips: Vec<FilterChip>,
    pub overflow: Option<usize>,
}

impl ChipRow {
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// e.g. "+2 more"
    pub fn overflow_label(&self, more: &str) -> Option<String> {
        self.overflow.map(|n| format!("+{} {}", n, more))
    }
}

pub fn derive_chips(filters: &FilterMap, catalog: &FilterCatalog, max_visible: usize) -> ChipRow {
    let active: Vec<(&str, &FilterValue)> = filters.active().collect();
    let overflow = active.len().checked_sub(max_visible).filter(|&n| n > 0);

    let chips = active
        .into_iter()
        .take(max_visible)
        .map(|(key, value)| chip_for(catalog, key, value))
        .collect();

    ChipRow { chips, overflow }
}

fn chip_for(catalog: &FilterCatalog, key: &str, value: &FilterValue) -> FilterChip {
    let Some(def) = catalog.definition(key) else {
        return FilterChip {
            key: key.to_string(),
            label: key.to_string(),
            value: Some(value.to_string()),
            kind: None,
        };
    };

    let value = match def.kind {
        FilterKind::Checkbox => None,
        FilterKind::Select => Some(
            def.option_name(value)
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string()),
        ),
        FilterKind::Date | FilterKind::Input | FilterKind::Search => Some(value.to_string()),
    };

    FilterChip {
        key: key.to_string(),
        label: def.display_label().to_string(),
        value,
        kind: Some(def.kind),
    }
}

/// Reset the committed value behind a chip.
///
/// Checkboxes reset to `false`, everything else to null. Returns `false`
/// (and changes nothing) for keys without a declaration.
pub fn remove_chip(filters: &mut FilterMap, catalog: &FilterCatalog, key: &str) -> bool {
    let Some(def) = catalog.definition(key) else {
        return false;
    };
    filters.set(key, def.kind.reset_value());
    true
}
