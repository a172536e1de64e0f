use chrono::NaiveDate;
use zonedesk_types::{FilterKind, FilterMap, FilterValue};

use super::FilterCatalog;
use crate::error::FilterError;
use crate::staging::{SharedCell, Staged, StateCell, cell_or_owned};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Where an opening dialog takes its staged values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenSeed {
    /// Keep whatever staged copy was last active
    #[default]
    LastStaged,
    /// Start over from the committed filters
    Committed,
}

/// Advanced filter dialog with Apply/Cancel semantics.
///
/// The open flag and the staged map may be owned by an ancestor (pass
/// [`SharedCell`]s to [`FilterDialog::controlled`]) or by the dialog
/// itself. Every edit while open goes to a [`Staged`] session and is
/// mirrored into the staged cell; Cancel writes the pre-open snapshot back.
///
/// An owner that writes the open flag during a session (an outside click
/// closing the dialog, possibly reopening it) ends that session the same
/// way Cancel does. The dialog notices on its next call.
pub struct FilterDialog {
    open: Box<dyn StateCell<bool> + Send>,
    staged: Box<dyn StateCell<FilterMap> + Send>,
    session: Option<Staged<FilterMap>>,
    /// Open flag revision the current session last saw
    open_seen: u64,
}

impl Default for FilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterDialog {
    pub fn new() -> Self {
        Self::controlled(None, None)
    }

    pub fn controlled(open: Option<SharedCell<bool>>, staged: Option<SharedCell<FilterMap>>) -> Self {
        Self {
            open: cell_or_owned(open, false),
            staged: cell_or_owned(staged, FilterMap::new()),
            session: None,
            open_seen: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Values the dialog controls currently show.
    pub fn staged(&self) -> FilterMap {
        match &self.session {
            Some(session) if self.dismissed_by_owner() => session.baseline().clone(),
            Some(session) => session.working().clone(),
            None => self.staged.get(),
        }
    }

    fn dismissed_by_owner(&self) -> bool {
        self.session.is_some() && self.open.revision() != self.open_seen
    }

    /// Drop a session whose dialog the owner closed behind our back.
    fn reconcile(&mut self) {
        if !self.dismissed_by_owner() {
            return;
        }
        if let Some(session) = self.session.take() {
            self.staged.set(session.discard());
        }
        tracing::debug!("Filter dialog dismissed by owner, staged edits dropped");
    }

    fn begin_session(&mut self) {
        self.session = Some(Staged::begin(&self.staged.get()));
        self.open_seen = self.open.revision();
    }

    fn set_open(&mut self, open: bool) {
        self.open.set(open);
        self.open_seen = self.open.revision();
    }

    pub fn open(&mut self, seed: OpenSeed, committed: &FilterMap) {
        self.reconcile();
        if seed == OpenSeed::Committed {
            self.staged.set(committed.clone());
        }
        self.set_open(true);
        self.begin_session();
        tracing::debug!(?seed, "Filter dialog opened");
    }

    pub fn set_checkbox(&mut self, catalog: &FilterCatalog, key: &str, checked: bool) -> Result<(), FilterError> {
        catalog.require(key, &[FilterKind::Checkbox])?;
        self.edit(key, Some(FilterValue::Bool(checked)))
    }

    pub fn toggle_checkbox(&mut self, catalog: &FilterCatalog, key: &str) -> Result<bool, FilterError> {
        let checked = !self.staged().value(key).and_then(FilterValue::as_bool).unwrap_or(false);
        self.set_checkbox(catalog, key, checked)?;
        Ok(checked)
    }

    /// Pick a select option, or `None` to reset it.
    pub fn set_select(
        &mut self,
        catalog: &FilterCatalog,
        key: &str,
        value: Option<FilterValue>,
    ) -> Result<(), FilterError> {
        let def = catalog.require(key, &[FilterKind::Select])?;
        if let Some(v) = &value {
            // Selects without declared options are filled by the caller at runtime
            if !def.options.is_empty() && def.option_name(v).is_none() {
                return Err(FilterError::UnknownOption {
                    key: key.to_string(),
                    value: v.to_string(),
                });
            }
        }
        self.edit(key, value)
    }

    /// Free-text value for input, search and date filters. Blank text resets to null.
    pub fn set_input(&mut self, catalog: &FilterCatalog, key: &str, text: &str) -> Result<(), FilterError> {
        let def = catalog.require(key, &[FilterKind::Input, FilterKind::Search, FilterKind::Date])?;
        let text = text.trim();
        if text.is_empty() {
            return self.edit(key, None);
        }
        if def.kind == FilterKind::Date && NaiveDate::parse_from_str(text, DATE_FORMAT).is_err() {
            return Err(FilterError::InvalidDate {
                key: key.to_string(),
                value: text.to_string(),
            });
        }
        self.edit(key, Some(FilterValue::text(text)))
    }

    pub fn set_date(
        &mut self,
        catalog: &FilterCatalog,
        key: &str,
        date: Option<NaiveDate>,
    ) -> Result<(), FilterError> {
        catalog.require(key, &[FilterKind::Date])?;
        let value = date.map(|d| FilterValue::Text(d.format(DATE_FORMAT).to_string()));
        self.edit(key, value)
    }

    /// Reset one staged filter the same way removing its chip would.
    pub fn unset(&mut self, catalog: &FilterCatalog, key: &str) -> Result<(), FilterError> {
        let def = catalog
            .definition(key)
            .ok_or_else(|| FilterError::UnknownFilter(key.to_string()))?;
        self.edit(key, def.kind.reset_value())
    }

    fn edit(&mut self, key: &str, value: Option<FilterValue>) -> Result<(), FilterError> {
        self.reconcile();
        if !self.open.get() {
            return Err(FilterError::DialogClosed);
        }
        // An ancestor may have opened the dialog without going through open()
        if self.session.is_none() {
            self.begin_session();
        }
        if let Some(session) = self.session.as_mut() {
            session.stage().set(key, value);
            self.staged.set(session.working().clone());
        }
        Ok(())
    }

    /// Commit the staged values verbatim and close. Returns `false` if the dialog was closed.
    pub fn apply(&mut self, committed: &mut FilterMap) -> bool {
        self.reconcile();
        if !self.open.get() {
            return false;
        }
        let session = self
            .session
            .take()
            .unwrap_or_else(|| Staged::begin(&self.staged.get()));
        session.apply(committed);
        self.staged.set(committed.clone());
        self.set_open(false);
        tracing::debug!(active = committed.active_count(), "Filters applied");
        true
    }

    /// Close without committing, dropping every edit made since open.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            self.staged.set(session.discard());
        }
        self.set_open(false);
        tracing::debug!("Filter dialog cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use zonedesk_types::{FilterDefinition, FilterGroup, FilterOption};

    fn catalog() -> FilterCatalog {
        FilterCatalog::new(vec![FilterGroup {
            title: "Carriers".to_string(),
            items: vec![
                FilterDefinition::new("active", FilterKind::Checkbox, "Active"),
                FilterDefinition::new("status", FilterKind::Select, "Status").with_options(vec![
                    FilterOption { id: "active".into(), name: "Active".to_string() },
                    FilterOption { id: "paused".into(), name: "Paused".to_string() },
                ]),
                FilterDefinition::new("since", FilterKind::Date, "Since"),
                FilterDefinition::new("phone", FilterKind::Input, "Phone"),
            ],
        }])
    }

    fn mutate(dialog: &mut FilterDialog, catalog: &FilterCatalog) {
        dialog.toggle_checkbox(catalog, "active").unwrap();
        dialog.set_select(catalog, "status", Some("paused".into())).unwrap();
        dialog.set_input(catalog, "phone", "555").unwrap();
        dialog
            .set_date(catalog, "since", NaiveDate::from_ymd_opt(2024, 3, 1))
            .unwrap();
    }

    #[test]
    fn test_cancel_leaves_committed_untouched() {
        let catalog = catalog();
        let mut committed = FilterMap::new().with("status", Some("active".into()));
        let before = committed.clone();
        let mut dialog = FilterDialog::new();

        dialog.open(OpenSeed::Committed, &committed);
        mutate(&mut dialog, &catalog);
        dialog.cancel();

        assert_eq!(committed, before);
        assert!(!dialog.is_open());
        // Nothing staged survives into the next session
        assert_eq!(dialog.staged(), before);
        assert!(!dialog.apply(&mut committed));
    }

    #[test]
    fn test_apply_commits_final_staged_state() {
        let catalog = catalog();
        let mut committed = FilterMap::new();
        let mut dialog = FilterDialog::new();

        dialog.open(OpenSeed::LastStaged, &committed);
        mutate(&mut dialog, &catalog);
        let staged = dialog.staged();
        assert!(committed.is_empty());

        assert!(dialog.apply(&mut committed));
        assert_eq!(committed, staged);
        assert_eq!(committed.value("since"), Some(&FilterValue::text("2024-03-01")));
        assert_eq!(committed.value("active"), Some(&FilterValue::Bool(true)));
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_edits_while_closed_are_refused() {
        let mut dialog = FilterDialog::new();
        let err = dialog.set_checkbox(&catalog(), "active", true).unwrap_err();
        assert_eq!(err, FilterError::DialogClosed);
    }

    #[test]
    fn test_invalid_edits_are_refused() {
        let catalog = catalog();
        let mut dialog = FilterDialog::new();
        dialog.open(OpenSeed::LastStaged, &FilterMap::new());

        assert!(matches!(
            dialog.set_select(&catalog, "status", Some("archived".into())),
            Err(FilterError::UnknownOption { .. })
        ));
        assert!(matches!(
            dialog.set_input(&catalog, "since", "31/01/2024"),
            Err(FilterError::InvalidDate { .. })
        ));
        assert!(matches!(
            dialog.set_checkbox(&catalog, "phone", true),
            Err(FilterError::KindMismatch { .. })
        ));
        assert!(matches!(
            dialog.unset(&catalog, "nope"),
            Err(FilterError::UnknownFilter(_))
        ));
        assert!(dialog.staged().is_empty());
    }

    #[test]
    fn test_blank_input_resets_to_null() {
        let catalog = catalog();
        let mut dialog = FilterDialog::new();
        dialog.open(OpenSeed::LastStaged, &FilterMap::new());

        dialog.set_input(&catalog, "phone", "555").unwrap();
        dialog.set_input(&catalog, "phone", "   ").unwrap();
        assert_eq!(dialog.staged().get("phone"), Some(&None));
    }

    #[test]
    fn test_last_staged_seed_keeps_applied_values() {
        let catalog = catalog();
        let mut committed = FilterMap::new();
        let mut dialog = FilterDialog::new();

        dialog.open(OpenSeed::LastStaged, &committed);
        dialog.set_checkbox(&catalog, "active", true).unwrap();
        dialog.apply(&mut committed);

        committed.clear();
        dialog.open(OpenSeed::LastStaged, &committed);
        assert!(dialog.staged().is_active("active"));

        dialog.cancel();
        dialog.open(OpenSeed::Committed, &committed);
        assert!(dialog.staged().is_empty());
    }

    #[test]
    fn test_controlled_dialog_shares_state_with_owner() {
        let catalog = catalog();
        let open = SharedCell::new(false);
        let staged = SharedCell::new(FilterMap::new());
        let mut dialog = FilterDialog::controlled(Some(open.clone()), Some(staged.clone()));

        // Ancestor opens the dialog directly
        open.update(|o| *o = true);
        assert!(dialog.is_open());

        dialog.set_checkbox(&catalog, "active", true).unwrap();
        assert!(StateCell::get(&staged).is_active("active"));

        dialog.cancel();
        assert!(!StateCell::get(&open));
        assert!(StateCell::get(&staged).is_empty());
    }

    #[test]
    fn test_owner_close_and_reopen_drops_staged_edits() {
        let catalog = catalog();
        let open = SharedCell::new(false);
        let staged = SharedCell::new(FilterMap::new());
        let mut dialog = FilterDialog::controlled(Some(open.clone()), Some(staged.clone()));
        let mut committed = FilterMap::new();

        open.update(|o| *o = true);
        dialog.set_checkbox(&catalog, "active", true).unwrap();
        // Outside click closes, then the owner reopens without telling the dialog
        open.update(|o| *o = false);
        open.update(|o| *o = true);
        assert!(!dialog.staged().is_active("active"));

        dialog.set_input(&catalog, "phone", "5").unwrap();
        assert!(!StateCell::get(&staged).is_active("active"));
        assert!(dialog.apply(&mut committed));
        assert_eq!(committed, FilterMap::new().with("phone", Some(FilterValue::text("5"))));
    }

    #[test]
    fn test_owner_close_then_open_starts_from_pre_open_values() {
        let catalog = catalog();
        let open = SharedCell::new(false);
        let staged = SharedCell::new(FilterMap::new());
        let mut dialog = FilterDialog::controlled(Some(open.clone()), Some(staged.clone()));
        let mut committed = FilterMap::new();

        dialog.open(OpenSeed::LastStaged, &committed);
        dialog.set_checkbox(&catalog, "active", true).unwrap();
        open.update(|o| *o = false);

        assert!(!dialog.is_open());
        assert!(!dialog.staged().is_active("active"));
        assert_eq!(dialog.set_checkbox(&catalog, "active", true), Err(FilterError::DialogClosed));
        assert!(!StateCell::get(&staged).is_active("active"));

        dialog.open(OpenSeed::LastStaged, &committed);
        dialog.set_input(&catalog, "phone", "5").unwrap();
        assert!(dialog.apply(&mut committed));
        assert!(!committed.contains_key("active"));
        assert_eq!(committed.value("phone"), Some(&FilterValue::text("5")));
    }

    #[test]
    fn test_controlled_and_owned_behave_the_same() {
        let catalog = catalog();
        let mut owned = FilterDialog::new();
        let mut controlled = FilterDialog::controlled(
            Some(SharedCell::new(false)),
            Some(SharedCell::new(FilterMap::new())),
        );
        let mut committed_a = FilterMap::new();
        let mut committed_b = FilterMap::new();

        for (dialog, committed) in [(&mut owned, &mut committed_a), (&mut controlled, &mut committed_b)] {
            dialog.open(OpenSeed::LastStaged, committed);
            mutate(dialog, &catalog);
            dialog.apply(committed);
        }

        assert_eq!(committed_a, committed_b);
        assert_eq!(owned.staged(), controlled.staged());
    }

    #[derive(Debug, Clone)]
    enum Edit {
        Toggle,
        Status(Option<&'static str>),
        Phone(String),
        Since(Option<u32>),
        Unset(&'static str),
    }

    fn arb_edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            Just(Edit::Toggle),
            prop_oneof![Just(None), Just(Some("active")), Just(Some("paused"))].prop_map(Edit::Status),
            "[ 0-9]{0,4}".prop_map(Edit::Phone),
            prop::option::of(1u32..29).prop_map(Edit::Since),
            prop_oneof![Just("active"), Just("status"), Just("since"), Just("phone")].prop_map(Edit::Unset),
        ]
    }

    fn arb_committed() -> impl Strategy<Value = FilterMap> {
        (any::<bool>(), prop_oneof![Just(None), Just(Some("active")), Just(Some("paused"))]).prop_map(
            |(active, status)| {
                FilterMap::new()
                    .with("active", Some(active.into()))
                    .with("status", status.map(FilterValue::from))
            },
        )
    }

    fn arb_seed() -> impl Strategy<Value = OpenSeed> {
        prop_oneof![Just(OpenSeed::LastStaged), Just(OpenSeed::Committed)]
    }

    fn run(dialog: &mut FilterDialog, catalog: &FilterCatalog, edit: &Edit) {
        let result = match edit {
            Edit::Toggle => dialog.toggle_checkbox(catalog, "active").map(drop),
            Edit::Status(v) => dialog.set_select(catalog, "status", v.map(FilterValue::from)),
            Edit::Phone(text) => dialog.set_input(catalog, "phone", text),
            Edit::Since(day) => dialog.set_date(
                catalog,
                "since",
                day.and_then(|d| NaiveDate::from_ymd_opt(2024, 2, d)),
            ),
            Edit::Unset(key) => dialog.unset(catalog, key),
        };
        assert!(result.is_ok(), "{edit:?}: {result:?}");
    }

    /// Dialog plus the owner's handle on its staged map, when controlled.
    fn dialog_for(controlled: bool) -> (FilterDialog, Option<SharedCell<FilterMap>>) {
        if controlled {
            let staged = SharedCell::new(FilterMap::new());
            let dialog = FilterDialog::controlled(Some(SharedCell::new(false)), Some(staged.clone()));
            (dialog, Some(staged))
        } else {
            (FilterDialog::new(), None)
        }
    }

    proptest! {
        #[test]
        fn test_cancel_after_any_edits_restores_pre_open_state(
            controlled in any::<bool>(),
            seed in arb_seed(),
            mut committed in arb_committed(),
            edits in prop::collection::vec(arb_edit(), 0..12),
        ) {
            let catalog = catalog();
            let (mut dialog, owner) = dialog_for(controlled);
            let before = committed.clone();
            let pre_open = match seed {
                OpenSeed::Committed => committed.clone(),
                OpenSeed::LastStaged => dialog.staged(),
            };

            dialog.open(seed, &committed);
            for edit in &edits {
                run(&mut dialog, &catalog, edit);
            }
            dialog.cancel();

            prop_assert_eq!(&committed, &before);
            prop_assert_eq!(dialog.staged(), pre_open.clone());
            if let Some(owner) = owner {
                prop_assert_eq!(StateCell::get(&owner), pre_open);
            }
            prop_assert!(!dialog.is_open());
            prop_assert!(!dialog.apply(&mut committed));
        }

        #[test]
        fn test_apply_after_any_edits_commits_staged_state(
            controlled in any::<bool>(),
            seed in arb_seed(),
            mut committed in arb_committed(),
            edits in prop::collection::vec(arb_edit(), 0..12),
        ) {
            let catalog = catalog();
            let (mut dialog, owner) = dialog_for(controlled);

            dialog.open(seed, &committed);
            for edit in &edits {
                run(&mut dialog, &catalog, edit);
            }
            let expected = dialog.staged();

            prop_assert!(dialog.apply(&mut committed));
            prop_assert_eq!(&committed, &expected);
            prop_assert_eq!(dialog.staged(), expected.clone());
            if let Some(owner) = owner {
                prop_assert_eq!(StateCell::get(&owner), expected);
            }
            prop_assert!(!dialog.is_open());
        }
    }
}
