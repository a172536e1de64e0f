//! Carrier form controller
//!
//! Owns the working copy of one edit session: the carrier fields, the zone
//! catalog loaded with it, and the association set the relation editor
//! mutates. Nothing reaches a service until submit.
//!
//! ```text
//!            open_create()                     finish_load(Ok)
//!   Closed ───────────────────────▶ Ready ◀──────────────── Loading
//!     │  ▲                          │   ▲                      ▲
//!     │  └── finish_load(Err) ──────┼───┼──────────────────────┤
//!     │                             │   │ validation / failure │
//!     └──── begin_edit(id) ─────────┼───┼──────────────────────┘
//!                  begin_submit()   ▼   │
//!                               Submitting ── success ──▶ Closed
//! ```

use zonedesk_types::{
    Carrier, CarrierField, CarrierFields, CarrierId, CarrierRecord, FieldErrors, Zone, ZoneId,
    ZoneSet,
};

use crate::config::Messages;
use crate::error::{FormError, RelationError, ServiceError};
use crate::events::DashboardSignal;
use crate::relation::{
    QuickAddSelector, RelatedRows, SelectionRows, ZoneCatalog, ZoneSelectionDialog, related_rows,
    remove_related,
};
use crate::service::{Notice, Notifier, RecordService, WriteService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Loading {
        id: CarrierId,
    },
    Ready,
    Submitting,
}

/// Identifies the fetch started by [`CarrierForm::begin_edit`].
///
/// Results for a ticket from an older session are dropped, so a slow fetch
/// can never fill a form that was closed or reopened in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub id: CarrierId,
    session: u64,
}

/// Snapshot of the working copy sent on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// `None` creates a carrier, `Some` updates it
    pub id: Option<CarrierId>,
    pub fields: CarrierFields,
    pub zones: ZoneSet,
}

impl SubmitRequest {
    pub async fn send<S: WriteService>(&self, service: &S) -> Result<Carrier, ServiceError> {
        match self.id {
            Some(id) => service.update(id, &self.fields, &self.zones).await,
            None => service.create(&self.fields).await,
        }
    }
}

pub struct CarrierForm {
    state: FormState,
    edit_id: Option<CarrierId>,
    session: u64,
    fields: CarrierFields,
    zones: ZoneSet,
    catalog: ZoneCatalog,
    errors: FieldErrors,
    quick_add: QuickAddSelector,
    selection: ZoneSelectionDialog,
    messages: Messages,
}

impl CarrierForm {
    pub fn new(messages: Messages) -> Self {
        Self {
            state: FormState::Closed,
            edit_id: None,
            session: 0,
            fields: CarrierFields::default(),
            zones: ZoneSet::new(),
            catalog: ZoneCatalog::default(),
            errors: FieldErrors::new(),
            quick_add: QuickAddSelector::new(),
            selection: ZoneSelectionDialog::new(),
            messages,
        }
    }

    // --- Accessors ---

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != FormState::Closed
    }

    pub fn edit_id(&self) -> Option<CarrierId> {
        self.edit_id
    }

    pub fn fields(&self) -> &CarrierFields {
        &self.fields
    }

    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: CarrierField) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn title(&self) -> &'static str {
        if self.edit_id.is_some() {
            "Edit carrier"
        } else {
            "Create carrier"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.state == FormState::Submitting {
            "Saving..."
        } else {
            "Save"
        }
    }

    /// Inputs and buttons are disabled while a round-trip is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self.state, FormState::Loading { .. } | FormState::Submitting)
    }

    // --- Opening and closing ---

    fn reset(&mut self) {
        self.session += 1;
        self.edit_id = None;
        self.fields = CarrierFields::default();
        self.zones.clear();
        self.catalog = ZoneCatalog::default();
        self.errors = FieldErrors::new();
        self.quick_add = QuickAddSelector::new();
        self.selection.cancel();
    }

    /// Open with empty fields and no zones.
    pub fn open_create(&mut self) {
        self.reset();
        self.state = FormState::Ready;
        tracing::debug!("Carrier form opened for create");
    }

    pub fn begin_edit(&mut self, id: CarrierId) -> LoadTicket {
        self.reset();
        self.edit_id = Some(id);
        self.state = FormState::Loading { id };
        tracing::debug!(carrier_id = %id, "Carrier form loading");
        LoadTicket {
            id,
            session: self.session,
        }
    }

    /// Apply a fetch result. Returns whether the form reached `Ready`.
    pub fn finish_load<N: Notifier>(
        &mut self,
        ticket: LoadTicket,
        result: Result<CarrierRecord, ServiceError>,
        notifier: &N,
    ) -> bool {
        if ticket.session != self.session || self.state != (FormState::Loading { id: ticket.id }) {
            tracing::debug!(carrier_id = %ticket.id, "Dropping stale carrier fetch");
            return false;
        }

        match result {
            Ok(record) => {
                self.fields = record.carrier.fields();
                self.catalog = ZoneCatalog::new(record.zones);
                self.zones = record.carrier_zones;
                let dropped = self.catalog.restrict(&mut self.zones);
                if dropped > 0 {
                    tracing::warn!(carrier_id = %ticket.id, dropped, "Carrier references zones missing from catalog");
                }
                self.state = FormState::Ready;
                true
            }
            Err(e) => {
                tracing::warn!(carrier_id = %ticket.id, error = %e, "Failed to load carrier");
                notifier.notify(Notice::destructive(
                    &self.messages.error_title,
                    &self.messages.load_failed,
                ));
                self.close();
                false
            }
        }
    }

    /// Fetch `id` and open it for editing.
    pub async fn open_edit<S: RecordService, N: Notifier>(
        &mut self,
        id: CarrierId,
        service: &S,
        notifier: &N,
    ) -> bool {
        let ticket = self.begin_edit(id);
        let result = service.fetch(id).await;
        self.finish_load(ticket, result, notifier)
    }

    /// Discard the working copy.
    pub fn close(&mut self) {
        self.reset();
        self.state = FormState::Closed;
    }

    // --- Field edits ---

    pub fn set_field(&mut self, field: CarrierField, value: impl Into<String>) -> Result<(), FormError> {
        if self.state != FormState::Ready {
            return Err(FormError::NotReady);
        }
        self.fields.set(field, value.into());
        self.errors.clear_field(field);
        Ok(())
    }

    // --- Zone relation editing ---

    fn ensure_editable(&self) -> Result<(), RelationError> {
        if self.state == FormState::Ready {
            Ok(())
        } else {
            Err(RelationError::NotEditable)
        }
    }

    pub fn quick_add_text(&self) -> &str {
        self.quick_add.text()
    }

    pub fn set_quick_add_text(&mut self, text: impl Into<String>) {
        self.quick_add.set_text(text);
    }

    pub fn quick_add_options(&self) -> Vec<&Zone> {
        self.quick_add.options(&self.catalog, &self.zones)
    }

    pub fn quick_add(&mut self, id: ZoneId) -> Result<(), RelationError> {
        self.ensure_editable()?;
        let id = self.quick_add.select(&self.catalog, &self.zones, id)?;
        self.zones.insert(id);
        Ok(())
    }

    pub fn zone_dialog_open(&self) -> bool {
        self.selection.is_open()
    }

    pub fn open_zone_dialog(&mut self) -> Result<(), RelationError> {
        self.ensure_editable()?;
        self.selection.open(&self.zones);
        Ok(())
    }

    pub fn toggle_zone(&mut self, id: ZoneId) -> Result<bool, RelationError> {
        self.ensure_editable()?;
        self.selection.toggle(&self.catalog, id)
    }

    pub fn zone_dialog_rows(&self) -> SelectionRows<'_> {
        self.selection.rows(&self.catalog)
    }

    pub fn save_zone_dialog(&mut self) -> Result<(), RelationError> {
        self.ensure_editable()?;
        self.selection.save(&mut self.zones)
    }

    pub fn cancel_zone_dialog(&mut self) {
        self.selection.cancel();
    }

    pub fn related_rows(&self) -> RelatedRows<'_> {
        related_rows(&self.catalog, &self.zones)
    }

    /// Text for the related table when nothing is assigned
    pub fn related_placeholder(&self) -> Option<&str> {
        matches!(self.related_rows(), RelatedRows::Empty)
            .then_some(self.messages.no_zones_assigned.as_str())
    }

    /// Text for the selection dialog when the catalog is empty
    pub fn zone_dialog_placeholder(&self) -> Option<&str> {
        matches!(self.zone_dialog_rows(), SelectionRows::Empty)
            .then_some(self.messages.no_zones_available.as_str())
    }

    pub fn remove_zone(&mut self, id: ZoneId) -> Result<bool, RelationError> {
        self.ensure_editable()?;
        Ok(remove_related(&mut self.zones, id))
    }

    // --- Submit ---

    /// Lock the form and snapshot the working copy.
    ///
    /// While a submit is in flight every further attempt fails with
    /// [`FormError::Busy`] and changes nothing.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, FormError> {
        match self.state {
            FormState::Submitting => return Err(FormError::Busy),
            FormState::Ready => {}
            _ => return Err(FormError::NotReady),
        }
        self.errors = FieldErrors::new();
        self.state = FormState::Submitting;
        Ok(SubmitRequest {
            id: self.edit_id,
            fields: self.fields.clone(),
            zones: self.zones.clone(),
        })
    }

    /// Apply a write result. Returns [`DashboardSignal::FormSaved`] on success.
    pub fn finish_submit<N: Notifier>(
        &mut self,
        result: Result<Carrier, ServiceError>,
        notifier: &N,
    ) -> Option<DashboardSignal> {
        if self.state != FormState::Submitting {
            tracing::debug!("Dropping submit result for a closed form");
            return None;
        }
        let created = self.edit_id.is_none();

        match result {
            Ok(carrier) => {
                let (title, description) = if created {
                    (&self.messages.created_title, &self.messages.created_description)
                } else {
                    (&self.messages.updated_title, &self.messages.updated_description)
                };
                notifier.notify(Notice::neutral(title, Some(description.clone())));
                tracing::info!(carrier_id = %carrier.id, created, "Carrier saved");
                self.close();
                Some(DashboardSignal::FormSaved {
                    id: carrier.id,
                    created,
                })
            }
            Err(ServiceError::Validation(errors)) => {
                let shown = CarrierField::all().iter().any(|&f| errors.get(f).is_some());
                if !shown {
                    notifier.notify(Notice::destructive(
                        &self.messages.error_title,
                        &self.messages.save_failed,
                    ));
                }
                tracing::debug!(fields = errors.len(), "Carrier rejected by validation");
                self.errors = errors;
                self.state = FormState::Ready;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, created, "Failed to save carrier");
                notifier.notify(Notice::destructive(
                    &self.messages.error_title,
                    &self.messages.save_failed,
                ));
                self.state = FormState::Ready;
                None
            }
        }
    }

    /// Submit the working copy through `service`. Ignored unless `Ready`.
    pub async fn submit<S: WriteService, N: Notifier>(
        &mut self,
        service: &S,
        notifier: &N,
    ) -> Option<DashboardSignal> {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "Submit ignored");
                return None;
            }
        };
        let result = request.send(service).await;
        self.finish_submit(result, notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{MemoryBackend, RecordingNotifier, Severity};
    use zonedesk_types::Zone;

    fn backend() -> MemoryBackend {
        let backend = MemoryBackend::new(vec![
            Zone::new(1, "North"),
            Zone::new(2, "South"),
            Zone::new(3, "East"),
        ]);
        backend.seed("Rapid Freight", "555-0101", ZoneSet::from([1]));
        backend
    }

    fn form() -> CarrierForm {
        CarrierForm::new(Messages::default())
    }

    #[tokio::test]
    async fn test_open_edit_replaces_working_copy() {
        let backend = backend();
        let notifier = RecordingNotifier::new();
        let mut form = form();

        assert!(form.open_edit(CarrierId(1), &backend, &notifier).await);
        assert_eq!(form.state(), FormState::Ready);
        assert_eq!(form.fields(), &CarrierFields::new("Rapid Freight", "555-0101"));
        assert_eq!(form.zones(), &ZoneSet::from([1]));
        assert_eq!(form.catalog().len(), 3);
        assert_eq!(form.title(), "Edit carrier");
    }

    #[tokio::test]
    async fn test_failed_fetch_closes_and_next_create_is_blank() {
        let backend = backend();
        let notifier = RecordingNotifier::new();
        let mut form = form();

        form.open_edit(CarrierId(1), &backend, &notifier).await;
        form.set_field(CarrierField::Name, "Half typed").unwrap();

        backend.fail_next_fetch(ServiceError::Network("reset".to_string()));
        assert!(!form.open_edit(CarrierId(7), &backend, &notifier).await);
        assert_eq!(form.state(), FormState::Closed);
        assert_eq!(notifier.last().map(|n| n.severity), Some(Severity::Destructive));

        form.open_create();
        assert_eq!(form.state(), FormState::Ready);
        assert_eq!(form.fields(), &CarrierFields::default());
        assert!(form.zones().is_empty());
        assert_eq!(form.edit_id(), None);
        assert_eq!(form.title(), "Create carrier");
    }

    #[tokio::test]
    async fn test_stale_fetch_is_dropped() {
        let backend = backend();
        let notifier = RecordingNotifier::new();
        let mut form = form();

        let ticket = form.begin_edit(CarrierId(1));
        assert!(form.is_busy());
        form.close();
        form.open_create();

        let late = backend.fetch(CarrierId(1)).await;
        assert!(!form.finish_load(ticket, late, &notifier));
        assert_eq!(form.fields(), &CarrierFields::default());
        assert_eq!(form.state(), FormState::Ready);
    }

    #[test]
    fn test_field_edit_clears_that_fields_error_only() {
        let notifier = RecordingNotifier::new();
        let mut form = form();
        form.open_create();

        form.begin_submit().unwrap();
        let errors = FieldErrors::new()
            .with("name", "The name field is required.")
            .with("phone", "The phone field is required.");
        assert_eq!(form.finish_submit(Err(ServiceError::Validation(errors)), &notifier), None);
        assert_eq!(form.state(), FormState::Ready);

        form.set_field(CarrierField::Name, "Rapid").unwrap();
        assert_eq!(form.error(CarrierField::Name), None);
        assert_eq!(form.error(CarrierField::Phone), Some("The phone field is required."));
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_submitting_is_a_lock() {
        let mut form = form();
        form.open_create();

        assert!(form.begin_submit().is_ok());
        assert_eq!(form.submit_label(), "Saving...");
        assert_eq!(form.begin_submit(), Err(FormError::Busy));
        assert_eq!(form.set_field(CarrierField::Name, "x"), Err(FormError::NotReady));
        assert_eq!(form.quick_add(ZoneId(1)), Err(RelationError::NotEditable));
    }

    #[test]
    fn test_closed_form_refuses_submit() {
        let mut form = form();
        assert_eq!(form.begin_submit(), Err(FormError::NotReady));
    }

    #[tokio::test]
    async fn test_update_sends_working_zone_set() {
        let backend = backend();
        let notifier = RecordingNotifier::new();
        let mut form = form();
        form.open_edit(CarrierId(1), &backend, &notifier).await;

        form.quick_add(ZoneId(2)).unwrap();
        form.open_zone_dialog().unwrap();
        form.toggle_zone(ZoneId(3)).unwrap();
        form.save_zone_dialog().unwrap();
        form.remove_zone(ZoneId(1)).unwrap();

        // Nothing reaches the backend before submit
        assert_eq!(backend.carrier(CarrierId(1)).unwrap().1, ZoneSet::from([1]));

        let signal = form.submit(&backend, &notifier).await;
        assert_eq!(
            signal,
            Some(DashboardSignal::FormSaved {
                id: CarrierId(1),
                created: false
            })
        );
        assert_eq!(backend.carrier(CarrierId(1)).unwrap().1, ZoneSet::from([2, 3]));
        assert_eq!(form.state(), FormState::Closed);
        assert_eq!(notifier.last().map(|n| n.title), Some("Carrier updated".to_string()));
    }

    #[tokio::test]
    async fn test_create_shares_submit_path() {
        let backend = backend();
        let notifier = RecordingNotifier::new();
        let mut form = form();
        form.open_create();
        form.set_field(CarrierField::Name, "Blue Line").unwrap();
        form.set_field(CarrierField::Phone, "555-0102").unwrap();

        let signal = form.submit(&backend, &notifier).await;
        assert_eq!(
            signal,
            Some(DashboardSignal::FormSaved {
                id: CarrierId(2),
                created: true
            })
        );
        assert_eq!(backend.carrier_count(), 2);
    }

    #[tokio::test]
    async fn test_server_validation_keeps_form_open() {
        let backend = backend();
        let notifier = RecordingNotifier::new();
        let mut form = form();
        form.open_create();
        form.set_field(CarrierField::Name, "Blue Line").unwrap();

        assert_eq!(form.submit(&backend, &notifier).await, None);
        assert_eq!(form.state(), FormState::Ready);
        assert!(form.error(CarrierField::Phone).is_some());
        assert_eq!(form.fields().name, "Blue Line");
    }

    #[tokio::test]
    async fn test_other_write_failure_keeps_working_copy() {
        let backend = backend();
        let notifier = RecordingNotifier::new();
        let mut form = form();
        form.open_edit(CarrierId(1), &backend, &notifier).await;
        form.quick_add(ZoneId(3)).unwrap();

        backend.fail_next_write(ServiceError::Rejected {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(form.submit(&backend, &notifier).await, None);

        assert_eq!(form.state(), FormState::Ready);
        assert_eq!(form.zones(), &ZoneSet::from([1, 3]));
        let notice = notifier.last().unwrap();
        assert_eq!(notice.severity, Severity::Destructive);
        assert_eq!(notice.description.as_deref(), Some("Could not save the carrier"));
    }

    #[tokio::test]
    async fn test_zone_dialog_cancel_after_quick_add() {
        let backend = backend();
        let notifier = RecordingNotifier::new();
        let mut form = form();
        form.open_edit(CarrierId(1), &backend, &notifier).await;

        let offered: Vec<_> = form.quick_add_options().iter().map(|z| z.id.0).collect();
        assert_eq!(offered, vec![2, 3]);
        form.quick_add(ZoneId(2)).unwrap();
        assert_eq!(form.zones(), &ZoneSet::from([1, 2]));

        form.open_zone_dialog().unwrap();
        form.toggle_zone(ZoneId(3)).unwrap();
        form.cancel_zone_dialog();
        assert_eq!(form.zones(), &ZoneSet::from([1, 2]));

        form.open_zone_dialog().unwrap();
        let SelectionRows::Rows(rows) = form.zone_dialog_rows() else {
            panic!("expected rows");
        };
        let staged: Vec<_> = rows.iter().filter(|r| r.selected).map(|r| r.zone.id.0).collect();
        assert_eq!(staged, vec![1, 2]);
    }

    #[test]
    fn test_fetched_record_is_restricted_to_its_catalog() {
        let notifier = RecordingNotifier::new();
        let mut form = form();
        let record: CarrierRecord = serde_json::from_str(
            r#"{
                "carrier": {"id": 5, "name": "Rapid Freight", "phone": "555-0101"},
                "zones": [{"id": 1, "name": "North"}, {"id": 2, "name": "South"}],
                "carrier_zones": [2, 9]
            }"#,
        )
        .unwrap();

        let ticket = form.begin_edit(CarrierId(5));
        assert!(form.finish_load(ticket, Ok(record), &notifier));
        assert_eq!(form.zones(), &ZoneSet::from([2]));
        assert_eq!(form.related_placeholder(), None);
        assert_eq!(form.zone_dialog_placeholder(), None);
        let RelatedRows::Rows(rows) = form.related_rows() else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].name, "South");
    }

    #[test]
    fn test_create_form_has_empty_zone_views() {
        let mut form = form();
        form.open_create();
        assert_eq!(form.related_rows(), RelatedRows::Empty);
        form.open_zone_dialog().unwrap();
        assert_eq!(form.zone_dialog_rows(), SelectionRows::Empty);
        assert_eq!(form.related_placeholder(), Some("-- No zones assigned --"));
        assert_eq!(form.zone_dialog_placeholder(), Some("No zones available"));
    }
}
