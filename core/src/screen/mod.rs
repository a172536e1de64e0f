//! Carrier dashboard screen
//!
//! Ties the pieces together: the debounced search box, the filter bar, the
//! paginated list and the carrier form. Controllers return
//! [`DashboardSignal`]s; the screen routes each one to registered
//! [`SignalHandler`]s and then reacts to it.
//!
//! ```text
//!   search box ──settled──┐
//!   filter bar ──commit───┼──▶ DashboardSignal ──▶ handle() ──▶ refresh()
//!   carrier form ──saved──┤                           │
//!   delete confirm ───────┘                           └──▶ SignalHandlers
//! ```

use tokio::sync::mpsc;
use zonedesk_types::{Carrier, CarrierId, CarrierPage, FilterMap, ListQuery, Pagination};

use crate::config::DashboardConfig;
use crate::events::{DashboardSignal, SignalHandler};
use crate::filters::{ChipRow, FilterBar, FilterCatalog, FilterDialog, OpenSeed};
use crate::form::CarrierForm;
use crate::search::DebouncedSearch;
use crate::service::{
    ConfirmPrompt, Confirmer, ListService, Notice, Notifier, RecordService, Severity,
    WriteService,
};


pub struct CarrierScreen<B, N, C> {
    config: DashboardConfig,
    backend: B,
    notifier: N,
    confirmer: C,
    search: DebouncedSearch,
    search_term: Option<String>,
    filters: FilterBar,
    page: u32,
    list: Option<CarrierPage>,
    form: CarrierForm,
    pending_delete: Option<CarrierId>,
    handlers: Vec<Box<dyn SignalHandler + Send>>,
}

impl<B, N, C> CarrierScreen<B, N, C>
where
    B: ListService + RecordService + WriteService,
    N: Notifier,
    C: Confirmer,
{
    /// Build the screen. Settled search terms arrive on the returned
    /// receiver; feed each one to [`CarrierScreen::on_search_settled`].
    pub fn new(
        config: DashboardConfig,
        catalog: FilterCatalog,
        backend: B,
        notifier: N,
        confirmer: C,
    ) -> (Self, mpsc::UnboundedReceiver<Option<String>>) {
        Self::with_filter_dialog(config, catalog, FilterDialog::new(), backend, notifier, confirmer)
    }

    /// Same as [`CarrierScreen::new`] with a dialog whose state is owned elsewhere.
    pub fn with_filter_dialog(
        config: DashboardConfig,
        catalog: FilterCatalog,
        dialog: FilterDialog,
        backend: B,
        notifier: N,
        confirmer: C,
    ) -> (Self, mpsc::UnboundedReceiver<Option<String>>) {
        let (search, settled) = DebouncedSearch::with_channel(config.search_debounce());
        let filters = FilterBar::with_dialog(catalog, config.max_visible_chips, dialog);
        let form = CarrierForm::new(config.messages.clone());

        let screen = Self {
            config,
            backend,
            notifier,
            confirmer,
            search,
            search_term: None,
            filters,
            page: 1,
            list: None,
            form,
            pending_delete: None,
            handlers: Vec::new(),
        };
        (screen, settled)
    }

    pub fn add_signal_handler(&mut self, handler: Box<dyn SignalHandler + Send>) {
        self.handlers.push(handler);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn confirmer(&self) -> &C {
        &self.confirmer
    }

    pub fn search(&self) -> &DebouncedSearch {
        &self.search
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn filters(&self) -> &FilterBar {
        &self.filters
    }

    pub fn chips(&self) -> ChipRow {
        self.filters.chips()
    }

    /// Label of the button behind the visible chips, e.g. "+2 more"
    pub fn chip_overflow_label(&self) -> Option<String> {
        self.chips().overflow_label(&self.config.messages.more_filters)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn list(&self) -> Option<&CarrierPage> {
        self.list.as_ref()
    }

    pub fn carriers(&self) -> &[Carrier] {
        self.list.as_ref().map(|l| l.carriers.as_slice()).unwrap_or_default()
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.list.as_ref().map(|l| &l.pagination)
    }

    /// Pagination controls are shown only when there is more than one page
    pub fn has_multiple_pages(&self) -> bool {
        self.list.as_ref().is_some_and(CarrierPage::has_multiple_pages)
    }

    pub fn form(&self) -> &CarrierForm {
        &self.form
    }

    /// Field and zone edits go straight to the form.
    pub fn form_mut(&mut self) -> &mut CarrierForm {
        &mut self.form
    }

    pub fn pending_delete(&self) -> Option<CarrierId> {
        self.pending_delete
    }

    /// The query the next refresh sends.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            search: self.search_term.clone(),
            filters: self.filters.committed().clone(),
        }
    }

    pub fn committed_filters(&self) -> &FilterMap {
        self.filters.committed()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signal routing
    // ─────────────────────────────────────────────────────────────────────────

    /// Route one signal to the handlers, then react to it.
    pub async fn handle(&mut self, signal: DashboardSignal) {
        for handler in &mut self.handlers {
            handler.handle_signal(&signal);
        }

        match signal {
            DashboardSignal::RefreshRequested
            | DashboardSignal::FormSaved { .. }
            | DashboardSignal::CarrierDeleted(_) => {
                self.refresh().await;
            }
            DashboardSignal::SearchSettled(term) => {
                self.search_term = term;
                self.page = 1;
                self.refresh().await;
            }
            DashboardSignal::OpenCreateForm => self.form.open_create(),
            DashboardSignal::OpenEditForm(id) => {
                self.form.open_edit(id, &self.backend, &self.notifier).await;
            }
        }
    }

    async fn dispatch(&mut self, signal: Option<DashboardSignal>) {
        if let Some(signal) = signal {
            self.handle(signal).await;
        }
    }

    /// Reload the current page. On failure the previous page stays visible.
    pub async fn refresh(&mut self) -> bool {
        let query = self.query();
        match self.backend.list(&query).await {
            Ok(page) => {
                tracing::debug!(
                    page = page.pagination.current_page,
                    total = page.pagination.total,
                    "Carrier list loaded"
                );
                self.page = page.pagination.current_page;
                self.list = Some(page);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, page = query.page, "Failed to list carriers");
                self.notifier.notify(Notice::destructive(
                    &self.config.messages.error_title,
                    &self.config.messages.list_failed,
                ));
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search and paging
    // ─────────────────────────────────────────────────────────────────────────

    /// Keystroke in the search box. Must run inside a tokio runtime.
    pub fn type_search(&mut self, text: impl Into<String>) {
        self.search.set_raw(text);
    }

    pub async fn on_search_settled(&mut self, term: Option<String>) {
        self.handle(DashboardSignal::SearchSettled(term)).await;
    }

    /// Jump to a page, clamped to the known page range.
    pub async fn set_page(&mut self, page: u32) {
        let last = self.pagination().map_or(u32::MAX, |p| p.last_page.max(1));
        let page = page.clamp(1, last);
        if page == self.page && self.list.is_some() {
            return;
        }
        self.page = page;
        self.refresh().await;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────

    pub fn open_filters(&mut self, seed: OpenSeed) {
        self.filters.open_dialog(seed);
    }

    pub fn open_filter_overflow(&mut self) {
        self.filters.open_overflow();
    }

    pub fn edit_filters<R>(
        &mut self,
        f: impl FnOnce(&mut FilterDialog, &FilterCatalog) -> R,
    ) -> R {
        self.filters.edit(f)
    }

    pub async fn apply_filters(&mut self) {
        let signal = self.filters.apply();
        self.dispatch(signal).await;
    }

    pub fn cancel_filters(&mut self) {
        self.filters.cancel();
    }

    pub async fn clear_filters(&mut self) {
        let signal = self.filters.clear();
        self.handle(signal).await;
    }

    pub async fn remove_filter(&mut self, key: &str) {
        let signal = self.filters.remove_chip(key);
        self.dispatch(signal).await;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Form
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn click_add(&mut self) {
        let signal = self.filters.click_add();
        self.handle(signal).await;
    }

    /// Row click opens the carrier for editing.
    pub async fn open_edit(&mut self, id: CarrierId) {
        self.handle(DashboardSignal::OpenEditForm(id)).await;
    }

    pub async fn submit_form(&mut self) {
        let signal = self.form.submit(&self.backend, &self.notifier).await;
        self.dispatch(signal).await;
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delete
    // ─────────────────────────────────────────────────────────────────────────

    /// Ask for confirmation before deleting. Nothing is sent yet.
    pub fn request_delete(&mut self, id: CarrierId) {
        let messages = &self.config.messages;
        self.pending_delete = Some(id);
        self.confirmer.confirm(ConfirmPrompt {
            title: messages.delete_confirm_title.clone(),
            description: messages.delete_confirm_description.clone(),
            severity: Severity::Destructive,
            confirm_label: messages.delete_confirm_label.clone(),
            cancel_label: messages.cancel_label.clone(),
        });
    }

    /// Answer "yes" to the pending prompt. Returns whether a carrier was deleted.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };

        match self.backend.delete(id).await {
            Ok(()) => {
                tracing::info!(carrier_id = %id, "Carrier deleted");
                self.notifier
                    .notify(Notice::neutral(&self.config.messages.deleted_title, None));
                self.handle(DashboardSignal::CarrierDeleted(id)).await;
                true
            }
            Err(e) => {
                tracing::warn!(carrier_id = %id, error = %e, "Failed to delete carrier");
                self.notifier.notify(Notice::destructive(
                    &self.config.messages.error_title,
                    &self.config.messages.delete_failed,
                ));
                false
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}
