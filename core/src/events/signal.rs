use zonedesk_types::CarrierId;

/// Signals emitted by the dashboard controllers for cross-cutting concerns.
/// Controllers never refetch or open each other directly; they report
/// what happened and the screen decides what to run next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardSignal {
    // List lifecycle
    /// Committed filters changed (apply, clear, chip removal) or a save landed
    RefreshRequested,
    /// The search box settled on a new term, `None` when cleared
    SearchSettled(Option<String>),

    // Form lifecycle
    OpenCreateForm,
    OpenEditForm(CarrierId),
    /// A submit succeeded; `id` is the saved carrier, new or existing
    FormSaved {
        id: CarrierId,
        created: bool,
    },

    // Deletion
    CarrierDeleted(CarrierId),
}
