//! Headless controllers for the carrier dashboard
//!
//! The screen, filter bar, zone relation editor and carrier form are plain
//! state machines. Rendering lives elsewhere; I/O goes through the traits
//! in [`service`].

pub mod config;
pub mod error;
pub mod events;
pub mod filters;
pub mod form;
pub mod relation;
pub mod screen;
pub mod search;
pub mod service;
pub mod staging;

// Re-exports for convenience
pub use config::{DashboardConfig, Messages};
pub use error::{ConfigError, FilterError, FormError, RelationError, ServiceError};
pub use events::{DashboardSignal, SignalHandler};
pub use filters::{ChipRow, FilterBar, FilterCatalog, FilterChip, FilterDialog, OpenSeed};
pub use form::{CarrierForm, FormState, LoadTicket, SubmitRequest};
pub use relation::{QuickAddSelector, RelatedRows, SelectionRows, ZoneCatalog, ZoneSelectionDialog};
pub use screen::CarrierScreen;
pub use search::DebouncedSearch;
pub use service::{
    ConfirmPrompt, Confirmer, ListService, MemoryBackend, Notice, Notifier, RecordService,
    Severity, WriteService,
};
pub use staging::{SharedCell, Staged, StateCell};
