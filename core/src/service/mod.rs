//! Contracts of the collaborators behind the dashboard
//!
//! The controllers never perform I/O on their own. Listing, fetching and
//! writing carriers go through these traits; user feedback goes through
//! [`Notifier`] and [`Confirmer`].

mod memory;
mod notify;

pub use memory::{MemoryBackend, ZONE_FILTER};
pub use notify::{RecordingConfirmer, RecordingNotifier, TracingNotifier};

use zonedesk_types::{Carrier, CarrierFields, CarrierId, CarrierPage, CarrierRecord, ListQuery, ZoneSet};

use crate::error::ServiceError;

#[allow(async_fn_in_trait)]
pub trait ListService {
    /// One page of carriers matching the settled search and committed filters.
    async fn list(&self, query: &ListQuery) -> Result<CarrierPage, ServiceError>;
}

#[allow(async_fn_in_trait)]
pub trait RecordService {
    /// Carrier fields, zone catalog and current associations for editing.
    async fn fetch(&self, id: CarrierId) -> Result<CarrierRecord, ServiceError>;
}

#[allow(async_fn_in_trait)]
pub trait WriteService {
    async fn create(&self, fields: &CarrierFields) -> Result<Carrier, ServiceError>;
    async fn update(
        &self,
        id: CarrierId,
        fields: &CarrierFields,
        zones: &ZoneSet,
    ) -> Result<Carrier, ServiceError>;
    async fn delete(&self, id: CarrierId) -> Result<(), ServiceError>;
}

/// Visual weight of a notice or confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Neutral,
    Destructive,
}

/// A short transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
}

impl Notice {
    pub fn neutral(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
            severity: Severity::Neutral,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            severity: Severity::Destructive,
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Question shown before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub confirm_label: String,
    pub cancel_label: String,
}

/// Shows a confirmation prompt. The answer comes back through
/// `CarrierScreen::confirm_delete` or `CarrierScreen::cancel_delete`.
pub trait Confirmer {
    fn confirm(&self, prompt: ConfirmPrompt);
}
