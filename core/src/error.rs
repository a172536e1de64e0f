//! Error types for the dashboard controllers.
//!
//! None of these are fatal. Service errors are turned into notices at the
//! controller boundary; the rest report transitions or edits that were
//! refused and left state untouched.

use zonedesk_types::{CarrierId, FieldErrors, FilterKind, ZoneId};

/// Failure reported by a list, record or write service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// The server rejected the payload with per-field messages
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("carrier {0} not found")]
    NotFound(CarrierId),

    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}

/// A staged filter edit that was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("filter '{key}' is a {actual:?} filter, not {expected:?}")]
    KindMismatch {
        key: String,
        expected: FilterKind,
        actual: FilterKind,
    },

    #[error("'{value}' is not an option of filter '{key}'")]
    UnknownOption { key: String, value: String },

    #[error("'{value}' is not a valid date for filter '{key}'")]
    InvalidDate { key: String, value: String },

    #[error("the filter dialog is closed")]
    DialogClosed,
}

/// A zone association edit that was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    #[error("zone {0} is not in the catalog")]
    UnknownZone(ZoneId),

    #[error("zone {0} is already assigned")]
    AlreadyAssigned(ZoneId),

    #[error("the zone selection dialog is closed")]
    SelectionClosed,

    #[error("zones can only be edited while the form is ready")]
    NotEditable,
}

/// A form transition requested from the wrong state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("the form is not ready for edits")]
    NotReady,

    #[error("a submit is already in flight")]
    Busy,
}

/// Failure while loading or storing the dashboard configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] confy::ConfyError),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
