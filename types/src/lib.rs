//! Shared data types for the zonedesk carrier dashboard.
//!
//! Everything here is plain serde data exchanged between the dashboard
//! controllers and the services behind them. No behavior beyond small
//! accessors lives in this crate.

pub mod carrier;
pub mod filters;
pub mod page;
pub mod zone;

pub use carrier::{Carrier, CarrierField, CarrierFields, CarrierId, CarrierRecord, FieldErrors};
pub use filters::{FilterDefinition, FilterGroup, FilterKind, FilterMap, FilterOption, FilterValue};
pub use page::{CarrierPage, ListQuery, Pagination};
pub use zone::{Zone, ZoneId, ZoneSet};
