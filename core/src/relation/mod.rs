//! Zone relation editor
//!
//! Three views over one working [`ZoneSet`] borrowed from the carrier form:
//! - **Quick add**: pick one unassigned zone and add it right away
//! - **Selection dialog**: bulk toggle over a staged copy, committed on save
//! - **Related table**: the assigned zones, each removable immediately
//!
//! None of them talk to a service. The form owns the working set and only
//! the form's submit sends it anywhere.

mod catalog;
mod quick_add;
mod related;
mod selection;

pub use catalog::ZoneCatalog;
pub use quick_add::QuickAddSelector;
pub use related::{RelatedRows, related_rows, remove_related};
pub use selection::{SelectionRow, SelectionRows, ZoneSelectionDialog};
