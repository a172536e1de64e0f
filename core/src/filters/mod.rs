//! Search-with-filters bar
//!
//! - [`FilterCatalog`]: the declared filter controls, indexed by key
//! - [`chips`]: active filter chips derived from committed filters
//! - [`FilterDialog`]: staged editing of filter values behind Apply/Cancel
//! - [`FilterBar`]: committed filters plus the chip row, dialog and add action

mod bar;
mod catalog;
pub mod chips;
mod dialog;

pub use bar::FilterBar;
pub use catalog::FilterCatalog;
pub use chips::{ChipRow, FilterChip};
pub use dialog::{FilterDialog, OpenSeed};
