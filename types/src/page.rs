use serde::{Deserialize, Serialize};

use crate::carrier::Carrier;
use crate::filters::FilterMap;
use crate::zone::Zone;

/// Pagination metadata returned alongside a page of carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: 15,
            total: 0,
        }
    }
}

/// One page of the carrier list plus the full zone catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierPage {
    pub carriers: Vec<Carrier>,
    pub pagination: Pagination,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl CarrierPage {
    /// Whether a pager should be shown at all
    pub fn has_multiple_pages(&self) -> bool {
        self.pagination.last_page > 1
    }
}

/// Parameters of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    /// Settled search term, `None` when the search box is empty
    pub search: Option<String>,
    pub filters: FilterMap,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            filters: FilterMap::new(),
        }
    }
}
