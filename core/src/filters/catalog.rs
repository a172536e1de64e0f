use hashbrown::HashMap;
use zonedesk_types::{FilterDefinition, FilterGroup, FilterKind};

use crate::error::FilterError;

/// Declared filter controls, grouped as shown in the dialog.
#[derive(Debug, Clone, Default)]
pub struct FilterCatalog {
    groups: Vec<FilterGroup>,
    /// key -> (group index, item index)
    index: HashMap<String, (usize, usize)>,
}

impl FilterCatalog {
    pub fn new(groups: Vec<FilterGroup>) -> Self {
        let mut index = HashMap::new();
        for (g, group) in groups.iter().enumerate() {
            for (i, item) in group.items.iter().enumerate() {
                if index.insert(item.key.clone(), (g, i)).is_some() {
                    tracing::warn!(key = %item.key, "Duplicate filter key, last declaration wins");
                }
            }
        }
        Self { groups, index }
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }

    /// No declared filters means the bar hides its "Filters" button.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn definition(&self, key: &str) -> Option<&FilterDefinition> {
        let &(g, i) = self.index.get(key)?;
        self.groups.get(g)?.items.get(i)
    }

    /// Look up `key` and check it is one of the `accepted` kinds.
    pub(crate) fn require(
        &self,
        key: &str,
        accepted: &[FilterKind],
    ) -> Result<&FilterDefinition, FilterError> {
        let def = self
            .definition(key)
            .ok_or_else(|| FilterError::UnknownFilter(key.to_string()))?;
        if accepted.contains(&def.kind) {
            Ok(def)
        } else {
            Err(FilterError::KindMismatch {
                key: key.to_string(),
                expected: accepted[0],
                actual: def.kind,
            })
        }
    }
}
