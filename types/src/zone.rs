use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned zone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub i64);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only zone reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Zone {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: ZoneId(id),
            name: name.into(),
            description: None,
        }
    }
}

/// The zones associated with one carrier during an edit session.
///
/// Membership only; ordering carries no meaning. Backed by a `BTreeSet`
/// so iteration and serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneSet(BTreeSet<ZoneId>);

impl ZoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ZoneId) -> bool {
        self.0.contains(&id)
    }

    /// Returns `false` when the id was already present.
    pub fn insert(&mut self, id: ZoneId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: ZoneId) -> bool {
        self.0.remove(&id)
    }

    /// Flip membership of `id`, returning whether it is now a member.
    pub fn toggle(&mut self, id: ZoneId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Drop every id for which `keep` returns false. Returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(ZoneId) -> bool) -> usize {
        let before = self.0.len();
        self.0.retain(|id| keep(*id));
        before - self.0.len()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ZoneId> for ZoneSet {
    fn from_iter<I: IntoIterator<Item = ZoneId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[i64; N]> for ZoneSet {
    fn from(ids: [i64; N]) -> Self {
        ids.into_iter().map(ZoneId).collect()
    }
}
