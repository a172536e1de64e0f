use hashbrown::HashMap;
use zonedesk_types::{Zone, ZoneId, ZoneSet};

/// Zones loaded for the current edit session, in server order.
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    zones: Vec<Zone>,
    index: HashMap<ZoneId, usize>,
}

impl ZoneCatalog {
    pub fn new(zones: Vec<Zone>) -> Self {
        let index = zones.iter().enumerate().map(|(i, z)| (z.id, i)).collect();
        Self { zones, index }
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.index.get(&id).and_then(|&i| self.zones.get(i))
    }

    pub fn contains(&self, id: ZoneId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Drop ids the catalog does not know. Returns how many were dropped.
    pub fn restrict(&self, set: &mut ZoneSet) -> usize {
        set.retain(|id| self.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restrict_drops_unknown_ids() {
        let catalog = ZoneCatalog::new(vec![Zone::new(1, "North"), Zone::new(2, "South")]);
        let mut set = ZoneSet::from([1, 2, 9]);

        assert_eq!(catalog.restrict(&mut set), 1);
        assert_eq!(set, ZoneSet::from([1, 2]));
        assert_eq!(catalog.get(ZoneId(2)).map(|z| z.name.as_str()), Some("South"));
    }
}
