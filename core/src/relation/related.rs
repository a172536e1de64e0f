use zonedesk_types::{Zone, ZoneId, ZoneSet};

use super::ZoneCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelatedRows<'a> {
    /// Nothing assigned; render the "no zones assigned" placeholder
    Empty,
    Rows(Vec<&'a Zone>),
}

/// Assigned zones in catalog order.
pub fn related_rows<'a>(catalog: &'a ZoneCatalog, working: &ZoneSet) -> RelatedRows<'a> {
    let zones: Vec<&Zone> = catalog.iter().filter(|z| working.contains(z.id)).collect();
    if zones.is_empty() {
        RelatedRows::Empty
    } else {
        RelatedRows::Rows(zones)
    }
}

/// Unassign a zone immediately. No staging: the row disappears at once.
pub fn remove_related(working: &mut ZoneSet, id: ZoneId) -> bool {
    working.remove(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_catalog_order() {
        let catalog = ZoneCatalog::new(vec![
            Zone::new(3, "East"),
            Zone::new(1, "North"),
            Zone::new(2, "South"),
        ]);
        let RelatedRows::Rows(rows) = related_rows(&catalog, &ZoneSet::from([1, 3])) else {
            panic!("expected rows");
        };
        let names: Vec<_> = rows.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["East", "North"]);
    }

    #[test]
    fn test_removing_last_zone_shows_placeholder() {
        let catalog = ZoneCatalog::new(vec![Zone::new(1, "North")]);
        let mut working = ZoneSet::from([1]);

        assert!(remove_related(&mut working, ZoneId(1)));
        assert!(!remove_related(&mut working, ZoneId(1)));
        assert_eq!(related_rows(&catalog, &working), RelatedRows::Empty);
    }
}
