//! In-memory carrier backend
//!
//! Implements every service trait over plain vectors. Server-side rules
//! are mirrored: name and phone are required, pages are `per_page` long,
//! and unknown zone ids are dropped on update. One-shot failures can be
//! queued per operation to exercise the error paths of the controllers.

use std::sync::{Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;
use zonedesk_types::{
    Carrier, CarrierField, CarrierFields, CarrierId, CarrierPage, CarrierRecord, FieldErrors,
    FilterValue, ListQuery, Pagination, Zone, ZoneId, ZoneSet,
};

use super::{ListService, RecordService, WriteService};
use crate::error::ServiceError;

const DEFAULT_PER_PAGE: u32 = 15;

/// Filter key understood by the in-memory list: carriers serving a zone id
pub const ZONE_FILTER: &str = "zone";

#[derive(Debug, Default)]
struct MemoryState {
    carriers: Vec<Carrier>,
    zones: Vec<Zone>,
    associations: HashMap<CarrierId, ZoneSet>,
    next_id: i64,
    list_calls: usize,
    last_query: Option<ListQuery>,
    fail_list: Option<ServiceError>,
    fail_fetch: Option<ServiceError>,
    fail_write: Option<ServiceError>,
}

#[derive(Debug)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    per_page: u32,
}

impl MemoryBackend {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                zones,
                next_id: 1,
                ..MemoryState::default()
            }),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a carrier directly, bypassing validation.
    pub fn seed(&self, name: &str, phone: &str, zones: ZoneSet) -> CarrierId {
        let mut state = self.lock();
        let id = CarrierId(state.next_id);
        state.next_id += 1;
        state.carriers.push(Carrier {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
        });
        state.associations.insert(id, zones);
        id
    }

    pub fn carrier(&self, id: CarrierId) -> Option<(Carrier, ZoneSet)> {
        let state = self.lock();
        let carrier = state.carriers.iter().find(|c| c.id == id)?.clone();
        let zones = state.associations.get(&id).cloned().unwrap_or_default();
        Some((carrier, zones))
    }

    pub fn carrier_count(&self) -> usize {
        self.lock().carriers.len()
    }

    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    pub fn last_query(&self) -> Option<ListQuery> {
        self.lock().last_query.clone()
    }

    pub fn fail_next_list(&self, error: ServiceError) {
        self.lock().fail_list = Some(error);
    }

    pub fn fail_next_fetch(&self, error: ServiceError) {
        self.lock().fail_fetch = Some(error);
    }

    pub fn fail_next_write(&self, error: ServiceError) {
        self.lock().fail_write = Some(error);
    }
}

fn validate(fields: &CarrierFields) -> Result<(), ServiceError> {
    let mut errors = FieldErrors::new();
    for &field in CarrierField::all() {
        if fields.get(field).trim().is_empty() {
            errors.set(field, format!("The {} field is required.", field.key()));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

fn matches_query(carrier: &Carrier, zones: Option<&ZoneSet>, query: &ListQuery) -> bool {
    if let Some(term) = &query.search {
        let term = term.to_lowercase();
        if !carrier.name.to_lowercase().contains(&term) && !carrier.phone.contains(&term) {
            return false;
        }
    }
    match query.filters.value(ZONE_FILTER) {
        Some(FilterValue::Number(zone)) => zones.is_some_and(|z| z.contains(ZoneId(*zone))),
        _ => true,
    }
}

impl ListService for MemoryBackend {
    async fn list(&self, query: &ListQuery) -> Result<CarrierPage, ServiceError> {
        let mut state = self.lock();
        state.list_calls += 1;
        state.last_query = Some(query.clone());
        if let Some(error) = state.fail_list.take() {
            return Err(error);
        }

        let matching: Vec<&Carrier> = state
            .carriers
            .iter()
            .filter(|c| matches_query(c, state.associations.get(&c.id), query))
            .collect();

        let total = matching.len() as u64;
        let per_page = self.per_page;
        let last_page = (total.div_ceil(u64::from(per_page))).max(1) as u32;
        let current_page = query.page.clamp(1, last_page);
        let start = ((current_page - 1) * per_page) as usize;

        Ok(CarrierPage {
            carriers: matching
                .into_iter()
                .skip(start)
                .take(per_page as usize)
                .cloned()
                .collect(),
            pagination: Pagination {
                current_page,
                last_page,
                per_page,
                total,
            },
            zones: state.zones.clone(),
        })
    }
}

impl RecordService for MemoryBackend {
    async fn fetch(&self, id: CarrierId) -> Result<CarrierRecord, ServiceError> {
        let mut state = self.lock();
        if let Some(error) = state.fail_fetch.take() {
            return Err(error);
        }
        let carrier = state
            .carriers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))?;

        Ok(CarrierRecord {
            carrier,
            zones: state.zones.clone(),
            carrier_zones: state.associations.get(&id).cloned().unwrap_or_default(),
        })
    }
}

impl WriteService for MemoryBackend {
    async fn create(&self, fields: &CarrierFields) -> Result<Carrier, ServiceError> {
        if let Some(error) = self.lock().fail_write.take() {
            return Err(error);
        }
        validate(fields)?;
        let id = self.seed(&fields.name, &fields.phone, ZoneSet::new());
        Ok(Carrier {
            id,
            name: fields.name.clone(),
            phone: fields.phone.clone(),
        })
    }

    async fn update(
        &self,
        id: CarrierId,
        fields: &CarrierFields,
        zones: &ZoneSet,
    ) -> Result<Carrier, ServiceError> {
        let mut state = self.lock();
        if let Some(error) = state.fail_write.take() {
            return Err(error);
        }
        validate(fields)?;

        let known: ZoneSet = zones
            .iter()
            .filter(|z| state.zones.iter().any(|known| known.id == *z))
            .collect();
        let carrier = state
            .carriers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        carrier.name = fields.name.clone();
        carrier.phone = fields.phone.clone();
        let updated = carrier.clone();
        state.associations.insert(id, known);
        Ok(updated)
    }

    async fn delete(&self, id: CarrierId) -> Result<(), ServiceError> {
        let mut state = self.lock();
        if let Some(error) = state.fail_write.take() {
            return Err(error);
        }
        let before = state.carriers.len();
        state.carriers.retain(|c| c.id != id);
        if state.carriers.len() == before {
            return Err(ServiceError::NotFound(id));
        }
        state.associations.remove(&id);
        Ok(())
    }
}
