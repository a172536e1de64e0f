use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A readable, writable slot for one piece of controller state.
pub trait StateCell<T> {
    fn get(&self) -> T;
    fn set(&mut self, value: T);

    /// Counts writes that changed the value, from any holder of the slot.
    fn revision(&self) -> u64;
}

/// State owned by the controller itself.
#[derive(Debug, Clone, Default)]
pub struct OwnedCell<T> {
    value: T,
    revision: u64,
}

impl<T> OwnedCell<T> {
    pub fn new(value: T) -> Self {
        Self { value, revision: 0 }
    }
}

impl<T: Clone + PartialEq> StateCell<T> for OwnedCell<T> {
    fn get(&self) -> T {
        self.value.clone()
    }

    fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.revision += 1;
        }
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

#[derive(Debug, Default)]
struct Slot<T> {
    value: T,
    revision: u64,
}

/// State owned by an ancestor and handed to a controller.
///
/// Clones share the same slot, so the owner observes every write the
/// controller makes and vice versa.
#[derive(Debug, Default)]
pub struct SharedCell<T>(Arc<Mutex<Slot<T>>>);

impl<T> Clone for SharedCell<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> SharedCell<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(Mutex::new(Slot { value, revision: 0 })))
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone + PartialEq> SharedCell<T> {
    /// Mutate in place, the way an owner writes the slot.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut slot = self.lock();
        let before = slot.value.clone();
        f(&mut slot.value);
        if slot.value != before {
            slot.revision += 1;
        }
    }
}

impl<T: Clone + PartialEq> StateCell<T> for SharedCell<T> {
    fn get(&self) -> T {
        self.lock().value.clone()
    }

    fn set(&mut self, value: T) {
        let mut slot = self.lock();
        if slot.value != value {
            slot.value = value;
            slot.revision += 1;
        }
    }

    fn revision(&self) -> u64 {
        self.lock().revision
    }
}

/// Use the externally supplied cell when there is one, otherwise own the state.
pub fn cell_or_owned<T>(external: Option<SharedCell<T>>, initial: T) -> Box<dyn StateCell<T> + Send>
where
    T: Clone + PartialEq + Send + 'static,
{
    match external {
        Some(cell) => Box::new(cell),
        None => Box::new(OwnedCell::new(initial)),
    }
}
