/// A discardable working copy of a committed value.
///
/// The working copy is a clone, so edits can never reach the committed
/// value until [`Staged::apply`] assigns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staged<T> {
    baseline: T,
    working: T,
}

impl<T: Clone> Staged<T> {
    /// Start staging from a snapshot of `committed`.
    pub fn begin(committed: &T) -> Self {
        Self {
            baseline: committed.clone(),
            working: committed.clone(),
        }
    }

    /// Mutable access to the working copy.
    pub fn stage(&mut self) -> &mut T {
        &mut self.working
    }

    pub fn working(&self) -> &T {
        &self.working
    }

    /// The value staging started from
    pub fn baseline(&self) -> &T {
        &self.baseline
    }

    /// Replace `target` with the working copy.
    pub fn apply(self, target: &mut T) {
        *target = self.working;
    }

    /// Drop the working copy, returning the snapshot staging started from.
    pub fn discard(self) -> T {
        self.baseline
    }
}

impl<T: Clone + PartialEq> Staged<T> {
    pub fn is_dirty(&self) -> bool {
        self.working != self.baseline
    }
}
