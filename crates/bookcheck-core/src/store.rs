//! Identifier store
//!
//! The one piece of mutable state shared by create invocations. Appends are
//! serialized through a mutex; the dependent phase reads a snapshot taken
//! after every create has finished (see [`crate::DependentFeed`]).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::Identifier;

/// Cloneable handle to the session's append-only identifier list
#[derive(Debug, Clone, Default)]
pub struct IdentifierStore {
    ids: Arc<Mutex<Vec<Identifier>>>,
}

impl IdentifierStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an identifier captured from a create response
    pub fn append(&self, id: Identifier) {
        self.lock().push(id);
    }

    /// Number of identifiers appended so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been appended yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current contents, in append order
    #[must_use]
    pub fn snapshot(&self) -> Vec<Identifier> {
        self.lock().clone()
    }

    // A panic while holding the lock cannot leave the Vec half-written
    // (push is the only mutation), so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<Identifier>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
