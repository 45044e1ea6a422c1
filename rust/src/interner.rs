//! Dense integer indexing of activity names.
//!
//! Graph passes run over `Vec`s indexed by position instead of hashing names
//! at every step.

use rustc_hash::FxHashMap;

use crate::models::ActivityName;

/// Interned activity ID (u32 for compact storage and fast hashing).
pub type ActivityId = u32;

/// Maps activity names to consecutive integer IDs.
#[derive(Debug, Clone)]
pub struct ActivityIndex {
    to_int: FxHashMap<ActivityName, ActivityId>,
}

impl ActivityIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Intern a name, returning its integer ID.
    /// If already interned, returns the existing ID.
    pub fn intern(&mut self, name: &ActivityName) -> ActivityId {
        if let Some(&id) = self.to_int.get(name) {
            return id;
        }
        let id = self.to_int.len() as ActivityId;
        self.to_int.insert(name.clone(), id);
        id
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<ActivityId> {
        self.to_int.get(name).copied()
    }
}
