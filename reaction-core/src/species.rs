//! Species identity.
//!
//! A [`SpeciesId`] is an opaque handle into a [`SpeciesTable`]; two ids
//! compare equal iff they were interned from the same name. Engines and
//! the coordinator never compare species by name directly.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

slotmap::new_key_type! {
    /// Interned handle for one chemical species, shared by every engine.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct SpeciesId;
}

/// A session-wide interner mapping species names to [`SpeciesId`]s.
///
/// Model construction (out of scope for this crate) is expected to build
/// one `SpeciesTable` and share `SpeciesId`s derived from it with every
/// engine and with the coordinator.
#[derive(Debug, Default, Clone)]
pub struct SpeciesTable {
    names: slotmap::SlotMap<SpeciesId, String>,
    by_name: HashMap<String, SpeciesId>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning the existing id if already known.
    pub fn intern(&mut self, name: impl Into<String>) -> SpeciesId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = self.names.insert(name.clone());
        self.by_name.insert(name, id);
        id
    }

    pub fn get(&self, name: &str) -> Option<SpeciesId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: SpeciesId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
