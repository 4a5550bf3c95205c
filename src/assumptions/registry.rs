//! Registry of mortality bases keyed by id
//!
//! Bases are handed out as `Arc` snapshots. Replacing an entry only affects
//! cohorts built afterwards; runs already holding the old table keep it.

use super::loader::load_mortality_dir;
use super::mortality::MortalityBasis;
use crate::error::{DataError, ProjectionError};
use log::info;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MortalityRegistry {
    bases: BTreeMap<String, Arc<MortalityBasis>>,
}

impl MortalityRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in ELT17 males table
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(MortalityBasis::elt17_males());
        registry
    }

    /// Built-in tables plus every CSV table found in `dir`
    ///
    /// A file named after a built-in id replaces the built-in table.
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DataError> {
        let mut registry = Self::with_builtin();
        for basis in load_mortality_dir(dir.as_ref())? {
            registry.insert(basis);
        }
        info!(
            "Mortality registry loaded from {}: {:?}",
            dir.as_ref().display(),
            registry.ids().collect::<Vec<_>>()
        );
        Ok(registry)
    }

    /// Add or replace a basis, returning the previous version if any
    pub fn insert(&mut self, basis: MortalityBasis) -> Option<Arc<MortalityBasis>> {
        self.bases.insert(basis.id().to_string(), Arc::new(basis))
    }

    /// Shared snapshot of a basis
    pub fn get(&self, id: &str) -> Result<Arc<MortalityBasis>, ProjectionError> {
        self.bases.get(id).cloned().ok_or_else(|| {
            ProjectionError::invalid(
                "mortality_basis_id",
                format!("unknown mortality basis '{}'", id),
            )
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.bases.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}
