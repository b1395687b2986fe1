//! The active set of selectable profiles.

use crate::EnvironmentProfile;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("profile key {0:?} appears more than once")]
    DuplicateKey(String),
    #[error("profile at index {0} has an empty key")]
    EmptyKey(usize),
}

/// Ordered profiles with unique keys. Index order is selection order.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    profiles: Vec<EnvironmentProfile>,
}

impl ProfileSet {
    /// Build a set, rejecting empty or duplicate keys.
    pub fn new(profiles: Vec<EnvironmentProfile>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (i, p) in profiles.iter().enumerate() {
            if p.key.is_empty() {
                return Err(CatalogError::EmptyKey(i));
            }
            if !seen.insert(p.key.as_str()) {
                return Err(CatalogError::DuplicateKey(p.key.clone()));
            }
        }
        Ok(Self { profiles })
    }

    /// Earth, Moon, Mars, Jupiter and an orbital station.
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                EnvironmentProfile::earth(),
                EnvironmentProfile::moon(),
                EnvironmentProfile::mars(),
                EnvironmentProfile::jupiter(),
                EnvironmentProfile::orbital_station(),
            ],
        }
    }

    /// Parse a RON list of profiles.
    pub fn from_ron_str(src: &str) -> Result<Self, CatalogError> {
        let profiles: Vec<EnvironmentProfile> = ron::from_str(src)?;
        Self::new(profiles)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let src = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_ron_str(&src)?;
        log::info!("Loaded {} profiles from {:?}", set.len(), path);
        Ok(set)
    }

    pub fn get(&self, index: usize) -> Option<&EnvironmentProfile> {
        self.profiles.get(index)
    }

    /// First profile whose key matches exactly (case-sensitive).
    pub fn find_by_key(&self, key: &str) -> Option<&EnvironmentProfile> {
        self.profiles.iter().find(|p| p.key == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.key == key)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnvironmentProfile> {
        self.profiles.iter()
    }
}
