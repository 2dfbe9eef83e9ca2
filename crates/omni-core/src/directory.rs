//! Store directory - static store metadata loaded from configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One configured store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEntry {
    /// Store identifier, forwarded verbatim to every backend
    pub id: String,
    /// Display name
    pub name: String,
    pub city: String,
    pub country: String,
    /// Robots stationed at this store (telemetry is keyed by robot)
    #[serde(default)]
    pub robots: Vec<String>,
}

/// Read-only, ordered table of known stores
#[derive(Debug, Clone, Default)]
pub struct StoreDirectory {
    entries: Vec<StoreEntry>,
    index: HashMap<String, usize>,
}

impl StoreDirectory {
    /// Build a directory, keeping the given order.
    ///
    /// Fails on blank or duplicate identifiers.
    pub fn from_entries(entries: Vec<StoreEntry>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (pos, entry) in entries.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Store entry #{} has an empty id",
                    pos + 1
                )));
            }
            if index.insert(entry.id.clone(), pos).is_some() {
                return Err(ConfigError::Invalid(format!(
                    "Duplicate store id: {}",
                    entry.id
                )));
            }
        }

        Ok(Self { entries, index })
    }

    /// Look up a store by id
    pub fn get(&self, id: &str) -> Option<&StoreEntry> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    /// All stores, in configured order
    pub fn entries(&self) -> &[StoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store id -> robot ids, as needed by the telemetry connector
    pub fn robot_roster(&self) -> HashMap<String, Vec<String>> {
        self.entries
            .iter()
            .map(|e| (e.id.clone(), e.robots.clone()))
            .collect()
    }
}
