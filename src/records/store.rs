//! In-memory lab record store and its query operations.
//!
//! The store is built once at startup and never mutated afterwards, so it
//! can be shared across request handlers behind an `Arc` without locking.

use std::collections::HashSet;

use tracing::debug;

use crate::error::QueryError;

use super::types::LabRecord;

/// Name of the query parameter carrying the lab name filter.
pub const LAB_NAME_PARAM: &str = "LabName";

/// Immutable, ordered collection of lab records.
#[derive(Debug, Clone, Default)]
pub struct LabRecordStore {
    records: Vec<LabRecord>,
    /// Distinct names in first-occurrence order.
    names: Vec<String>,
}

impl LabRecordStore {
    /// Build a store from records in load order.
    pub fn new(records: Vec<LabRecord>) -> Self {
        let mut names = Vec::new();
        {
            let mut seen = HashSet::with_capacity(records.len());
            for record in &records {
                if seen.insert(record.name.as_str()) {
                    names.push(record.name.clone());
                }
            }
        }

        Self { records, names }
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record, in load order.
    pub fn list_all(&self) -> &[LabRecord] {
        &self.records
    }

    /// Each distinct record name exactly once, in first-occurrence order.
    ///
    /// Names differing only in case are kept as separate entries.
    pub fn list_distinct_names(&self) -> &[String] {
        &self.names
    }

    /// Records whose name equals `name` ignoring case.
    ///
    /// Returns [`QueryError::MissingParameter`] when `name` is absent or
    /// empty. No match is an empty result, not an error.
    pub fn filter_by_name(&self, name: Option<&str>) -> Result<Vec<&LabRecord>, QueryError> {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => return Err(QueryError::MissingParameter(LAB_NAME_PARAM)),
        };

        let matches: Vec<&LabRecord> = self
            .records
            .iter()
            .filter(|r| r.name_matches(name))
            .collect();

        debug!(lab_name = name, matches = matches.len(), "Filtered lab records");
        Ok(matches)
    }

    /// Like [`filter_by_name`](Self::filter_by_name), but an absent or empty
    /// `name` returns every record instead of failing.
    pub fn filter_by_name_query(&self, name: Option<&str>) -> Vec<&LabRecord> {
        match self.filter_by_name(name) {
            Ok(matches) => matches,
            Err(_) => self.records.iter().collect(),
        }
    }
}
