//! Loading the record set from the data file at startup.

use std::path::Path;

use tracing::{info, warn};

use crate::error::{LabError, Result};

use super::store::LabRecordStore;
use super::types::LabDataFile;

/// Read the data file at `path` and build the record store.
///
/// A document without a `LabRecords` key yields an empty store.
pub async fn load_store(path: &Path) -> Result<LabRecordStore> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| LabError::DataSource {
            path: path.to_path_buf(),
            source,
        })?;

    let store = parse_store(&bytes).map_err(|source| LabError::DataFormat {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        records = store.len(),
        names = store.list_distinct_names().len(),
        "Loaded lab records"
    );
    Ok(store)
}

/// Parse a data document into a record store.
pub fn parse_store(bytes: &[u8]) -> std::result::Result<LabRecordStore, serde_json::Error> {
    let file: LabDataFile = serde_json::from_slice(bytes)?;
    let records = match file.lab_records {
        Some(records) => records,
        None => {
            warn!("Data file has no LabRecords section, serving an empty record set");
            Vec::new()
        }
    };
    Ok(LabRecordStore::new(records))
}
