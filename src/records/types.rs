//! Lab record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single flattened lab-test measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct LabRecord {
    /// Lab test name (e.g. "RBC"). Not unique across records.
    pub name: String,
    /// Measured value.
    pub value: f64,
    /// Measurement unit.
    #[serde(default)]
    pub unit: Option<String>,
    /// Reference range as printed on the report (e.g. "4.5-5.9").
    #[serde(default)]
    pub reference_range: Option<String>,
    /// Date the sample was taken.
    pub date: NaiveDate,
}

impl LabRecord {
    /// Case-insensitive exact comparison of the record name against `name`.
    ///
    /// Characters are compared one to one; a character whose uppercase form
    /// expands (e.g. `ß` to `SS`) is compared as itself.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.chars().map(fold_case).eq(name.chars().map(fold_case))
    }
}

fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Layout of the data file: records live under the `LabRecords` key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabDataFile {
    /// Records in file order. `None` when the key is absent.
    #[serde(rename = "LabRecords", default)]
    pub lab_records: Option<Vec<LabRecord>>,
}
