//! Lab record module.
//!
//! This module handles:
//! - Record types and the data file layout
//! - Loading records from the data file
//! - The immutable in-memory store and its queries

pub mod source;
pub mod store;
pub mod types;

pub use source::{load_store, parse_store};
pub use store::{LabRecordStore, LAB_NAME_PARAM};
pub use types::{LabDataFile, LabRecord};
