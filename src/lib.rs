//! Read-only HTTP query service over a static set of lab records.
//!
//! Records are loaded once from a JSON data file at startup and served
//! from memory. Names are filtered with a case-insensitive exact match.
//!
//! ```text
//! GET /LabRecords/LabName?LabName=rbc
//! [{"Name":"RBC","Value":4.7,"Unit":"10^6/uL","ReferenceRange":"4.5-5.9","Date":"2023-01-15"}, ...]
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`records`]: Record types, data file loading, and the query store
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod records;
pub mod utils;

pub use config::Config;
pub use error::{LabError, QueryError, Result};
