//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::Uri,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::{IntoParams, OpenApi};

use crate::error::QueryError;
use crate::records::{LabRecord, LabRecordStore, LAB_NAME_PARAM};

use super::openapi::ApiDoc;

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record store, read-only after startup.
    pub store: Arc<LabRecordStore>,
}

impl AppState {
    /// Create new app state around a loaded store.
    pub fn new(store: LabRecordStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// `LabName` query parameter.
///
/// The key is matched ignoring ASCII case and the first occurrence wins, so
/// repeated keys never reject the request.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LabNameQuery {
    /// Lab test name, matched exactly but ignoring case.
    #[param(rename = "LabName")]
    pub lab_name: Option<String>,
}

impl LabNameQuery {
    /// Pick the `LabName` value out of raw query pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let lab_name = pairs
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(LAB_NAME_PARAM))
            .map(|(_, value)| value);
        Self { lab_name }
    }

    fn name(&self) -> Option<&str> {
        self.lab_name.as_deref()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
    /// Number of records being served.
    pub records: usize,
}

/// All records in load order.
#[utoipa::path(
    get,
    path = "/",
    tag = "lab-records",
    responses((status = 200, description = "All lab records", body = [LabRecord]))
)]
pub async fn list_root(State(state): State<AppState>) -> Response {
    Json(state.store.list_all()).into_response()
}

/// All records, filtered by `LabName` when it is given and non-empty.
#[utoipa::path(
    get,
    path = "/LabRecords",
    tag = "lab-records",
    params(LabNameQuery),
    responses((status = 200, description = "Lab records, optionally filtered by name", body = [LabRecord]))
)]
pub async fn list_records(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = LabNameQuery::from_pairs(pairs);
    Json(state.store.filter_by_name_query(query.name())).into_response()
}

/// Distinct record names.
#[utoipa::path(
    get,
    path = "/LabNames",
    tag = "lab-records",
    responses((status = 200, description = "Distinct lab names", body = [String]))
)]
pub async fn list_names(State(state): State<AppState>) -> Response {
    Json(state.store.list_distinct_names()).into_response()
}

/// Records matching `LabName`, which is required.
#[utoipa::path(
    get,
    path = "/LabRecords/Search",
    tag = "lab-records",
    params(LabNameQuery),
    responses(
        (status = 200, description = "Matching lab records, possibly empty", body = [LabRecord]),
        (status = 400, description = "LabName missing or empty")
    )
)]
pub async fn search_records(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, QueryError> {
    let query = LabNameQuery::from_pairs(pairs);
    let matches = state.store.filter_by_name(query.name())?;
    Ok(Json(matches).into_response())
}

/// Records matching `LabName`, which is required.
#[utoipa::path(
    get,
    path = "/LabRecords/LabName",
    tag = "lab-records",
    params(LabNameQuery),
    responses(
        (status = 200, description = "Matching lab records, possibly empty", body = [LabRecord]),
        (status = 400, description = "LabName missing or empty")
    )
)]
pub async fn records_by_lab_name(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, QueryError> {
    let query = LabNameQuery::from_pairs(pairs);
    let matches = state.store.filter_by_name(query.name())?;
    Ok(Json(matches).into_response())
}

/// Health check handler.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        records: state.store.len(),
    })
}

/// Generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> QueryError {
    QueryError::NotFound(uri.path().to_string())
}
