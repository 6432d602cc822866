//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    health, list_names, list_records, list_root, not_found, openapi_json, records_by_lab_name,
    search_records, AppState,
};
use crate::metrics::track_http;

/// Create the API router.
///
/// `/openapi.json` is only routed when `enable_openapi` is set.
pub fn create_router(state: AppState, enable_openapi: bool) -> Router {
    let mut router: Router<AppState> = Router::new()
        // Record queries
        .route("/", get(list_root))
        .route("/LabRecords", get(list_records))
        .route("/LabNames", get(list_names))
        .route("/LabRecords/Search", get(search_records))
        .route("/LabRecords/LabName", get(records_by_lab_name))
        // Health endpoint
        .route("/health", get(health));

    if enable_openapi {
        router = router.route("/openapi.json", get(openapi_json));
    }

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(track_http)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::records::{LabRecord, LabRecordStore};

    fn record(name: &str, value: f64) -> LabRecord {
        LabRecord {
            name: name.to_string(),
            value,
            unit: Some("10^6/uL".to_string()),
            reference_range: None,
            date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        }
    }

    fn app(enable_openapi: bool) -> Router {
        let store = LabRecordStore::new(vec![
            record("RBC", 4.7),
            record("WBC", 6.2),
            record("RBC", 4.9),
        ]);
        create_router(AppState::new(store), enable_openapi)
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app(true)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn root_returns_all_records() {
        let (status, body) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn lab_names_are_distinct() {
        let (status, body) = get_json("/LabNames").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["RBC", "WBC"]));
    }

    #[tokio::test]
    async fn lab_records_filters_when_name_given() {
        let (status, body) = get_json("/LabRecords?LabName=wbc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["Name"], "WBC");
    }

    #[tokio::test]
    async fn lab_records_empty_filter_returns_all() {
        let (status, body) = get_json("/LabRecords?LabName=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn strict_route_requires_lab_name() {
        let (status, body) = get_json("/LabRecords/LabName").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing_parameter");

        let (status, _) = get_json("/LabRecords/LabName?LabName=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (status, body) = get_json("/Unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn health_reports_record_count() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["records"], 3);
    }

    #[tokio::test]
    async fn openapi_route_can_be_disabled() {
        let response = app(false)
            .oneshot(Request::builder().uri("/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let (status, body) = get_json("/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/LabRecords/LabName"].is_object());
    }
}
