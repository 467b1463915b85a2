#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use bancadati_core::filter::TenderFilter;
use bancadati_core::filter_options::FilterOptions;
use bancadati_core::pagination::{PageRequest, Paginated};
use bancadati_core::tender::Tender;
use bancadati_db::error::StoreError;
use bancadati_db::memory::MemoryTenderStore;
use bancadati_db::store::TenderStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bancadati_api::config::{LogFormat, ServerConfig, StoreKind};
use bancadati_api::router::build_app_router;
use bancadati_api::state::AppState;

/// Seed for the mock dataset behind [`mock_store`].
pub const MOCK_SEED: u64 = 42;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreKind::Memory,
        database_url: None,
        db_max_connections: 1,
        db_acquire_timeout_secs: 1,
        mock_tender_count: 50,
        mock_seed: Some(MOCK_SEED),
        seed_database: false,
        log_format: LogFormat::Text,
    }
}

/// Fifty reproducible mock tenders.
pub fn mock_store() -> Arc<MemoryTenderStore> {
    Arc::new(MemoryTenderStore::from_mock(50, Some(MOCK_SEED)))
}

/// Build the full application router around `store`, with the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<dyn TenderStore>) -> Router {
    build_app_router(AppState { store }, &test_config()).unwrap()
}

/// The app over [`mock_store`].
pub fn mock_app() -> Router {
    build_test_app(mock_store())
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A store whose backing database is always unreachable.
pub struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl TenderStore for UnreachableStore {
    async fn list_tenders(
        &self,
        _filter: &TenderFilter,
        _page: PageRequest,
    ) -> Result<Paginated<Tender>, StoreError> {
        Err(unreachable())
    }

    async fn get_tender(&self, _id: &str) -> Result<Option<Tender>, StoreError> {
        Err(unreachable())
    }

    async fn filter_options(&self) -> Result<FilterOptions, StoreError> {
        Err(unreachable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unreachable())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
