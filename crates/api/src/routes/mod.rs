pub mod health;
pub mod tenders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health                              service health
///
/// /tenders                             list (filter + pagination)
/// /tenders/filters/options             distinct filter values
/// /tenders/{id}                        single tender
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/tenders", tenders::router())
}
