//! Route definitions for tenders.

use axum::routing::get;
use axum::Router;

use crate::handlers::tenders;
use crate::state::AppState;

/// Tender routes mounted at `/tenders`.
///
/// ```text
/// GET /                  -> list_tenders
/// GET /filters/options   -> filter_options
/// GET /{id}              -> get_tender
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tenders::list_tenders))
        .route("/filters/options", get(tenders::filter_options))
        .route("/{id}", get(tenders::get_tender))
}
