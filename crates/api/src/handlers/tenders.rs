//! Handlers for the read-only tender API.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use bancadati_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::query::TenderListParams;
use crate::state::AppState;

/// GET /api/tenders
///
/// Filtered, paginated listing, newest publication first. Responds with
/// `{ "data": [...], "pagination": {...} }`.
pub async fn list_tenders(
    State(state): State<AppState>,
    Query(params): Query<TenderListParams>,
) -> AppResult<impl IntoResponse> {
    let (page, filter) = params.into_parts();
    tracing::debug!(?filter, page = page.page(), limit = page.limit(), "Listing tenders");

    let result = state.store.list_tenders(&filter, page).await?;

    Ok(Json(result))
}

/// GET /api/tenders/{id}
pub async fn get_tender(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tender = state
        .store
        .get_tender(&id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tender",
            id,
        }))?;

    Ok(Json(tender))
}

/// GET /api/tenders/filters/options
///
/// Distinct values for every filter dimension, sorted.
pub async fn filter_options(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let options = state.store.filter_options().await?;

    Ok(Json(options))
}
