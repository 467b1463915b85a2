use std::sync::Arc;

use bancadati_db::store::TenderStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The tender backend selected at startup.
    pub store: Arc<dyn TenderStore>,
}
