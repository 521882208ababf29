use std::sync::Arc;

use tracksm_core::series_store::SeriesStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool (users, watched items).
    pub pool: tracksm_db::DbPool,
    /// In-memory series catalog.
    pub series: Arc<SeriesStore>,
}
