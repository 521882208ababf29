//! Route definitions for the `/series` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::series;
use crate::state::AppState;

/// Routes mounted at `/series`.
///
/// ```text
/// GET    /       -> list_series
/// POST   /       -> create_series
/// PATCH  /{id}   -> patch_series
/// DELETE /{id}   -> delete_series
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(series::list_series).post(series::create_series))
        .route(
            "/{id}",
            patch(series::patch_series).delete(series::delete_series),
        )
}
