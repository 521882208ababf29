//! Route definitions for the `/user/watched` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::watched;
use crate::state::AppState;

/// Routes mounted at `/user/watched`.
///
/// ```text
/// GET    / -> list_watched
/// POST   / -> upsert_watched
/// DELETE / -> delete_watched
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(watched::list_watched)
            .post(watched::upsert_watched)
            .delete(watched::delete_watched),
    )
}
