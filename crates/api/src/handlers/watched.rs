//! Handlers for the `/user/watched` resource.
//!
//! Items are keyed by (user, media type, TMDB id, season, episode); the
//! table's unique constraint makes upsert a single atomic statement.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracksm_core::watched::{
    normalize_watched_at, normalize_watched_filter, normalize_watched_input, WatchedInput,
    WatchedListParams,
};
use tracksm_db::models::watched_item::WatchedItem;
use tracksm_db::repositories::WatchedItemRepo;

use crate::error::AppResult;
use crate::extract::{JsonBody, QueryParams};
use crate::state::AppState;

/// Acknowledgement body for a successful upsert.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// GET /api/user/watched
///
/// `userId` and `mediaType` are required; `tmdbId`, `seasonNumber` and
/// `episodeNumber` narrow the result. Most recently watched first.
pub async fn list_watched(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<WatchedListParams>,
) -> AppResult<Json<Vec<WatchedItem>>> {
    let filter = normalize_watched_filter(&params)?;
    let items = WatchedItemRepo::list(&state.pool, &filter).await?;

    Ok(Json(items))
}

/// POST /api/user/watched
///
/// Mark an item watched. Repeating the call for the same key only moves
/// `watchedAt`.
pub async fn upsert_watched(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<WatchedInput>,
) -> AppResult<impl IntoResponse> {
    let key = normalize_watched_input(&input)?;
    let watched_at = normalize_watched_at(input.watched_at.as_deref())?;

    WatchedItemRepo::upsert(&state.pool, &key, &watched_at).await?;

    tracing::info!(
        user_id = key.user_id,
        media_type = %key.media_type,
        tmdb_id = key.tmdb_id,
        season = key.season_number,
        episode = key.episode_number,
        %watched_at,
        "Watched item saved",
    );

    Ok(Json(StatusResponse { status: "ok" }))
}

/// DELETE /api/user/watched
///
/// Unmark an item. Succeeds with 204 whether or not the row existed.
pub async fn delete_watched(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<WatchedInput>,
) -> AppResult<impl IntoResponse> {
    let key = normalize_watched_input(&input)?;
    let removed = WatchedItemRepo::delete(&state.pool, &key).await?;

    tracing::info!(
        user_id = key.user_id,
        tmdb_id = key.tmdb_id,
        removed,
        "Watched item cleared",
    );

    Ok(StatusCode::NO_CONTENT)
}
