pub mod auth;
pub mod health;
pub mod series;
pub mod watched;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /series                  list (?status, ?q), create
/// /series/{id}             patch, delete
///
/// /auth/register           register
/// /auth/login              login
///
/// /user/watched            list (?userId, ?mediaType, ?tmdbId, ?seasonNumber,
///                          ?episodeNumber), upsert (POST), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // In-memory series catalog.
        .nest("/series", series::router())
        // Registration and credential check.
        .nest("/auth", auth::router())
        // Per-user watched tracking.
        .nest("/user/watched", watched::router())
}
