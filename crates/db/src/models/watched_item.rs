//! Watched item entity model.

use serde::Serialize;
use sqlx::FromRow;
use tracksm_core::types::DbId;

/// A row from `watched_items`, serialized with the camelCase wire names.
///
/// `watched_at` is kept in its stored `YYYY-MM-DD HH:MM:SS` (UTC) form.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedItem {
    pub user_id: DbId,
    pub media_type: String,
    pub tmdb_id: i64,
    pub season_number: i64,
    pub episode_number: i64,
    pub watched_at: String,
}
