//! Repository for the `watched_items` table.

use sqlx::{QueryBuilder, Sqlite};
use tracksm_core::watched::{WatchedFilter, WatchedKey};

use crate::models::watched_item::WatchedItem;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, media_type, tmdb_id, season_number, episode_number, watched_at";

/// Provides upsert, delete and filtered listing for watched items.
pub struct WatchedItemRepo;

impl WatchedItemRepo {
    /// Insert the item, or overwrite `watched_at` if the composite key exists.
    pub async fn upsert(
        pool: &DbPool,
        key: &WatchedKey,
        watched_at: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO watched_items
                (user_id, media_type, tmdb_id, season_number, episode_number, watched_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (user_id, media_type, tmdb_id, season_number, episode_number)
             DO UPDATE SET watched_at = excluded.watched_at",
        )
        .bind(key.user_id)
        .bind(key.media_type.as_str())
        .bind(key.tmdb_id)
        .bind(key.season_number)
        .bind(key.episode_number)
        .bind(watched_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete the row with exactly this key. Returns `true` if one existed.
    pub async fn delete(pool: &DbPool, key: &WatchedKey) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM watched_items
             WHERE user_id = ? AND media_type = ? AND tmdb_id = ?
               AND season_number = ? AND episode_number = ?",
        )
        .bind(key.user_id)
        .bind(key.media_type.as_str())
        .bind(key.tmdb_id)
        .bind(key.season_number)
        .bind(key.episode_number)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List items matching `filter`, most recently watched first.
    pub async fn list(pool: &DbPool, filter: &WatchedFilter) -> Result<Vec<WatchedItem>, sqlx::Error> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {COLUMNS} FROM watched_items WHERE user_id = "
        ));
        query.push_bind(filter.user_id);
        query.push(" AND media_type = ");
        query.push_bind(filter.media_type.as_str());

        if let Some(tmdb_id) = filter.tmdb_id {
            query.push(" AND tmdb_id = ");
            query.push_bind(tmdb_id);
        }
        if let Some(season_number) = filter.season_number {
            query.push(" AND season_number = ");
            query.push_bind(season_number);
        }
        if let Some(episode_number) = filter.episode_number {
            query.push(" AND episode_number = ");
            query.push_bind(episode_number);
        }

        query.push(" ORDER BY watched_at DESC, id DESC");

        query.build_query_as::<WatchedItem>().fetch_all(pool).await
    }
}
