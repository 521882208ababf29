//! In-memory series catalog.
//!
//! The whole collection sits behind one `RwLock`: listings share the read
//! lock, every mutation takes the write lock, so no caller ever observes a
//! half-applied change. Designed to be wrapped in `Arc` and shared through
//! application state.

use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::series::{Series, SeriesDraft, SeriesFilter, UpdateSeries};
use crate::types::DbId;

const ENTITY: &str = "Series";

struct Catalog {
    /// Next id to hand out. Only ever increases, so ids are never reused.
    next_id: DbId,
    /// Series in insertion order.
    items: Vec<Series>,
}

impl Catalog {
    fn position(&self, id: DbId) -> Result<usize, CoreError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }
}

/// Lock-guarded, insertion-ordered collection of [`Series`].
pub struct SeriesStore {
    catalog: RwLock<Catalog>,
}

impl SeriesStore {
    /// Create an empty store whose first id is `1`.
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create a store pre-loaded with the default catalog (ids 1-3).
    pub fn seeded() -> Self {
        Self::with_items(seed_series())
    }

    /// Create a store holding `items`; the next id follows the largest one.
    pub fn with_items(items: Vec<Series>) -> Self {
        let next_id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        Self {
            catalog: RwLock::new(Catalog { next_id, items }),
        }
    }

    /// Return every series matching `filter`, in insertion order.
    pub async fn list(&self, filter: &SeriesFilter) -> Vec<Series> {
        self.catalog
            .read()
            .await
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }

    /// Append a validated series under the next id.
    pub async fn create(&self, draft: SeriesDraft) -> Series {
        let mut catalog = self.catalog.write().await;
        let series = draft.into_series(catalog.next_id);
        catalog.next_id += 1;
        catalog.items.push(series.clone());
        series
    }

    /// Apply the provided fields of `update` to series `id`.
    pub async fn patch(&self, id: DbId, update: UpdateSeries) -> Result<Series, CoreError> {
        let mut catalog = self.catalog.write().await;
        let idx = catalog.position(id)?;
        let series = &mut catalog.items[idx];
        update.apply_to(series);
        Ok(series.clone())
    }

    /// Remove series `id`, keeping the relative order of the rest.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        let mut catalog = self.catalog.write().await;
        let idx = catalog.position(id)?;
        catalog.items.remove(idx);
        Ok(())
    }

    /// Number of series currently stored.
    pub async fn len(&self) -> usize {
        self.catalog.read().await.items.len()
    }
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The catalog every fresh server starts with.
pub fn seed_series() -> Vec<Series> {
    vec![
        Series {
            id: 1,
            title: "Breaking Bad".into(),
            overview: "Professor de química vira produtor de metanfetamina.".into(),
            poster: "https://image.tmdb.org/t/p/w500/ztkUQFLlC19CCMYHW9o1zWhJRNq.jpg".into(),
            seasons: 5,
            status: "completed".into(),
            rating: 9.5,
        },
        Series {
            id: 2,
            title: "Severance".into(),
            overview: "Funcionários separam memórias pessoais e de trabalho.".into(),
            poster: "https://image.tmdb.org/t/p/w500/lF4M1taK9Q4S3mM7Qv7v6V5T4Qf.jpg".into(),
            seasons: 2,
            status: "watching".into(),
            rating: 9.0,
        },
        Series {
            id: 3,
            title: "Dark".into(),
            overview: "Mistérios temporais em uma cidade alemã.".into(),
            poster: "https://image.tmdb.org/t/p/w500/5Lo5fY2R8xk3Q4zNwJ2Y8Q6kU2q.jpg".into(),
            seasons: 3,
            status: "planned".into(),
            rating: 8.8,
        },
    ]
}
