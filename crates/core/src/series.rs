//! Series catalog records, create/patch DTOs, and list filtering.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Status assigned to a new series when the client sends none.
pub const DEFAULT_STATUS: &str = "planned";

/// A tracked TV/movie series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: DbId,
    pub title: String,
    pub overview: String,
    pub poster: String,
    pub seasons: u32,
    pub status: String,
    pub rating: f64,
}

/// Raw body for `POST /api/series`. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSeries {
    pub title: String,
    pub overview: String,
    pub poster: String,
    pub seasons: u32,
    pub status: String,
    pub rating: f64,
}

/// A create request that passed [`normalize_series_create`].
///
/// Only the normalizer constructs this, so the store can trust `title` is
/// non-empty and `status` is trimmed and defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDraft {
    title: String,
    overview: String,
    poster: String,
    seasons: u32,
    status: String,
    rating: f64,
}

impl SeriesDraft {
    /// Materialize the draft under a store-assigned id.
    pub fn into_series(self, id: DbId) -> Series {
        Series {
            id,
            title: self.title,
            overview: self.overview,
            poster: self.poster,
            seasons: self.seasons,
            status: self.status,
            rating: self.rating,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Trim title and status, require a title, and default an empty status.
pub fn normalize_series_create(input: CreateSeries) -> Result<SeriesDraft, CoreError> {
    let title = input.title.trim().to_string();
    if title.is_empty() {
        return Err(CoreError::Validation("title is required".into()));
    }

    let status = match input.status.trim() {
        "" => DEFAULT_STATUS.to_string(),
        trimmed => trimmed.to_string(),
    };

    Ok(SeriesDraft {
        title,
        overview: input.overview,
        poster: input.poster,
        seasons: input.seasons,
        status,
        rating: input.rating,
    })
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// Tri-state patch field: missing from the body, sent as `null`, or sent
/// with a value.
///
/// Use with `#[serde(default)]` so a missing key lands on [`FieldUpdate::Absent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldUpdate<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> FieldUpdate<T> {
    /// The provided value, if any. `Absent` and `Null` both yield `None`.
    pub fn into_value(self) -> Option<T> {
        match self {
            FieldUpdate::Value(value) => Some(value),
            FieldUpdate::Absent | FieldUpdate::Null => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldUpdate::Absent)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => FieldUpdate::Value(value),
            None => FieldUpdate::Null,
        })
    }
}

/// Body for `PATCH /api/series/{id}`. Title is not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSeries {
    pub overview: FieldUpdate<String>,
    pub poster: FieldUpdate<String>,
    pub seasons: FieldUpdate<u32>,
    pub status: FieldUpdate<String>,
    pub rating: FieldUpdate<f64>,
}

impl UpdateSeries {
    /// Apply every provided field to `series`, leaving the rest untouched.
    pub fn apply_to(self, series: &mut Series) {
        if let Some(overview) = self.overview.into_value() {
            series.overview = overview;
        }
        if let Some(poster) = self.poster.into_value() {
            series.poster = poster;
        }
        if let Some(seasons) = self.seasons.into_value() {
            series.seasons = seasons;
        }
        if let Some(status) = self.status.into_value() {
            series.status = status.trim().to_string();
        }
        if let Some(rating) = self.rating.into_value() {
            series.rating = rating;
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Filter for listing series. Blank inputs are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesFilter {
    status: Option<String>,
    query: Option<String>,
}

impl SeriesFilter {
    /// `status` matches exactly after trimming; `query` is a case-insensitive
    /// substring of the title or overview.
    pub fn new(status: Option<&str>, query: Option<&str>) -> Self {
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let query = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        Self { status, query }
    }

    pub fn matches(&self, series: &Series) -> bool {
        if let Some(status) = &self.status {
            if &series.status != status {
                return false;
            }
        }

        if let Some(query) = &self.query {
            if !series.title.to_lowercase().contains(query)
                && !series.overview.to_lowercase().contains(query)
            {
                return false;
            }
        }

        true
    }
}
