//! Query parameter types for API handlers.

use serde::Deserialize;

/// `GET /api/series?status=&q=`.
///
/// Both filters are optional; blank values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SeriesListParams {
    pub status: Option<String>,
    pub q: Option<String>,
}
