//! Handlers for the `/series` resource, backed by the in-memory
//! [`SeriesStore`](tracksm_core::series_store::SeriesStore).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracksm_core::series::{normalize_series_create, CreateSeries, SeriesFilter, UpdateSeries};

use crate::error::AppResult;
use crate::extract::{parse_series_id, JsonBody, QueryParams};
use crate::query::SeriesListParams;
use crate::state::AppState;

/// GET /api/series
///
/// List series in insertion order, optionally filtered by exact `status`
/// and a case-insensitive `q` over title and overview.
pub async fn list_series(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SeriesListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = SeriesFilter::new(params.status.as_deref(), params.q.as_deref());
    let items = state.series.list(&filter).await;

    Ok(Json(items))
}

/// POST /api/series
pub async fn create_series(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateSeries>,
) -> AppResult<impl IntoResponse> {
    let draft = normalize_series_create(input)?;
    let series = state.series.create(draft).await;

    tracing::info!(series_id = series.id, title = %series.title, "Series created");

    Ok((StatusCode::CREATED, Json(series)))
}

/// PATCH /api/series/{id}
///
/// Only fields present (and non-null) in the body are changed.
pub async fn patch_series(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(input): JsonBody<UpdateSeries>,
) -> AppResult<impl IntoResponse> {
    let id = parse_series_id(&raw_id)?;
    let series = state.series.patch(id, input).await?;

    tracing::info!(series_id = id, "Series updated");

    Ok(Json(series))
}

/// DELETE /api/series/{id}
pub async fn delete_series(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_series_id(&raw_id)?;
    state.series.delete(id).await?;

    tracing::info!(series_id = id, "Series deleted");

    Ok(StatusCode::NO_CONTENT)
}
