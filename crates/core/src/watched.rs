//! Watched-item normalization: composite key, list filters, and the
//! `watchedAt` timestamp.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Storage format for `watched_at`. Lexicographic order equals time order.
pub const WATCHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of media a watched item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Parse a client-supplied media type, ignoring case and surrounding
    /// whitespace.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            _ => Err(CoreError::Validation("mediaType must be movie or tv".into())),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body for `POST`/`DELETE /api/user/watched`.
///
/// Missing and `null` fields both decode to their zero value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchedInput {
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: DbId,
    #[serde(deserialize_with = "null_as_default")]
    pub media_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tmdb_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub season_number: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub episode_number: i64,
    pub watched_at: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Composite identity of a watched item. At most one row exists per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchedKey {
    pub user_id: DbId,
    pub media_type: MediaType,
    pub tmdb_id: i64,
    pub season_number: i64,
    pub episode_number: i64,
}

/// Validate a watched body and reduce it to its composite key.
///
/// Movies always collapse to season 0 / episode 0. A TV episode needs a
/// season.
pub fn normalize_watched_input(input: &WatchedInput) -> Result<WatchedKey, CoreError> {
    if input.user_id <= 0 {
        return Err(CoreError::Validation("userId is required".into()));
    }
    if input.tmdb_id <= 0 {
        return Err(CoreError::Validation("tmdbId is required".into()));
    }
    let media_type = MediaType::parse(&input.media_type)?;

    let (season_number, episode_number) = match media_type {
        MediaType::Movie => (0, 0),
        MediaType::Tv => {
            if input.episode_number > 0 && input.season_number <= 0 {
                return Err(CoreError::Validation(
                    "seasonNumber is required when episodeNumber is provided".into(),
                ));
            }
            (input.season_number, input.episode_number)
        }
    };
    if season_number < 0 || episode_number < 0 {
        return Err(CoreError::Validation(
            "seasonNumber and episodeNumber must be positive".into(),
        ));
    }

    Ok(WatchedKey {
        user_id: input.user_id,
        media_type,
        tmdb_id: input.tmdb_id,
        season_number,
        episode_number,
    })
}

// ---------------------------------------------------------------------------
// watchedAt parsing
// ---------------------------------------------------------------------------

type WatchedAtParser = fn(&str) -> Option<NaiveDateTime>;

/// Accepted `watchedAt` formats, tried in order; the first match wins.
///
/// New formats go at the end so inputs that parse today keep parsing to the
/// same instant.
const WATCHED_AT_PARSERS: &[WatchedAtParser] = &[
    parse_rfc3339,
    parse_date_at_noon,
    parse_naive_datetime,
];

/// Strict RFC 3339: the date and time must be joined by an uppercase `T`.
fn parse_rfc3339(raw: &str) -> Option<NaiveDateTime> {
    if raw.as_bytes().get(10) != Some(&b'T') {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).naive_utc())
}

/// Date-only values are pinned to 12:00 UTC so any client timezone still
/// lands on the same calendar day.
fn parse_date_at_noon(raw: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(12, 0, 0))
}

fn parse_naive_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, WATCHED_AT_FORMAT).ok()
}

/// Canonicalize a client `watchedAt` into [`WATCHED_AT_FORMAT`] (UTC).
///
/// A missing or blank value means "now".
pub fn normalize_watched_at(raw: Option<&str>) -> Result<String, CoreError> {
    normalize_watched_at_with_now(raw, Utc::now())
}

/// [`normalize_watched_at`] with an explicit clock.
pub fn normalize_watched_at_with_now(
    raw: Option<&str>,
    now: DateTime<Utc>,
) -> Result<String, CoreError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Ok(now.format(WATCHED_AT_FORMAT).to_string());
    }

    WATCHED_AT_PARSERS
        .iter()
        .find_map(|parse| parse(trimmed))
        .map(|parsed| parsed.format(WATCHED_AT_FORMAT).to_string())
        .ok_or_else(|| CoreError::Validation("invalid watchedAt".into()))
}

// ---------------------------------------------------------------------------
// List filters
// ---------------------------------------------------------------------------

/// Raw query string for `GET /api/user/watched`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchedListParams {
    pub user_id: Option<String>,
    pub media_type: Option<String>,
    pub tmdb_id: Option<String>,
    pub season_number: Option<String>,
    pub episode_number: Option<String>,
}

/// Validated listing filter. `user_id` and `media_type` are mandatory; the
/// rest are optional exact-match refinements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedFilter {
    pub user_id: DbId,
    pub media_type: MediaType,
    pub tmdb_id: Option<i64>,
    pub season_number: Option<i64>,
    pub episode_number: Option<i64>,
}

/// Blank parameters count as absent.
fn non_blank(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_refinement(raw: &Option<String>, field: &str, min: i64) -> Result<Option<i64>, CoreError> {
    non_blank(raw)
        .map(|value| match value.parse::<i64>() {
            Ok(n) if n >= min => Ok(n),
            _ => Err(CoreError::Validation(format!("invalid {field}"))),
        })
        .transpose()
}

pub fn normalize_watched_filter(params: &WatchedListParams) -> Result<WatchedFilter, CoreError> {
    let user_id = non_blank(&params.user_id)
        .and_then(|raw| raw.parse::<DbId>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::Validation("userId is required".into()))?;

    let media_type = MediaType::parse(params.media_type.as_deref().unwrap_or_default())?;

    Ok(WatchedFilter {
        user_id,
        media_type,
        tmdb_id: parse_refinement(&params.tmdb_id, "tmdbId", 1)?,
        season_number: parse_refinement(&params.season_number, "seasonNumber", 0)?,
        episode_number: parse_refinement(&params.episode_number, "episodeNumber", 0)?,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn input(media_type: &str, season: i64, episode: i64) -> WatchedInput {
        WatchedInput {
            user_id: 1,
            media_type: media_type.into(),
            tmdb_id: 550,
            season_number: season,
            episode_number: episode,
            watched_at: None,
        }
    }

    #[test]
    fn movie_forces_zero_season_and_episode() {
        let key = normalize_watched_input(&input(" MOVIE ", 4, 9)).unwrap();

        assert_eq!(key.media_type, MediaType::Movie);
        assert_eq!(key.season_number, 0);
        assert_eq!(key.episode_number, 0);
    }

    #[test]
    fn movie_ignores_negative_numbers() {
        let key = normalize_watched_input(&input("movie", -1, -2)).unwrap();
        assert_eq!((key.season_number, key.episode_number), (0, 0));
    }

    #[test]
    fn tv_episode_requires_season() {
        let result = normalize_watched_input(&input("tv", 0, 3));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("seasonNumber is required"));
    }

    #[test]
    fn tv_rejects_negative_numbers() {
        assert_matches!(
            normalize_watched_input(&input("tv", -1, 0)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            normalize_watched_input(&input("tv", 1, -1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn tv_whole_season_is_allowed() {
        let key = normalize_watched_input(&input("tv", 2, 0)).unwrap();
        assert_eq!((key.season_number, key.episode_number), (2, 0));
    }

    #[test]
    fn rejects_missing_ids_and_unknown_media_type() {
        let mut bad_user = input("tv", 1, 1);
        bad_user.user_id = 0;
        assert_matches!(normalize_watched_input(&bad_user), Err(CoreError::Validation(msg)) if msg == "userId is required");

        let mut bad_tmdb = input("tv", 1, 1);
        bad_tmdb.tmdb_id = -5;
        assert_matches!(normalize_watched_input(&bad_tmdb), Err(CoreError::Validation(msg)) if msg == "tmdbId is required");

        assert_matches!(
            normalize_watched_input(&input("anime", 1, 1)),
            Err(CoreError::Validation(msg)) if msg == "mediaType must be movie or tv"
        );
    }

    #[test]
    fn input_deserializes_camel_case_with_defaults() {
        let parsed: WatchedInput =
            serde_json::from_str(r#"{"userId": 1, "mediaType": "movie", "tmdbId": 550}"#).unwrap();

        assert_eq!(parsed.user_id, 1);
        assert_eq!(parsed.tmdb_id, 550);
        assert_eq!(parsed.season_number, 0);
        assert!(parsed.watched_at.is_none());
    }

    #[test]
    fn input_treats_null_numbers_as_zero() {
        let parsed: WatchedInput = serde_json::from_str(
            r#"{"userId": 1, "mediaType": "tv", "tmdbId": 1399, "seasonNumber": null, "episodeNumber": null, "watchedAt": null}"#,
        )
        .unwrap();

        assert_eq!((parsed.season_number, parsed.episode_number), (0, 0));
        assert!(parsed.watched_at.is_none());

        let key = normalize_watched_input(&parsed).unwrap();
        assert_eq!((key.season_number, key.episode_number), (0, 0));
    }

    #[test]
    fn blank_watched_at_uses_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 21, 5, 7).unwrap();

        assert_eq!(normalize_watched_at_with_now(None, now).unwrap(), "2024-03-09 21:05:07");
        assert_eq!(normalize_watched_at_with_now(Some("   "), now).unwrap(), "2024-03-09 21:05:07");
    }

    #[test]
    fn rfc3339_is_converted_to_utc() {
        let out = normalize_watched_at(Some("2024-03-09T22:30:00-03:00")).unwrap();
        assert_eq!(out, "2024-03-10 01:30:00");

        let out = normalize_watched_at(Some("2024-03-09T10:00:00.250Z")).unwrap();
        assert_eq!(out, "2024-03-09 10:00:00");
    }

    #[test]
    fn date_only_is_anchored_at_noon() {
        let out = normalize_watched_at(Some(" 2024-03-09 ")).unwrap();
        assert_eq!(out, "2024-03-09 12:00:00");
    }

    #[test]
    fn naive_datetime_is_taken_as_utc() {
        let out = normalize_watched_at(Some("2024-03-09 08:15:00")).unwrap();
        assert_eq!(out, "2024-03-09 08:15:00");
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert_matches!(
            normalize_watched_at(Some("09/03/2024")),
            Err(CoreError::Validation(msg)) if msg == "invalid watchedAt"
        );
        assert_matches!(normalize_watched_at(Some("2024-02-30")), Err(CoreError::Validation(_)));
        for raw in ["2024-03-09 08:15:00Z", "2024-03-09t08:15:00Z", "2024-03-09 08:15:00+02:00"] {
            assert_matches!(
                normalize_watched_at(Some(raw)),
                Err(CoreError::Validation(msg)) if msg == "invalid watchedAt",
                "{raw:?} should be rejected"
            );
        }
    }

    fn params(user: &str, media: &str) -> WatchedListParams {
        WatchedListParams {
            user_id: Some(user.into()),
            media_type: Some(media.into()),
            ..Default::default()
        }
    }

    #[test]
    fn filter_requires_user_and_media_type() {
        let filter = normalize_watched_filter(&params(" 3 ", "TV")).unwrap();
        assert_eq!(filter.user_id, 3);
        assert_eq!(filter.media_type, MediaType::Tv);
        assert_eq!(filter.tmdb_id, None);

        assert_matches!(
            normalize_watched_filter(&params("abc", "tv")),
            Err(CoreError::Validation(msg)) if msg == "userId is required"
        );
        assert_matches!(
            normalize_watched_filter(&WatchedListParams::default()),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            normalize_watched_filter(&params("3", "book")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn filter_parses_refinements() {
        let mut raw = params("3", "tv");
        raw.tmdb_id = Some("1399".into());
        raw.season_number = Some("0".into());
        raw.episode_number = Some("  ".into());

        let filter = normalize_watched_filter(&raw).unwrap();
        assert_eq!(filter.tmdb_id, Some(1399));
        assert_eq!(filter.season_number, Some(0));
        assert_eq!(filter.episode_number, None);
    }

    #[test]
    fn filter_rejects_bad_refinements() {
        let mut raw = params("3", "tv");
        raw.tmdb_id = Some("0".into());
        assert_matches!(normalize_watched_filter(&raw), Err(CoreError::Validation(msg)) if msg == "invalid tmdbId");

        let mut raw = params("3", "tv");
        raw.season_number = Some("-1".into());
        assert_matches!(normalize_watched_filter(&raw), Err(CoreError::Validation(msg)) if msg == "invalid seasonNumber");

        let mut raw = params("3", "tv");
        raw.episode_number = Some("two".into());
        assert_matches!(normalize_watched_filter(&raw), Err(CoreError::Validation(msg)) if msg == "invalid episodeNumber");
    }
}
