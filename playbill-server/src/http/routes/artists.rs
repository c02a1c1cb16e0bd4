//! Artist endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use playbill_core::booking::{
    Artist, ArtistEntry, ArtistProfile, ArtistShow, NameSearch, SearchResults, Timeline,
};
use playbill_core::validation::Validate;

use super::venues::SearchResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{IdPath, JsonBody};
use crate::state::AppState;

#[derive(Serialize)]
struct ArtistsResponse {
    success: bool,
    artists: Vec<ArtistEntry>,
}

#[derive(Serialize)]
struct ArtistDetail {
    success: bool,
    #[serde(flatten)]
    artist: Artist,
    #[serde(flatten)]
    shows: Timeline<ArtistShow>,
}

/// GET /artists
async fn list_artists(State(state): State<AppState>) -> Result<Json<ArtistsResponse>, ApiError> {
    let artists = state.booking().list_artists().await?;
    Ok(Json(ArtistsResponse {
        success: true,
        artists,
    }))
}

/// POST /artists/search
async fn search_artists(
    State(state): State<AppState>,
    JsonBody(search): JsonBody<NameSearch>,
) -> Result<Json<SearchResponse>, ApiError> {
    let now = Utc::now().naive_utc();
    let found = state
        .booking()
        .search_artists(search.search_term.trim(), now)
        .await?;

    Ok(Json(SearchResponse {
        success: true,
        results: SearchResults::from(found),
    }))
}

/// GET /artists/{id}
async fn get_artist(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ArtistDetail>, ApiError> {
    let artist = state.booking().get_artist(id).await?.ok_or(ApiError::NotFound)?;
    let shows = state.booking().artist_shows(id).await?;

    Ok(Json(ArtistDetail {
        success: true,
        artist,
        shows: Timeline::split(shows, Utc::now().naive_utc()),
    }))
}

/// POST /artists
async fn create_artist(
    State(state): State<AppState>,
    JsonBody(profile): JsonBody<ArtistProfile>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let profile = profile.normalized();
    profile.validate()?;

    let id = state
        .booking()
        .insert_artist(profile)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(id, "artist listed");
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "created": id }))))
}

/// PATCH /artists/{id}
async fn update_artist(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(profile): JsonBody<ArtistProfile>,
) -> Result<Json<Value>, ApiError> {
    let profile = profile.normalized();
    profile.validate()?;

    state
        .booking()
        .update_artist(id, profile)
        .await
        .map_err(ApiError::unprocessable)?;

    Ok(Json(json!({ "success": true, "updated": id })))
}

/// Artist routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists).post(create_artist))
        .route("/artists/search", post(search_artists))
        .route("/artists/{id}", get(get_artist).patch(update_artist))
}
