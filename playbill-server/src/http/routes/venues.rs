//! Venue endpoints

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
    group_by_area, Area, NameSearch, SearchResults, Timeline, Venue, VenueProfile, VenueShow,
};
use playbill_core::validation::Validate;

use crate::http::error::ApiError;
use crate::http::extractors::{IdPath, JsonBody};
use crate::state::AppState;

#[derive(Serialize)]
struct AreasResponse {
    success: bool,
    areas: Vec<Area>,
}

#[derive(Serialize)]
pub(crate) struct SearchResponse {
    pub success: bool,
    #[serde(flatten)]
    pub results: SearchResults,
}

/// Venue fields plus its show timeline, flattened into one object
#[derive(Serialize)]
struct VenueDetail {
    success: bool,
    #[serde(flatten)]
    venue: Venue,
    #[serde(flatten)]
    shows: Timeline<VenueShow>,
}

/// GET /venues - venues grouped by city and state
async fn list_venues(State(state): State<AppState>) -> Result<Json<AreasResponse>, ApiError> {
    let now = Utc::now().naive_utc();
    let venues = state.booking().venue_summaries(now).await?;

    Ok(Json(AreasResponse {
        success: true,
        areas: group_by_area(venues),
    }))
}

/// POST /venues/search
async fn search_venues(
    State(state): State<AppState>,
    JsonBody(search): JsonBody<NameSearch>,
) -> Result<Json<SearchResponse>, ApiError> {
    let now = Utc::now().naive_utc();
    let found = state
        .booking()
        .search_venues(search.search_term.trim(), now)
        .await?;

    Ok(Json(SearchResponse {
        success: true,
        results: SearchResults::from(found),
    }))
}

/// GET /venues/{id}
async fn get_venue(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<VenueDetail>, ApiError> {
    let venue = state.booking().get_venue(id).await?.ok_or(ApiError::NotFound)?;
    let shows = state.booking().venue_shows(id).await?;

    Ok(Json(VenueDetail {
        success: true,
        venue,
        shows: Timeline::split(shows, Utc::now().naive_utc()),
    }))
}

/// POST /venues
async fn create_venue(
    State(state): State<AppState>,
    JsonBody(profile): JsonBody<VenueProfile>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let profile = profile.normalized();
    profile.validate()?;

    let name = profile.name.clone();
    let id = state
        .booking()
        .insert_venue(profile)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(id, %name, "venue listed");
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "created": id }))))
}

/// PATCH /venues/{id} - replace every field
async fn update_venue(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(profile): JsonBody<VenueProfile>,
) -> Result<Json<Value>, ApiError> {
    let profile = profile.normalized();
    profile.validate()?;

    state
        .booking()
        .update_venue(id, profile)
        .await
        .map_err(ApiError::unprocessable)?;

    Ok(Json(json!({ "success": true, "updated": id })))
}

/// DELETE /venues/{id} - removes the venue's shows as well
async fn delete_venue(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Value>, ApiError> {
    state
        .booking()
        .delete_venue(id)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(id, "venue deleted");
    Ok(Json(json!({ "success": true, "deleted": id })))
}

/// Venue routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues).post(create_venue))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/{id}",
            get(get_venue).patch(update_venue).delete(delete_venue),
        )
}
