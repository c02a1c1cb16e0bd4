//! Show endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use playbill_core::booking::{NewShow, ShowForm, ShowListing};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::state::AppState;

#[derive(Serialize)]
struct ShowsResponse {
    success: bool,
    shows: Vec<ShowListing>,
}

/// GET /shows
async fn list_shows(State(state): State<AppState>) -> Result<Json<ShowsResponse>, ApiError> {
    let shows = state.booking().list_shows().await?;
    Ok(Json(ShowsResponse {
        success: true,
        shows,
    }))
}

/// POST /shows
async fn create_show(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<ShowForm>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let show = NewShow::try_from(form)?;
    let id = state
        .booking()
        .insert_show(show)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(id, artist_id = show.artist_id, venue_id = show.venue_id, "show listed");
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "created": id }))))
}

/// Show routes
pub fn router() -> Router<AppState> {
    Router::new().route("/shows", get(list_shows).post(create_show))
}
