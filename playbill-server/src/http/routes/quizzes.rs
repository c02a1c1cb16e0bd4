//! Quiz endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use playbill_core::trivia::{Question, QuizRequest, QuizRound};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::state::AppState;

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Option<Question>,
}

/// POST /quizzes
async fn next_question(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let round = QuizRound::try_from(request)?;
    let candidates = state
        .trivia()
        .quiz_candidates(&round)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::debug!(
        candidates = candidates.len(),
        previous = round.previous.len(),
        "drawing quiz question"
    );
    let question = round.pick(candidates, state.random());

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

/// Quiz routes
pub fn router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}
