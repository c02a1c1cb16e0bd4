//! Question endpoints

use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use playbill_core::pagination::Pagination;
use playbill_core::trivia::{NewQuestion, Question, QuestionSubmission, SearchRequest};

use super::categories::category_map;
use crate::http::error::ApiError;
use crate::http::extractors::{IdPath, JsonBody, PageQuery};
use crate::state::AppState;

/// One page of questions with the category lookup
#[derive(Serialize)]
struct QuestionListResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

/// GET /questions?page=N
async fn list_questions(
    State(state): State<AppState>,
    PageQuery(params): PageQuery,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let page = Pagination::from(params);
    let result = state.trivia().page_questions(page).await?;
    if result.total == 0 {
        return Err(ApiError::NotFound);
    }
    let categories = state.trivia().list_categories().await?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: result.questions,
        total_questions: result.total,
        categories: category_map(categories),
        current_category: None,
    }))
}

/// POST /questions
async fn create_question(
    State(state): State<AppState>,
    JsonBody(submission): JsonBody<QuestionSubmission>,
) -> Result<Json<Value>, ApiError> {
    let missing = submission.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::InvalidRequest {
            reason: format!("missing required fields: {}", missing.join(", ")),
        });
    }

    let question = NewQuestion::try_from(submission)?;
    let id = state
        .trivia()
        .insert_question(question)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(id, "question created");
    Ok(Json(json!({ "success": true, "created": id })))
}

/// DELETE /questions/{id}
async fn delete_question(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Value>, ApiError> {
    if state.trivia().get_question(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    state
        .trivia()
        .delete_question(id)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(id, "question deleted");
    Ok(Json(json!({ "success": true, "deleted": id })))
}

/// POST /questions/search
async fn search_questions(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = request.term().ok_or(ApiError::NotFound)?;
    let questions = state.trivia().search_questions(term).await?;

    Ok(Json(SearchResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: None,
    }))
}

/// Question routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
}
