//! Category endpoints

use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use playbill_core::trivia::{Category, CategoryKey, Question};

use crate::http::error::ApiError;
use crate::http::extractors::IdPath;
use crate::state::AppState;

/// `{id: type}` as clients expect it
pub(crate) fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

/// Questions of one category; keys are camelCase for client compatibility
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

/// GET /categories
async fn list_categories(State(state): State<AppState>) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state
        .trivia()
        .list_categories()
        .await
        .map_err(ApiError::unprocessable)?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(categories),
    }))
}

/// GET /categories/{id}/questions
async fn category_questions(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let questions = state
        .trivia()
        .questions_in_category(&CategoryKey::from(id))
        .await
        .map_err(ApiError::unprocessable)?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: id,
    }))
}

/// Category routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(category_questions))
}
