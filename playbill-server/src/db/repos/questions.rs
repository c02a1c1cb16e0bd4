//! Question repository

use sqlx::{FromRow, PgPool};

use playbill_core::pagination::Pagination;
use playbill_core::trivia::{CategoryKey, NewQuestion, Question, QuizRound};

use super::contains_pattern;
use crate::store::{QuestionPage, StoreError};

const COLUMNS: &str = "id, question, answer, category, difficulty";

#[derive(Debug, Clone, FromRow)]
struct QuestionRow {
    id: i64,
    question: String,
    answer: String,
    category: String,
    difficulty: i32,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: row.id,
            question: row.question,
            answer: row.answer,
            category: CategoryKey::stored(row.category),
            difficulty: row.difficulty,
        }
    }
}

fn into_questions(rows: Vec<QuestionRow>) -> Vec<Question> {
    rows.into_iter().map(Question::from).collect()
}

/// Question repository
pub struct QuestionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page ordered by difficulty, with the total row count.
    pub async fn page(&self, page: Pagination) -> Result<QuestionPage, StoreError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(self.pool)
            .await?;

        let rows: Vec<QuestionRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM questions ORDER BY difficulty, id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(QuestionPage {
            questions: into_questions(rows),
            total,
        })
    }

    pub async fn in_category(&self, key: &CategoryKey) -> Result<Vec<Question>, StoreError> {
        let rows: Vec<QuestionRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM questions WHERE category = $1 ORDER BY id"
        ))
        .bind(key.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(into_questions(rows))
    }

    /// Case-insensitive substring match on the question text.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let rows: Vec<QuestionRow> = sqlx::query_as(&format!(
            r"SELECT {COLUMNS} FROM questions WHERE question ILIKE $1 ESCAPE '\' ORDER BY id"
        ))
        .bind(contains_pattern(term))
        .fetch_all(self.pool)
        .await?;

        Ok(into_questions(rows))
    }

    /// Questions in the round's scope that were not already asked.
    pub async fn quiz_candidates(&self, round: &QuizRound) -> Result<Vec<Question>, StoreError> {
        let rows: Vec<QuestionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {COLUMNS} FROM questions
            WHERE ($1::text IS NULL OR category = $1)
              AND NOT (id = ANY($2))
            ORDER BY id
            "#
        ))
        .bind(round.category().map(CategoryKey::as_str))
        .bind(round.excluded_ids())
        .fetch_all(self.pool)
        .await?;

        Ok(into_questions(rows))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Question>, StoreError> {
        let row: Option<QuestionRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM questions WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Question::from))
    }

    pub async fn insert(&self, question: NewQuestion) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category.as_str())
        .bind(question.difficulty)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id, "inserted question");
        Ok(id)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(StoreError::not_found("question", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
