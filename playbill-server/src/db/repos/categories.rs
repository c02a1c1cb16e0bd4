//! Category repository

use sqlx::{FromRow, PgPool};

use playbill_core::trivia::Category;

use crate::store::StoreError;

#[derive(Debug, Clone, FromRow)]
struct CategoryRow {
    id: i64,
    #[sqlx(rename = "type")]
    kind: String,
}

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All categories ordered by type.
    pub async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, type FROM categories ORDER BY type, id")
                .fetch_all(self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|r| Category {
                id: r.id,
                kind: r.kind,
            })
            .collect())
    }
}
