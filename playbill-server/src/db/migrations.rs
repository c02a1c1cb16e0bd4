//! Schema creation and seed data
//!
//! Statements are idempotent so `run` is safe on every startup.

use sqlx::PgPool;

/// Categories every trivia deployment starts with
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

const SCHEMA: [&str; 8] = [
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id BIGSERIAL PRIMARY KEY,
        type TEXT NOT NULL
    )
    "#,
    // category stays TEXT: existing data stores the id as a string
    r#"
    CREATE TABLE IF NOT EXISTS questions (
        id BIGSERIAL PRIMARY KEY,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        category TEXT NOT NULL,
        difficulty INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS venues (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        address TEXT NOT NULL,
        phone TEXT NOT NULL,
        genres TEXT[] NOT NULL DEFAULT '{}',
        image_link TEXT,
        facebook_link TEXT,
        website TEXT,
        seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS artists (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        phone TEXT NOT NULL DEFAULT '',
        genres TEXT[] NOT NULL DEFAULT '{}',
        image_link TEXT,
        facebook_link TEXT,
        website TEXT,
        seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS shows (
        id BIGSERIAL PRIMARY KEY,
        artist_id BIGINT NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
        venue_id BIGINT NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
        start_time TIMESTAMP NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS questions_category_idx ON questions (category)",
    "CREATE INDEX IF NOT EXISTS shows_venue_idx ON shows (venue_id, start_time)",
    "CREATE INDEX IF NOT EXISTS shows_artist_idx ON shows (artist_id, start_time)",
];

/// Create all tables and indexes.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations...");

    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!("Migrations complete");
    Ok(())
}

/// Insert the default categories when the table is empty.
///
/// Returns the number of categories inserted.
pub async fn seed_categories(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::info!(existing, "categories already present, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for kind in DEFAULT_CATEGORIES {
        inserted += sqlx::query("INSERT INTO categories (type) VALUES ($1)")
            .bind(kind)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }
    tx.commit().await?;

    tracing::info!(inserted, "seeded categories");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_idempotent() {
        for statement in SCHEMA {
            assert!(
                statement.contains("IF NOT EXISTS"),
                "statement must be idempotent: {statement}"
            );
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_run_twice() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        run(&pool).await.expect("first run");
        run(&pool).await.expect("second run");
    }
}
