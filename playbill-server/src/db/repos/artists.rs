//! Artist repository

use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use playbill_core::booking::{Artist, ArtistEntry, ArtistProfile, Summary};

use super::contains_pattern;
use crate::store::StoreError;

#[derive(Debug, Clone, FromRow)]
struct ArtistRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    phone: String,
    genres: Vec<String>,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    seeking_venue: bool,
    seeking_description: Option<String>,
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Artist {
            id: row.id,
            profile: ArtistProfile {
                name: row.name,
                city: row.city,
                state: row.state,
                phone: row.phone,
                genres: row.genres,
                image_link: row.image_link,
                facebook_link: row.facebook_link,
                website: row.website,
                seeking_venue: row.seeking_venue,
                seeking_description: row.seeking_description,
            },
        }
    }
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ArtistEntry>, StoreError> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| ArtistEntry { id, name })
            .collect())
    }

    pub async fn search(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>, StoreError> {
        let rows: Vec<(i64, String, i64)> = sqlx::query_as(
            r#"
            SELECT a.id, a.name,
                   COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.name ILIKE $2 ESCAPE '\'
            GROUP BY a.id
            ORDER BY a.id
            "#,
        )
        .bind(now)
        .bind(contains_pattern(term))
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, num_upcoming_shows)| Summary {
                id,
                name,
                num_upcoming_shows,
            })
            .collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Artist>, StoreError> {
        let row: Option<ArtistRow> = sqlx::query_as(
            r#"
            SELECT id, name, city, state, phone, genres, image_link,
                   facebook_link, website, seeking_venue, seeking_description
            FROM artists WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Artist::from))
    }

    pub async fn insert(&self, profile: &ArtistProfile) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO artists (name, city, state, phone, genres, image_link,
                                 facebook_link, website, seeking_venue, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.phone)
        .bind(&profile.genres)
        .bind(&profile.image_link)
        .bind(&profile.facebook_link)
        .bind(&profile.website)
        .bind(profile.seeking_venue)
        .bind(&profile.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id, name = %profile.name, "inserted artist");
        Ok(id)
    }

    pub async fn update(&self, id: i64, profile: &ArtistProfile) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE artists
            SET name = $2, city = $3, state = $4, phone = $5, genres = $6,
                image_link = $7, facebook_link = $8, website = $9,
                seeking_venue = $10, seeking_description = $11
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&profile.name)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.phone)
        .bind(&profile.genres)
        .bind(&profile.image_link)
        .bind(&profile.facebook_link)
        .bind(&profile.website)
        .bind(profile.seeking_venue)
        .bind(&profile.seeking_description)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if affected == 0 {
            return Err(StoreError::not_found("artist", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
