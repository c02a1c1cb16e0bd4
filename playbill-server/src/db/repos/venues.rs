//! Venue repository

use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use playbill_core::booking::{LocatedSummary, Summary, Venue, VenueProfile};

use super::contains_pattern;
use crate::store::StoreError;

#[derive(Debug, Clone, FromRow)]
struct VenueRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    address: String,
    phone: String,
    genres: Vec<String>,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    seeking_talent: bool,
    seeking_description: Option<String>,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Venue {
            id: row.id,
            profile: VenueProfile {
                name: row.name,
                city: row.city,
                state: row.state,
                address: row.address,
                phone: row.phone,
                genres: row.genres,
                image_link: row.image_link,
                facebook_link: row.facebook_link,
                website: row.website,
                seeking_talent: row.seeking_talent,
                seeking_description: row.seeking_description,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct SummaryRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    num_upcoming_shows: i64,
}

impl SummaryRow {
    fn summary(&self) -> Summary {
        Summary {
            id: self.id,
            name: self.name.clone(),
            num_upcoming_shows: self.num_upcoming_shows,
        }
    }
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    async fn summary_rows(
        &self,
        pattern: Option<String>,
        now: NaiveDateTime,
    ) -> Result<Vec<SummaryRow>, StoreError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT v.id, v.name, v.city, v.state,
                   COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE ($2::text IS NULL OR v.name ILIKE $2 ESCAPE '\')
            GROUP BY v.id
            ORDER BY v.state, v.city, v.id
            "#,
        )
        .bind(now)
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Every venue with its location and upcoming show count.
    pub async fn summaries(&self, now: NaiveDateTime) -> Result<Vec<LocatedSummary>, StoreError> {
        let rows = self.summary_rows(None, now).await?;
        Ok(rows
            .into_iter()
            .map(|r| LocatedSummary {
                summary: r.summary(),
                city: r.city,
                state: r.state,
            })
            .collect())
    }

    pub async fn search(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>, StoreError> {
        let rows = self.summary_rows(Some(contains_pattern(term)), now).await?;
        Ok(rows.iter().map(SummaryRow::summary).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Venue>, StoreError> {
        let row: Option<VenueRow> = sqlx::query_as(
            r#"
            SELECT id, name, city, state, address, phone, genres, image_link,
                   facebook_link, website, seeking_talent, seeking_description
            FROM venues WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Venue::from))
    }

    pub async fn insert(&self, profile: &VenueProfile) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO venues (name, city, state, address, phone, genres, image_link,
                                facebook_link, website, seeking_talent, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.address)
        .bind(&profile.phone)
        .bind(&profile.genres)
        .bind(&profile.image_link)
        .bind(&profile.facebook_link)
        .bind(&profile.website)
        .bind(profile.seeking_talent)
        .bind(&profile.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id, name = %profile.name, "inserted venue");
        Ok(id)
    }

    /// Replace every column; `NotFound` when the venue is gone.
    pub async fn update(&self, id: i64, profile: &VenueProfile) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE venues
            SET name = $2, city = $3, state = $4, address = $5, phone = $6, genres = $7,
                image_link = $8, facebook_link = $9, website = $10,
                seeking_talent = $11, seeking_description = $12
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&profile.name)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.address)
        .bind(&profile.phone)
        .bind(&profile.genres)
        .bind(&profile.image_link)
        .bind(&profile.facebook_link)
        .bind(&profile.website)
        .bind(profile.seeking_talent)
        .bind(&profile.seeking_description)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if affected == 0 {
            return Err(StoreError::not_found("venue", id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete the venue; its shows go with it through the cascade.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(StoreError::not_found("venue", id));
        }

        tx.commit().await?;
        tracing::info!(id, "deleted venue");
        Ok(())
    }
}
