//! Show repository

use sqlx::PgPool;

use playbill_core::booking::{ArtistShow, NewShow, ShowListing, VenueShow};

use crate::store::StoreError;

/// Map a foreign key violation on `shows` to the reference that failed.
fn unknown_reference(err: sqlx::Error, show: &NewShow) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            let constraint = db.constraint().unwrap_or_default();
            if constraint.contains("artist") {
                return StoreError::UnknownReference {
                    resource: "artist",
                    id: show.artist_id.to_string(),
                };
            }
            if constraint.contains("venue") {
                return StoreError::UnknownReference {
                    resource: "venue",
                    id: show.venue_id.to_string(),
                };
            }
        }
    }
    StoreError::Sqlx(err)
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every show with its venue and artist, earliest first.
    pub async fn list(&self) -> Result<Vec<ShowListing>, StoreError> {
        let rows = sqlx::query_as::<_, (i64, String, i64, String, Option<String>, chrono::NaiveDateTime)>(
            r#"
            SELECT v.id, v.name, a.id, a.name, a.image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time, s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(venue_id, venue_name, artist_id, artist_name, artist_image_link, start_time)| {
                    ShowListing {
                        venue_id,
                        venue_name,
                        artist_id,
                        artist_name,
                        artist_image_link,
                        start_time,
                    }
                },
            )
            .collect())
    }

    /// Shows at one venue, with the performing artist.
    pub async fn for_venue(&self, venue_id: i64) -> Result<Vec<VenueShow>, StoreError> {
        let rows = sqlx::query_as::<_, (i64, String, Option<String>, chrono::NaiveDateTime)>(
            r#"
            SELECT a.id, a.name, a.image_link, s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(venue_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(artist_id, artist_name, artist_image_link, start_time)| VenueShow {
                artist_id,
                artist_name,
                artist_image_link,
                start_time,
            })
            .collect())
    }

    /// Shows by one artist, with the hosting venue.
    pub async fn for_artist(&self, artist_id: i64) -> Result<Vec<ArtistShow>, StoreError> {
        let rows = sqlx::query_as::<_, (i64, String, Option<String>, chrono::NaiveDateTime)>(
            r#"
            SELECT v.id, v.name, v.image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(artist_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(venue_id, venue_name, venue_image_link, start_time)| ArtistShow {
                venue_id,
                venue_name,
                venue_image_link,
                start_time,
            })
            .collect())
    }

    pub async fn insert(&self, show: NewShow) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unknown_reference(e, &show))?;

        tx.commit().await?;
        tracing::debug!(id, artist_id = show.artist_id, venue_id = show.venue_id, "inserted show");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_rejects_unknown_artist() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");

        let start_time = chrono::NaiveDate::from_ymd_opt(2035, 4, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let result = ShowRepo::new(&pool)
            .insert(NewShow {
                artist_id: i64::MAX,
                venue_id: i64::MAX,
                start_time,
            })
            .await;

        assert!(matches!(result, Err(StoreError::UnknownReference { .. })));
    }
}
