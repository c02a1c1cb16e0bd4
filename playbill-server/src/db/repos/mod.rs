//! Repository implementations for database access
//!
//! Each repository borrows the pool for the duration of one operation.
//! [`PgStore`] wires them behind the store traits.

pub mod artists;
pub mod categories;
pub mod questions;
pub mod shows;
pub mod venues;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use playbill_core::booking::{
    Artist, ArtistEntry, ArtistProfile, ArtistShow, LocatedSummary, NewShow, ShowListing,
    Summary, Venue, VenueProfile, VenueShow,
};
use playbill_core::pagination::Pagination;
use playbill_core::trivia::{Category, CategoryKey, NewQuestion, Question, QuizRound};

pub use artists::ArtistRepo;
pub use categories::CategoryRepo;
pub use questions::QuestionRepo;
pub use shows::ShowRepo;
pub use venues::VenueRepo;

use crate::store::{BookingStore, QuestionPage, StoreError, TriviaStore};

/// Escape LIKE wildcards and wrap the term for a substring match.
///
/// Used with `ILIKE $n ESCAPE '\'`.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        CategoryRepo::new(&self.pool).list().await
    }

    async fn page_questions(&self, page: Pagination) -> Result<QuestionPage, StoreError> {
        QuestionRepo::new(&self.pool).page(page).await
    }

    async fn questions_in_category(&self, key: &CategoryKey) -> Result<Vec<Question>, StoreError> {
        QuestionRepo::new(&self.pool).in_category(key).await
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        QuestionRepo::new(&self.pool).search(term).await
    }

    async fn quiz_candidates(&self, round: &QuizRound) -> Result<Vec<Question>, StoreError> {
        QuestionRepo::new(&self.pool).quiz_candidates(round).await
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        QuestionRepo::new(&self.pool).get(id).await
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<i64, StoreError> {
        QuestionRepo::new(&self.pool).insert(question).await
    }

    async fn delete_question(&self, id: i64) -> Result<(), StoreError> {
        QuestionRepo::new(&self.pool).delete(id).await
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn venue_summaries(&self, now: NaiveDateTime) -> Result<Vec<LocatedSummary>, StoreError> {
        VenueRepo::new(&self.pool).summaries(now).await
    }

    async fn search_venues(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>, StoreError> {
        VenueRepo::new(&self.pool).search(term, now).await
    }

    async fn get_venue(&self, id: i64) -> Result<Option<Venue>, StoreError> {
        VenueRepo::new(&self.pool).get(id).await
    }

    async fn venue_shows(&self, venue_id: i64) -> Result<Vec<VenueShow>, StoreError> {
        ShowRepo::new(&self.pool).for_venue(venue_id).await
    }

    async fn insert_venue(&self, profile: VenueProfile) -> Result<i64, StoreError> {
        VenueRepo::new(&self.pool).insert(&profile).await
    }

    async fn update_venue(&self, id: i64, profile: VenueProfile) -> Result<(), StoreError> {
        VenueRepo::new(&self.pool).update(id, &profile).await
    }

    async fn delete_venue(&self, id: i64) -> Result<(), StoreError> {
        VenueRepo::new(&self.pool).delete(id).await
    }

    async fn list_artists(&self) -> Result<Vec<ArtistEntry>, StoreError> {
        ArtistRepo::new(&self.pool).list().await
    }

    async fn search_artists(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>, StoreError> {
        ArtistRepo::new(&self.pool).search(term, now).await
    }

    async fn get_artist(&self, id: i64) -> Result<Option<Artist>, StoreError> {
        ArtistRepo::new(&self.pool).get(id).await
    }

    async fn artist_shows(&self, artist_id: i64) -> Result<Vec<ArtistShow>, StoreError> {
        ShowRepo::new(&self.pool).for_artist(artist_id).await
    }

    async fn insert_artist(&self, profile: ArtistProfile) -> Result<i64, StoreError> {
        ArtistRepo::new(&self.pool).insert(&profile).await
    }

    async fn update_artist(&self, id: i64, profile: ArtistProfile) -> Result<(), StoreError> {
        ArtistRepo::new(&self.pool).update(id, &profile).await
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, StoreError> {
        ShowRepo::new(&self.pool).list().await
    }

    async fn insert_show(&self, show: NewShow) -> Result<i64, StoreError> {
        ShowRepo::new(&self.pool).insert(show).await
    }
}
