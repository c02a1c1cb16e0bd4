//! Store traits the HTTP layer talks to
//!
//! Two implementations exist:
//! - [`PgStore`](crate::db::PgStore): PostgreSQL through sqlx
//! - [`MemoryStore`]: in-process, for tests and local experiments

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use playbill_core::booking::{
    Artist, ArtistEntry, ArtistProfile, ArtistShow, LocatedSummary, NewShow, ShowListing,
    Summary, Venue, VenueProfile, VenueShow,
};
use playbill_core::pagination::Pagination;
use playbill_core::trivia::{Category, CategoryKey, NewQuestion, Question, QuizRound};

pub use memory::MemoryStore;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A write referred to a row that does not exist
    #[error("unknown {resource} '{id}'")]
    UnknownReference { resource: &'static str, id: String },
}

impl StoreError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// One page of questions plus the size of the whole listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: i64,
}

/// Questions and categories
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories ordered by type.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// One page of questions ordered by difficulty, then id.
    async fn page_questions(&self, page: Pagination) -> Result<QuestionPage, StoreError>;

    /// Questions whose category key equals `key`.
    async fn questions_in_category(&self, key: &CategoryKey) -> Result<Vec<Question>, StoreError>;

    /// Questions whose text contains `term`, ignoring case.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError>;

    /// The candidate pool for a quiz round.
    async fn quiz_candidates(&self, round: &QuizRound) -> Result<Vec<Question>, StoreError>;

    async fn get_question(&self, id: i64) -> Result<Option<Question>, StoreError>;

    /// Insert and return the new id.
    async fn insert_question(&self, question: NewQuestion) -> Result<i64, StoreError>;

    /// Hard delete; `NotFound` when no row matched.
    async fn delete_question(&self, id: i64) -> Result<(), StoreError>;
}

/// Venues, artists and shows.
///
/// `now` separates past from upcoming shows; a show starting at `now` is
/// upcoming.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn venue_summaries(&self, now: NaiveDateTime) -> Result<Vec<LocatedSummary>, StoreError>;
    async fn search_venues(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>, StoreError>;
    async fn get_venue(&self, id: i64) -> Result<Option<Venue>, StoreError>;
    async fn venue_shows(&self, venue_id: i64) -> Result<Vec<VenueShow>, StoreError>;
    async fn insert_venue(&self, profile: VenueProfile) -> Result<i64, StoreError>;
    async fn update_venue(&self, id: i64, profile: VenueProfile) -> Result<(), StoreError>;
    /// Removes the venue and its shows.
    async fn delete_venue(&self, id: i64) -> Result<(), StoreError>;

    async fn list_artists(&self) -> Result<Vec<ArtistEntry>, StoreError>;
    async fn search_artists(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>, StoreError>;
    async fn get_artist(&self, id: i64) -> Result<Option<Artist>, StoreError>;
    async fn artist_shows(&self, artist_id: i64) -> Result<Vec<ArtistShow>, StoreError>;
    async fn insert_artist(&self, profile: ArtistProfile) -> Result<i64, StoreError>;
    async fn update_artist(&self, id: i64, profile: ArtistProfile) -> Result<(), StoreError>;

    async fn list_shows(&self) -> Result<Vec<ShowListing>, StoreError>;
    /// `UnknownReference` when the artist or venue does not exist.
    async fn insert_show(&self, show: NewShow) -> Result<i64, StoreError>;
}
