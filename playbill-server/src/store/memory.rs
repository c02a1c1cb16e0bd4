//! In-memory store
//!
//! Keeps everything in ordered maps behind one `RwLock`. Orderings match
//! the PostgreSQL store so that handlers behave the same on both.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use playbill_core::booking::{
    Artist, ArtistEntry, ArtistProfile, ArtistShow, LocatedSummary, NewShow, ShowListing,
    Summary, Venue, VenueProfile, VenueShow,
};
use playbill_core::pagination::Pagination;
use playbill_core::trivia::{matches_term, Category, CategoryKey, NewQuestion, Question, QuizRound};

use super::{BookingStore, QuestionPage, StoreError, TriviaStore};

#[derive(Default)]
struct Inner {
    categories: Vec<Category>,
    questions: BTreeMap<i64, Question>,
    venues: BTreeMap<i64, VenueProfile>,
    artists: BTreeMap<i64, ArtistProfile>,
    shows: BTreeMap<i64, NewShow>,
    last_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn upcoming_for(&self, now: NaiveDateTime, matches: impl Fn(&NewShow) -> bool) -> i64 {
        self.shows
            .values()
            .filter(|s| matches(s) && s.start_time >= now)
            .count() as i64
    }
}

/// Store backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add categories as `(id, type)` pairs.
    pub fn with_categories<'a>(mut self, categories: impl IntoIterator<Item = (i64, &'a str)>) -> Self {
        let inner = self.inner.get_mut();
        inner
            .categories
            .extend(categories.into_iter().map(|(id, kind)| Category {
                id,
                kind: kind.to_owned(),
            }));
        self
    }

    /// Add questions, assigning ids in order.
    pub fn with_questions(mut self, questions: impl IntoIterator<Item = NewQuestion>) -> Self {
        let inner = self.inner.get_mut();
        for q in questions {
            let id = inner.next_id();
            inner.questions.insert(id, stored_question(id, q));
        }
        self
    }
}

fn stored_question(id: i64, q: NewQuestion) -> Question {
    Question {
        id,
        question: q.question,
        answer: q.answer,
        category: q.category,
        difficulty: q.difficulty,
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let inner = self.inner.read().await;
        let mut categories = inner.categories.clone();
        categories.sort_by(|a, b| a.kind.cmp(&b.kind).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn page_questions(&self, page: Pagination) -> Result<QuestionPage, StoreError> {
        let inner = self.inner.read().await;
        let mut all: Vec<Question> = inner.questions.values().cloned().collect();
        all.sort_by_key(|q| (q.difficulty, q.id));
        Ok(QuestionPage {
            questions: page.slice(&all).to_vec(),
            total: all.len() as i64,
        })
    }

    async fn questions_in_category(&self, key: &CategoryKey) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .questions
            .values()
            .filter(|q| &q.category == key)
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .questions
            .values()
            .filter(|q| matches_term(&q.question, term))
            .cloned()
            .collect())
    }

    async fn quiz_candidates(&self, round: &QuizRound) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .questions
            .values()
            .filter(|q| round.admits(q))
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        Ok(self.inner.read().await.questions.get(&id).cloned())
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.questions.insert(id, stored_question(id, question));
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .questions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("question", id))
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn venue_summaries(&self, now: NaiveDateTime) -> Result<Vec<LocatedSummary>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .venues
            .iter()
            .map(|(id, v)| LocatedSummary {
                city: v.city.clone(),
                state: v.state.clone(),
                summary: Summary {
                    id: *id,
                    name: v.name.clone(),
                    num_upcoming_shows: inner.upcoming_for(now, |s| s.venue_id == *id),
                },
            })
            .collect())
    }

    async fn search_venues(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>, StoreError> {
        let inner = self.inner.read().await;
        let mut found: Vec<(&i64, &VenueProfile)> = inner
            .venues
            .iter()
            .filter(|(_, v)| matches_term(&v.name, term))
            .collect();
        found.sort_by(|(a_id, a), (b_id, b)| {
            (a.state.as_str(), a.city.as_str(), *a_id).cmp(&(b.state.as_str(), b.city.as_str(), *b_id))
        });
        Ok(found
            .into_iter()
            .map(|(id, v)| Summary {
                id: *id,
                name: v.name.clone(),
                num_upcoming_shows: inner.upcoming_for(now, |s| s.venue_id == *id),
            })
            .collect())
    }

    async fn get_venue(&self, id: i64) -> Result<Option<Venue>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.venues.get(&id).map(|profile| Venue {
            id,
            profile: profile.clone(),
        }))
    }

    async fn venue_shows(&self, venue_id: i64) -> Result<Vec<VenueShow>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .shows
            .values()
            .filter(|s| s.venue_id == venue_id)
            .filter_map(|s| {
                inner.artists.get(&s.artist_id).map(|a| VenueShow {
                    artist_id: s.artist_id,
                    artist_name: a.name.clone(),
                    artist_image_link: a.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect())
    }

    async fn insert_venue(&self, profile: VenueProfile) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.venues.insert(id, profile);
        Ok(id)
    }

    async fn update_venue(&self, id: i64, profile: VenueProfile) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .venues
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("venue", id))?;
        *slot = profile;
        Ok(())
    }

    async fn delete_venue(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .venues
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("venue", id))?;
        inner.shows.retain(|_, s| s.venue_id != id);
        Ok(())
    }

    async fn list_artists(&self) -> Result<Vec<ArtistEntry>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .artists
            .iter()
            .map(|(id, a)| ArtistEntry {
                id: *id,
                name: a.name.clone(),
            })
            .collect())
    }

    async fn search_artists(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .artists
            .iter()
            .filter(|(_, a)| matches_term(&a.name, term))
            .map(|(id, a)| Summary {
                id: *id,
                name: a.name.clone(),
                num_upcoming_shows: inner.upcoming_for(now, |s| s.artist_id == *id),
            })
            .collect())
    }

    async fn get_artist(&self, id: i64) -> Result<Option<Artist>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.artists.get(&id).map(|profile| Artist {
            id,
            profile: profile.clone(),
        }))
    }

    async fn artist_shows(&self, artist_id: i64) -> Result<Vec<ArtistShow>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .shows
            .values()
            .filter(|s| s.artist_id == artist_id)
            .filter_map(|s| {
                inner.venues.get(&s.venue_id).map(|v| ArtistShow {
                    venue_id: s.venue_id,
                    venue_name: v.name.clone(),
                    venue_image_link: v.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect())
    }

    async fn insert_artist(&self, profile: ArtistProfile) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.artists.insert(id, profile);
        Ok(id)
    }

    async fn update_artist(&self, id: i64, profile: ArtistProfile) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .artists
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("artist", id))?;
        *slot = profile;
        Ok(())
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, StoreError> {
        let inner = self.inner.read().await;
        let mut listings: Vec<ShowListing> = inner
            .shows
            .values()
            .filter_map(|s| {
                let venue = inner.venues.get(&s.venue_id)?;
                let artist = inner.artists.get(&s.artist_id)?;
                Some(ShowListing {
                    venue_id: s.venue_id,
                    venue_name: venue.name.clone(),
                    artist_id: s.artist_id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect();
        listings.sort_by_key(|l| l.start_time);
        Ok(listings)
    }

    async fn insert_show(&self, show: NewShow) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.artists.contains_key(&show.artist_id) {
            return Err(StoreError::UnknownReference {
                resource: "artist",
                id: show.artist_id.to_string(),
            });
        }
        if !inner.venues.contains_key(&show.venue_id) {
            return Err(StoreError::UnknownReference {
                resource: "venue",
                id: show.venue_id.to_string(),
            });
        }
        let id = inner.next_id();
        inner.shows.insert(id, show);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playbill_core::trivia::QuizScope;

    fn new_question(text: &str, category: i64, difficulty: i32) -> NewQuestion {
        NewQuestion {
            question: text.into(),
            answer: "answer".into(),
            category: CategoryKey::from(category),
            difficulty,
        }
    }

    #[tokio::test]
    async fn pages_order_by_difficulty() {
        let store = MemoryStore::new().with_questions([
            new_question("hard", 1, 5),
            new_question("easy", 1, 1),
            new_question("medium", 2, 3),
        ]);

        let page = store.page_questions(Pagination::new(1, 2)).await.unwrap();
        assert_eq!(page.total, 3);
        let texts: Vec<_> = page.questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, vec!["easy", "medium"]);
    }

    #[tokio::test]
    async fn quiz_candidates_filter() {
        let store = MemoryStore::new().with_questions([
            new_question("a", 1, 1),
            new_question("b", 2, 1),
            new_question("c", 2, 1),
        ]);

        let round = QuizRound::new(QuizScope::Category(CategoryKey::from(2)), [2]);
        let ids: Vec<_> = store
            .quiz_candidates(&round)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![3]);
    }

    #[tokio::test]
    async fn delete_missing_question_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete_question(9999).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { resource: "question", .. }));
    }

    #[tokio::test]
    async fn show_requires_known_artist_and_venue() {
        let store = MemoryStore::new();
        let venue_id = store.insert_venue(VenueProfile::default()).await.unwrap();
        let err = store
            .insert_show(NewShow {
                artist_id: 42,
                venue_id,
                start_time: chrono::NaiveDate::from_ymd_opt(2030, 1, 1)
                    .unwrap()
                    .and_hms_opt(20, 0, 0)
                    .unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownReference { resource: "artist", .. }));
    }
}
