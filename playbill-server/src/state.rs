//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use playbill_core::random::{RandomSource, ThreadRandom};

use crate::db::PgStore;
use crate::store::{BookingStore, MemoryStore, TriviaStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    trivia: Arc<dyn TriviaStore>,
    booking: Arc<dyn BookingStore>,
    random: Arc<dyn RandomSource>,
}

impl AppState {
    pub fn new(
        trivia: Arc<dyn TriviaStore>,
        booking: Arc<dyn BookingStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                trivia,
                booking,
                random,
            }),
        }
    }

    /// Both stores backed by one PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::new(store.clone(), store, Arc::new(ThreadRandom))
    }

    /// Both stores backed by one in-memory store.
    pub fn in_memory(store: MemoryStore, random: impl RandomSource + 'static) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store, Arc::new(random))
    }

    pub fn trivia(&self) -> &dyn TriviaStore {
        self.inner.trivia.as_ref()
    }

    pub fn booking(&self) -> &dyn BookingStore {
        self.inner.booking.as_ref()
    }

    pub fn random(&self) -> &dyn RandomSource {
        self.inner.random.as_ref()
    }
}
