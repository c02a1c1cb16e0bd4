//! playbill-server: HTTP API for trivia and venue booking
//!
//! Handlers talk to the [`store`] traits; [`db`] provides the PostgreSQL
//! implementation and [`store::MemoryStore`] an in-process one.

pub mod db;
pub mod http;
pub mod state;
pub mod store;

pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use state::AppState;
pub use store::{BookingStore, MemoryStore, StoreError, TriviaStore};
