//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default)
//! - Listings use JOINs for show counts - no N+1 queries
//! - Rely on DB constraints, map violations - no check-then-insert
//! - Every write runs in its own transaction

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::PgStore;
pub use sqlx::PgPool;
