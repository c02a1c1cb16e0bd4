//! Route handlers organized by resource

pub mod artists;
pub mod categories;
pub mod health;
pub mod questions;
pub mod quizzes;
pub mod shows;
pub mod venues;
