//! playbill-core: domain logic shared by the playbill server and CLI
//!
//! - `trivia`: questions, categories, quiz rounds
//! - `booking`: venues, artists, shows
//! - `pagination`: fixed-size page slicing
//! - `validation`: field-level errors and the `Validate` trait
//!
//! Nothing here touches the network or the database.

pub mod booking;
pub mod config;
pub mod pagination;
pub mod random;
pub mod trivia;
pub mod validation;

pub use config::{ConfigError, PlaybillConfig};
pub use pagination::{PageParams, Pagination, QUESTIONS_PER_PAGE};
pub use random::{FixedIndex, RandomSource, ThreadRandom};
pub use validation::{FieldErrors, Validate, ValidationError};
