//! Booking domain: venues, artists and the shows that connect them

pub mod artist;
pub mod genre;
pub mod show;
pub mod state;
pub mod venue;

use serde::{Deserialize, Serialize};

pub use artist::{Artist, ArtistEntry, ArtistProfile};
pub use genre::Genre;
pub use show::{ArtistShow, NewShow, ShowForm, ShowListing, Timeline, VenueShow};
pub use venue::{group_by_area, Area, LocatedSummary, Venue, VenueProfile};

use crate::validation::{FieldErrors, ValidationError};

/// Maximum length for name, city, address and phone fields
pub const MAX_FIELD_LEN: usize = 120;

/// A venue or artist with its count of upcoming shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// `POST /venues/search` and `POST /artists/search` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NameSearch {
    pub search_term: String,
}

/// Search response: `{count, data}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<Summary>,
}

impl From<Vec<Summary>> for SearchResults {
    fn from(data: Vec<Summary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub(crate) fn check_state(errors: &mut FieldErrors, state: &str) {
    let state = state.trim();
    if state.is_empty() {
        errors.add("state", ValidationError::Required);
    } else if !state::is_us_state(state) {
        errors.add(
            "state",
            ValidationError::InvalidChoice {
                value: state.to_owned(),
            },
        );
    }
}

pub(crate) fn check_genres(errors: &mut FieldErrors, genres: &[String]) {
    if genres.iter().all(|g| g.trim().is_empty()) {
        errors.add("genres", ValidationError::Required);
        return;
    }
    for genre in genres {
        if Genre::from_name(genre.trim()).is_none() {
            errors.add(
                "genres",
                ValidationError::InvalidChoice {
                    value: genre.clone(),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_results_count_data() {
        let results = SearchResults::from(vec![Summary {
            id: 2,
            name: "The Dueling Pianos Bar".into(),
            num_upcoming_shows: 0,
        }]);
        assert_eq!(results.count, 1);
    }

    #[test]
    fn missing_search_term_is_empty() {
        let search: NameSearch = serde_json::from_str("{}").unwrap();
        assert_eq!(search.search_term, "");
    }

    #[test]
    fn genre_checks() {
        let mut errors = FieldErrors::new();
        check_genres(&mut errors, &["Jazz".into(), "Blues".into()]);
        assert!(errors.is_empty());

        check_genres(&mut errors, &["Jazz".into(), "Polka".into(), "Yodel".into()]);
        assert_eq!(errors.get("genres").len(), 2);
    }
}
