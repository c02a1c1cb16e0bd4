//! Shows: an artist playing a venue at a given time

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::validation::{FieldErrors, Validate, ValidationError};

/// Format used for show times in responses
pub const SHOW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted on input, tried in order before RFC 3339
const INPUT_FORMATS: [&str; 3] = [SHOW_TIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a submitted start time. Offsets are converted to UTC.
pub fn parse_show_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Serde helper writing show times as `YYYY-MM-DD HH:MM:SS`
pub mod show_time {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::SHOW_TIME_FORMAT))
    }
}

/// An id sent either as a number or as numeric text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdRef {
    Number(i64),
    Text(String),
}

impl IdRef {
    pub fn to_id(&self) -> Option<i64> {
        match self {
            Self::Number(id) => Some(*id),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// `POST /shows` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: Option<IdRef>,
    pub venue_id: Option<IdRef>,
    pub start_time: Option<String>,
}

/// A validated show ready to insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

fn check_id(errors: &mut FieldErrors, field: &'static str, id: Option<&IdRef>) -> Option<i64> {
    let Some(id) = id else {
        errors.add(field, ValidationError::Required);
        return None;
    };
    match id.to_id() {
        Some(id) if id > 0 => Some(id),
        _ => {
            errors.add(
                field,
                ValidationError::InvalidFormat {
                    reason: "must be a positive integer id",
                },
            );
            None
        }
    }
}

impl ShowForm {
    fn checked(&self) -> (FieldErrors, Option<NewShow>) {
        let mut errors = FieldErrors::new();
        let artist_id = check_id(&mut errors, "artist_id", self.artist_id.as_ref());
        let venue_id = check_id(&mut errors, "venue_id", self.venue_id.as_ref());

        let start_time = match self.start_time.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("start_time", ValidationError::Required);
                None
            }
            Some(raw) => {
                let parsed = parse_show_time(raw);
                if parsed.is_none() {
                    errors.add(
                        "start_time",
                        ValidationError::InvalidFormat {
                            reason: "expected YYYY-MM-DD HH:MM:SS",
                        },
                    );
                }
                parsed
            }
        };

        let show = match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => Some(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => None,
        };
        (errors, show)
    }
}

impl Validate for ShowForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        self.checked().0.into_result()
    }
}

impl TryFrom<ShowForm> for NewShow {
    type Error = FieldErrors;

    fn try_from(form: ShowForm) -> Result<Self, Self::Error> {
        match form.checked() {
            (errors, Some(show)) if errors.is_empty() => Ok(show),
            (errors, _) => Err(errors),
        }
    }
}

/// Anything placed on the calendar
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

/// Entry of the show index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(with = "show_time")]
    pub start_time: NaiveDateTime,
}

/// A show as seen from its venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(with = "show_time")]
    pub start_time: NaiveDateTime,
}

/// A show as seen from its artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    #[serde(with = "show_time")]
    pub start_time: NaiveDateTime,
}

impl Scheduled for ShowListing {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

/// Shows split around a reference time.
///
/// A show starting exactly at `now` counts as upcoming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline<S> {
    pub past_shows: Vec<S>,
    pub upcoming_shows: Vec<S>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<S: Scheduled> Timeline<S> {
    pub fn split(shows: Vec<S>, now: NaiveDateTime) -> Self {
        let (mut past_shows, mut upcoming_shows): (Vec<S>, Vec<S>) =
            shows.into_iter().partition(|s| s.start_time() < now);
        past_shows.sort_by_key(|s| std::cmp::Reverse(s.start_time()));
        upcoming_shows.sort_by_key(Scheduled::start_time);
        Self {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_show_time(s).unwrap()
    }

    fn show(artist_id: i64, start: &str) -> VenueShow {
        VenueShow {
            artist_id,
            artist_name: format!("artist {artist_id}"),
            artist_image_link: None,
            start_time: at(start),
        }
    }

    #[test]
    fn parses_accepted_formats() {
        let expected = at("2035-04-01 20:00:00");
        assert_eq!(parse_show_time("2035-04-01T20:00:00"), Some(expected));
        assert_eq!(parse_show_time("2035-04-01T20:00"), Some(expected));
        assert_eq!(parse_show_time("2035-04-01T22:00:00+02:00"), Some(expected));
        assert_eq!(parse_show_time("next tuesday"), None);
    }

    #[test]
    fn form_requires_everything() {
        let errors = NewShow::try_from(ShowForm::default()).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["artist_id", "start_time", "venue_id"]);
    }

    #[test]
    fn form_accepts_text_ids() {
        let form: ShowForm = serde_json::from_value(serde_json::json!({
            "artist_id": "4",
            "venue_id": 1,
            "start_time": "2019-05-21 21:30:00"
        }))
        .unwrap();
        let show = NewShow::try_from(form).unwrap();
        assert_eq!(show.artist_id, 4);
        assert_eq!(show.venue_id, 1);
        assert_eq!(show.start_time, at("2019-05-21 21:30:00"));
    }

    #[test]
    fn form_rejects_bad_ids() {
        let form: ShowForm = serde_json::from_value(serde_json::json!({
            "artist_id": "four",
            "venue_id": -1,
            "start_time": "2019-05-21 21:30:00"
        }))
        .unwrap();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn timeline_splits_on_now() {
        let now = at("2025-01-01 00:00:00");
        let timeline = Timeline::split(
            vec![
                show(1, "2024-06-01 20:00:00"),
                show(2, "2026-06-01 20:00:00"),
                show(3, "2025-01-01 00:00:00"),
                show(4, "2024-12-01 20:00:00"),
            ],
            now,
        );
        assert_eq!(timeline.past_shows_count, 2);
        assert_eq!(timeline.upcoming_shows_count, 2);
        assert_eq!(timeline.past_shows[0].artist_id, 4);
        assert_eq!(timeline.upcoming_shows[0].artist_id, 3);
    }

    #[test]
    fn show_time_serialization() {
        let json = serde_json::to_value(show(1, "2019-05-21T21:30:00")).unwrap();
        assert_eq!(json["start_time"], "2019-05-21 21:30:00");
    }
}
