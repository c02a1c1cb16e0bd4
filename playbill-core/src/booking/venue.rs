//! Venues

use serde::{Deserialize, Serialize};

use super::{check_genres, check_state, normalize_optional, Summary, MAX_FIELD_LEN};
use crate::validation::{FieldErrors, Validate};

/// Venue fields as submitted and as stored.
///
/// Missing fields deserialize as empty so that validation can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueProfile {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueProfile {
    /// Trim text fields and turn blank optionals into `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            address: self.address.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            genres: self.genres.into_iter().map(|g| g.trim().to_owned()).collect(),
            image_link: normalize_optional(self.image_link),
            facebook_link: normalize_optional(self.facebook_link),
            website: normalize_optional(self.website),
            seeking_talent: self.seeking_talent,
            seeking_description: normalize_optional(self.seeking_description),
        }
    }
}

impl Validate for VenueProfile {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name, MAX_FIELD_LEN);
        errors.require_text("city", &self.city, MAX_FIELD_LEN);
        check_state(&mut errors, &self.state);
        errors.require_text("address", &self.address, MAX_FIELD_LEN);
        errors.require_text("phone", &self.phone, MAX_FIELD_LEN);
        errors.digits("phone", self.phone.trim());
        check_genres(&mut errors, &self.genres);
        errors.optional_text("image_link", self.image_link.as_deref(), 500);
        errors.optional_url("facebook_link", self.facebook_link.as_deref());
        errors.optional_url("website", self.website.as_deref());
        errors.optional_text("seeking_description", self.seeking_description.as_deref(), 500);
        errors.into_result()
    }
}

/// A stored venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub id: i64,
    #[serde(flatten)]
    pub profile: VenueProfile,
}

/// Venues sharing a city and state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Summary>,
}

/// A venue summary tagged with its location, as listed by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSummary {
    pub city: String,
    pub state: String,
    pub summary: Summary,
}

/// Group venues into areas, ordered by state then city.
pub fn group_by_area(venues: Vec<LocatedSummary>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut sorted = venues;
    sorted.sort_by(|a, b| {
        (a.state.as_str(), a.city.as_str(), a.summary.id)
            .cmp(&(b.state.as_str(), b.city.as_str(), b.summary.id))
    });

    for venue in sorted {
        match areas.last_mut() {
            Some(area) if area.city == venue.city && area.state == venue.state => {
                area.venues.push(venue.summary);
            }
            _ => areas.push(Area {
                city: venue.city,
                state: venue.state,
                venues: vec![venue.summary],
            }),
        }
    }
    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    fn musical_hop() -> VenueProfile {
        VenueProfile {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: "1231231234".into(),
            genres: vec!["Jazz".into(), "Reggae".into()],
            image_link: None,
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
            website: Some("https://www.themusicalhop.com".into()),
            seeking_talent: true,
            seeking_description: Some("We are on the lookout for a local artist".into()),
        }
    }

    #[test]
    fn valid_profile_passes() {
        assert!(musical_hop().validate().is_ok());
    }

    #[test]
    fn reports_every_failing_field() {
        let profile = VenueProfile {
            phone: "123-123".into(),
            genres: vec!["Polka".into()],
            state: "ZZ".into(),
            ..VenueProfile::default()
        };
        let errors = profile.validate().unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["address", "city", "genres", "name", "phone", "state"]);
        assert!(matches!(
            errors.get("genres"),
            [ValidationError::InvalidChoice { .. }]
        ));
    }

    #[test]
    fn missing_fields_deserialize_empty() {
        let profile: VenueProfile = serde_json::from_str(r#"{"name": "Dueling Pianos"}"#).unwrap();
        assert_eq!(profile.name, "Dueling Pianos");
        assert!(profile.genres.is_empty());
        assert!(!profile.seeking_talent);
    }

    #[test]
    fn normalizes_blank_optionals() {
        let profile = VenueProfile {
            name: "  Park Square  ".into(),
            website: Some("  ".into()),
            ..musical_hop()
        }
        .normalized();
        assert_eq!(profile.name, "Park Square");
        assert_eq!(profile.website, None);
    }

    #[test]
    fn groups_by_city_and_state() {
        let located = |id, name: &str, city: &str, state: &str| LocatedSummary {
            city: city.into(),
            state: state.into(),
            summary: Summary {
                id,
                name: name.into(),
                num_upcoming_shows: 0,
            },
        };
        let areas = group_by_area(vec![
            located(3, "Park Square", "New York", "NY"),
            located(1, "The Musical Hop", "San Francisco", "CA"),
            located(2, "Dueling Pianos", "San Francisco", "CA"),
        ]);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(
            areas[0].venues.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(areas[1].state, "NY");
    }
}
