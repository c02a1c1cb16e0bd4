//! Artists

use serde::{Deserialize, Serialize};

use super::{check_genres, check_state, normalize_optional, MAX_FIELD_LEN};
use crate::validation::{FieldErrors, Validate};

/// Artist fields as submitted and as stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistProfile {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistProfile {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            genres: self.genres.into_iter().map(|g| g.trim().to_owned()).collect(),
            image_link: normalize_optional(self.image_link),
            facebook_link: normalize_optional(self.facebook_link),
            website: normalize_optional(self.website),
            seeking_venue: self.seeking_venue,
            seeking_description: normalize_optional(self.seeking_description),
        }
    }
}

impl Validate for ArtistProfile {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name, MAX_FIELD_LEN);
        errors.require_text("city", &self.city, MAX_FIELD_LEN);
        check_state(&mut errors, &self.state);
        // phone is optional for artists
        errors.optional_text("phone", Some(&self.phone), MAX_FIELD_LEN);
        errors.digits("phone", self.phone.trim());
        check_genres(&mut errors, &self.genres);
        errors.optional_text("image_link", self.image_link.as_deref(), 500);
        errors.optional_url("facebook_link", self.facebook_link.as_deref());
        errors.optional_url("website", self.website.as_deref());
        errors.optional_text("seeking_description", self.seeking_description.as_deref(), 500);
        errors.into_result()
    }
}

/// A stored artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: i64,
    #[serde(flatten)]
    pub profile: ArtistProfile,
}

/// Entry of the artist index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistEntry {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    fn guns_n_petals() -> ArtistProfile {
        ArtistProfile {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "3261235000".into(),
            genres: vec!["Rock n Roll".into()],
            seeking_venue: true,
            ..ArtistProfile::default()
        }
    }

    #[test]
    fn valid_profile_passes() {
        assert!(guns_n_petals().validate().is_ok());
    }

    #[test]
    fn phone_may_be_empty() {
        let profile = ArtistProfile {
            phone: String::new(),
            ..guns_n_petals()
        };
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn phone_must_be_digits() {
        let profile = ArtistProfile {
            phone: "326-123-5000".into(),
            ..guns_n_petals()
        };
        let errors = profile.validate().unwrap_err();
        assert!(matches!(
            errors.get("phone"),
            [ValidationError::InvalidFormat { .. }]
        ));
    }

    #[test]
    fn genres_are_required() {
        let profile = ArtistProfile {
            genres: Vec::new(),
            ..guns_n_petals()
        };
        let errors = profile.validate().unwrap_err();
        assert_eq!(errors.get("genres"), &[ValidationError::Required]);
    }
}
