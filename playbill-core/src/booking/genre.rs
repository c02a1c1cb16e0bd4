//! Music genres accepted on venue and artist profiles

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    #[serde(rename = "Heavy Metal")]
    HeavyMetal,
    Instrumental,
    Jazz,
    #[serde(rename = "Musical Theatre")]
    MusicalTheatre,
    Pop,
    Punk,
    #[serde(rename = "R&B")]
    RhythmAndBlues,
    Reggae,
    #[serde(rename = "Rock n Roll")]
    RockNRoll,
    Soul,
    Other,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alternative => "Alternative",
            Self::Blues => "Blues",
            Self::Classical => "Classical",
            Self::Country => "Country",
            Self::Electronic => "Electronic",
            Self::Folk => "Folk",
            Self::Funk => "Funk",
            Self::HipHop => "Hip-Hop",
            Self::HeavyMetal => "Heavy Metal",
            Self::Instrumental => "Instrumental",
            Self::Jazz => "Jazz",
            Self::MusicalTheatre => "Musical Theatre",
            Self::Pop => "Pop",
            Self::Punk => "Punk",
            Self::RhythmAndBlues => "R&B",
            Self::Reggae => "Reggae",
            Self::RockNRoll => "Rock n Roll",
            Self::Soul => "Soul",
            Self::Other => "Other",
        }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|g| g.as_str() == s)
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Alternative,
            Self::Blues,
            Self::Classical,
            Self::Country,
            Self::Electronic,
            Self::Folk,
            Self::Funk,
            Self::HipHop,
            Self::HeavyMetal,
            Self::Instrumental,
            Self::Jazz,
            Self::MusicalTheatre,
            Self::Pop,
            Self::Punk,
            Self::RhythmAndBlues,
            Self::Reggae,
            Self::RockNRoll,
            Self::Soul,
            Self::Other,
        ]
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
