use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cities the catalog covers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Hyderabad,
    Bangalore,
    Chennai,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Hyderabad, Location::Bangalore, Location::Chennai];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Hyderabad => "Hyderabad",
            Location::Bangalore => "Bangalore",
            Location::Chennai => "Chennai",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Programmes offered by catalog colleges.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Course {
    #[serde(rename = "Computer Science")]
    ComputerScience,
    Electronics,
    #[serde(rename = "MBA")]
    Mba,
    #[serde(rename = "MBBS")]
    Mbbs,
}

impl Course {
    pub const ALL: [Course; 4] = [
        Course::ComputerScience,
        Course::Electronics,
        Course::Mba,
        Course::Mbbs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Course::ComputerScience => "Computer Science",
            Course::Electronics => "Electronics",
            Course::Mba => "MBA",
            Course::Mbbs => "MBBS",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Course {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Course::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct College {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub course: Course,
    pub fee: u32, // yearly fee in rupees
    // Only meaningful for the user the catalog was loaded for
    #[serde(default, skip_serializing)]
    pub is_favorite: bool,
}

/// A favorite row joined with the college it points at.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FavoriteCollege {
    pub favorite_id: String,
    pub college: College,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRequest {
    pub college_id: String,
    pub user_id: String,
}
