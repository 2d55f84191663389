use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identity key for a game entry. Titles are unique within a catalog.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameTitle(pub String);

impl GameTitle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single-dimension genre filter.
///
/// `All` disables filtering. It serializes as `"all"`; an empty string is
/// accepted on input as well since the select control posts `""` for its
/// "All Genres" option.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

impl GenreFilter {
    pub fn as_str(&self) -> &str {
        match self {
            GenreFilter::All => "all",
            GenreFilter::Genre(label) => label.as_str(),
        }
    }

    pub fn from_label(value: &str) -> Self {
        match value {
            "" | "all" => GenreFilter::All,
            other => GenreFilter::Genre(other.to_string()),
        }
    }

    /// Whether an item carrying `genres` passes this filter (exact label match).
    pub fn matches<S: AsRef<str>>(&self, genres: &[S]) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(label) => genres.iter().any(|genre| genre.as_ref() == label),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GenreFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GenreFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_label(&value))
    }
}
