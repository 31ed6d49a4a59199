use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The server's classification of how experienced the user appears to be.
///
/// Parsing is case-insensitive and never fails: anything outside the three
/// known levels is kept, lowercased, as [`ExpertiseLevel::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ExpertiseLevel {
    /// Newcomer to the domain.  Used whenever the server says nothing.
    #[default]
    Beginner,

    /// Working knowledge of the domain.
    Intermediate,

    /// Specialist.
    Expert,

    /// A level this client does not know about, normalized to lowercase.
    Unrecognized(String),
}

impl ExpertiseLevel {
    /// Classify a level string by exact, case-insensitive match.
    ///
    /// Only case is folded; surrounding whitespace makes a level
    /// unrecognized.
    pub fn parse(level: &str) -> Self {
        let normalized = level.to_lowercase();
        match normalized.as_str() {
            "beginner" => ExpertiseLevel::Beginner,
            "intermediate" => ExpertiseLevel::Intermediate,
            "expert" => ExpertiseLevel::Expert,
            _ => ExpertiseLevel::Unrecognized(normalized),
        }
    }

    /// The normalized, lowercase name of this level.
    pub fn as_str(&self) -> &str {
        match self {
            ExpertiseLevel::Beginner => "beginner",
            ExpertiseLevel::Intermediate => "intermediate",
            ExpertiseLevel::Expert => "expert",
            ExpertiseLevel::Unrecognized(level) => level,
        }
    }

    /// Returns true for the three levels this client knows.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ExpertiseLevel::Unrecognized(_))
    }
}

impl fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpertiseLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ExpertiseLevel::parse(s))
    }
}

impl Serialize for ExpertiseLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExpertiseLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ExpertiseLevel::parse(&s))
    }
}
