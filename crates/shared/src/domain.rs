use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the team service. Opaque, never minted locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub i64);

/// The closed set of categories the team service accepts. String-valued on
/// the wire, using the variant names verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamCategory {
    Development,
    Design,
    Marketing,
}

impl TeamCategory {
    pub const ALL: [TeamCategory; 3] = [
        TeamCategory::Development,
        TeamCategory::Design,
        TeamCategory::Marketing,
    ];

    /// Exact-match parse after trimming. Unknown values stay unparsed so the
    /// form layer can report them instead of guessing.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Development" => Some(TeamCategory::Development),
            "Design" => Some(TeamCategory::Design),
            "Marketing" => Some(TeamCategory::Marketing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamCategory::Development => "Development",
            TeamCategory::Design => "Design",
            TeamCategory::Marketing => "Marketing",
        }
    }
}

impl fmt::Display for TeamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable fields of the team form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamField {
    Name,
    Description,
    Category,
    Members,
}

impl TeamField {
    pub const ALL: [TeamField; 4] = [
        TeamField::Name,
        TeamField::Description,
        TeamField::Category,
        TeamField::Members,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TeamField::Name => "name",
            TeamField::Description => "description",
            TeamField::Category => "category",
            TeamField::Members => "members",
        }
    }
}

impl fmt::Display for TeamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_accepts_exact_names() {
        assert_eq!(
            TeamCategory::parse("Development"),
            Some(TeamCategory::Development)
        );
        assert_eq!(TeamCategory::parse(" Marketing "), Some(TeamCategory::Marketing));
        assert_eq!(TeamCategory::parse("marketing"), None);
        assert_eq!(TeamCategory::parse(""), None);
    }

    #[test]
    fn category_round_trips_through_display() {
        for category in TeamCategory::ALL {
            assert_eq!(TeamCategory::parse(category.as_str()), Some(category));
        }
    }
}
