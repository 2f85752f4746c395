use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - the fields the classification and view workflows touch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub message: String,
    pub username: String,
    pub timestamp: DateTime<Utc>,
    pub categories: Option<String>,
    pub views_count: i64,
}

impl Post {
    /// A post counts as unclassified until it carries a non-empty category.
    pub fn is_unclassified(&self) -> bool {
        self.categories.as_deref().is_none_or(str::is_empty)
    }
}

/// The fixed set of post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    News,
    Sports,
    Entertainment,
    #[serde(rename = "Story/Rant")]
    StoryRant,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Self::News,
        Self::Sports,
        Self::Entertainment,
        Self::StoryRant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::News => "News",
            Self::Sports => "Sports",
            Self::Entertainment => "Entertainment",
            Self::StoryRant => "Story/Rant",
        }
    }

    /// "News, Sports, Entertainment, Story/Rant"
    pub fn allowed_list() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the fixed categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
