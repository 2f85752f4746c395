use serde::{Deserialize, Serialize};

/// What a tracked view did to the (post, user) pair.
///
/// A pair starts unseen. The first view moves it to seen and bumps the post's
/// counter; every later view only refreshes the timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewTransition {
    /// Unseen -> Seen. The counter was incremented.
    FirstView,
    /// Seen -> Seen. Only `viewed_at` changed.
    Revisit,
}

impl ViewTransition {
    pub fn from_existing(already_seen: bool) -> Self {
        if already_seen {
            Self::Revisit
        } else {
            Self::FirstView
        }
    }

    pub fn is_new_view(self) -> bool {
        matches!(self, Self::FirstView)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::FirstView => "View tracked successfully",
            Self::Revisit => "View timestamp updated",
        }
    }
}

/// Result of one committed TrackView transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOutcome {
    pub transition: ViewTransition,
    /// `views_count` as read back inside the transaction; 0 for an unknown post.
    pub view_count: i64,
}

/// Read-only view statistics for one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostViewStats {
    pub post_id: String,
    pub view_count: i64,
    pub unique_viewers: u64,
}
