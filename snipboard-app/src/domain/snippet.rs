use super::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: uuid::Uuid,
    pub code: String,
    pub description: String,
    pub author_id: uuid::Uuid,
    pub author_name: String,
    pub language: Option<Language>,
    pub like_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Snippet {
    pub fn is_authored_by(&self, user_id: uuid::Uuid) -> bool {
        self.author_id == user_id
    }
}

/// Snippet paired with its author's icon URL (empty when the author has none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub snippet: Snippet,
    pub author_icon: String,
}

/// One published state of the feed, newest snippet first.
///
/// `version` only orders snapshots within one `epoch`; every server process
/// starts a new epoch with its versions counting from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub epoch: uuid::Uuid,
    pub version: u64,
    pub entries: Vec<FeedEntry>,
}

/// Feed snapshot as seen by one viewer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedView {
    pub snapshot: FeedSnapshot,
    pub liked: Vec<uuid::Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteOutcome {
    Deleted { likes_removed: u64 },
    NotFound,
    NotAuthor,
    SignedOut,
}
