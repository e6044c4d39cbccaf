use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user_id: uuid::Uuid,
    pub snippet_id: uuid::Uuid,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Like {
    pub fn new(user_id: uuid::Uuid, snippet_id: uuid::Uuid) -> Self {
        Self {
            user_id,
            snippet_id,
            created_at: None,
        }
    }
}

/// Result of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResult {
    pub snippet_id: uuid::Uuid,
    pub liked: bool,
    pub like_count: i32,
}
