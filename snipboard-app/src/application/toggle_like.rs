use super::SnippetFeed;
use crate::domain::{LikeResult, SessionUser};
use crate::infrastructure::db::LikeRepository;
use snipboard_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct ToggleLike {
    likes: LikeRepository,
    feed: Arc<SnippetFeed>,
}

impl ToggleLike {
    pub fn new(likes: LikeRepository, feed: Arc<SnippetFeed>) -> Self {
        Self { likes, feed }
    }

    /// Likes the snippet if the user has not, unlikes it otherwise.
    /// `Ok(None)` when signed out or when the snippet is gone.
    pub async fn execute(
        &self,
        user: Option<&SessionUser>,
        snippet_id: Uuid,
    ) -> Result<Option<LikeResult>, AppError> {
        let Some(user) = user else {
            return Ok(None);
        };

        let result = self.likes.toggle(user.id, snippet_id).await?;
        match &result {
            Some(r) => {
                tracing::debug!(%snippet_id, user_id = %user.id, liked = r.liked, count = r.like_count, "Like toggled");
                self.feed.publish_after_write().await;
            }
            None => tracing::debug!(%snippet_id, "Like on missing snippet ignored"),
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewSnippet;
    use crate::infrastructure::db::test_support::{insert_user, memory_db};
    use crate::infrastructure::db::{SnippetRepository, UserRepository};
    use sea_orm::DatabaseConnection;

    fn toggle_for(db: DatabaseConnection) -> (ToggleLike, Arc<SnippetFeed>) {
        let feed = Arc::new(SnippetFeed::new(
            SnippetRepository::new(db.clone()),
            UserRepository::new(db.clone()),
        ));
        (ToggleLike::new(LikeRepository::new(db), feed.clone()), feed)
    }

    #[tokio::test]
    async fn test_toggle_updates_feed_count() {
        let db = memory_db().await;
        let author = SessionUser {
            id: insert_user(&db, "ada", None).await,
            display_name: "ada".to_string(),
        };
        let snippet = SnippetRepository::new(db.clone())
            .create(
                &author,
                &NewSnippet {
                    code: "puts 1".to_string(),
                    description: "ruby".to_string(),
                    language: None,
                },
            )
            .await
            .unwrap();
        let (toggle, feed) = toggle_for(db);

        let liked = toggle.execute(Some(&author), snippet.id).await.unwrap().unwrap();
        assert!(liked.liked);
        assert_eq!(feed.current().entries[0].snippet.like_count, 1);

        let unliked = toggle.execute(Some(&author), snippet.id).await.unwrap().unwrap();
        assert!(!unliked.liked);
        assert_eq!(feed.current().entries[0].snippet.like_count, 0);
        assert_eq!(feed.current().version, 2);
    }

    #[tokio::test]
    async fn test_missing_snippet_does_not_publish() {
        let db = memory_db().await;
        let user = SessionUser {
            id: insert_user(&db, "ada", None).await,
            display_name: "ada".to_string(),
        };
        let (toggle, feed) = toggle_for(db);

        assert_eq!(toggle.execute(Some(&user), Uuid::new_v4()).await.unwrap(), None);
        assert_eq!(feed.current().version, 0);
    }

    #[tokio::test]
    async fn test_signed_out_never_reaches_database() {
        let (toggle, _) = toggle_for(DatabaseConnection::Disconnected);
        assert_eq!(toggle.execute(None, Uuid::new_v4()).await.unwrap(), None);
    }
}
