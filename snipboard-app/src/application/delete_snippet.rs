use super::SnippetFeed;
use crate::domain::{DeleteOutcome, SessionUser};
use crate::infrastructure::db::SnippetRepository;
use snipboard_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct DeleteSnippet {
    snippets: SnippetRepository,
    feed: Arc<SnippetFeed>,
}

impl DeleteSnippet {
    pub fn new(snippets: SnippetRepository, feed: Arc<SnippetFeed>) -> Self {
        Self { snippets, feed }
    }

    /// Deletes a snippet owned by the requester together with its likes.
    /// Signed-out, missing and foreign snippets are no-ops reported through
    /// the outcome.
    pub async fn execute(
        &self,
        requester: Option<&SessionUser>,
        snippet_id: Uuid,
    ) -> Result<DeleteOutcome, AppError> {
        let Some(requester) = requester else {
            return Ok(DeleteOutcome::SignedOut);
        };

        let outcome = self
            .snippets
            .delete_by_author(snippet_id, requester.id)
            .await?;

        match outcome {
            DeleteOutcome::Deleted { likes_removed } => {
                tracing::info!(%snippet_id, likes_removed, "Snippet deleted");
                self.feed.publish_after_write().await;
            }
            DeleteOutcome::NotAuthor => {
                tracing::warn!(%snippet_id, requester = %requester.id, "Delete refused, not the author");
            }
            DeleteOutcome::NotFound | DeleteOutcome::SignedOut => {}
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewSnippet;
    use crate::infrastructure::db::test_support::{insert_user, memory_db};
    use crate::infrastructure::db::{LikeRepository, UserRepository};
    use sea_orm::DatabaseConnection;

    fn delete_for(db: DatabaseConnection) -> (DeleteSnippet, Arc<SnippetFeed>) {
        let snippets = SnippetRepository::new(db.clone());
        let feed = Arc::new(SnippetFeed::new(snippets.clone(), UserRepository::new(db)));
        (DeleteSnippet::new(snippets, feed.clone()), feed)
    }

    async fn seeded() -> (DatabaseConnection, SessionUser, SessionUser, Uuid) {
        let db = memory_db().await;
        let author = SessionUser {
            id: insert_user(&db, "ada", None).await,
            display_name: "ada".to_string(),
        };
        let other = SessionUser {
            id: insert_user(&db, "bob", None).await,
            display_name: "bob".to_string(),
        };
        let snippet = SnippetRepository::new(db.clone())
            .create(
                &author,
                &NewSnippet {
                    code: "<p>hi</p>".to_string(),
                    description: "markup".to_string(),
                    language: None,
                },
            )
            .await
            .unwrap();
        (db, author, other, snippet.id)
    }

    #[tokio::test]
    async fn test_author_delete_removes_likes_and_publishes() {
        let (db, author, other, snippet_id) = seeded().await;
        let likes = LikeRepository::new(db.clone());
        likes.toggle(other.id, snippet_id).await.unwrap();
        let (delete, feed) = delete_for(db);

        let outcome = delete.execute(Some(&author), snippet_id).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted { likes_removed: 1 });
        assert!(likes.liked_snippet_ids(other.id).await.unwrap().is_empty());
        assert_eq!(feed.current().version, 1);
        assert!(feed.current().entries.is_empty());
    }

    #[tokio::test]
    async fn test_other_user_cannot_delete() {
        let (db, _, other, snippet_id) = seeded().await;
        let (delete, feed) = delete_for(db.clone());

        let outcome = delete.execute(Some(&other), snippet_id).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::NotAuthor);
        assert!(SnippetRepository::new(db)
            .find_by_id(snippet_id)
            .await
            .unwrap()
            .is_some());
        assert_eq!(feed.current().version, 0);
    }

    #[tokio::test]
    async fn test_signed_out_never_reaches_database() {
        let (delete, _) = delete_for(DatabaseConnection::Disconnected);
        let outcome = delete.execute(None, Uuid::new_v4()).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::SignedOut);
    }
}
