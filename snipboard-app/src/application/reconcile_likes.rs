use super::SnippetFeed;
use crate::infrastructure::db::SnippetRepository;
use snipboard_errors::AppError;
use std::sync::Arc;

/// Repairs like counters that no longer match the like records.
pub struct ReconcileLikes {
    snippets: SnippetRepository,
    feed: Arc<SnippetFeed>,
}

impl ReconcileLikes {
    pub fn new(snippets: SnippetRepository, feed: Arc<SnippetFeed>) -> Self {
        Self { snippets, feed }
    }

    pub async fn execute(&self) -> Result<u64, AppError> {
        let fixed = self.snippets.reconcile_like_counts().await?;
        if fixed > 0 {
            tracing::info!(fixed, "Like counters reconciled");
            self.feed.publish_after_write().await;
        }
        Ok(fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewSnippet, SessionUser};
    use crate::infrastructure::db::entities::{snippet, Snippet};
    use crate::infrastructure::db::test_support::{insert_user, memory_db};
    use crate::infrastructure::db::UserRepository;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    #[tokio::test]
    async fn test_drift_fixed_and_published() {
        let db = memory_db().await;
        let author = SessionUser {
            id: insert_user(&db, "ada", None).await,
            display_name: "ada".to_string(),
        };
        let snippets = SnippetRepository::new(db.clone());
        let created = snippets
            .create(
                &author,
                &NewSnippet {
                    code: "let x = 1;".to_string(),
                    description: "binding".to_string(),
                    language: None,
                },
            )
            .await
            .unwrap();

        let row = Snippet::find_by_id(created.id).one(&db).await.unwrap().unwrap();
        let mut active: snippet::ActiveModel = row.into();
        active.like_count = Set(3);
        active.update(&db).await.unwrap();

        let feed = Arc::new(SnippetFeed::new(snippets.clone(), UserRepository::new(db)));
        let reconcile = ReconcileLikes::new(snippets, feed.clone());

        assert_eq!(reconcile.execute().await.unwrap(), 1);
        assert_eq!(feed.current().version, 1);
        assert_eq!(feed.current().entries[0].snippet.like_count, 0);

        assert_eq!(reconcile.execute().await.unwrap(), 0);
        assert_eq!(feed.current().version, 1);
    }
}
