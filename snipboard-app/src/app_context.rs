use crate::application::{
    DeleteSnippet, LoadFeed, ReconcileLikes, ShareSnippet, SnippetFeed, ToggleLike, UpdateProfile,
};
use crate::config::AppConfig;
use crate::infrastructure::auth::GoogleOAuth;
use crate::infrastructure::db::{self, LikeRepository, SnippetRepository, UserRepository};
use sea_orm::DatabaseConnection;
use snipboard_errors::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub users: UserRepository,
    pub feed: Arc<SnippetFeed>,
    pub load_feed: Arc<LoadFeed>,
    pub share_snippet: Arc<ShareSnippet>,
    pub delete_snippet: Arc<DeleteSnippet>,
    pub toggle_like: Arc<ToggleLike>,
    pub update_profile: Arc<UpdateProfile>,
    pub reconcile_likes: Arc<ReconcileLikes>,
    pub oauth: Option<Arc<GoogleOAuth>>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Result<Self, AppError> {
        let users = UserRepository::new(db.clone());
        let snippets = SnippetRepository::new(db.clone());
        let likes = LikeRepository::new(db);

        let feed = Arc::new(SnippetFeed::new(snippets.clone(), users.clone()));

        let oauth = match &config.google {
            Some(google) => Some(Arc::new(GoogleOAuth::new(google)?)),
            None => {
                tracing::warn!("Google OAuth not configured, sign-in disabled");
                None
            }
        };

        Ok(Self {
            load_feed: Arc::new(LoadFeed::new(feed.clone(), likes.clone())),
            share_snippet: Arc::new(ShareSnippet::new(snippets.clone(), feed.clone())),
            delete_snippet: Arc::new(DeleteSnippet::new(snippets.clone(), feed.clone())),
            toggle_like: Arc::new(ToggleLike::new(likes, feed.clone())),
            update_profile: Arc::new(UpdateProfile::new(users.clone(), feed.clone())),
            reconcile_likes: Arc::new(ReconcileLikes::new(snippets, feed.clone())),
            users,
            feed,
            oauth,
        })
    }

    /// Connects, migrates, repairs like counters and publishes the first
    /// feed snapshot.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let db = db::create_connection(&config.database_url).await?;
        tracing::info!("Database connected");

        if config.run_migrations {
            db::run_migrations(&db).await?;
            tracing::info!("Migrations applied");
        }

        let ctx = Self::new(db, config)?;
        ctx.prepare_feed().await?;
        Ok(ctx)
    }

    /// Repairs drifted like counters, then publishes the first snapshot.
    /// Fails when the snapshot cannot be read.
    async fn prepare_feed(&self) -> Result<(), AppError> {
        let fixed = self.reconcile_likes.execute().await?;
        let version = self.feed.refresh().await?;
        tracing::info!(
            fixed,
            version,
            snippets = self.feed.current().entries.len(),
            "Feed ready"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewSnippet, SessionUser};
    use crate::infrastructure::db::entities::{snippet, Snippet};
    use crate::infrastructure::db::test_support::{insert_user, memory_db};
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    fn config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            google: None,
            run_migrations: false,
        }
    }

    #[tokio::test]
    async fn test_context_without_oauth() {
        let ctx = AppContext::new(memory_db().await, &config()).unwrap();
        assert!(ctx.oauth.is_none());

        ctx.feed.refresh().await.unwrap();
        let view = ctx.load_feed.execute(None, None, 0).await.unwrap();
        assert_eq!(view.snapshot.version, 1);
        assert!(view.liked.is_empty());
    }

    #[tokio::test]
    async fn test_prepare_feed_publishes_after_repairing_counters() {
        let db = memory_db().await;
        let author = SessionUser {
            id: insert_user(&db, "ada", None).await,
            display_name: "ada".to_string(),
        };
        let created = SnippetRepository::new(db.clone())
            .create(
                &author,
                &NewSnippet {
                    code: "fmt.Println(1)".to_string(),
                    description: "print".to_string(),
                    language: None,
                },
            )
            .await
            .unwrap();
        let row = Snippet::find_by_id(created.id).one(&db).await.unwrap().unwrap();
        let mut active: snippet::ActiveModel = row.into();
        active.like_count = Set(4);
        active.update(&db).await.unwrap();

        let ctx = AppContext::new(db, &config()).unwrap();
        ctx.prepare_feed().await.unwrap();

        let snapshot = ctx.feed.current();
        assert!(snapshot.version >= 1);
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].snippet.like_count, 0);
    }

    #[tokio::test]
    async fn test_prepare_feed_fails_without_database() {
        let ctx = AppContext::new(DatabaseConnection::Disconnected, &config()).unwrap();
        assert!(ctx.prepare_feed().await.is_err());
        assert_eq!(ctx.feed.current().version, 0);
    }
}
