use super::SnippetFeed;
use crate::domain::{ProfileUpdate, SessionUser, User};
use crate::infrastructure::db::UserRepository;
use crate::infrastructure::security::InputSanitizer;
use snipboard_errors::AppError;
use std::sync::Arc;

pub struct UpdateProfile {
    users: UserRepository,
    feed: Arc<SnippetFeed>,
}

impl UpdateProfile {
    pub fn new(users: UserRepository, feed: Arc<SnippetFeed>) -> Self {
        Self { users, feed }
    }

    /// Saves the user's display name and icon. The cached icon is dropped so
    /// the next feed refresh picks up the new one.
    pub async fn execute(
        &self,
        user: Option<&SessionUser>,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        let user = user.ok_or(AppError::Unauthenticated)?;
        let (display_name, icon_url) = InputSanitizer::validate_profile(&update)?;

        let model = self
            .users
            .update_profile(user.id, &display_name, icon_url)
            .await?;
        tracing::info!(user_id = %user.id, "Profile updated");

        self.feed.icons().invalidate(user.id);
        self.feed.publish_after_write().await;
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewSnippet;
    use crate::infrastructure::db::test_support::{insert_user, memory_db};
    use crate::infrastructure::db::SnippetRepository;
    use sea_orm::DatabaseConnection;

    #[tokio::test]
    async fn test_new_icon_reaches_feed() {
        let db = memory_db().await;
        let me = SessionUser {
            id: insert_user(&db, "ada", Some("https://img.example.com/old.png")).await,
            display_name: "ada".to_string(),
        };
        let snippets = SnippetRepository::new(db.clone());
        snippets
            .create(
                &me,
                &NewSnippet {
                    code: "body { margin: 0 }".to_string(),
                    description: "reset".to_string(),
                    language: None,
                },
            )
            .await
            .unwrap();
        let users = UserRepository::new(db);
        let feed = Arc::new(SnippetFeed::new(snippets, users.clone()));
        feed.refresh().await.unwrap();
        assert_eq!(feed.current().entries[0].author_icon, "https://img.example.com/old.png");

        let updated = UpdateProfile::new(users, feed.clone())
            .execute(
                Some(&me),
                ProfileUpdate {
                    display_name: "  Ada   L. ".to_string(),
                    icon_url: "https://img.example.com/new.png".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.display_name, "Ada L.");
        let entry = &feed.current().entries[0];
        assert_eq!(entry.author_icon, "https://img.example.com/new.png");
        assert_eq!(entry.snippet.author_name, "ada");
    }

    #[tokio::test]
    async fn test_signed_out_rejected() {
        let feed = Arc::new(SnippetFeed::new(
            SnippetRepository::new(DatabaseConnection::Disconnected),
            UserRepository::new(DatabaseConnection::Disconnected),
        ));
        let err = UpdateProfile::new(UserRepository::new(DatabaseConnection::Disconnected), feed)
            .execute(None, ProfileUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Unauthenticated);
    }
}
