use super::entities::{user, User};
use crate::application::IconSource;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use snipboard_errors::AppError;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::GoogleId.eq(google_id))
            .one(&self.db)
            .await
    }

    /// Inserts a first-time user or refreshes the email of a returning one.
    /// Display name and icon edited in settings are kept; a missing icon is
    /// filled from the provider.
    pub async fn upsert(&self, user_data: &crate::domain::User) -> Result<user::Model, DbErr> {
        if let Some(existing) = self.find_by_google_id(&user_data.google_id).await? {
            let needs_icon = existing.icon_url.as_deref().unwrap_or_default().is_empty();
            let mut active: user::ActiveModel = existing.into();
            active.email = Set(user_data.email.clone());
            if needs_icon {
                active.icon_url = Set(user_data.icon_url.clone());
            }
            active.updated_at = Set(Some(chrono::Utc::now()));
            active.update(&self.db).await
        } else {
            let active = user::ActiveModel {
                id: Set(user_data.id),
                google_id: Set(user_data.google_id.clone()),
                email: Set(user_data.email.clone()),
                display_name: Set(user_data.display_name.clone()),
                icon_url: Set(user_data.icon_url.clone()),
                created_at: Set(Some(chrono::Utc::now())),
                updated_at: Set(Some(chrono::Utc::now())),
            };
            active.insert(&self.db).await
        }
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        display_name: &str,
        icon_url: Option<String>,
    ) -> Result<user::Model, DbErr> {
        let existing = User::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

        let mut active: user::ActiveModel = existing.into();
        active.display_name = Set(display_name.to_string());
        active.icon_url = Set(icon_url);
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.update(&self.db).await
    }

    pub async fn icon_url(&self, id: Uuid) -> Result<Option<String>, DbErr> {
        let user = User::find_by_id(id).one(&self.db).await?;
        Ok(user.and_then(|u| u.icon_url))
    }
}

impl IconSource for UserRepository {
    async fn fetch_icon(&self, user_id: Uuid) -> Result<Option<String>, AppError> {
        Ok(self.icon_url(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::test_support::{insert_user, memory_db};

    #[tokio::test]
    async fn test_upsert_keeps_edited_profile() {
        let db = memory_db().await;
        let repo = UserRepository::new(db);

        let first = crate::domain::User::new(
            "g-1".to_string(),
            "ada@example.com".to_string(),
            "Ada".to_string(),
            Some("https://img.example.com/a.png".to_string()),
        );
        let created = repo.upsert(&first).await.unwrap();
        repo.update_profile(created.id, "Ada L.", None).await.unwrap();

        let again = crate::domain::User::new(
            "g-1".to_string(),
            "ada@new.example.com".to_string(),
            "Ada".to_string(),
            Some("https://img.example.com/b.png".to_string()),
        );
        let updated = repo.upsert(&again).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.display_name, "Ada L.");
        assert_eq!(updated.email, "ada@new.example.com");
        assert_eq!(updated.icon_url.as_deref(), Some("https://img.example.com/b.png"));
    }

    #[tokio::test]
    async fn test_icon_url_missing_user_is_none() {
        let db = memory_db().await;
        let with_icon = insert_user(&db, "grace", Some("https://img.example.com/g.png")).await;
        let without_icon = insert_user(&db, "linus", None).await;
        let repo = UserRepository::new(db);

        assert_eq!(
            repo.icon_url(with_icon).await.unwrap().as_deref(),
            Some("https://img.example.com/g.png")
        );
        assert_eq!(repo.icon_url(without_icon).await.unwrap(), None);
        assert_eq!(repo.icon_url(Uuid::new_v4()).await.unwrap(), None);
    }
}
