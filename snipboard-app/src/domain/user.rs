use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: uuid::Uuid,
    pub google_id: String,
    pub email: String,
    pub display_name: String,
    pub icon_url: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    pub fn new(google_id: String, email: String, display_name: String, icon_url: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            google_id,
            email,
            display_name,
            icon_url,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            display_name: self.display_name.clone(),
        }
    }
}

/// The signed-in identity carried by a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: uuid::Uuid,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub icon_url: String,
}
