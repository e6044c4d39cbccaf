use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub google_id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub display_name: String,
    pub icon_url: Option<String>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::snippet::Entity")]
    Snippets,
    #[sea_orm(has_many = "super::like::Entity")]
    Likes,
}

impl Related<super::snippet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Snippets.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl From<Model> for crate::domain::User {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            google_id: m.google_id,
            email: m.email,
            display_name: m.display_name,
            icon_url: m.icon_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
