use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "snippets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub code: String,
    pub description: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub language: Option<String>,
    pub like_count: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::like::Entity")]
    Likes,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl From<Model> for crate::domain::Snippet {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            code: m.code,
            description: m.description,
            author_id: m.author_id,
            author_name: m.author_name,
            language: m.language.as_deref().and_then(crate::domain::Language::parse_optional),
            like_count: m.like_count,
            created_at: m.created_at,
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
