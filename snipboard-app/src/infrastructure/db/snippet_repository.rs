use super::entities::{like, snippet, Like, Snippet};
use super::flatten_txn_error;
use crate::domain::{DeleteOutcome, NewSnippet, SessionUser};
use sea_orm::{
    entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct SnippetRepository {
    db: DatabaseConnection,
}

impl SnippetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new snippet. The creation time is assigned here, never by the caller.
    pub async fn create(
        &self,
        author: &SessionUser,
        new: &NewSnippet,
    ) -> Result<crate::domain::Snippet, DbErr> {
        let active = snippet::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(new.code.clone()),
            description: Set(new.description.clone()),
            author_id: Set(author.id),
            author_name: Set(author.display_name.clone()),
            language: Set(new.language.map(|l| l.as_str().to_string())),
            like_count: Set(0),
            created_at: Set(chrono::Utc::now()),
        };
        Ok(active.insert(&self.db).await?.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<crate::domain::Snippet>, DbErr> {
        Ok(Snippet::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    /// All snippets, newest first.
    pub async fn list_recent(&self) -> Result<Vec<crate::domain::Snippet>, DbErr> {
        let rows = Snippet::find()
            .order_by_desc(snippet::Column::CreatedAt)
            .order_by_desc(snippet::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Deletes the snippet and every like pointing at it, in one transaction.
    pub async fn delete_by_author(
        &self,
        id: Uuid,
        requester: Uuid,
    ) -> Result<DeleteOutcome, DbErr> {
        self.db
            .transaction::<_, DeleteOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(row) = Snippet::find_by_id(id).one(txn).await? else {
                        return Ok(DeleteOutcome::NotFound);
                    };
                    if row.author_id != requester {
                        return Ok(DeleteOutcome::NotAuthor);
                    }

                    let likes = Like::delete_many()
                        .filter(like::Column::SnippetId.eq(id))
                        .exec(txn)
                        .await?;
                    Snippet::delete_by_id(id).exec(txn).await?;

                    Ok(DeleteOutcome::Deleted {
                        likes_removed: likes.rows_affected,
                    })
                })
            })
            .await
            .map_err(flatten_txn_error)
    }

    /// Rewrites every like counter that disagrees with its like records.
    /// Returns how many snippets were corrected.
    pub async fn reconcile_like_counts(&self) -> Result<u64, DbErr> {
        let rows = Snippet::find().all(&self.db).await?;
        let mut fixed = 0;

        for row in rows {
            let actual = Like::find()
                .filter(like::Column::SnippetId.eq(row.id))
                .count(&self.db)
                .await? as i32;
            if actual == row.like_count {
                continue;
            }

            tracing::warn!(
                snippet_id = %row.id,
                stored = row.like_count,
                actual,
                "Like counter drifted, correcting"
            );
            let mut active: snippet::ActiveModel = row.into();
            active.like_count = Set(actual);
            active.update(&self.db).await?;
            fixed += 1;
        }

        Ok(fixed)
    }
}
