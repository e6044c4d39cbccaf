use super::entities::{like, snippet, Like, Snippet};
use super::flatten_txn_error;
use crate::domain::LikeResult;
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct LikeRepository {
    db: DatabaseConnection,
}

impl LikeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        user_id: Uuid,
        snippet_id: Uuid,
    ) -> Result<Option<crate::domain::Like>, DbErr> {
        let row = Like::find_by_id((user_id, snippet_id)).one(&self.db).await?;
        Ok(row.map(|m| crate::domain::Like {
            user_id: m.user_id,
            snippet_id: m.snippet_id,
            created_at: m.created_at,
        }))
    }

    /// Ids of every snippet the user currently likes.
    pub async fn liked_snippet_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let rows = Like::find()
            .filter(like::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|m| m.snippet_id).collect())
    }

    pub async fn count_for_snippet(&self, snippet_id: Uuid) -> Result<u64, DbErr> {
        Like::find()
            .filter(like::Column::SnippetId.eq(snippet_id))
            .count(&self.db)
            .await
    }

    /// Flips the user's like on a snippet and adjusts the snippet's counter in
    /// the same transaction. Returns `None` when the snippet does not exist.
    ///
    /// The counter is changed with an in-database increment so toggles from
    /// other users committed in between are not overwritten.
    pub async fn toggle(
        &self,
        user_id: Uuid,
        snippet_id: Uuid,
    ) -> Result<Option<LikeResult>, DbErr> {
        self.db
            .transaction::<_, Option<LikeResult>, DbErr>(|txn| {
                Box::pin(async move {
                    if Snippet::find_by_id(snippet_id).one(txn).await?.is_none() {
                        return Ok(None);
                    }

                    let existing = Like::find_by_id((user_id, snippet_id)).one(txn).await?;
                    let liked = if existing.is_some() {
                        Like::delete_by_id((user_id, snippet_id)).exec(txn).await?;
                        Snippet::update_many()
                            .col_expr(
                                snippet::Column::LikeCount,
                                Expr::col(snippet::Column::LikeCount).sub(1),
                            )
                            .filter(snippet::Column::Id.eq(snippet_id))
                            .filter(snippet::Column::LikeCount.gt(0))
                            .exec(txn)
                            .await?;
                        false
                    } else {
                        like::ActiveModel {
                            user_id: Set(user_id),
                            snippet_id: Set(snippet_id),
                            created_at: Set(Some(chrono::Utc::now())),
                        }
                        .insert(txn)
                        .await?;
                        Snippet::update_many()
                            .col_expr(
                                snippet::Column::LikeCount,
                                Expr::col(snippet::Column::LikeCount).add(1),
                            )
                            .filter(snippet::Column::Id.eq(snippet_id))
                            .exec(txn)
                            .await?;
                        true
                    };

                    let like_count = Snippet::find_by_id(snippet_id)
                        .one(txn)
                        .await?
                        .map(|s| s.like_count)
                        .unwrap_or_default();

                    Ok(Some(LikeResult {
                        snippet_id,
                        liked,
                        like_count,
                    }))
                })
            })
            .await
            .map_err(flatten_txn_error)
    }
}
