use super::SnippetFeed;
use crate::domain::{SessionUser, Snippet, SnippetDraft};
use crate::infrastructure::db::SnippetRepository;
use crate::infrastructure::security::{InputSanitizer, RateLimiter};
use snipboard_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct ShareSnippet {
    snippets: SnippetRepository,
    feed: Arc<SnippetFeed>,
    limiter: RateLimiter<Uuid>,
}

impl ShareSnippet {
    pub fn new(snippets: SnippetRepository, feed: Arc<SnippetFeed>) -> Self {
        Self::with_limiter(snippets, feed, RateLimiter::new())
    }

    pub fn with_limiter(
        snippets: SnippetRepository,
        feed: Arc<SnippetFeed>,
        limiter: RateLimiter<Uuid>,
    ) -> Self {
        Self {
            snippets,
            feed,
            limiter,
        }
    }

    pub async fn execute(
        &self,
        author: Option<&SessionUser>,
        draft: SnippetDraft,
    ) -> Result<Snippet, AppError> {
        let author = author.ok_or(AppError::Unauthenticated)?;
        let new = InputSanitizer::validate_snippet(&draft)?;

        self.limiter
            .check(author.id)
            .map_err(|e| AppError::RateLimited(e.user_message()))?;

        let snippet = match self.snippets.create(author, &new).await {
            Ok(snippet) => snippet,
            Err(e) => {
                self.limiter.refund(&author.id);
                return Err(e.into());
            }
        };
        tracing::info!(
            snippet_id = %snippet.id,
            author_id = %author.id,
            language = ?snippet.language,
            "Snippet shared"
        );

        self.feed.publish_after_write().await;
        Ok(snippet)
    }
}
