use super::icon_cache::{IconCache, IconSource};
use crate::domain::{FeedEntry, FeedSnapshot, FeedView, SessionUser};
use crate::infrastructure::db::{LikeRepository, SnippetRepository, UserRepository};
use snipboard_errors::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

pub const LONG_POLL_TIMEOUT: Duration = Duration::from_secs(25);

/// Live query over all snippets, newest first.
///
/// Every [`SnippetFeed::refresh`] re-reads the list and publishes it as a new
/// snapshot with a higher version; subscribers always see the latest one.
pub struct SnippetFeed<S = UserRepository> {
    snippets: SnippetRepository,
    icons: IconCache<S>,
    sender: watch::Sender<FeedSnapshot>,
    refresh_lock: Mutex<()>,
}

impl<S> SnippetFeed<S>
where
    S: IconSource + Sync,
{
    pub fn new(snippets: SnippetRepository, icon_source: S) -> Self {
        let epoch = Uuid::new_v4();
        tracing::debug!(%epoch, "Feed epoch started");
        let (sender, _) = watch::channel(FeedSnapshot {
            epoch,
            ..FeedSnapshot::default()
        });
        Self {
            snippets,
            icons: IconCache::new(icon_source),
            sender,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.sender.subscribe()
    }

    pub fn epoch(&self) -> Uuid {
        self.sender.borrow().epoch
    }

    pub fn current(&self) -> FeedSnapshot {
        self.sender.borrow().clone()
    }

    pub fn icons(&self) -> &IconCache<S> {
        &self.icons
    }

    /// Re-reads the feed and publishes it. Returns the new version.
    pub async fn refresh(&self) -> Result<u64, AppError> {
        // Serialized so a slower read can never publish over a newer one.
        let _guard = self.refresh_lock.lock().await;

        let snippets = self.snippets.list_recent().await?;
        let icons = self
            .icons
            .resolve_authors(snippets.iter().map(|s| s.author_id).collect::<Vec<_>>())
            .await;
        let entries: Vec<FeedEntry> = snippets
            .into_iter()
            .map(|snippet| FeedEntry {
                author_icon: icons.get(&snippet.author_id).cloned().unwrap_or_default(),
                snippet,
            })
            .collect();

        let mut version = 0;
        self.sender.send_modify(|snapshot| {
            snapshot.version += 1;
            snapshot.entries = entries;
            version = snapshot.version;
        });
        tracing::debug!(version, "Feed snapshot published");
        Ok(version)
    }

    /// Publishes a fresh snapshot after a write, logging instead of failing:
    /// the write itself already succeeded.
    pub(crate) async fn publish_after_write(&self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Feed refresh after write failed");
        }
    }

    /// Returns the first snapshot newer than `since`, waiting up to `timeout`.
    /// On timeout the current snapshot is returned unchanged.
    ///
    /// A caller holding another epoch, or a version this process never
    /// published, gets the current snapshot at once.
    pub async fn wait_for_update(
        &self,
        epoch: Option<Uuid>,
        since: u64,
        timeout: Duration,
    ) -> FeedSnapshot {
        let mut receiver = self.sender.subscribe();
        let timed_out = tokio::time::timeout(
            timeout,
            receiver.wait_for(|snapshot| Some(snapshot.epoch) != epoch || snapshot.version != since),
        )
        .await
        .is_err();
        if timed_out {
            tracing::trace!(since, "Feed long poll timed out");
        }
        let snapshot = receiver.borrow().clone();
        snapshot
    }
}

/// Feed read for a particular viewer: the shared snapshot plus their likes.
pub struct LoadFeed {
    feed: Arc<SnippetFeed>,
    likes: LikeRepository,
}

impl LoadFeed {
    pub fn new(feed: Arc<SnippetFeed>, likes: LikeRepository) -> Self {
        Self { feed, likes }
    }

    pub async fn execute(
        &self,
        viewer: Option<&SessionUser>,
        epoch: Option<Uuid>,
        since: u64,
    ) -> Result<FeedView, AppError> {
        let snapshot = self
            .feed
            .wait_for_update(epoch, since, LONG_POLL_TIMEOUT)
            .await;
        let liked = match viewer {
            Some(user) => self.likes.liked_snippet_ids(user.id).await?,
            None => Vec::new(),
        };
        Ok(FeedView { snapshot, liked })
    }
}
