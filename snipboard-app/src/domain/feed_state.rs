use super::{FeedEntry, FeedView, LikeResult};
use std::collections::HashSet;
use uuid::Uuid;

/// Viewer-side copy of the live feed.
///
/// Snapshots replace the list wholesale. Within one epoch, a snapshot whose
/// version is not newer than the one already held is a late response and is
/// dropped. A snapshot from another epoch (the server restarted) always wins.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    epoch: Option<Uuid>,
    version: u64,
    entries: Vec<FeedEntry>,
    liked: HashSet<Uuid>,
}

impl FeedState {
    /// Returns `true` when the view was newer and has been applied.
    pub fn apply(&mut self, view: FeedView) -> bool {
        if self.epoch == Some(view.snapshot.epoch) && view.snapshot.version <= self.version {
            return false;
        }
        self.epoch = Some(view.snapshot.epoch);
        self.version = view.snapshot.version;
        self.entries = view.snapshot.entries;
        self.liked = view.liked.into_iter().collect();
        true
    }

    pub fn apply_like(&mut self, result: LikeResult) {
        if result.liked {
            self.liked.insert(result.snippet_id);
        } else {
            self.liked.remove(&result.snippet_id);
        }
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.snippet.id == result.snippet_id)
        {
            entry.snippet.like_count = result.like_count;
        }
    }

    pub fn remove(&mut self, snippet_id: Uuid) {
        self.entries.retain(|e| e.snippet.id != snippet_id);
        self.liked.remove(&snippet_id);
    }

    pub fn epoch(&self) -> Option<Uuid> {
        self.epoch
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn is_liked(&self, snippet_id: Uuid) -> bool {
        self.liked.contains(&snippet_id)
    }
}
