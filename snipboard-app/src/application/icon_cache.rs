use dashmap::DashMap;
use snipboard_errors::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Where author icons come from.
#[trait_variant::make(IconSource: Send)]
pub trait LocalIconSource {
    /// `Ok(None)` when the user does not exist or has no icon.
    async fn fetch_icon(&self, user_id: Uuid) -> Result<Option<String>, AppError>;
}

/// Memoized user id → icon URL lookups.
///
/// Each id is fetched at most once; concurrent callers for the same id share
/// the in-flight fetch. Missing icons are cached as the empty string. A failed
/// fetch leaves the entry empty so a later call tries again. Entries only go
/// away through [`IconCache::invalidate`].
pub struct IconCache<S> {
    source: S,
    entries: DashMap<Uuid, Arc<OnceCell<String>>>,
}

impl<S> IconCache<S>
where
    S: IconSource + Sync,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: DashMap::new(),
        }
    }

    pub async fn icon_for(&self, user_id: Uuid) -> Result<String, AppError> {
        let cell = self.entries.entry(user_id).or_default().clone();
        let icon = cell
            .get_or_try_init(|| async {
                tracing::debug!(%user_id, "Fetching author icon");
                self.source
                    .fetch_icon(user_id)
                    .await
                    .map(Option::unwrap_or_default)
            })
            .await?;
        Ok(icon.clone())
    }

    /// Resolves icons for a batch of authors, one lookup per distinct id.
    /// Authors whose lookup fails get an empty icon.
    pub async fn resolve_authors<I>(&self, author_ids: I) -> HashMap<Uuid, String>
    where
        I: IntoIterator<Item = Uuid>,
    {
        let mut icons = HashMap::new();
        for user_id in author_ids {
            if icons.contains_key(&user_id) {
                continue;
            }
            let icon = match self.icon_for(user_id).await {
                Ok(icon) => icon,
                Err(e) => {
                    tracing::warn!(%user_id, error = %e, "Author icon lookup failed");
                    String::new()
                }
            };
            icons.insert(user_id, icon);
        }
        icons
    }

    pub fn cached(&self, user_id: Uuid) -> Option<String> {
        self.entries
            .get(&user_id)
            .and_then(|cell| cell.get().cloned())
    }

    pub fn invalidate(&self, user_id: Uuid) {
        self.entries.remove(&user_id);
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Icon source that counts lookups and can be told to fail.
    #[derive(Default)]
    pub(crate) struct CountingSource {
        pub icons: Mutex<HashMap<Uuid, String>>,
        pub calls: AtomicUsize,
        pub fail: std::sync::atomic::AtomicBool,
    }

    impl CountingSource {
        pub fn with_icons(icons: &[(Uuid, &str)]) -> Self {
            let source = Self::default();
            {
                let mut map = source.icons.lock().unwrap();
                for (id, url) in icons {
                    map.insert(*id, url.to_string());
                }
            }
            source
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl IconSource for CountingSource {
        async fn fetch_icon(&self, user_id: Uuid) -> Result<Option<String>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail.load(Ordering::SeqCst) {
                return Err(AppError::Database("offline".to_string()));
            }
            Ok(self.icons.lock().unwrap().get(&user_id).cloned())
        }
    }

    #[tokio::test]
    async fn test_one_fetch_per_distinct_author() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let cache = IconCache::new(CountingSource::with_icons(&[
            (a, "https://img.example.com/a.png"),
            (b, "https://img.example.com/b.png"),
        ]));

        let authors = vec![a, b, a, c, c, a, b];
        let icons = cache.resolve_authors(authors.clone()).await;
        assert_eq!(cache.source.calls(), 3);
        assert_eq!(icons[&a], "https://img.example.com/a.png");
        assert_eq!(icons[&c], "");

        cache.resolve_authors(authors).await;
        assert_eq!(cache.source.calls(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_fetch() {
        let a = Uuid::new_v4();
        let cache = IconCache::new(CountingSource::with_icons(&[(a, "x")]));

        let (first, second) = tokio::join!(cache.icon_for(a), cache.icon_for(a));
        assert_eq!(first.unwrap(), "x");
        assert_eq!(second.unwrap(), "x");
        assert_eq!(cache.source.calls(), 1);
    }

    #[tokio::test]
    async fn test_cached_value_never_refreshed() {
        let a = Uuid::new_v4();
        let cache = IconCache::new(CountingSource::with_icons(&[(a, "old")]));
        cache.icon_for(a).await.unwrap();

        cache.source.icons.lock().unwrap().insert(a, "new".to_string());
        assert_eq!(cache.icon_for(a).await.unwrap(), "old");

        cache.invalidate(a);
        assert_eq!(cache.cached(a), None);
        assert_eq!(cache.icon_for(a).await.unwrap(), "new");
        assert_eq!(cache.source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_not_cached() {
        let a = Uuid::new_v4();
        let cache = IconCache::new(CountingSource::with_icons(&[(a, "x")]));
        cache.source.fail.store(true, Ordering::SeqCst);

        assert!(cache.icon_for(a).await.is_err());
        assert_eq!(cache.cached(a), None);

        cache.source.fail.store(false, Ordering::SeqCst);
        assert_eq!(cache.icon_for(a).await.unwrap(), "x");
        assert_eq!(cache.source.calls(), 2);
    }
}
