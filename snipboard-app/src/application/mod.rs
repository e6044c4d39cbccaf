mod delete_snippet;
mod feed;
pub(crate) mod icon_cache;
mod reconcile_likes;
mod share_snippet;
mod toggle_like;
mod update_profile;

pub use delete_snippet::DeleteSnippet;
pub use feed::{LoadFeed, SnippetFeed, LONG_POLL_TIMEOUT};
pub use icon_cache::{IconCache, IconSource, LocalIconSource};
pub use reconcile_likes::ReconcileLikes;
pub use share_snippet::ShareSnippet;
pub use toggle_like::ToggleLike;
pub use update_profile::UpdateProfile;
