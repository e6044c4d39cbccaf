mod draft;
mod feed_state;
mod language;
mod like;
mod snippet;
mod user;

pub use draft::{NewSnippet, SnippetDraft};
pub use feed_state::FeedState;
pub use language::Language;
pub use like::{Like, LikeResult};
pub use snippet::{DeleteOutcome, FeedEntry, FeedSnapshot, FeedView, Snippet};
pub use user::{ProfileUpdate, SessionUser, User};
