use leptos::prelude::*;
use leptos::task::spawn_local;
use server_fn::ServerFnError;
use snipboard_app::domain::{
    DeleteOutcome, FeedState, FeedView, Language, LikeResult, SessionUser, Snippet, SnippetDraft,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use super::error_text;
use crate::components::{AuthSection, ErrorDialog, LoadingSpinner, ShareForm, SnippetCard};

#[server(CurrentUserFn, "/api", endpoint = "current_user")]
pub async fn current_user() -> Result<Option<SessionUser>, ServerFnError> {
    let (_, user) = crate::request::request_user().await?;
    Ok(user)
}

/// Long poll: returns once the feed is newer than `since`, or after the
/// server's wait limit with the current snapshot. A stale `epoch` (the server
/// restarted since the last poll) is answered right away.
#[server(WaitFeedFn, "/api", endpoint = "wait_feed")]
pub async fn wait_feed(epoch: Option<Uuid>, since: u64) -> Result<FeedView, ServerFnError> {
    let (ctx, user) = crate::request::request_user().await?;
    ctx.load_feed
        .execute(user.as_ref(), epoch, since)
        .await
        .map_err(|e| e.into_server_error())
}

#[server(ShareSnippetFn, "/api", endpoint = "share_snippet")]
pub async fn share_snippet(
    code: String,
    description: String,
    language: Option<Language>,
) -> Result<Snippet, ServerFnError> {
    let (ctx, user) = crate::request::request_user().await?;
    let draft = SnippetDraft {
        code,
        description,
        language,
    };
    ctx.share_snippet
        .execute(user.as_ref(), draft)
        .await
        .map_err(|e| e.into_server_error())
}

#[server(DeleteSnippetFn, "/api", endpoint = "delete_snippet")]
pub async fn delete_snippet(id: Uuid) -> Result<DeleteOutcome, ServerFnError> {
    let (ctx, user) = crate::request::request_user().await?;
    ctx.delete_snippet
        .execute(user.as_ref(), id)
        .await
        .map_err(|e| e.into_server_error())
}

#[server(ToggleLikeFn, "/api", endpoint = "toggle_like")]
pub async fn toggle_like(id: Uuid) -> Result<Option<LikeResult>, ServerFnError> {
    let (ctx, user) = crate::request::request_user().await?;
    ctx.toggle_like
        .execute(user.as_ref(), id)
        .await
        .map_err(|e| e.into_server_error())
}

#[component]
pub fn BoardPage() -> impl IntoView {
    let user = Resource::new(|| (), |_| current_user());
    let error = RwSignal::new(None::<String>);

    view! {
        <ErrorDialog message=error/>
        <Suspense fallback=move || view! { <LoadingSpinner/> }>
            {move || {
                user.get().map(|result| match result {
                    Ok(Some(user)) => view! {
                        <AuthSection user=Some(user.clone())/>
                        <Board user=user error=error/>
                    }
                    .into_any(),
                    Ok(None) => view! {
                        <div class="hero">
                            <h1 class="hero__title">"Snipboard"</h1>
                            <p class="hero__subtitle">"Share short pieces of code and see what others are writing."</p>
                        </div>
                        <AuthSection user=None/>
                    }
                    .into_any(),
                    Err(e) => view! {
                        <p class="board__error">{error_text(e)}</p>
                    }
                    .into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn Board(user: SessionUser, error: RwSignal<Option<String>>) -> impl IntoView {
    let feed = RwSignal::new(FeedState::default());
    let loaded = RwSignal::new(false);
    let draft = RwSignal::new(SnippetDraft::default());
    let sending = RwSignal::new(false);

    let alive = Arc::new(AtomicBool::new(true));
    on_cleanup({
        let alive = alive.clone();
        move || alive.store(false, Ordering::Relaxed)
    });

    Effect::new(move |_| {
        let alive = alive.clone();
        spawn_local(async move {
            while alive.load(Ordering::Relaxed) {
                let (epoch, since) = feed.with_untracked(|state| (state.epoch(), state.version()));
                match wait_feed(epoch, since).await {
                    Ok(view) => {
                        if !alive.load(Ordering::Relaxed) {
                            break;
                        }
                        feed.update(|state| {
                            state.apply(view);
                        });
                        loaded.set(true);
                    }
                    Err(e) => {
                        if alive.load(Ordering::Relaxed) {
                            error.set(Some(error_text(e)));
                        }
                        break;
                    }
                }
            }
        });
    });

    let on_share = Callback::new(move |submitted: SnippetDraft| {
        if let Err(e) = submitted.to_new_snippet() {
            error.set(Some(e.user_message()));
            return;
        }
        sending.set(true);
        spawn_local(async move {
            let result =
                share_snippet(submitted.code, submitted.description, submitted.language).await;
            sending.set(false);
            match result {
                Ok(_) => draft.update(SnippetDraft::clear),
                Err(e) => error.set(Some(error_text(e))),
            }
        });
    });

    let on_like = Callback::new(move |id: Uuid| {
        spawn_local(async move {
            match toggle_like(id).await {
                Ok(Some(result)) => feed.update(|state| state.apply_like(result)),
                Ok(None) => {}
                Err(e) => error.set(Some(error_text(e))),
            }
        });
    });

    let on_delete = Callback::new(move |id: Uuid| {
        spawn_local(async move {
            match delete_snippet(id).await {
                Ok(DeleteOutcome::Deleted { .. }) => feed.update(|state| state.remove(id)),
                Ok(_) => {}
                Err(e) => error.set(Some(error_text(e))),
            }
        });
    });

    let my_id = user.id;

    view! {
        <section class="board">
            <ShareForm draft=draft on_submit=on_share is_sending=sending/>
            <Show
                when=move || loaded.get()
                fallback=move || view! { <LoadingSpinner text="Loading snippets..."/> }
            >
                <Show
                    when=move || feed.with(|state| !state.entries().is_empty())
                    fallback=|| view! { <p class="board__empty">"No snippets yet. Share the first one!"</p> }
                >
                    <For
                        each=move || feed.with(|state| state.entries().to_vec())
                        key=|entry| (entry.snippet.id, entry.author_icon.clone())
                        children=move |entry| {
                            let id = entry.snippet.id;
                            let is_own = entry.snippet.is_authored_by(my_id);
                            view! {
                                <SnippetCard
                                    entry=entry
                                    liked=Signal::derive(move || feed.with(|state| state.is_liked(id)))
                                    like_count=Signal::derive(move || {
                                        feed.with(|state| {
                                            state
                                                .entries()
                                                .iter()
                                                .find(|e| e.snippet.id == id)
                                                .map(|e| e.snippet.like_count)
                                                .unwrap_or_default()
                                        })
                                    })
                                    is_own=is_own
                                    on_like=on_like
                                    on_delete=on_delete
                                />
                            }
                        }
                    />
                </Show>
            </Show>
        </section>
    }
}
