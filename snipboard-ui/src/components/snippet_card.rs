use leptos::prelude::*;
use snipboard_app::domain::FeedEntry;
use uuid::Uuid;

#[component]
pub fn SnippetCard(
    entry: FeedEntry,
    #[prop(into)] liked: Signal<bool>,
    #[prop(into)] like_count: Signal<i32>,
    is_own: bool,
    #[prop(into)] on_like: Callback<Uuid>,
    #[prop(into)] on_delete: Callback<Uuid>,
) -> impl IntoView {
    let id = entry.snippet.id;
    let language = entry.snippet.language.map(|l| l.label());
    let created = entry.snippet.created_at.format("%Y-%m-%d %H:%M").to_string();
    let icon = (!entry.author_icon.is_empty()).then_some(entry.author_icon);

    view! {
        <article class="snippet">
            <header class="snippet__header">
                {icon.map(|src| view! { <img class="snippet__icon" src=src alt=""/> })}
                <span class="snippet__author">{entry.snippet.author_name}</span>
                <time class="snippet__time">{created}</time>
                {language.map(|label| view! { <span class="snippet__language">{label}</span> })}
            </header>
            <p class="snippet__description">{entry.snippet.description}</p>
            <pre class="snippet__code"><code>{entry.snippet.code}</code></pre>
            <footer class="snippet__actions">
                <button
                    class=move || {
                        if liked.get() { "snippet__like snippet__like--active" } else { "snippet__like" }
                    }
                    on:click=move |_| on_like.run(id)
                >
                    {move || if liked.get() { "♥" } else { "♡" }}
                    " "
                    {move || like_count.get()}
                </button>
                {is_own.then(|| view! {
                    <button class="snippet__delete" on:click=move |_| on_delete.run(id)>
                        "Delete"
                    </button>
                })}
            </footer>
        </article>
    }
}
