use leptos::prelude::*;
use snipboard_app::domain::SessionUser;

#[component]
pub fn AuthSection(user: Option<SessionUser>) -> impl IntoView {
    match user {
        Some(user) => view! {
            <div class="auth-section auth-section--signed-in">
                <span class="auth-section__name">{user.display_name}</span>
                <form action="/auth/logout" method="post" class="logout-form">
                    <button type="submit" class="logout-btn">"Sign out"</button>
                </form>
            </div>
        }
        .into_any(),
        None => view! {
            <div class="auth-section">
                <a href="/auth/login" class="google-login-btn">"Sign in with Google"</a>
                <p class="auth-section__hint">"Sign in to share and like snippets"</p>
            </div>
        }
        .into_any(),
    }
}
