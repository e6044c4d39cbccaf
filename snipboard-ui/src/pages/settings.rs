use leptos::prelude::*;
use leptos::task::spawn_local;
use server_fn::ServerFnError;
use snipboard_app::domain::{ProfileUpdate, SessionUser};

use super::error_text;
use crate::components::{AuthSection, ErrorDialog, LoadingSpinner};

/// Current profile values for the settings form.
#[server(ProfileFn, "/api", endpoint = "profile")]
pub async fn profile() -> Result<Option<ProfileUpdate>, ServerFnError> {
    let (ctx, user) = crate::request::request_user().await?;
    let Some(user) = user else {
        return Ok(None);
    };
    let model = ctx
        .users
        .find_by_id(user.id)
        .await
        .map_err(|e| snipboard_errors::AppError::from(e).into_server_error())?;
    Ok(model.map(|m| ProfileUpdate {
        display_name: m.display_name,
        icon_url: m.icon_url.unwrap_or_default(),
    }))
}

#[server(UpdateProfileFn, "/api", endpoint = "update_profile")]
pub async fn update_profile(
    display_name: String,
    icon_url: String,
) -> Result<SessionUser, ServerFnError> {
    let (ctx, user) = crate::request::request_user().await?;
    let updated = ctx
        .update_profile
        .execute(
            user.as_ref(),
            ProfileUpdate {
                display_name,
                icon_url,
            },
        )
        .await
        .map_err(|e| e.into_server_error())?;
    Ok(updated.session_user())
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let current = Resource::new(|| (), |_| profile());
    let error = RwSignal::new(None::<String>);

    view! {
        <ErrorDialog message=error/>
        <h1 class="settings__title">"Settings"</h1>
        <Suspense fallback=move || view! { <LoadingSpinner/> }>
            {move || {
                current.get().map(|result| match result {
                    Ok(Some(values)) => view! { <ProfileForm initial=values error=error/> }.into_any(),
                    Ok(None) => view! { <AuthSection user=None/> }.into_any(),
                    Err(e) => view! { <p class="settings__error">{error_text(e)}</p> }.into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn ProfileForm(initial: ProfileUpdate, error: RwSignal<Option<String>>) -> impl IntoView {
    let form = RwSignal::new(initial);
    let saving = RwSignal::new(false);
    let saved = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let values = form.get();
        saving.set(true);
        saved.set(false);
        spawn_local(async move {
            let result = update_profile(values.display_name, values.icon_url).await;
            saving.set(false);
            match result {
                Ok(user) => {
                    form.update(|f| f.display_name = user.display_name);
                    saved.set(true);
                }
                Err(e) => error.set(Some(error_text(e))),
            }
        });
    };

    view! {
        <form class="settings-form" on:submit=on_submit>
            <label class="settings-form__label">
                "Display name"
                <input
                    type="text"
                    class="settings-form__input"
                    maxlength="64"
                    prop:value=move || form.with(|f| f.display_name.clone())
                    on:input=move |ev| form.update(|f| f.display_name = event_target_value(&ev))
                />
            </label>
            <label class="settings-form__label">
                "Icon URL"
                <input
                    type="url"
                    class="settings-form__input"
                    placeholder="https://..."
                    prop:value=move || form.with(|f| f.icon_url.clone())
                    on:input=move |ev| form.update(|f| f.icon_url = event_target_value(&ev))
                />
            </label>
            <button type="submit" class="settings-form__button" prop:disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Save" }}
            </button>
            <Show when=move || saved.get()>
                <p class="settings-form__saved">"Saved"</p>
            </Show>
        </form>
    }
}
