use leptos::prelude::*;
use snipboard_app::domain::{Language, SnippetDraft};

#[component]
pub fn ShareForm(
    draft: RwSignal<SnippetDraft>,
    #[prop(into)] on_submit: Callback<SnippetDraft>,
    #[prop(into)] is_sending: Signal<bool>,
) -> impl IntoView {
    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(draft.get());
    };

    view! {
        <form class="share-form" on:submit=on_form_submit>
            <textarea
                class="share-form__code"
                placeholder="Paste your code here"
                rows="8"
                prop:value=move || draft.with(|d| d.code.clone())
                on:input=move |ev| draft.update(|d| d.code = event_target_value(&ev))
                prop:disabled=move || is_sending.get()
            ></textarea>
            <input
                type="text"
                class="share-form__description"
                placeholder="What does it do?"
                prop:value=move || draft.with(|d| d.description.clone())
                on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                prop:disabled=move || is_sending.get()
            />
            <select
                class="share-form__language"
                prop:value=move || draft.with(|d| d.language.map(|l| l.as_str()).unwrap_or_default().to_string())
                on:change=move |ev| {
                    draft.update(|d| d.language = Language::parse_optional(&event_target_value(&ev)))
                }
                prop:disabled=move || is_sending.get()
            >
                <option value="">"Language (optional)"</option>
                {Language::ALL
                    .iter()
                    .map(|lang| view! { <option value=lang.as_str()>{lang.label()}</option> })
                    .collect::<Vec<_>>()}
            </select>
            <button type="submit" class="share-form__button" prop:disabled=move || is_sending.get()>
                {move || if is_sending.get() { "Sharing..." } else { "Share" }}
            </button>
        </form>
    }
}
