use leptos::prelude::*;

/// Modal showing the last failure. Closing it clears `message`.
#[component]
pub fn ErrorDialog(message: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="dialog-backdrop">
                <div class="dialog" role="alertdialog" aria-modal="true">
                    <p class="dialog__title">"Something went wrong"</p>
                    <p class="dialog__message">{move || message.get().unwrap_or_default()}</p>
                    <button class="dialog__close" on:click=move |_| message.set(None)>
                        "Close"
                    </button>
                </div>
            </div>
        </Show>
    }
}
