pub mod components;
pub mod pages;

#[cfg(feature = "ssr")]
mod request;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use pages::{BoardPage, SettingsPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Snipboard | Share code snippets"/>
        <Meta name="description" content="Share short code snippets and like the ones you enjoy"/>
        <Stylesheet id="leptos" href="/pkg/snipboard.css"/>

        <Router>
            <header class="topbar">
                <a href="/" class="topbar__brand">"Snipboard"</a>
                <nav class="topbar__nav">
                    <a href="/settings" class="topbar__link">"Settings"</a>
                </nav>
            </header>
            <main class="container">
                <Routes fallback=|| "Page not found">
                    <Route path=path!("/") view=BoardPage/>
                    <Route path=path!("/settings") view=SettingsPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
