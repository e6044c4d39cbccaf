mod auth_routes;

use axum::{routing::post, Router};
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use snipboard_app::config::AppConfig;
use snipboard_app::AppContext;
use snipboard_ui::App;
use tower_http::compression::CompressionLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_context = match AppContext::connect(&config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    // Lax so the cookie survives the redirect back from Google.
    let secure_cookies = config
        .google
        .as_ref()
        .is_some_and(|g| g.redirect_uri.starts_with("https://"));
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_same_site(SameSite::Lax)
        .with_secure(secure_cookies)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)));

    let routes = generate_route_list(App);

    let app = Router::new()
        .merge(auth_routes::router(app_context.clone()))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || provide_context(ctx.clone()),
                        req
                    ).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(session_layer)
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        sign_in = app_context.oauth.is_some(),
        snippets = app_context.feed.current().entries.len(),
        "Snipboard ready"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>📋</text></svg>"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
