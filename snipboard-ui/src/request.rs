use server_fn::ServerFnError;
use snipboard_app::domain::SessionUser;
use snipboard_app::infrastructure::auth::session;
use snipboard_app::AppContext;
use tower_sessions::Session;

/// App context plus the signed-in user of the current request, if any.
pub(crate) async fn request_user() -> Result<(AppContext, Option<SessionUser>), ServerFnError> {
    let ctx = leptos::prelude::expect_context::<AppContext>();
    let session: Session = leptos_axum::extract().await?;
    let user = session::current_user(&session, &ctx.users)
        .await
        .map_err(|e| e.into_server_error())?;
    Ok((ctx, user))
}
