use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use snipboard_app::domain::SessionUser;
use snipboard_app::infrastructure::auth::session;
use snipboard_app::AppContext;
use snipboard_errors::AppError;
use tower_sessions::Session;

#[derive(Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct MeResponse {
    authenticated: bool,
    user: Option<SessionUser>,
}

/// `/auth/*` routes. Expects a `SessionManagerLayer` above it.
pub fn router<S>(ctx: AppContext) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/logout", post(logout).get(logout))
        .route("/auth/me", get(me))
        .with_state(ctx)
}

async fn login(State(ctx): State<AppContext>, session: Session) -> Result<Redirect, AppError> {
    let oauth = ctx
        .oauth
        .as_ref()
        .ok_or_else(|| AppError::Config("Google sign-in is not configured".to_string()))?;

    let (auth_url, pending) = oauth.authorize();
    session::store_pending_login(&session, &pending).await?;
    Ok(Redirect::to(&auth_url))
}

async fn callback(
    State(ctx): State<AppContext>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AppError> {
    if let Some(error) = params.error {
        tracing::warn!(%error, "OAuth provider returned an error");
        return Ok(Redirect::to("/"));
    }

    let oauth = ctx
        .oauth
        .as_ref()
        .ok_or_else(|| AppError::Config("Google sign-in is not configured".to_string()))?;
    let (Some(code), Some(state)) = (params.code, params.state) else {
        return Err(AppError::Auth("Callback without code or state".to_string()));
    };
    let pending = session::take_pending_login(&session)
        .await?
        .ok_or_else(|| AppError::Auth("No login in progress".to_string()))?;

    let info = oauth.complete(pending, &code, &state).await?;
    let user = ctx.users.upsert(&info.into_user()).await?;
    session::sign_in(&session, user.id).await?;
    tracing::info!(user_id = %user.id, "User signed in");

    Ok(Redirect::to("/"))
}

async fn logout(session: Session) -> Result<Redirect, AppError> {
    session::sign_out(&session).await?;
    Ok(Redirect::to("/"))
}

async fn me(State(ctx): State<AppContext>, session: Session) -> Result<Json<MeResponse>, AppError> {
    let user = session::current_user(&session, &ctx.users).await?;
    Ok(Json(MeResponse {
        authenticated: user.is_some(),
        user,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sea_orm::DatabaseConnection;
    use snipboard_app::config::AppConfig;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    fn test_router() -> Router {
        let config = AppConfig {
            database_url: "postgres://unused".to_string(),
            google: None,
            run_migrations: false,
        };
        let ctx = AppContext::new(DatabaseConnection::Disconnected, &config).unwrap();
        router(ctx).layer(SessionManagerLayer::new(MemoryStore::default()))
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::json!(null));
        (status, json)
    }

    #[tokio::test]
    async fn test_me_without_session_is_signed_out() {
        let (status, body) = get(&test_router(), "/auth/me").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authenticated"], false);
        assert!(body["user"].is_null());
    }

    #[tokio::test]
    async fn test_login_without_oauth_config_fails() {
        let (status, body) = get(&test_router(), "/auth/login").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_logout_redirects_home() {
        let req = Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .body(Body::empty())
            .unwrap();
        let resp = test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()["location"], "/");
    }

    #[tokio::test]
    async fn test_provider_error_redirects_home() {
        let req = Request::builder()
            .uri("/auth/callback?error=access_denied")
            .body(Body::empty())
            .unwrap();
        let resp = test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }
}
