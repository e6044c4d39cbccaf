use super::PendingLogin;
use crate::domain::{SessionUser, User};
use crate::infrastructure::db::UserRepository;
use snipboard_errors::AppError;
use tower_sessions::Session;
use uuid::Uuid;

pub const USER_ID_KEY: &str = "user_id";
pub const PENDING_LOGIN_KEY: &str = "oauth_pending";

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("Session store error: {e}"))
}

/// Resolves the signed-in user. A session pointing at a user that no longer
/// exists is cleared and treated as signed out.
pub async fn current_user(
    session: &Session,
    users: &UserRepository,
) -> Result<Option<SessionUser>, AppError> {
    let user_id: Option<Uuid> = session.get(USER_ID_KEY).await.map_err(session_error)?;
    let Some(id) = user_id else {
        return Ok(None);
    };

    match users.find_by_id(id).await? {
        Some(model) => Ok(Some(User::from(model).session_user())),
        None => {
            tracing::info!(user_id = %id, "Session refers to a missing user, clearing");
            session.remove::<Uuid>(USER_ID_KEY).await.map_err(session_error)?;
            Ok(None)
        }
    }
}

/// Binds the session to `user_id` under a fresh session id.
pub async fn sign_in(session: &Session, user_id: Uuid) -> Result<(), AppError> {
    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(USER_ID_KEY, user_id)
        .await
        .map_err(session_error)
}

pub async fn sign_out(session: &Session) -> Result<(), AppError> {
    session.flush().await.map_err(session_error)
}

pub async fn store_pending_login(session: &Session, pending: &PendingLogin) -> Result<(), AppError> {
    session
        .insert(PENDING_LOGIN_KEY, pending)
        .await
        .map_err(session_error)
}

/// Takes the pending login out of the session; it can be used only once.
pub async fn take_pending_login(session: &Session) -> Result<Option<PendingLogin>, AppError> {
    session
        .remove::<PendingLogin>(PENDING_LOGIN_KEY)
        .await
        .map_err(session_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::test_support::{insert_user, memory_db};
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_sign_in_then_out() {
        let db = memory_db().await;
        let id = insert_user(&db, "ada", None).await;
        let users = UserRepository::new(db);
        let session = new_session();

        assert_eq!(current_user(&session, &users).await.unwrap(), None);

        sign_in(&session, id).await.unwrap();
        let user = current_user(&session, &users).await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.display_name, "ada");

        sign_out(&session).await.unwrap();
        assert_eq!(current_user(&session, &users).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stale_user_is_cleared() {
        let db = memory_db().await;
        let users = UserRepository::new(db);
        let session = new_session();

        session.insert(USER_ID_KEY, Uuid::new_v4()).await.unwrap();
        assert_eq!(current_user(&session, &users).await.unwrap(), None);
        assert_eq!(session.get::<Uuid>(USER_ID_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_pending_login_taken_once() {
        let session = new_session();
        let pending = PendingLogin {
            csrf_state: "state".to_string(),
            pkce_verifier: "verifier".to_string(),
        };

        store_pending_login(&session, &pending).await.unwrap();
        let taken = take_pending_login(&session).await.unwrap().unwrap();
        assert_eq!(taken.csrf_state, "state");
        assert!(take_pending_login(&session).await.unwrap().is_none());
    }
}
