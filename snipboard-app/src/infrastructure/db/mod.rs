pub mod entities;
mod like_repository;
mod snippet_repository;
mod user_repository;

pub use like_repository::LikeRepository;
pub use snippet_repository::SnippetRepository;
pub use user_repository::UserRepository;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
    TransactionError,
};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Applies `migrations/001_initial.sql`. Every statement is idempotent, so a
/// statement that fails is logged and skipped.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");
    let backend = db.get_database_backend();

    for statement in migration.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        if let Err(e) = db
            .execute(Statement::from_string(backend, statement.to_string()))
            .await
        {
            tracing::warn!(error = %e, "Migration statement skipped");
        }
    }

    Ok(())
}

pub(crate) fn flatten_txn_error(err: TransactionError<DbErr>) -> DbErr {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
    }
}
