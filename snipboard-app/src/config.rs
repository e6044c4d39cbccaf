use snipboard_errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Settings read from the environment (and `.env` via dotenvy in the binary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    /// `None` disables sign-in; the board is then read-only for everyone.
    pub google: Option<GoogleConfig>,
    pub run_migrations: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url =
            get("DATABASE_URL").ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;

        let google = match (
            get("GOOGLE_CLIENT_ID"),
            get("GOOGLE_CLIENT_SECRET"),
            get("GOOGLE_REDIRECT_URI"),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Some(GoogleConfig {
                client_id,
                client_secret,
                redirect_uri,
            }),
            (None, None, None) => None,
            _ => {
                return Err(AppError::Config(
                    "GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REDIRECT_URI must be set together"
                        .to_string(),
                ))
            }
        };

        let run_migrations = match get("RUN_MIGRATIONS").as_deref() {
            None => true,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "RUN_MIGRATIONS must be true or false, got {other:?}"
                )))
            }
        };

        Ok(Self {
            database_url,
            google,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_minimal_config() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/snipboard")]).unwrap();
        assert_eq!(config.google, None);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_full_config() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/snipboard"),
            ("GOOGLE_CLIENT_ID", "id"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
            ("GOOGLE_REDIRECT_URI", "http://localhost:3000/auth/callback"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();
        assert_eq!(config.google.unwrap().client_id, "id");
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_rejects_partial_or_missing() {
        assert!(matches!(load(&[]), Err(AppError::Config(_))));
        assert!(load(&[
            ("DATABASE_URL", "postgres://localhost/snipboard"),
            ("GOOGLE_CLIENT_ID", "id"),
        ])
        .is_err());
        assert!(load(&[
            ("DATABASE_URL", "postgres://localhost/snipboard"),
            ("RUN_MIGRATIONS", "maybe"),
        ])
        .is_err());
    }
}
