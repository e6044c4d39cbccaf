use crate::config::GoogleConfig;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use snipboard_errors::AppError;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String, // Google's unique user ID
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

impl GoogleUserInfo {
    pub fn into_user(self) -> crate::domain::User {
        crate::domain::User::new(self.sub, self.email, self.name, self.picture)
    }
}

/// State kept in the session between `/auth/login` and `/auth/callback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLogin {
    pub csrf_state: String,
    pub pkce_verifier: String,
}

type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    oauth2::EndpointSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointSet,
>;

#[derive(Clone)]
pub struct GoogleOAuth {
    client: ConfiguredClient,
    redirect_uri: RedirectUrl,
    http_client: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(config: &GoogleConfig) -> Result<Self, AppError> {
        let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string())
            .map_err(|e| AppError::Config(e.to_string()))?;
        let token_url = TokenUrl::new(GOOGLE_TOKEN_URL.to_string())
            .map_err(|e| AppError::Config(e.to_string()))?;
        let redirect = RedirectUrl::new(config.redirect_uri.clone())
            .map_err(|e| AppError::Config(format!("GOOGLE_REDIRECT_URI: {e}")))?;

        let client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url);

        Ok(Self {
            client,
            redirect_uri: redirect,
            http_client: reqwest::Client::new(),
        })
    }

    /// Authorization URL to redirect the browser to, plus the state to keep
    /// in the session until the callback.
    pub fn authorize(&self) -> (String, PendingLogin) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_token) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        let pending = PendingLogin {
            csrf_state: csrf_token.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        };
        (auth_url.to_string(), pending)
    }

    /// Checks the returned state, exchanges the code and fetches the profile.
    pub async fn complete(
        &self,
        pending: PendingLogin,
        code: &str,
        state: &str,
    ) -> Result<GoogleUserInfo, AppError> {
        if pending.csrf_state != state {
            return Err(AppError::Auth("OAuth state mismatch".to_string()));
        }

        // Token requests must not follow redirects.
        let token_client = oauth2::reqwest::ClientBuilder::new()
            .redirect(oauth2::reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .set_pkce_verifier(PkceCodeVerifier::new(pending.pkce_verifier))
            .request_async(&token_client)
            .await
            .map_err(|e| AppError::Auth(format!("Token exchange failed: {e:?}")))?;

        let access_token = token_result.access_token().secret();

        self.http_client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to fetch user info: {e}")))?
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to parse user info: {e}")))
    }
}
