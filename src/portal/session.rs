//! Login handshake and ownership of the authenticated session.

use crate::config::RequestConfig;
use crate::error::AuthError;
use crate::portal::client::{HttpSession, RequestBody};
use crate::portal::tokens::{
    extract_oidc_params, extract_verification_token, VERIFICATION_TOKEN_FIELD,
};
use reqwest::{Method, Url};
use std::fmt;

const SIGNIN_OIDC_PATH: &str = "/signin-oidc";
const RETURN_URL_PARAM: &str = "ReturnUrl";

/// Portal login credentials.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the session is in its lifecycle.
///
/// `Authenticating` only exists while a handshake is in flight; a failed
/// handshake falls back to `Unauthenticated`.
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated(HttpSession),
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Unauthenticated"),
            Self::Authenticating => write!(f, "Authenticating"),
            Self::Authenticated(_) => write!(f, "Authenticated"),
        }
    }
}

/// Owns one authenticated portal session.
///
/// Never logs in on its own: callers either ask for a session explicitly or
/// invalidate it and log in again when the portal reports expiry.
pub struct AuthSession {
    credentials: Credentials,
    base_url: Url,
    config: RequestConfig,
    state: SessionState,
}

impl AuthSession {
    pub fn new(credentials: Credentials, base_url: Url, config: RequestConfig) -> Self {
        Self {
            credentials,
            base_url,
            config,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// The current session, if logged in.
    pub fn session(&self) -> Option<&HttpSession> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Drops the current session; the next call has to log in again.
    pub fn invalidate(&mut self) {
        if self.is_authenticated() {
            tracing::debug!("Invalidating portal session");
        }
        self.state = SessionState::Unauthenticated;
    }

    /// Returns the current session, logging in first if there is none.
    pub async fn ensure_authenticated(&mut self) -> Result<&HttpSession, AuthError> {
        if !self.is_authenticated() {
            self.login().await?;
        }
        Ok(self.current())
    }

    /// Runs the full login handshake with a fresh cookie jar.
    pub async fn login(&mut self) -> Result<&HttpSession, AuthError> {
        if !self.credentials.is_complete() {
            tracing::error!("Username or password not set");
            return Err(AuthError::MissingCredentials);
        }

        self.state = SessionState::Authenticating;
        let session = match self.handshake().await {
            Ok(session) => session,
            Err(err) => {
                self.state = SessionState::Unauthenticated;
                return Err(err);
            }
        };

        tracing::info!("Logged in to {}", self.base_url);
        self.state = SessionState::Authenticated(session);
        Ok(self.current())
    }

    fn current(&self) -> &HttpSession {
        match &self.state {
            SessionState::Authenticated(session) => session,
            // only called right after a successful login or an is_authenticated check
            _ => unreachable!("session requested while {:?}", self.state),
        }
    }

    async fn handshake(&self) -> Result<HttpSession, AuthError> {
        let session = HttpSession::new(self.base_url.clone(), &self.config)?;

        // login cookies and form data
        let login_page = session
            .send(Method::GET, session.endpoint("/")?, RequestBody::Empty)
            .await?
            .error_for_status()?;
        let return_url = login_page.query_param(RETURN_URL_PARAM).unwrap_or_default();
        let token = extract_verification_token(&login_page.body)?;
        tracing::debug!(
            "Fetched login page {} after {} redirects",
            login_page.url.path(),
            login_page.redirects
        );

        let login_form = vec![
            (RETURN_URL_PARAM.to_string(), return_url),
            ("Username".to_string(), self.credentials.username.clone()),
            ("Password".to_string(), self.credentials.password.clone()),
            (VERIFICATION_TOKEN_FIELD.to_string(), token),
            ("RememberLogin".to_string(), "true".to_string()),
        ];
        let auth_page = session
            .send(Method::POST, login_page.url, RequestBody::Form(login_form))
            .await?
            .error_for_status()?;

        // exchange the OIDC params for the portal's auth cookie
        let oidc_params = extract_oidc_params(&auth_page.body)?;
        let callback = session
            .send(
                Method::POST,
                session.endpoint(SIGNIN_OIDC_PATH)?,
                RequestBody::Form(oidc_params.form_fields()),
            )
            .await?
            .error_for_status()?;
        tracing::debug!(
            "OIDC callback returned {}, cookies: {:?}",
            callback.status,
            session.cookie_names()
        );

        Ok(session)
    }
}
