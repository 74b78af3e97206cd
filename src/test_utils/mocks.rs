//! Mock portal server and reading sources for testing.

use crate::config::RequestConfig;
use crate::error::RetrievalError;
use crate::model::{Agreement, ReadingSource, RetrievalResult};
use crate::portal::{AuthSession, Credentials, RetrievalEngine};
use crate::test_utils::fixtures::html;
use async_trait::async_trait;
use reqwest::Url;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wiremock server impersonating the portal and its identity provider.
pub struct MockPortal {
    pub server: MockServer,
}

impl MockPortal {
    pub const AUTH_COOKIE: &'static str = "GreenchoiceAuth";
    pub const VERIFICATION_TOKEN: &'static str = "verification-token";

    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&self.server.uri()).unwrap()
    }

    pub fn login_page_body() -> String {
        html::login_page(Self::VERIFICATION_TOKEN)
    }

    pub fn callback_page() -> String {
        html::oidc_callback_page(
            "auth-code",
            "openid profile offline_access",
            "oidc-state",
            "session-state",
        )
    }

    /// Mounts a complete, successful login flow; `times` is the number of
    /// logins expected to reach `/signin-oidc`.
    pub async fn mount_login(&self, times: u64) {
        self.mount_login_page().await;
        self.mount_credentials_post().await;
        self.mount_signin_oidc(times).await;
    }

    /// Portal root redirecting to the login form.
    pub async fn mount_login_page(&self) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(302).insert_header(
                "location",
                "/Account/Login?ReturnUrl=%2Fconnect%2Fauthorize%2Fcallback",
            ))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Account/Login"))
            .respond_with(ResponseTemplate::new(200).set_body_string(Self::login_page_body()))
            .mount(&self.server)
            .await;
    }

    /// Credentials accepted: redirect to the callback form.
    pub async fn mount_credentials_post(&self) {
        Mock::given(method("POST"))
            .and(path("/Account/Login"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("location", "/connect/authorize/callback"),
            )
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/connect/authorize/callback"))
            .respond_with(ResponseTemplate::new(200).set_body_string(Self::callback_page()))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_signin_oidc(&self, times: u64) {
        Mock::given(method("POST"))
            .and(path("/signin-oidc"))
            .respond_with(ResponseTemplate::new(200).insert_header(
                "set-cookie",
                format!("{}=session-token; Path=/; HttpOnly", Self::AUTH_COOKIE).as_str(),
            ))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub fn auth_session(&self, username: &str, password: &str) -> AuthSession {
        AuthSession::new(
            Credentials::new(username, password),
            self.base_url(),
            RequestConfig::default(),
        )
    }

    pub fn engine(&self, username: &str, password: &str) -> RetrievalEngine {
        RetrievalEngine::new(
            Credentials::new(username, password),
            self.base_url(),
            RequestConfig::default(),
        )
    }
}

/// A reading source returning canned results.
pub struct MockReadingSource {
    result: Option<RetrievalResult>,
    agreements: Vec<Agreement>,
    calls: Arc<AtomicUsize>,
}

impl MockReadingSource {
    pub fn new_success(result: RetrievalResult) -> Self {
        Self {
            result: Some(result),
            agreements: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn new_with_agreements(agreements: Vec<Agreement>) -> Self {
        Self {
            result: None,
            agreements,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Source whose retrievals fail as if the session kept expiring.
    pub fn new_failure() -> Self {
        Self {
            result: None,
            agreements: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ReadingSource for MockReadingSource {
    async fn retrieve(&mut self, _agreement_id: i64) -> Result<RetrievalResult, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .ok_or_else(|| RetrievalError::session_expired("OpnamesOphalen"))
    }

    async fn list_agreements(&mut self) -> Result<Vec<Agreement>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.agreements.clone())
    }
}
