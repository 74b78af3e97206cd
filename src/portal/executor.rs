//! Bounded retry state machine for portal API calls.

use crate::config::RequestConfig;
use crate::error::{AuthError, TransportError};
use crate::portal::client::{RawResponse, RequestBody};
use crate::portal::session::AuthSession;
use reqwest::{Method, StatusCode};

/// One logical API call, replayable as-is on retry.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Name used in logs and errors (the RPC call name for microbus calls)
    pub name: String,
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

/// Decides whether a response means the portal dropped our session.
pub trait ExpiryDetector: Send + Sync {
    fn is_expired(&self, response: &RawResponse) -> bool;
}

/// Treats configured statuses, or a redirect chain longer than a threshold,
/// as session expiry.
///
/// The redirect rule is a heuristic: an expired session bounces data calls
/// through the identity provider before landing on an HTML page.
#[derive(Debug, Clone)]
pub struct StatusOrRedirectExpiry {
    pub statuses: Vec<StatusCode>,
    /// `None` disables the redirect rule
    pub max_redirects: Option<usize>,
}

impl Default for StatusOrRedirectExpiry {
    fn default() -> Self {
        Self {
            statuses: vec![StatusCode::FORBIDDEN],
            max_redirects: Some(1),
        }
    }
}

impl StatusOrRedirectExpiry {
    pub fn from_config(config: &RequestConfig) -> Self {
        Self {
            max_redirects: match config.expiry_redirect_threshold {
                0 => None,
                threshold => Some(threshold),
            },
            ..Self::default()
        }
    }
}

impl ExpiryDetector for StatusOrRedirectExpiry {
    fn is_expired(&self, response: &RawResponse) -> bool {
        self.statuses.contains(&response.status)
            || self
                .max_redirects
                .is_some_and(|max| response.redirects > max)
    }
}

/// Retry budgets for one logical call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after transport failures or non-success statuses
    pub max_retries: u32,
    /// Re-logins after session expiry, counted separately from `max_retries`
    pub max_relogins: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            max_relogins: 1,
        }
    }
}

impl From<&RequestConfig> for RetryPolicy {
    fn from(config: &RequestConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            max_relogins: config.max_relogins,
        }
    }
}

/// Why a call ended without data.
#[derive(Debug)]
pub enum NoDataReason {
    /// The session kept expiring after the allowed re-logins
    SessionExpired,
    /// The last attempt's failure once the retry budget ran out
    Transport(TransportError),
}

/// Outcome of a call that didn't abort on a failed login.
#[derive(Debug)]
pub enum Execution {
    Completed(RawResponse),
    NoData(NoDataReason),
}

/// Runs API calls against an [`AuthSession`], re-logging in on expiry and
/// retrying transient failures within the budgets of its [`RetryPolicy`].
pub struct RequestExecutor {
    policy: RetryPolicy,
    detector: Box<dyn ExpiryDetector>,
}

impl RequestExecutor {
    pub fn new(policy: RetryPolicy, detector: Box<dyn ExpiryDetector>) -> Self {
        Self { policy, detector }
    }

    pub fn from_config(config: &RequestConfig) -> Self {
        Self::new(
            RetryPolicy::from(config),
            Box::new(StatusOrRedirectExpiry::from_config(config)),
        )
    }

    /// Executes `request`, returning `NoData` once the budgets are spent.
    ///
    /// Only a failed (re-)login is returned as an error; it aborts the call
    /// without further retries.
    pub async fn execute(
        &self,
        auth: &mut AuthSession,
        request: &ApiRequest,
    ) -> Result<Execution, AuthError> {
        let mut retries_left = self.policy.max_retries;
        let mut relogins_left = self.policy.max_relogins;

        loop {
            tracing::debug!("Request: {} {} ({})", request.method, request.path, request.name);
            let session = auth.ensure_authenticated().await?;
            let url = match session.endpoint(&request.path) {
                Ok(url) => url,
                Err(err) => return Ok(Execution::NoData(NoDataReason::Transport(err))),
            };
            let attempt = session
                .send(request.method.clone(), url, request.body.clone())
                .await;

            let failure = match attempt {
                Ok(response) if self.detector.is_expired(&response) => {
                    tracing::debug!(
                        "Access cookie expired (status {}, {} redirects), triggering refresh",
                        response.status,
                        response.redirects
                    );
                    auth.invalidate();
                    if relogins_left == 0 {
                        tracing::error!(
                            "Session for {} still expired after re-login, giving up",
                            request.name
                        );
                        return Ok(Execution::NoData(NoDataReason::SessionExpired));
                    }
                    relogins_left -= 1;
                    if let Err(err) = auth.login().await {
                        tracing::error!("Login failed! Please check your credentials and try again.");
                        return Err(err);
                    }
                    continue;
                }
                Ok(response) if response.status.is_success() => {
                    return Ok(Execution::Completed(response));
                }
                Ok(response) => TransportError::status(response.status, response.body),
                Err(err) => err,
            };

            tracing::error!("Request {} failed: {}", request.name, failure);
            if let Some(session) = auth.session() {
                tracing::debug!("Session cookies: {:?}", session.cookie_names());
            }
            if retries_left == 0 {
                return Ok(Execution::NoData(NoDataReason::Transport(failure)));
            }
            retries_left -= 1;
            tracing::debug!("Retrying request {} ({} retries left)", request.name, retries_left);
        }
    }
}
