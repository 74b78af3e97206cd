use crate::config::RequestConfig;
use crate::error::TransportError;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client as HttpClient, Method, RequestBuilder, StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Body of an outgoing request, kept owned so a request can be replayed.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

/// A fully read response together with the redirect chain that led to it.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    /// Final URL after following redirects
    pub url: Url,
    /// Number of redirect hops followed
    pub redirects: usize,
    pub body: String,
}

impl RawResponse {
    /// Returns the decoded value of a query parameter of the final URL.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Turns a non-2xx final response into a status error.
    pub fn error_for_status(self) -> Result<Self, TransportError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(TransportError::status(self.status, self.body))
        }
    }
}

/// Cookie-jar backed HTTP client for the portal.
///
/// Redirects are followed here rather than by reqwest so that every response
/// reports how many hops it took; the portal signals an expired session by
/// bouncing data calls through its login pages.
pub struct HttpSession {
    http_client: HttpClient,
    jar: Arc<Jar>,
    base_url: Url,
    max_redirects: usize,
}

impl HttpSession {
    /// Creates a client with a fresh, empty cookie jar.
    pub fn new(base_url: Url, config: &RequestConfig) -> Result<Self, TransportError> {
        let jar = Arc::new(Jar::default());
        let http_client = HttpClient::builder()
            .cookie_provider(Arc::clone(&jar))
            .redirect(Policy::none())
            .timeout(Duration::from_secs(config.timeout_sec))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            jar,
            base_url,
            max_redirects: config.max_redirects,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a path against the portal URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url.join(path).map_err(|_| TransportError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
        })
    }

    /// Names of the cookies the jar would send to the portal. Values are
    /// deliberately left out so the result is safe to log.
    pub fn cookie_names(&self) -> Vec<String> {
        let Some(header) = self.jar.cookies(&self.base_url) else {
            return Vec::new();
        };
        header
            .to_str()
            .unwrap_or_default()
            .split(';')
            .filter_map(|pair| pair.split('=').next())
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Sends a request and follows redirects up to the configured cap.
    ///
    /// Non-success statuses are returned as-is; only network failures and
    /// broken redirect chains are errors here.
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        body: RequestBody,
    ) -> Result<RawResponse, TransportError> {
        let mut method = method;
        let mut url = url;
        let mut body = body;
        let mut redirects = 0;

        loop {
            let response = self.build(method.clone(), url.clone(), &body).send().await?;
            let status = response.status();

            if status.is_redirection() {
                if let Some(location) = response.headers().get(LOCATION) {
                    if redirects >= self.max_redirects {
                        return Err(TransportError::TooManyRedirects {
                            limit: self.max_redirects,
                        });
                    }

                    let location = location
                        .to_str()
                        .map_err(|_| TransportError::InvalidRedirect {
                            location: String::from_utf8_lossy(location.as_bytes()).into_owned(),
                        })?
                        .to_string();
                    let next = url
                        .join(&location)
                        .map_err(|_| TransportError::InvalidRedirect { location })?;

                    tracing::debug!("Following {} redirect: {} -> {}", status, url, next);

                    // 307/308 replay the request, everything else turns into a plain GET
                    if !matches!(
                        status,
                        StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT
                    ) && method != Method::HEAD
                    {
                        method = Method::GET;
                        body = RequestBody::Empty;
                    }

                    url = next;
                    redirects += 1;
                    continue;
                }
            }

            let text = response.text().await?;
            return Ok(RawResponse {
                status,
                url,
                redirects,
                body: text,
            });
        }
    }

    fn build(&self, method: Method, url: Url, body: &RequestBody) -> RequestBuilder {
        let builder = self.http_client.request(method, url);
        match body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(fields),
            RequestBody::Json(value) => builder.json(value),
        }
    }
}
