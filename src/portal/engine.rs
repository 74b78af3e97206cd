use crate::config::{PortalConfig, RequestConfig};
use crate::error::{ConfigError, RetrievalError};
use crate::model::{Agreement, ReadingSource, RetrievalResult};
use crate::portal::executor::{ApiRequest, Execution, NoDataReason, RequestExecutor};
use crate::portal::microbus;
use crate::portal::parsers::{parse_agreements, parse_meter_readings, parse_tariffs};
use crate::portal::session::{AuthSession, Credentials};
use async_trait::async_trait;
use reqwest::Url;

/// Retrieves readings and agreements of one portal account.
///
/// Keeps its login between calls and re-uses it until the portal reports
/// expiry.
pub struct RetrievalEngine {
    auth: AuthSession,
    executor: RequestExecutor,
}

impl RetrievalEngine {
    pub fn new(credentials: Credentials, base_url: Url, config: RequestConfig) -> Self {
        let executor = RequestExecutor::from_config(&config);
        Self {
            auth: AuthSession::new(credentials, base_url, config),
            executor,
        }
    }

    /// Builds an engine from the environment-loaded configuration.
    pub fn from_config(portal: &PortalConfig, request: RequestConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            Credentials::new(&portal.username, &portal.password),
            portal.base_url()?,
            request,
        ))
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Fetches meter readings and tariffs of `agreement_id`.
    pub async fn retrieve(&mut self, agreement_id: i64) -> Result<RetrievalResult, RetrievalError> {
        self.auth.ensure_authenticated().await?;

        tracing::debug!("Retrieving meter values");
        let body = self.call(&microbus::meter_readings()).await?;
        let readings = parse_meter_readings(&body)?;

        tracing::debug!("Retrieving tariffs of agreement {}", agreement_id);
        let body = self.call(&microbus::tariffs(agreement_id)).await?;
        let tariffs = parse_tariffs(&body)?;

        Ok(RetrievalResult {
            electricity: readings.electricity,
            gas: readings.gas,
            tariffs,
        })
    }

    /// Lists the agreements of the account's preferred customer.
    pub async fn list_agreements(&mut self) -> Result<Vec<Agreement>, RetrievalError> {
        self.auth.ensure_authenticated().await?;

        let body = self.call(&microbus::init()).await?;
        let agreements = parse_agreements(&body)?;
        tracing::debug!("Found {} agreements", agreements.len());
        Ok(agreements)
    }

    async fn call(&mut self, request: &ApiRequest) -> Result<String, RetrievalError> {
        match self.executor.execute(&mut self.auth, request).await? {
            Execution::Completed(response) => Ok(response.body),
            Execution::NoData(NoDataReason::SessionExpired) => {
                Err(RetrievalError::session_expired(&request.name))
            }
            Execution::NoData(NoDataReason::Transport(err)) => {
                tracing::error!("Could not complete {}: request failed", request.name);
                Err(RetrievalError::transport(&request.name, err))
            }
        }
    }
}

#[async_trait]
impl ReadingSource for RetrievalEngine {
    async fn retrieve(&mut self, agreement_id: i64) -> Result<RetrievalResult, RetrievalError> {
        RetrievalEngine::retrieve(self, agreement_id).await
    }

    async fn list_agreements(&mut self) -> Result<Vec<Agreement>, RetrievalError> {
        RetrievalEngine::list_agreements(self).await
    }
}
