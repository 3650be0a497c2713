//! Client for the duplicate check endpoints
//!
//! The server is the authority on duplicates; this client only asks
//! `GET {base}/{books|members}/api/validate-{field}?value=..&currentId=..`
//! and reads back a bare JSON boolean.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    config::OracleConfig,
    error::{AppError, AppResult},
    models::FieldKey,
};

/// One duplicate lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateQuery {
    pub field: FieldKey,
    /// Trimmed, non-empty candidate value
    pub value: String,
    /// Record being edited, excluded from the lookup
    pub current_id: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DuplicateOracle: Send + Sync {
    /// Whether another record already uses `query.value`
    async fn check_duplicate(&self, query: DuplicateQuery) -> AppResult<bool>;
}

#[async_trait]
impl<T: DuplicateOracle + ?Sized> DuplicateOracle for std::sync::Arc<T> {
    async fn check_duplicate(&self, query: DuplicateQuery) -> AppResult<bool> {
        (**self).check_duplicate(query).await
    }
}

#[derive(Clone)]
pub struct HttpDuplicateOracle {
    client: Client,
    base_url: Url,
}

impl HttpDuplicateOracle {
    pub fn new(config: &OracleConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> AppResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| AppError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;
        // Url::join drops the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    /// Full request URL for a query
    pub fn endpoint(&self, query: &DuplicateQuery) -> AppResult<Url> {
        let mut url = self
            .base_url
            .join(&query.field.endpoint_path())
            .map_err(|e| AppError::InvalidEndpoint(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("value", &query.value)
            .append_pair("currentId", query.current_id.as_deref().unwrap_or(""));
        Ok(url)
    }
}

#[async_trait]
impl DuplicateOracle for HttpDuplicateOracle {
    async fn check_duplicate(&self, query: DuplicateQuery) -> AppResult<bool> {
        let url = self.endpoint(&query)?;
        tracing::debug!("Duplicate check {} for {}", query.field, url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::OracleStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str::<bool>(body.trim())?)
    }
}
