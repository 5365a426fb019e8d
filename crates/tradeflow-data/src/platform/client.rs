//! REST client for the OpenBB Platform API and its lazy process-wide handle
//!
//! The platform runs as a separate service (started with `openbb-api`) and
//! proxies every upstream provider behind `/api/v1` routes returning
//! `{"results": [...]}` record lists.

use super::{ObbPlatform, StatementPeriod, Table};
use crate::error::{DataError, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::{Arc, RwLock};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Default endpoint of a locally running `openbb-api`
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:6900";

/// Requests per minute against the platform API
const DEFAULT_RATE_LIMIT: u32 = 120;

/// Credential values handed to the platform client at initialization
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// FRED API key, forwarded on economic series requests
    pub fred_api_key: Option<String>,
}

impl Credentials {
    /// Read credential values from the environment.
    /// `FRED_API_KEY` wins over the legacy `OPENBB_FRED_API_KEY` name.
    pub fn from_env() -> Self {
        let fred_api_key = std::env::var("FRED_API_KEY")
            .or_else(|_| std::env::var("OPENBB_FRED_API_KEY"))
            .ok();
        Self { fred_api_key }
    }
}

/// HTTP client for the OpenBB Platform REST API
pub struct OpenBbClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    rate_limiter: SharedRateLimiter,
}

impl OpenBbClient {
    /// Create a new platform client.
    ///
    /// # Arguments
    /// * `base_url` - Platform endpoint, e.g. `http://127.0.0.1:6900`
    /// * `credentials` - Credential values assigned into the client store
    /// * `rate_limit` - Requests per minute (default 120)
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        rate_limit: Option<u32>,
    ) -> Self {
        let per_minute =
            NonZeroU32::new(rate_limit.unwrap_or(DEFAULT_RATE_LIMIT)).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            rate_limiter,
        }
    }

    /// GET a platform route and decode its `results` list into a table
    async fn get_results(&self, path: &str, params: &[(&str, String)]) -> Result<Table> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/api/v1/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| DataError::Api(format!("OpenBB request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DataError::Api(format!(
                "OpenBB API error on /{path}: {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DataError::Api(format!("Failed to parse OpenBB response: {e}")))?;

        let results = data
            .get("results")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| DataError::Api(format!("OpenBB /{path} response had no results list")))?;

        Ok(Table::from_records(results))
    }
}

#[async_trait]
impl ObbPlatform for OpenBbClient {
    async fn equity_historical<'a>(
        &self,
        symbol: &'a str,
        start_date: Option<&'a str>,
        end_date: Option<&'a str>,
        limit: Option<u32>,
        provider: &'a str,
    ) -> Result<Table> {
        let mut params = vec![
            ("symbol", symbol.to_string()),
            ("provider", provider.to_string()),
        ];
        if let Some(start) = start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = end_date {
            params.push(("end_date", end.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.get_results("equity/price/historical", &params).await
    }

    async fn equity_profile(&self, symbol: &str, provider: &str) -> Result<Table> {
        let params = [
            ("symbol", symbol.to_string()),
            ("provider", provider.to_string()),
        ];
        self.get_results("equity/profile", &params).await
    }

    async fn fundamental_metrics(&self, symbol: &str, provider: &str) -> Result<Table> {
        let params = [
            ("symbol", symbol.to_string()),
            ("provider", provider.to_string()),
        ];
        self.get_results("equity/fundamental/metrics", &params).await
    }

    async fn fundamental_balance(
        &self,
        symbol: &str,
        period: StatementPeriod,
        provider: &str,
        limit: u32,
    ) -> Result<Table> {
        let params = statement_params(symbol, period, provider, limit);
        self.get_results("equity/fundamental/balance", &params).await
    }

    async fn fundamental_cash(
        &self,
        symbol: &str,
        period: StatementPeriod,
        provider: &str,
        limit: u32,
    ) -> Result<Table> {
        let params = statement_params(symbol, period, provider, limit);
        self.get_results("equity/fundamental/cash", &params).await
    }

    async fn fundamental_income(
        &self,
        symbol: &str,
        period: StatementPeriod,
        provider: &str,
        limit: u32,
    ) -> Result<Table> {
        let params = statement_params(symbol, period, provider, limit);
        self.get_results("equity/fundamental/income", &params).await
    }

    async fn insider_trading(&self, symbol: &str, provider: &str, limit: u32) -> Result<Table> {
        let params = [
            ("symbol", symbol.to_string()),
            ("provider", provider.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_results("equity/ownership/insider_trading", &params)
            .await
    }

    async fn company_news(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
        provider: &str,
        limit: u32,
    ) -> Result<Table> {
        let params = [
            ("symbol", symbol.to_string()),
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
            ("provider", provider.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_results("news/company", &params).await
    }

    async fn world_news(
        &self,
        start_date: &str,
        end_date: &str,
        provider: &str,
        limit: u32,
    ) -> Result<Table> {
        let params = [
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
            ("provider", provider.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_results("news/world", &params).await
    }

    async fn filings(
        &self,
        symbol: &str,
        filing_type: &str,
        provider: &str,
        limit: u32,
    ) -> Result<Table> {
        let params = [
            ("symbol", symbol.to_string()),
            ("type", filing_type.to_string()),
            ("provider", provider.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_results("equity/fundamental/filings", &params).await
    }

    async fn fred_series<'a>(
        &self,
        series_id: &'a str,
        start_date: Option<&'a str>,
        end_date: Option<&'a str>,
    ) -> Result<Table> {
        let mut params = vec![
            ("symbol", series_id.to_string()),
            ("provider", "fred".to_string()),
        ];
        if let Some(start) = start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = end_date {
            params.push(("end_date", end.to_string()));
        }
        if let Some(key) = &self.credentials.fred_api_key {
            params.push(("fred_api_key", key.clone()));
        }
        self.get_results("economy/fred_series", &params).await
    }
}

fn statement_params(
    symbol: &str,
    period: StatementPeriod,
    provider: &str,
    limit: u32,
) -> [(&'static str, String); 4] {
    [
        ("symbol", symbol.to_string()),
        ("period", period.as_str().to_string()),
        ("provider", provider.to_string()),
        ("limit", limit.to_string()),
    ]
}

/// Lazy, process-wide handle to the platform client.
///
/// Initialization is mutex-guarded and idempotent: the first `get` builds
/// the client (reading credentials and the endpoint from the environment),
/// later calls reuse the same instance, and `reset` forces the next call to
/// initialize again. Constructed explicitly and injected wherever the
/// platform is needed.
pub struct PlatformHandle {
    base_url: Option<String>,
    cell: RwLock<Option<Arc<dyn ObbPlatform>>>,
}

impl Default for PlatformHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformHandle {
    /// Handle that resolves its endpoint from `OPENBB_API_BASE` (falling
    /// back to the local default) on first use
    pub fn new() -> Self {
        Self {
            base_url: None,
            cell: RwLock::new(None),
        }
    }

    /// Handle pinned to an explicit platform endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            cell: RwLock::new(None),
        }
    }

    /// Handle pre-seeded with an existing platform implementation.
    /// Used for dependency injection and tests.
    pub fn with_platform(platform: Arc<dyn ObbPlatform>) -> Self {
        Self {
            base_url: None,
            cell: RwLock::new(Some(platform)),
        }
    }

    /// The platform instance, initializing it on first use
    pub fn get(&self) -> Result<Arc<dyn ObbPlatform>> {
        if let Some(platform) = self.cell.read().unwrap().as_ref() {
            return Ok(Arc::clone(platform));
        }

        let mut cell = self.cell.write().unwrap();
        // Another caller may have initialized while we waited for the lock
        if let Some(platform) = cell.as_ref() {
            return Ok(Arc::clone(platform));
        }

        let platform = self.initialize()?;
        *cell = Some(Arc::clone(&platform));
        Ok(platform)
    }

    /// Drop the cached instance; the next `get` initializes again
    pub fn reset(&self) {
        *self.cell.write().unwrap() = None;
    }

    fn initialize(&self) -> Result<Arc<dyn ObbPlatform>> {
        let base_url = self
            .base_url
            .clone()
            .or_else(|| std::env::var("OPENBB_API_BASE").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        reqwest::Url::parse(&base_url).map_err(|e| {
            DataError::PlatformUnavailable(format!(
                "invalid endpoint '{base_url}': {e}. Install the OpenBB Platform, \
                 start its REST API with 'openbb-api', and set OPENBB_API_BASE"
            ))
        })?;

        let credentials = Credentials::from_env();
        tracing::info!(%base_url, "OpenBB platform client initialized");
        Ok(Arc::new(OpenBbClient::new(base_url, credentials, None)))
    }
}
