//! OpenBB Platform access layer
//!
//! The platform exposes 30+ upstream data sources behind one REST surface.
//! [`ObbPlatform`] is the seam the vendor adapters call through; the real
//! implementation is [`OpenBbClient`], and tests substitute a mock.

pub mod client;
pub mod table;

pub use client::{Credentials, OpenBbClient, PlatformHandle};
pub use table::Table;

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Statement reporting period as the platform API expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementPeriod {
    Annual,
    Quarter,
}

impl StatementPeriod {
    /// Query-parameter value for this period
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote endpoints of the OpenBB Platform used by the vendor adapters.
///
/// Each method maps to one REST route; `provider` selects the upstream
/// source the platform proxies to (e.g. "yfinance", "sec", "fred").
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObbPlatform: Send + Sync {
    /// Historical OHLCV prices
    async fn equity_historical<'a>(
        &self,
        symbol: &'a str,
        start_date: Option<&'a str>,
        end_date: Option<&'a str>,
        limit: Option<u32>,
        provider: &'a str,
    ) -> Result<Table>;

    /// Company profile
    async fn equity_profile(&self, symbol: &str, provider: &str) -> Result<Table>;

    /// Key fundamental metrics
    async fn fundamental_metrics(&self, symbol: &str, provider: &str) -> Result<Table>;

    /// Balance sheet statements
    async fn fundamental_balance(
        &self,
        symbol: &str,
        period: StatementPeriod,
        provider: &str,
        limit: u32,
    ) -> Result<Table>;

    /// Cash flow statements
    async fn fundamental_cash(
        &self,
        symbol: &str,
        period: StatementPeriod,
        provider: &str,
        limit: u32,
    ) -> Result<Table>;

    /// Income statements
    async fn fundamental_income(
        &self,
        symbol: &str,
        period: StatementPeriod,
        provider: &str,
        limit: u32,
    ) -> Result<Table>;

    /// Insider transaction records
    async fn insider_trading(&self, symbol: &str, provider: &str, limit: u32) -> Result<Table>;

    /// Company-specific news
    async fn company_news(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
        provider: &str,
        limit: u32,
    ) -> Result<Table>;

    /// World / macro market news
    async fn world_news(
        &self,
        start_date: &str,
        end_date: &str,
        provider: &str,
        limit: u32,
    ) -> Result<Table>;

    /// SEC filings of a given type
    async fn filings(
        &self,
        symbol: &str,
        filing_type: &str,
        provider: &str,
        limit: u32,
    ) -> Result<Table>;

    /// FRED economic series observations
    async fn fred_series<'a>(
        &self,
        series_id: &'a str,
        start_date: Option<&'a str>,
        end_date: Option<&'a str>,
    ) -> Result<Table>;
}
