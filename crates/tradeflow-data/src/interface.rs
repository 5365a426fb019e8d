//! Typed capability surface consumed by agent code
//!
//! One method per capability. On success the payload text comes back; on
//! vendor failure the capability-specific failure line comes back as text.
//! The one error that surfaces as `Err` is [`DataError::PlatformUnavailable`]:
//! a missing platform is a deployment problem the caller must see, not a
//! degraded payload. This module is the only place typed errors become
//! apologetic strings; everything below it works with `DataError`.

use crate::capability::{DataRequest, FilingKind, Frequency};
use crate::config::VendorConfig;
use crate::error::{DataError, Result};
use crate::platform::PlatformHandle;
use crate::registry::VendorRegistry;
use crate::router::VendorRouter;

/// Facade over the router with string-in, string-out signatures
pub struct DataInterface {
    router: VendorRouter,
}

impl DataInterface {
    pub fn new(router: VendorRouter) -> Self {
        Self { router }
    }

    /// Production wiring: standard registry, default vendor preferences,
    /// platform endpoint resolved from the environment on first use.
    pub fn standard() -> Self {
        Self::new(VendorRouter::new(
            VendorRegistry::standard(PlatformHandle::new()),
            VendorConfig::default(),
        ))
    }

    pub fn router(&self) -> &VendorRouter {
        &self.router
    }

    async fn dispatch(&self, request: DataRequest) -> Result<String> {
        match self.router.route(&request).await {
            Ok(payload) => Ok(payload),
            Err(error @ DataError::PlatformUnavailable(_)) => Err(error),
            Err(error) => Ok(failure_text(&request, &error)),
        }
    }

    /// Historical OHLCV prices, dates in `yyyy-mm-dd`
    pub async fn get_stock_data(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<String> {
        self.dispatch(DataRequest::StockData {
            symbol: symbol.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        })
        .await
    }

    /// Technical indicator values over a look-back window
    pub async fn get_indicators(
        &self,
        symbol: &str,
        indicator: &str,
        curr_date: &str,
        look_back_days: u32,
    ) -> Result<String> {
        self.dispatch(DataRequest::Indicators {
            symbol: symbol.to_string(),
            indicator: indicator.to_string(),
            curr_date: curr_date.to_string(),
            look_back_days,
        })
        .await
    }

    /// Company fundamentals overview
    pub async fn get_fundamentals(&self, ticker: &str) -> Result<String> {
        self.dispatch(DataRequest::Fundamentals {
            ticker: ticker.to_string(),
        })
        .await
    }

    /// Balance sheet statements; `freq` is "annual" or "quarterly"
    pub async fn get_balance_sheet(&self, ticker: &str, freq: &str) -> Result<String> {
        let freq = match Frequency::parse(freq) {
            Ok(freq) => freq,
            Err(error) => {
                return Ok(format!("Error retrieving balance sheet for {ticker}: {error}"));
            }
        };
        self.dispatch(DataRequest::BalanceSheet {
            ticker: ticker.to_string(),
            freq,
        })
        .await
    }

    /// Cash flow statements; `freq` is "annual" or "quarterly"
    pub async fn get_cashflow(&self, ticker: &str, freq: &str) -> Result<String> {
        let freq = match Frequency::parse(freq) {
            Ok(freq) => freq,
            Err(error) => {
                return Ok(format!("Error retrieving cash flow for {ticker}: {error}"));
            }
        };
        self.dispatch(DataRequest::Cashflow {
            ticker: ticker.to_string(),
            freq,
        })
        .await
    }

    /// Income statements; `freq` is "annual" or "quarterly"
    pub async fn get_income_statement(&self, ticker: &str, freq: &str) -> Result<String> {
        let freq = match Frequency::parse(freq) {
            Ok(freq) => freq,
            Err(error) => {
                return Ok(format!(
                    "Error retrieving income statement for {ticker}: {error}"
                ));
            }
        };
        self.dispatch(DataRequest::IncomeStatement {
            ticker: ticker.to_string(),
            freq,
        })
        .await
    }

    /// Insider transaction records
    pub async fn get_insider_transactions(&self, ticker: &str) -> Result<String> {
        self.dispatch(DataRequest::InsiderTransactions {
            ticker: ticker.to_string(),
        })
        .await
    }

    /// Company-specific news over a date range
    pub async fn get_news(&self, ticker: &str, start_date: &str, end_date: &str) -> Result<String> {
        self.dispatch(DataRequest::News {
            ticker: ticker.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        })
        .await
    }

    /// Global market news looking back from `curr_date`
    pub async fn get_global_news(
        &self,
        curr_date: &str,
        look_back_days: u32,
        limit: u32,
    ) -> Result<String> {
        self.dispatch(DataRequest::GlobalNews {
            curr_date: curr_date.to_string(),
            look_back_days,
            limit,
        })
        .await
    }

    /// SEC filings; `filing_type` is "10-K", "10-Q", "8-K", ...
    pub async fn get_sec_filings(
        &self,
        ticker: &str,
        filing_type: &str,
        limit: u32,
    ) -> Result<String> {
        let filing_type = match FilingKind::parse(filing_type) {
            Ok(kind) => kind,
            Err(error) => {
                return Ok(format!("Error retrieving SEC filings for {ticker}: {error}"));
            }
        };
        self.dispatch(DataRequest::SecFilings {
            ticker: ticker.to_string(),
            filing_type,
            limit,
        })
        .await
    }

    /// FRED economic series, optional `yyyy-mm-dd` bounds
    pub async fn get_economic_indicators(
        &self,
        indicator: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<String> {
        self.dispatch(DataRequest::EconomicIndicators {
            series_id: indicator.to_string(),
            start_date: start_date.map(String::from),
            end_date: end_date.map(String::from),
        })
        .await
    }

    /// Snapshot of major indices and key economic indicators
    pub async fn get_market_overview(&self) -> Result<String> {
        self.dispatch(DataRequest::MarketOverview).await
    }
}

/// Render a routing failure as the capability's failure line
fn failure_text(request: &DataRequest, error: &DataError) -> String {
    match request {
        DataRequest::StockData { symbol, .. } => {
            format!("Error fetching stock data for {symbol}: {error}")
        }
        DataRequest::Indicators { symbol, .. } => {
            format!("Error fetching technical indicators for {symbol}: {error}")
        }
        DataRequest::Fundamentals { ticker } => {
            format!("Error retrieving fundamentals for {ticker}: {error}")
        }
        DataRequest::BalanceSheet { ticker, .. } => {
            format!("Error retrieving balance sheet for {ticker}: {error}")
        }
        DataRequest::Cashflow { ticker, .. } => {
            format!("Error retrieving cash flow for {ticker}: {error}")
        }
        DataRequest::IncomeStatement { ticker, .. } => {
            format!("Error retrieving income statement for {ticker}: {error}")
        }
        DataRequest::InsiderTransactions { ticker } => {
            format!("Error retrieving insider transactions for {ticker}: {error}")
        }
        DataRequest::News { ticker, .. } => {
            format!("Error fetching news for {ticker}: {error}")
        }
        DataRequest::GlobalNews { .. } => {
            format!("Error fetching global news: {error}")
        }
        DataRequest::SecFilings { ticker, .. } => {
            format!("Error retrieving SEC filings for {ticker}: {error}")
        }
        DataRequest::EconomicIndicators { series_id, .. } => {
            format!("Error retrieving FRED data for {series_id}: {error}")
        }
        DataRequest::MarketOverview => {
            format!("Error retrieving market overview: {error}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MockObbPlatform, StatementPeriod, Table};
    use crate::vendors::OpenBbVendor;
    use serde_json::json;
    use std::sync::Arc;

    fn interface_with(mock: MockObbPlatform) -> DataInterface {
        let mut registry = VendorRegistry::new();
        registry.register_vendor(Arc::new(OpenBbVendor::new(PlatformHandle::with_platform(
            Arc::new(mock),
        ))));
        DataInterface::new(VendorRouter::new(registry, VendorConfig::default()))
    }

    #[tokio::test]
    async fn test_balance_sheet_end_to_end() {
        let mut mock = MockObbPlatform::new();
        mock.expect_fundamental_balance()
            .withf(|symbol, period, provider, limit| {
                symbol == "AAPL"
                    && *period == StatementPeriod::Quarter
                    && provider == "yfinance"
                    && *limit == 8
            })
            .times(1)
            .returning(|_, _, _, _| {
                Ok(Table::from_records(&[
                    json!({"total_assets": 100_000, "total_liabilities": 50_000}),
                ]))
            });

        let interface = interface_with(mock);
        let result = interface
            .get_balance_sheet("AAPL", "quarterly")
            .await
            .unwrap();
        assert!(result.contains("Balance Sheet"));
        assert!(result.contains("100000"));
    }

    #[tokio::test]
    async fn test_economic_indicators_end_to_end() {
        let mut mock = MockObbPlatform::new();
        mock.expect_fred_series()
            .withf(|series_id, start, end| {
                series_id == "UNRATE"
                    && *start == Some("2024-01-01")
                    && *end == Some("2024-12-31")
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(Table::from_records(&[json!({"date": "2024-06-01", "value": 3.8})]))
            });

        let interface = interface_with(mock);
        let result = interface
            .get_economic_indicators("UNRATE", Some("2024-01-01"), Some("2024-12-31"))
            .await
            .unwrap();
        assert!(result.contains("FRED Economic Data: UNRATE"));
    }

    #[tokio::test]
    async fn test_provider_failure_renders_error_text() {
        let mut mock = MockObbPlatform::new();
        mock.expect_fundamental_balance()
            .returning(|_, _, _, _| Err(DataError::Api("connection refused".to_string())));

        let interface = interface_with(mock);
        let result = interface
            .get_balance_sheet("AAPL", "quarterly")
            .await
            .unwrap();
        assert!(result.starts_with("Error retrieving balance sheet for AAPL:"));
        assert!(result.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_news_failure_renders_error_text() {
        let mut mock = MockObbPlatform::new();
        mock.expect_company_news()
            .returning(|_, _, _, _, _| Err(DataError::Api("timeout".to_string())));

        let interface = interface_with(mock);
        let result = interface
            .get_news("AAPL", "2025-01-01", "2025-01-07")
            .await
            .unwrap();
        assert!(result.starts_with("Error fetching news for AAPL:"));
        assert!(result.contains("timeout"));
    }

    #[tokio::test]
    async fn test_fred_failure_renders_error_text() {
        let mut mock = MockObbPlatform::new();
        mock.expect_fred_series()
            .returning(|_, _, _| Err(DataError::Api("bad key".to_string())));

        let interface = interface_with(mock);
        let result = interface
            .get_economic_indicators("UNRATE", None, None)
            .await
            .unwrap();
        assert!(result.starts_with("Error retrieving FRED data for UNRATE:"));
        assert!(result.contains("bad key"));
    }

    #[tokio::test]
    async fn test_empty_payload_passes_through() {
        let mut mock = MockObbPlatform::new();
        mock.expect_fundamental_balance()
            .returning(|_, _, _, _| Ok(Table::default()));

        let interface = interface_with(mock);
        let result = interface
            .get_balance_sheet("FAKE", "quarterly")
            .await
            .unwrap();
        assert_eq!(result, "No balance sheet data found for symbol 'FAKE'");
    }

    #[tokio::test]
    async fn test_bad_frequency_renders_error_without_routing() {
        let interface = interface_with(MockObbPlatform::new());
        let result = interface.get_balance_sheet("AAPL", "weekly").await.unwrap();
        assert!(result.starts_with("Error retrieving balance sheet for AAPL:"));
        assert!(result.contains("frequency"));
    }

    #[tokio::test]
    async fn test_bad_filing_type_renders_error_without_routing() {
        let interface = interface_with(MockObbPlatform::new());
        let result = interface.get_sec_filings("AAPL", "13-F", 5).await.unwrap();
        assert!(result.starts_with("Error retrieving SEC filings for AAPL:"));
    }

    #[tokio::test]
    async fn test_unrouted_capability_renders_error_text() {
        let interface =
            DataInterface::new(VendorRouter::new(VendorRegistry::new(), VendorConfig::default()));
        let result = interface
            .get_indicators("AAPL", "rsi", "2025-01-15", 30)
            .await
            .unwrap();
        assert!(result.starts_with("Error fetching technical indicators for AAPL:"));
        assert!(result.contains("no vendor registered"));
    }

    #[tokio::test]
    async fn test_platform_unavailable_propagates() {
        let mut registry = VendorRegistry::new();
        registry.register_vendor(Arc::new(OpenBbVendor::new(PlatformHandle::with_base_url(
            "not a url",
        ))));
        let interface = DataInterface::new(VendorRouter::new(registry, VendorConfig::default()));

        let err = interface
            .get_balance_sheet("AAPL", "quarterly")
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::PlatformUnavailable(_)));
    }
}
