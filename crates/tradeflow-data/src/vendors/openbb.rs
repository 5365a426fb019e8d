//! OpenBB Platform vendor
//!
//! One adapter per capability, all going through the [`ObbPlatform`] seam.
//! The platform multiplexes upstream sources, so each call names the
//! provider it wants ("yfinance" for prices/fundamentals/news, "sec" for
//! filings and insider data, "fred" for economic series).

use super::indicators::{INDICATOR_WARMUP_DAYS, compute_indicator, parse_indicator};
use super::{Vendor, retrieval_timestamp};
use crate::capability::{Capability, DataRequest, FilingKind, Frequency};
use crate::error::{DataError, Result};
use crate::platform::{ObbPlatform, PlatformHandle, StatementPeriod};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Profile fields shown in the fundamentals overview
const PROFILE_FIELDS: &[(&str, &str)] = &[
    ("name", "Name"),
    ("sector", "Sector"),
    ("industry", "Industry"),
    ("market_cap", "Market Cap"),
    ("beta", "Beta"),
];

/// Key metric fields appended to the fundamentals overview when available
const METRIC_FIELDS: &[(&str, &str)] = &[
    ("pe_ratio", "PE Ratio (TTM)"),
    ("forward_pe", "Forward PE"),
    ("peg_ratio", "PEG Ratio"),
    ("eps_ttm", "EPS (TTM)"),
    ("dividend_yield", "Dividend Yield"),
    ("return_on_equity", "Return on Equity"),
    ("debt_to_equity", "Debt to Equity"),
    ("current_ratio", "Current Ratio"),
    ("revenue_per_share_ttm", "Revenue Per Share (TTM)"),
    ("price_to_book", "Price to Book"),
];

/// Major indices probed for the market overview
const OVERVIEW_INDICES: &[(&str, &str)] = &[
    ("^GSPC", "S&P 500"),
    ("^DJI", "Dow Jones"),
    ("^IXIC", "NASDAQ"),
    ("^VIX", "VIX"),
];

/// FRED series probed for the market overview
const OVERVIEW_SERIES: &[(&str, &str)] = &[
    ("FEDFUNDS", "Fed Funds Rate"),
    ("DGS10", "10Y Treasury"),
    ("UNRATE", "Unemployment Rate"),
];

/// Financial statement variants served by one shared adapter path
#[derive(Debug, Clone, Copy)]
enum Statement {
    Balance,
    Cash,
    Income,
}

impl Statement {
    fn title(self) -> &'static str {
        match self {
            Self::Balance => "Balance Sheet",
            Self::Cash => "Cash Flow",
            Self::Income => "Income Statement",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Balance => "balance sheet",
            Self::Cash => "cash flow",
            Self::Income => "income statement",
        }
    }
}

/// Vendor backed by the OpenBB Platform
pub struct OpenBbVendor {
    platform: PlatformHandle,
}

impl OpenBbVendor {
    pub fn new(platform: PlatformHandle) -> Self {
        Self { platform }
    }

    fn platform(&self) -> Result<Arc<dyn ObbPlatform>> {
        self.platform.get()
    }

    /// Historical OHLCV prices as a commented CSV block
    async fn stock_data(&self, symbol: &str, start_date: &str, end_date: &str) -> Result<String> {
        let platform = self.platform()?;
        let symbol_upper = symbol.to_uppercase();
        let mut table = platform
            .equity_historical(
                &symbol_upper,
                Some(start_date),
                Some(end_date),
                None,
                "yfinance",
            )
            .await?;

        if table.is_empty() {
            return Ok(format!(
                "No data found for symbol '{symbol}' between {start_date} and {end_date}"
            ));
        }

        // Normalize to the column names the downstream agents expect
        table.rename_columns(&[
            ("open", "Open"),
            ("high", "High"),
            ("low", "Low"),
            ("close", "Close"),
            ("volume", "Volume"),
        ]);
        table.round_columns(&["Open", "High", "Low", "Close"], 2);

        let header = format!(
            "# Stock data for {symbol_upper} from {start_date} to {end_date}\n\
             # Total records: {}\n\
             # Source: OpenBB (yfinance provider)\n\
             # Data retrieved on: {}\n\n",
            table.len(),
            retrieval_timestamp()
        );
        Ok(header + &table.to_csv()?)
    }

    /// Indicator values over the look-back window, computed from the
    /// platform's price history (yfinance provider underneath)
    async fn indicators(
        &self,
        symbol: &str,
        indicator: &str,
        curr_date: &str,
        look_back_days: u32,
    ) -> Result<String> {
        let (kind, period) = parse_indicator(indicator)?;
        let platform = self.platform()?;
        let symbol_upper = symbol.to_uppercase();
        let current = NaiveDate::parse_from_str(curr_date, "%Y-%m-%d").map_err(|e| {
            DataError::InvalidArgument(format!("invalid date '{curr_date}': {e}"))
        })?;
        let window_start = current - chrono::Duration::days(i64::from(look_back_days));
        let fetch_start =
            window_start - chrono::Duration::days(i64::from(INDICATOR_WARMUP_DAYS));

        let table = platform
            .equity_historical(
                &symbol_upper,
                Some(&fetch_start.format("%Y-%m-%d").to_string()),
                Some(curr_date),
                None,
                "yfinance",
            )
            .await?;

        if table.is_empty() {
            return Ok(format!(
                "No price data found for symbol '{symbol}' to compute {indicator}"
            ));
        }

        let mut dates = Vec::with_capacity(table.len());
        let mut closes = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let date = table.get_any(row, &["date", "Date"]);
            let close = table
                .get_any(row, &["close", "Close"])
                .and_then(|cell| cell.parse::<f64>().ok());
            if let (Some(date), Some(close)) = (date, close) {
                dates.push(date.to_string());
                closes.push(close);
            }
        }

        let values = compute_indicator(kind, period, &closes)?;
        let mut lines = Vec::new();
        for (date, value) in dates.iter().zip(values.iter()) {
            // Timestamped dates keep their yyyy-mm-dd prefix
            let day = date.get(..10).unwrap_or(date);
            if NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok_and(|parsed| parsed >= window_start)
            {
                lines.push(format!("{day}: {value:.4}"));
            }
        }

        Ok(format!(
            "## {indicator} values for {symbol_upper} from {window_start} to {curr_date}:\n\n{}",
            lines.join("\n")
        ))
    }

    /// Company profile plus best-effort key metrics as labeled lines
    async fn fundamentals(&self, ticker: &str) -> Result<String> {
        let platform = self.platform()?;
        let ticker_upper = ticker.to_uppercase();
        let profile = platform.equity_profile(&ticker_upper, "yfinance").await?;

        if profile.is_empty() {
            return Ok(format!("No fundamentals data found for symbol '{ticker}'"));
        }

        let mut lines = Vec::new();
        for (column, label) in PROFILE_FIELDS {
            if let Some(value) = profile.get(0, column) {
                if value != "nan" {
                    lines.push(format!("{label}: {value}"));
                }
            }
        }

        // The metrics endpoint is not available for every provider;
        // treat it as optional
        match platform.fundamental_metrics(&ticker_upper, "yfinance").await {
            Ok(metrics) if !metrics.is_empty() => {
                for (column, label) in METRIC_FIELDS {
                    if let Some(value) = metrics.get(0, column) {
                        if value != "nan" {
                            lines.push(format!("{label}: {value}"));
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(ticker = %ticker_upper, error = %e, "metrics endpoint unavailable");
            }
        }

        let header = format!(
            "# Company Fundamentals for {ticker_upper}\n\
             # Source: OpenBB\n\
             # Data retrieved on: {}\n\n",
            retrieval_timestamp()
        );
        Ok(header + &lines.join("\n"))
    }

    /// Financial statements as a commented CSV block
    async fn statement(&self, ticker: &str, freq: Frequency, kind: Statement) -> Result<String> {
        let platform = self.platform()?;
        let ticker_upper = ticker.to_uppercase();
        let period = match freq {
            Frequency::Quarterly => StatementPeriod::Quarter,
            Frequency::Annual => StatementPeriod::Annual,
        };

        let table = match kind {
            Statement::Balance => {
                platform
                    .fundamental_balance(&ticker_upper, period, "yfinance", 8)
                    .await?
            }
            Statement::Cash => {
                platform
                    .fundamental_cash(&ticker_upper, period, "yfinance", 8)
                    .await?
            }
            Statement::Income => {
                platform
                    .fundamental_income(&ticker_upper, period, "yfinance", 8)
                    .await?
            }
        };

        if table.is_empty() {
            return Ok(format!(
                "No {} data found for symbol '{ticker}'",
                kind.noun()
            ));
        }

        let header = format!(
            "# {} data for {ticker_upper} ({freq})\n\
             # Source: OpenBB\n\
             # Data retrieved on: {}\n\n",
            kind.title(),
            retrieval_timestamp()
        );
        Ok(header + &table.to_csv()?)
    }

    /// Insider transactions from SEC data
    async fn insider_transactions(&self, ticker: &str) -> Result<String> {
        let platform = self.platform()?;
        let ticker_upper = ticker.to_uppercase();
        let table = platform.insider_trading(&ticker_upper, "sec", 50).await?;

        if table.is_empty() {
            return Ok(format!(
                "No insider transactions data found for symbol '{ticker}'"
            ));
        }

        let header = format!(
            "# Insider Transactions data for {ticker_upper}\n\
             # Source: OpenBB (SEC)\n\
             # Data retrieved on: {}\n\n",
            retrieval_timestamp()
        );
        Ok(header + &table.to_csv()?)
    }

    /// Company news as `###`-sectioned text
    async fn news(&self, ticker: &str, start_date: &str, end_date: &str) -> Result<String> {
        let platform = self.platform()?;
        let ticker_upper = ticker.to_uppercase();
        let table = platform
            .company_news(&ticker_upper, start_date, end_date, "yfinance", 20)
            .await?;

        if table.is_empty() {
            return Ok(format!(
                "No news found for {ticker} between {start_date} and {end_date}"
            ));
        }

        let mut sections = String::new();
        for row in 0..table.len() {
            let title = table.get(row, "title").unwrap_or("No title");
            let source = table.get_any(row, &["source", "publisher"]).unwrap_or("Unknown");
            sections.push_str(&format!("### {title} (source: {source})\n"));
            if let Some(summary) = table.get_any(row, &["text", "summary"]) {
                // Truncate long summaries
                sections.push_str(&summary.chars().take(500).collect::<String>());
                sections.push('\n');
            }
            if let Some(url) = table.get_any(row, &["url", "link"]) {
                sections.push_str(&format!("Link: {url}\n"));
            }
            sections.push('\n');
        }

        Ok(format!(
            "## {ticker} News, from {start_date} to {end_date}:\n\n{sections}"
        ))
    }

    /// Global market news over a look-back window
    async fn global_news(&self, curr_date: &str, look_back_days: u32, limit: u32) -> Result<String> {
        let platform = self.platform()?;
        let current = NaiveDate::parse_from_str(curr_date, "%Y-%m-%d").map_err(|e| {
            DataError::InvalidArgument(format!("invalid date '{curr_date}': {e}"))
        })?;
        let start_date = (current - chrono::Duration::days(i64::from(look_back_days)))
            .format("%Y-%m-%d")
            .to_string();

        let table = platform
            .world_news(&start_date, curr_date, "yfinance", limit)
            .await?;

        if table.is_empty() {
            return Ok(format!("No global news found for {curr_date}"));
        }

        let mut sections = String::new();
        for row in 0..table.len() {
            let title = table.get(row, "title").unwrap_or("No title");
            let source = table.get_any(row, &["source", "publisher"]).unwrap_or("Unknown");
            sections.push_str(&format!("### {title} (source: {source})\n"));
            if let Some(url) = table.get_any(row, &["url", "link"]) {
                sections.push_str(&format!("Link: {url}\n"));
            }
            sections.push('\n');
        }

        Ok(format!(
            "## Global Market News, from {start_date} to {curr_date}:\n\n{sections}"
        ))
    }

    /// SEC filings as a bulleted list of dates, descriptions, and links
    async fn sec_filings(&self, ticker: &str, filing_type: FilingKind, limit: u32) -> Result<String> {
        let platform = self.platform()?;
        let ticker_upper = ticker.to_uppercase();
        let table = platform
            .filings(&ticker_upper, filing_type.as_str(), "sec", limit)
            .await?;

        if table.is_empty() {
            return Ok(format!("No {filing_type} filings found for {ticker}"));
        }

        let mut lines = Vec::new();
        for row in 0..table.len() {
            let date = table
                .get_any(row, &["filing_date", "date"])
                .unwrap_or("Unknown");
            let description = table
                .get_any(row, &["description", "title"])
                .unwrap_or_else(|| filing_type.as_str());
            lines.push(format!("- [{date}] {description}"));
            if let Some(url) = table.get_any(row, &["link", "url"]) {
                lines.push(format!("  URL: {url}"));
            }
        }

        let header = format!(
            "# SEC {filing_type} Filings for {ticker_upper}\n\
             # Source: OpenBB (SEC)\n\
             # Data retrieved on: {}\n\n",
            retrieval_timestamp()
        );
        Ok(header + &lines.join("\n"))
    }

    /// FRED series observations as a commented CSV block (last 20 points)
    async fn economic_indicators(
        &self,
        series_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<String> {
        let platform = self.platform()?;
        let table = platform.fred_series(series_id, start_date, end_date).await?;

        if table.is_empty() {
            return Ok(format!("No data found for FRED series '{series_id}'"));
        }

        let recent = table.tail(20);
        let header = format!(
            "# FRED Economic Data: {series_id}\n\
             # Source: OpenBB (FRED)\n\
             # Showing last {} data points\n\
             # Data retrieved on: {}\n\n",
            recent.len(),
            retrieval_timestamp()
        );
        Ok(header + &recent.to_csv()?)
    }

    /// Best-effort snapshot of major indices and key economic indicators
    async fn market_overview(&self) -> Result<String> {
        let platform = self.platform()?;
        let mut sections = Vec::new();

        for (symbol, label) in OVERVIEW_INDICES {
            match platform
                .equity_historical(symbol, None, None, Some(5), "yfinance")
                .await
            {
                Ok(table) if !table.is_empty() => {
                    let last = table.len() - 1;
                    if let Some(close) = table.get_any(last, &["close", "Close"]) {
                        sections.push(format!("{label}: {close}"));
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(symbol, error = %e, "index probe failed");
                }
            }
        }

        for (series_id, label) in OVERVIEW_SERIES {
            match platform.fred_series(series_id, None, None).await {
                Ok(table) if !table.is_empty() => {
                    let last = table.len() - 1;
                    let value_column = table
                        .columns()
                        .iter()
                        .find(|column| column.as_str() != "date")
                        .cloned();
                    if let Some(column) = value_column {
                        if let Some(value) = table.get(last, &column) {
                            sections.push(format!("{label}: {value}"));
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(series_id, error = %e, "series probe failed");
                }
            }
        }

        if sections.is_empty() {
            return Ok("Unable to retrieve market overview data".to_string());
        }

        let header = format!(
            "# Market Overview\n\
             # Source: OpenBB\n\
             # Data retrieved on: {}\n\n",
            retrieval_timestamp()
        );
        Ok(header + &sections.join("\n"))
    }
}

#[async_trait]
impl Vendor for OpenBbVendor {
    fn name(&self) -> &'static str {
        "openbb"
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[
            Capability::StockData,
            Capability::Indicators,
            Capability::Fundamentals,
            Capability::BalanceSheet,
            Capability::Cashflow,
            Capability::IncomeStatement,
            Capability::InsiderTransactions,
            Capability::News,
            Capability::GlobalNews,
            Capability::SecFilings,
            Capability::EconomicIndicators,
            Capability::MarketOverview,
        ]
    }

    async fn fetch(&self, request: &DataRequest) -> Result<String> {
        match request {
            DataRequest::StockData {
                symbol,
                start_date,
                end_date,
            } => self.stock_data(symbol, start_date, end_date).await,
            DataRequest::Indicators {
                symbol,
                indicator,
                curr_date,
                look_back_days,
            } => {
                self.indicators(symbol, indicator, curr_date, *look_back_days)
                    .await
            }
            DataRequest::Fundamentals { ticker } => self.fundamentals(ticker).await,
            DataRequest::BalanceSheet { ticker, freq } => {
                self.statement(ticker, *freq, Statement::Balance).await
            }
            DataRequest::Cashflow { ticker, freq } => {
                self.statement(ticker, *freq, Statement::Cash).await
            }
            DataRequest::IncomeStatement { ticker, freq } => {
                self.statement(ticker, *freq, Statement::Income).await
            }
            DataRequest::InsiderTransactions { ticker } => {
                self.insider_transactions(ticker).await
            }
            DataRequest::News {
                ticker,
                start_date,
                end_date,
            } => self.news(ticker, start_date, end_date).await,
            DataRequest::GlobalNews {
                curr_date,
                look_back_days,
                limit,
            } => self.global_news(curr_date, *look_back_days, *limit).await,
            DataRequest::SecFilings {
                ticker,
                filing_type,
                limit,
            } => self.sec_filings(ticker, *filing_type, *limit).await,
            DataRequest::EconomicIndicators {
                series_id,
                start_date,
                end_date,
            } => {
                self.economic_indicators(series_id, start_date.as_deref(), end_date.as_deref())
                    .await
            }
            DataRequest::MarketOverview => self.market_overview().await,
        }
    }
}
