//! Yahoo Finance vendor
//!
//! Native adapters over the `yahoo_finance_api` crate: historical OHLCV,
//! technical indicators computed locally from the price history, and ticker
//! news from the search endpoint. No API key required.

use super::indicators::{INDICATOR_WARMUP_DAYS, compute_indicator, parse_indicator};
use super::{Vendor, retrieval_timestamp};
use crate::capability::{Capability, DataRequest};
use crate::error::{DataError, Result};
use crate::platform::Table;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| DataError::InvalidArgument(format!("invalid date '{value}': {e}")))
}

fn to_offset(date: NaiveDate) -> Result<OffsetDateTime> {
    let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| DataError::InvalidArgument(format!("date '{date}' out of range: {e}")))
}

fn provider_error(message: impl std::fmt::Display) -> DataError {
    DataError::Provider {
        vendor: "yfinance".to_string(),
        message: message.to_string(),
    }
}

/// Vendor backed directly by Yahoo Finance
pub struct YahooVendor {}

impl Default for YahooVendor {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooVendor {
    pub fn new() -> Self {
        Self {}
    }

    async fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<yahoo::Quote>> {
        let connector = yahoo::YahooConnector::new().map_err(provider_error)?;
        // End of the requested day, not its midnight
        let end_exclusive = end + chrono::Duration::days(1);
        let response = connector
            .get_quote_history(symbol, to_offset(start)?, to_offset(end_exclusive)?)
            .await
            .map_err(provider_error)?;
        response.quotes().map_err(provider_error)
    }

    /// Historical OHLCV prices as a commented CSV block
    async fn stock_data(&self, symbol: &str, start_date: &str, end_date: &str) -> Result<String> {
        let symbol_upper = symbol.to_uppercase();
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        let quotes = self.history(&symbol_upper, start, end).await?;

        if quotes.is_empty() {
            return Ok(format!(
                "No data found for symbol '{symbol}' between {start_date} and {end_date}"
            ));
        }

        let mut table = Table::new(
            ["Date", "Open", "High", "Low", "Close", "Volume", "AdjClose"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        for quote in &quotes {
            let date = DateTime::from_timestamp(quote.timestamp as i64, 0)
                .unwrap_or_else(Utc::now)
                .format("%Y-%m-%d")
                .to_string();
            table.push_row(vec![
                date,
                format!("{:.2}", quote.open),
                format!("{:.2}", quote.high),
                format!("{:.2}", quote.low),
                format!("{:.2}", quote.close),
                quote.volume.to_string(),
                format!("{:.2}", quote.adjclose),
            ]);
        }

        let header = format!(
            "# Stock data for {symbol_upper} from {start_date} to {end_date}\n\
             # Total records: {}\n\
             # Source: Yahoo Finance\n\
             # Data retrieved on: {}\n\n",
            table.len(),
            retrieval_timestamp()
        );
        Ok(header + &table.to_csv()?)
    }

    /// Indicator values over the look-back window, computed from closes
    async fn indicators(
        &self,
        symbol: &str,
        indicator: &str,
        curr_date: &str,
        look_back_days: u32,
    ) -> Result<String> {
        let (kind, period) = parse_indicator(indicator)?;
        let symbol_upper = symbol.to_uppercase();
        let current = parse_date(curr_date)?;
        let window_start = current - chrono::Duration::days(i64::from(look_back_days));
        let fetch_start =
            window_start - chrono::Duration::days(i64::from(INDICATOR_WARMUP_DAYS));

        let quotes = self.history(&symbol_upper, fetch_start, current).await?;
        if quotes.is_empty() {
            return Ok(format!(
                "No price data found for symbol '{symbol}' to compute {indicator}"
            ));
        }

        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
        let values = compute_indicator(kind, period, &closes)?;

        let mut lines = Vec::new();
        for (quote, value) in quotes.iter().zip(values.iter()) {
            let date = DateTime::from_timestamp(quote.timestamp as i64, 0)
                .unwrap_or_else(Utc::now)
                .date_naive();
            if date >= window_start {
                lines.push(format!("{date}: {value:.4}"));
            }
        }

        Ok(format!(
            "## {indicator} values for {symbol_upper} from {window_start} to {curr_date}:\n\n{}",
            lines.join("\n")
        ))
    }

    /// Recent ticker news from the search endpoint
    async fn news(&self, ticker: &str, start_date: &str, end_date: &str) -> Result<String> {
        let connector = yahoo::YahooConnector::new().map_err(provider_error)?;
        let ticker_upper = ticker.to_uppercase();
        let search = connector
            .search_ticker(&ticker_upper)
            .await
            .map_err(provider_error)?;

        if search.news.is_empty() {
            return Ok(format!(
                "No news found for {ticker} between {start_date} and {end_date}"
            ));
        }

        let mut sections = String::new();
        for item in search.news.iter().take(20) {
            sections.push_str(&format!(
                "### {} (source: {})\n",
                item.title, item.publisher
            ));
            if !item.link.is_empty() {
                sections.push_str(&format!("Link: {}\n", item.link));
            }
            sections.push('\n');
        }

        Ok(format!(
            "## {ticker} News, from {start_date} to {end_date}:\n\n{sections}"
        ))
    }
}

#[async_trait]
impl Vendor for YahooVendor {
    fn name(&self) -> &'static str {
        "yfinance"
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::StockData, Capability::Indicators, Capability::News]
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
            DataRequest::News {
                ticker,
                start_date,
                end_date,
            } => self.news(ticker, start_date, end_date).await,
            other => Err(DataError::Unsupported {
                vendor: self.name().to_string(),
                capability: other.capability(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-01-01").is_ok());
        assert!(parse_date("01/01/2024").is_err());
    }

    #[tokio::test]
    async fn test_unsupported_capability() {
        let vendor = YahooVendor::new();
        let err = vendor
            .fetch(&DataRequest::MarketOverview)
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn test_invalid_dates_fail_before_network() {
        let vendor = YahooVendor::new();
        let err = vendor
            .fetch(&DataRequest::StockData {
                symbol: "AAPL".to_string(),
                start_date: "January 1st".to_string(),
                end_date: "2024-06-30".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidArgument(_)));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_stock_data_live() {
        let vendor = YahooVendor::new();
        let result = vendor
            .fetch(&DataRequest::StockData {
                symbol: "AAPL".to_string(),
                start_date: "2024-01-02".to_string(),
                end_date: "2024-01-31".to_string(),
            })
            .await
            .unwrap();
        assert!(result.contains("# Stock data for AAPL"));
        assert!(result.contains("Close"));
    }
}
