//! Tools delegating to the vendor-routed data interface
//!
//! Thin parameter-parsing shims: each tool validates its input against the
//! declared schema, calls the matching [`DataInterface`] method, and hands
//! the returned text back to the model. Provider failures arrive as text
//! from the interface, so these tools only error on malformed parameters.

use crate::tool::{Tool, ToolError, ToolResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tradeflow_data::DataInterface;

fn parse_params<T: serde::de::DeserializeOwned>(params: Value) -> Result<T, ToolError> {
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

/// Historical OHLCV price data
pub struct StockDataTool {
    interface: Arc<DataInterface>,
}

#[derive(Debug, Deserialize)]
struct StockDataParams {
    symbol: String,
    start_date: String,
    end_date: String,
}

impl StockDataTool {
    pub fn new(interface: Arc<DataInterface>) -> Self {
        Self { interface }
    }
}

#[async_trait]
impl Tool for StockDataTool {
    async fn execute(&self, params: Value) -> ToolResult {
        let params: StockDataParams = parse_params(params)?;
        let text = self
            .interface
            .get_stock_data(&params.symbol, &params.start_date, &params.end_date)
            .await?;
        Ok(Value::String(text))
    }

    fn name(&self) -> &str {
        "get_stock_data"
    }

    fn description(&self) -> &str {
        "Fetch historical OHLCV price data for a stock over a date range. \
         Returns CSV with open, high, low, close, and volume per trading day."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                },
                "start_date": {
                    "type": "string",
                    "description": "Start date in yyyy-mm-dd format"
                },
                "end_date": {
                    "type": "string",
                    "description": "End date in yyyy-mm-dd format"
                }
            },
            "required": ["symbol", "start_date", "end_date"]
        })
    }
}

/// Macroeconomic series from FRED
pub struct EconomicIndicatorsTool {
    interface: Arc<DataInterface>,
}

#[derive(Debug, Deserialize)]
struct EconomicIndicatorsParams {
    indicator: String,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

impl EconomicIndicatorsTool {
    pub fn new(interface: Arc<DataInterface>) -> Self {
        Self { interface }
    }
}

#[async_trait]
impl Tool for EconomicIndicatorsTool {
    async fn execute(&self, params: Value) -> ToolResult {
        let params: EconomicIndicatorsParams = parse_params(params)?;
        let text = self
            .interface
            .get_economic_indicators(
                &params.indicator,
                params.start_date.as_deref(),
                params.end_date.as_deref(),
            )
            .await?;
        Ok(Value::String(text))
    }

    fn name(&self) -> &str {
        "get_economic_indicators"
    }

    fn description(&self) -> &str {
        "Retrieve macroeconomic indicator data from FRED. \
         Common series IDs: GDP (Gross Domestic Product), UNRATE (Unemployment Rate), \
         CPIAUCSL (Consumer Price Index), FEDFUNDS (Federal Funds Rate), \
         DGS10 (10-Year Treasury Rate), VIXCLS (VIX Volatility Index). \
         Returns the most recent data points for the series."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "indicator": {
                    "type": "string",
                    "description": "FRED series ID, e.g. GDP, UNRATE, CPIAUCSL, FEDFUNDS, DGS10"
                },
                "start_date": {
                    "type": "string",
                    "description": "Start date yyyy-mm-dd (optional)"
                },
                "end_date": {
                    "type": "string",
                    "description": "End date yyyy-mm-dd (optional)"
                }
            },
            "required": ["indicator"]
        })
    }
}

/// Snapshot of major market indices and key economic indicators
pub struct MarketOverviewTool {
    interface: Arc<DataInterface>,
}

impl MarketOverviewTool {
    pub fn new(interface: Arc<DataInterface>) -> Self {
        Self { interface }
    }
}

#[async_trait]
impl Tool for MarketOverviewTool {
    async fn execute(&self, _params: Value) -> ToolResult {
        Ok(Value::String(self.interface.get_market_overview().await?))
    }

    fn name(&self) -> &str {
        "get_market_overview"
    }

    fn description(&self) -> &str {
        "Get a snapshot of major market indices and key economic indicators: \
         S&P 500, Dow Jones, NASDAQ, VIX, Fed Funds Rate, 10Y Treasury, and \
         Unemployment Rate."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }
}

/// SEC filings for a company
pub struct SecFilingsTool {
    interface: Arc<DataInterface>,
}

#[derive(Debug, Deserialize)]
struct SecFilingsParams {
    ticker: String,
    #[serde(default = "default_filing_type")]
    filing_type: String,
    #[serde(default = "default_filing_limit")]
    limit: u32,
}

fn default_filing_type() -> String {
    "10-K".to_string()
}

fn default_filing_limit() -> u32 {
    5
}

impl SecFilingsTool {
    pub fn new(interface: Arc<DataInterface>) -> Self {
        Self { interface }
    }
}

#[async_trait]
impl Tool for SecFilingsTool {
    async fn execute(&self, params: Value) -> ToolResult {
        let params: SecFilingsParams = parse_params(params)?;
        let text = self
            .interface
            .get_sec_filings(&params.ticker, &params.filing_type, params.limit)
            .await?;
        Ok(Value::String(text))
    }

    fn name(&self) -> &str {
        "get_sec_filings"
    }

    fn description(&self) -> &str {
        "Retrieve SEC filings for a company. Useful for accessing original \
         10-K (annual), 10-Q (quarterly), and 8-K (material events) filings \
         directly from SEC. Returns filing dates and links."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                },
                "filing_type": {
                    "type": "string",
                    "enum": ["10-K", "10-Q", "8-K", "DEF 14A", "S-1"],
                    "description": "Type of SEC filing",
                    "default": "10-K"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum filings to return",
                    "default": 5,
                    "minimum": 1,
                    "maximum": 50
                }
            },
            "required": ["ticker"]
        })
    }
}

/// Register the standard data tools on a registry
pub fn register_data_tools(registry: &crate::ToolRegistry, interface: &Arc<DataInterface>) {
    registry.register(Arc::new(StockDataTool::new(Arc::clone(interface))));
    registry.register(Arc::new(EconomicIndicatorsTool::new(Arc::clone(interface))));
    registry.register(Arc::new(MarketOverviewTool::new(Arc::clone(interface))));
    registry.register(Arc::new(SecFilingsTool::new(Arc::clone(interface))));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolRegistry;
    use tradeflow_data::{
        Capability, DataRequest, Result as DataResult, Vendor, VendorConfig, VendorRegistry,
        VendorRouter,
    };

    /// Vendor that echoes the request it received, for delegation checks
    struct EchoVendor;

    #[async_trait]
    impl Vendor for EchoVendor {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn capabilities(&self) -> &'static [Capability] {
            Capability::ALL
        }

        async fn fetch(&self, request: &DataRequest) -> DataResult<String> {
            Ok(format!("{request:?}"))
        }
    }

    fn echo_interface() -> Arc<DataInterface> {
        let mut registry = VendorRegistry::new();
        registry.register_vendor(Arc::new(EchoVendor));
        Arc::new(DataInterface::new(VendorRouter::new(
            registry,
            VendorConfig::empty(),
        )))
    }

    #[tokio::test]
    async fn test_stock_data_delegates() {
        let tool = StockDataTool::new(echo_interface());
        let result = tool
            .execute(json!({
                "symbol": "AAPL",
                "start_date": "2024-01-01",
                "end_date": "2024-06-30"
            }))
            .await
            .unwrap();

        let text = result.as_str().unwrap();
        assert!(text.contains("StockData"));
        assert!(text.contains("AAPL"));
        assert!(text.contains("2024-06-30"));
    }

    #[tokio::test]
    async fn test_economic_indicators_delegates() {
        let tool = EconomicIndicatorsTool::new(echo_interface());
        let result = tool
            .execute(json!({
                "indicator": "FEDFUNDS",
                "start_date": "2025-01-01",
                "end_date": "2025-06-01"
            }))
            .await
            .unwrap();

        let text = result.as_str().unwrap();
        assert!(text.contains("EconomicIndicators"));
        assert!(text.contains("FEDFUNDS"));
        assert!(text.contains("2025-06-01"));
    }

    #[tokio::test]
    async fn test_market_overview_delegates() {
        let tool = MarketOverviewTool::new(echo_interface());
        let result = tool.execute(json!({})).await.unwrap();
        assert!(result.as_str().unwrap().contains("MarketOverview"));
    }

    #[tokio::test]
    async fn test_sec_filings_applies_defaults() {
        let tool = SecFilingsTool::new(echo_interface());
        let result = tool.execute(json!({"ticker": "AAPL"})).await.unwrap();

        let text = result.as_str().unwrap();
        assert!(text.contains("Form10K"));
        assert!(text.contains("limit: 5"));
    }

    #[tokio::test]
    async fn test_sec_filings_explicit_params() {
        let tool = SecFilingsTool::new(echo_interface());
        let result = tool
            .execute(json!({"ticker": "AAPL", "filing_type": "10-Q", "limit": 3}))
            .await
            .unwrap();

        let text = result.as_str().unwrap();
        assert!(text.contains("Form10Q"));
        assert!(text.contains("limit: 3"));
    }

    #[tokio::test]
    async fn test_missing_required_param_is_invalid() {
        let tool = StockDataTool::new(echo_interface());
        let err = tool.execute(json!({"symbol": "AAPL"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[test]
    fn test_tool_metadata() {
        let interface = echo_interface();
        let tool = EconomicIndicatorsTool::new(Arc::clone(&interface));
        assert_eq!(tool.name(), "get_economic_indicators");
        assert!(tool.description().contains("FRED"));
        assert!(tool.input_schema()["properties"]["indicator"].is_object());

        let tool = SecFilingsTool::new(Arc::clone(&interface));
        assert_eq!(tool.name(), "get_sec_filings");
        assert!(tool.input_schema()["properties"]["filing_type"].is_object());

        let tool = MarketOverviewTool::new(interface);
        assert_eq!(tool.name(), "get_market_overview");
    }

    #[test]
    fn test_register_data_tools() {
        let registry = ToolRegistry::new();
        register_data_tools(&registry, &echo_interface());
        assert_eq!(
            registry.names(),
            [
                "get_economic_indicators",
                "get_market_overview",
                "get_sec_filings",
                "get_stock_data",
            ]
        );
    }
}
