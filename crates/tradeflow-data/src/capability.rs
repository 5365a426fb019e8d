//! Capability and category model for vendor routing
//!
//! A capability is a named, vendor-agnostic data-retrieval operation with a
//! fixed argument signature. Capabilities are grouped into categories; each
//! category carries one configured default-vendor slot.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vendor-agnostic data-retrieval operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Historical OHLCV price data
    StockData,
    /// Technical indicator values over a look-back window
    Indicators,
    /// Company profile and key metrics overview
    Fundamentals,
    /// Balance sheet statements
    BalanceSheet,
    /// Cash flow statements
    Cashflow,
    /// Income statements
    IncomeStatement,
    /// Insider transaction records
    InsiderTransactions,
    /// Company-specific news
    News,
    /// Global / macro market news
    GlobalNews,
    /// SEC filings (10-K, 10-Q, 8-K, ...)
    SecFilings,
    /// Macroeconomic series (FRED)
    EconomicIndicators,
    /// Snapshot of major indices and key economic indicators
    MarketOverview,
}

impl Capability {
    /// All capabilities, in declaration order
    pub const ALL: &'static [Capability] = &[
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
    ];

    /// Wire-level method name for this capability
    pub fn name(&self) -> &'static str {
        match self {
            Self::StockData => "get_stock_data",
            Self::Indicators => "get_indicators",
            Self::Fundamentals => "get_fundamentals",
            Self::BalanceSheet => "get_balance_sheet",
            Self::Cashflow => "get_cashflow",
            Self::IncomeStatement => "get_income_statement",
            Self::InsiderTransactions => "get_insider_transactions",
            Self::News => "get_news",
            Self::GlobalNews => "get_global_news",
            Self::SecFilings => "get_sec_filings",
            Self::EconomicIndicators => "get_economic_indicators",
            Self::MarketOverview => "get_market_overview",
        }
    }

    /// Parse a wire-level method name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// The category owning this capability.
    ///
    /// Ownership is total: every capability belongs to exactly one category.
    pub fn category(&self) -> Category {
        match self {
            Self::StockData => Category::CoreStockApis,
            Self::Indicators => Category::TechnicalIndicators,
            Self::Fundamentals
            | Self::BalanceSheet
            | Self::Cashflow
            | Self::IncomeStatement
            | Self::InsiderTransactions => Category::FundamentalData,
            Self::News | Self::GlobalNews => Category::NewsData,
            Self::EconomicIndicators | Self::MarketOverview => Category::MacroData,
            Self::SecFilings => Category::SecData,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categories group capabilities sharing one configured default vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    CoreStockApis,
    TechnicalIndicators,
    FundamentalData,
    NewsData,
    MacroData,
    SecData,
}

impl Category {
    /// All categories, in declaration order
    pub const ALL: &'static [Category] = &[
        Category::CoreStockApis,
        Category::TechnicalIndicators,
        Category::FundamentalData,
        Category::NewsData,
        Category::MacroData,
        Category::SecData,
    ];

    /// Configuration key for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::CoreStockApis => "core_stock_apis",
            Self::TechnicalIndicators => "technical_indicators",
            Self::FundamentalData => "fundamental_data",
            Self::NewsData => "news_data",
            Self::MacroData => "macro_data",
            Self::SecData => "sec_data",
        }
    }

    /// Parse a configuration key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Capabilities owned by this category, in declaration order
    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .filter(|c| c.category() == *self)
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up the category owning a wire-level method name.
///
/// Unknown names fail fast; callers must treat that as a programming error.
pub fn category_for_method(name: &str) -> Result<Category> {
    Capability::from_name(name)
        .map(|c| c.category())
        .ok_or_else(|| DataError::CapabilityNotFound(name.to_string()))
}

/// Reporting frequency for financial statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Annual,
    Quarterly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }

    /// Parse a frequency string. "quarter" is accepted as a wire synonym.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "annual" => Ok(Self::Annual),
            "quarterly" | "quarter" => Ok(Self::Quarterly),
            other => Err(DataError::InvalidArgument(format!(
                "frequency must be 'annual' or 'quarterly', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SEC filing kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilingKind {
    /// Annual report
    #[serde(rename = "10-K")]
    Form10K,
    /// Quarterly report
    #[serde(rename = "10-Q")]
    Form10Q,
    /// Current report (material events)
    #[serde(rename = "8-K")]
    Form8K,
    /// Proxy statement
    #[serde(rename = "DEF 14A")]
    DefProxy,
    /// Registration statement
    #[serde(rename = "S-1")]
    FormS1,
}

impl FilingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Form10K => "10-K",
            Self::Form10Q => "10-Q",
            Self::Form8K => "8-K",
            Self::DefProxy => "DEF 14A",
            Self::FormS1 => "S-1",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_uppercase().as_str() {
            "10-K" => Ok(Self::Form10K),
            "10-Q" => Ok(Self::Form10Q),
            "8-K" => Ok(Self::Form8K),
            "DEF 14A" => Ok(Self::DefProxy),
            "S-1" => Ok(Self::FormS1),
            other => Err(DataError::InvalidArgument(format!(
                "unknown SEC filing type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for FilingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A routed data request: one variant per capability, carrying its
/// typed arguments. Dates use `yyyy-mm-dd` strings at this boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRequest {
    StockData {
        symbol: String,
        start_date: String,
        end_date: String,
    },
    Indicators {
        symbol: String,
        indicator: String,
        curr_date: String,
        look_back_days: u32,
    },
    Fundamentals {
        ticker: String,
    },
    BalanceSheet {
        ticker: String,
        freq: Frequency,
    },
    Cashflow {
        ticker: String,
        freq: Frequency,
    },
    IncomeStatement {
        ticker: String,
        freq: Frequency,
    },
    InsiderTransactions {
        ticker: String,
    },
    News {
        ticker: String,
        start_date: String,
        end_date: String,
    },
    GlobalNews {
        curr_date: String,
        look_back_days: u32,
        limit: u32,
    },
    SecFilings {
        ticker: String,
        filing_type: FilingKind,
        limit: u32,
    },
    EconomicIndicators {
        series_id: String,
        start_date: Option<String>,
        end_date: Option<String>,
    },
    MarketOverview,
}

impl DataRequest {
    /// The capability this request targets
    pub fn capability(&self) -> Capability {
        match self {
            Self::StockData { .. } => Capability::StockData,
            Self::Indicators { .. } => Capability::Indicators,
            Self::Fundamentals { .. } => Capability::Fundamentals,
            Self::BalanceSheet { .. } => Capability::BalanceSheet,
            Self::Cashflow { .. } => Capability::Cashflow,
            Self::IncomeStatement { .. } => Capability::IncomeStatement,
            Self::InsiderTransactions { .. } => Capability::InsiderTransactions,
            Self::News { .. } => Capability::News,
            Self::GlobalNews { .. } => Capability::GlobalNews,
            Self::SecFilings { .. } => Capability::SecFilings,
            Self::EconomicIndicators { .. } => Capability::EconomicIndicators,
            Self::MarketOverview => Capability::MarketOverview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for capability in Capability::ALL {
            assert_eq!(Capability::from_name(capability.name()), Some(*capability));
        }
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(
            category_for_method("get_economic_indicators").unwrap(),
            Category::MacroData
        );
        assert_eq!(
            category_for_method("get_market_overview").unwrap(),
            Category::MacroData
        );
        assert_eq!(
            category_for_method("get_sec_filings").unwrap(),
            Category::SecData
        );
        assert_eq!(
            category_for_method("get_balance_sheet").unwrap(),
            Category::FundamentalData
        );
    }

    #[test]
    fn test_unknown_method_errors() {
        let err = category_for_method("nonexistent_method").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_every_capability_has_one_category() {
        let total: usize = Category::ALL.iter().map(|c| c.capabilities().len()).sum();
        assert_eq!(total, Capability::ALL.len());
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Frequency::parse("quarterly").unwrap(), Frequency::Quarterly);
        assert_eq!(Frequency::parse("quarter").unwrap(), Frequency::Quarterly);
        assert_eq!(Frequency::parse("Annual").unwrap(), Frequency::Annual);
        assert!(Frequency::parse("weekly").is_err());
    }

    #[test]
    fn test_filing_kind_parse() {
        assert_eq!(FilingKind::parse("10-k").unwrap(), FilingKind::Form10K);
        assert_eq!(FilingKind::parse("8-K").unwrap(), FilingKind::Form8K);
        assert!(FilingKind::parse("13-F").is_err());
    }

    #[test]
    fn test_request_capability() {
        let request = DataRequest::EconomicIndicators {
            series_id: "UNRATE".to_string(),
            start_date: None,
            end_date: None,
        };
        assert_eq!(request.capability(), Capability::EconomicIndicators);
        assert_eq!(DataRequest::MarketOverview.capability(), Capability::MarketOverview);
    }
}
