//! Vendor preference configuration
//!
//! Supplied externally (usually deserialized from the host agent's config)
//! and read-only at call time. `data_vendors` picks a preferred vendor per
//! category; `tool_vendors` overrides the preference for a single capability.

use crate::capability::{Capability, Category};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Preferred-vendor configuration consumed by the router
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Category name -> preferred vendor name
    #[serde(default)]
    pub data_vendors: HashMap<String, String>,

    /// Capability name -> preferred vendor name (overrides `data_vendors`)
    #[serde(default)]
    pub tool_vendors: HashMap<String, String>,
}

impl Default for VendorConfig {
    fn default() -> Self {
        let data_vendors = [
            (Category::CoreStockApis, "yfinance"),
            (Category::TechnicalIndicators, "yfinance"),
            (Category::FundamentalData, "yfinance"),
            (Category::NewsData, "yfinance"),
            (Category::MacroData, "openbb"),
            (Category::SecData, "openbb"),
        ]
        .into_iter()
        .map(|(category, vendor)| (category.name().to_string(), vendor.to_string()))
        .collect();

        Self {
            data_vendors,
            tool_vendors: HashMap::new(),
        }
    }
}

impl VendorConfig {
    /// Empty configuration: no preferences, routing falls back to
    /// registration order everywhere.
    pub fn empty() -> Self {
        Self {
            data_vendors: HashMap::new(),
            tool_vendors: HashMap::new(),
        }
    }

    /// Set the preferred vendor for a category
    pub fn with_data_vendor(mut self, category: Category, vendor: impl Into<String>) -> Self {
        self.data_vendors
            .insert(category.name().to_string(), vendor.into());
        self
    }

    /// Set the preferred vendor for a single capability
    pub fn with_tool_vendor(mut self, capability: Capability, vendor: impl Into<String>) -> Self {
        self.tool_vendors
            .insert(capability.name().to_string(), vendor.into());
        self
    }

    /// Preferred vendor for a capability: the per-capability override wins,
    /// then the category default. `None` means registration order decides.
    pub fn preferred_for(&self, capability: Capability) -> Option<&str> {
        self.tool_vendors
            .get(capability.name())
            .or_else(|| self.data_vendors.get(capability.category().name()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VendorConfig::default();
        assert_eq!(
            config.data_vendors.get("core_stock_apis").map(String::as_str),
            Some("yfinance")
        );
        assert_eq!(
            config.data_vendors.get("macro_data").map(String::as_str),
            Some("openbb")
        );
        assert_eq!(
            config.data_vendors.get("sec_data").map(String::as_str),
            Some("openbb")
        );
        assert!(config.tool_vendors.is_empty());
    }

    #[test]
    fn test_category_preference() {
        let config = VendorConfig::default();
        assert_eq!(config.preferred_for(Capability::StockData), Some("yfinance"));
        assert_eq!(
            config.preferred_for(Capability::EconomicIndicators),
            Some("openbb")
        );
    }

    #[test]
    fn test_tool_override_beats_category_default() {
        let config = VendorConfig::default().with_tool_vendor(Capability::StockData, "openbb");
        assert_eq!(config.preferred_for(Capability::StockData), Some("openbb"));
        // Sibling capabilities in the same category are unaffected
        assert_eq!(config.preferred_for(Capability::News), Some("yfinance"));
    }

    #[test]
    fn test_deserialize_nested_mapping() {
        let json = serde_json::json!({
            "data_vendors": { "macro_data": "openbb" },
            "tool_vendors": { "get_stock_data": "yfinance" }
        });
        let config: VendorConfig = serde_json::from_value(json).unwrap();
        assert_eq!(
            config.preferred_for(Capability::MarketOverview),
            Some("openbb")
        );
        assert_eq!(config.preferred_for(Capability::StockData), Some("yfinance"));
        // Unconfigured categories have no preference
        assert_eq!(config.preferred_for(Capability::BalanceSheet), None);
    }
}
