//! Agent-facing tool layer over the vendor-routed data interface
//!
//! Defines the [`Tool`] trait and [`ToolRegistry`] used to expose data
//! capabilities to LLM agents, plus the standard set of data tools that
//! delegate to [`tradeflow_data::DataInterface`].

pub mod data_tools;
pub mod registry;
pub mod tool;

pub use data_tools::{
    EconomicIndicatorsTool, MarketOverviewTool, SecFilingsTool, StockDataTool,
    register_data_tools,
};
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolError, ToolResult};
