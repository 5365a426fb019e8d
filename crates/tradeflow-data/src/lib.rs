//! Vendor-routing market data layer for trading agents
//!
//! This crate maps abstract data-retrieval capabilities (prices,
//! fundamentals, financial statements, news, macro series, SEC filings)
//! to named vendor backends and routes each request through an ordered
//! fallback chain:
//!
//! - [`VendorRegistry`]: capability -> ordered vendor implementations,
//!   built explicitly at startup
//! - [`VendorRouter`]: category lookup, configured-vendor preference,
//!   try-in-order fallback
//! - Vendors: [`YahooVendor`] (native Yahoo Finance) and [`OpenBbVendor`]
//!   (OpenBB Platform, lazily initialized through [`PlatformHandle`])
//! - [`DataInterface`]: the string-in, string-out surface agents consume
//!
//! # Example
//!
//! ```rust,ignore
//! use tradeflow_data::DataInterface;
//!
//! #[tokio::main]
//! async fn main() {
//!     let interface = DataInterface::standard();
//!     let report = interface.get_balance_sheet("AAPL", "quarterly").await;
//!     println!("{report}");
//! }
//! ```

pub mod capability;
pub mod config;
pub mod error;
pub mod interface;
pub mod platform;
pub mod registry;
pub mod router;
pub mod vendors;

// Re-export main types for convenience
pub use capability::{
    Capability, Category, DataRequest, FilingKind, Frequency, category_for_method,
};
pub use config::VendorConfig;
pub use error::{DataError, Result};
pub use interface::DataInterface;
pub use platform::{Credentials, ObbPlatform, OpenBbClient, PlatformHandle, Table};
pub use registry::VendorRegistry;
pub use router::VendorRouter;
pub use vendors::{OpenBbVendor, Vendor, YahooVendor};
