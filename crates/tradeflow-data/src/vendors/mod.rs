//! Vendor adapters
//!
//! A vendor is a named backend implementing some subset of the capability
//! set. Adapters normalize each backend's results into the text formats the
//! downstream agents consume: commented CSV blocks for tabular data,
//! `###`-sectioned text for narrative data.

mod indicators;
pub mod openbb;
pub mod yahoo;

pub use openbb::OpenBbVendor;
pub use yahoo::YahooVendor;

use crate::capability::{Capability, DataRequest};
use crate::error::Result;
use async_trait::async_trait;

/// A data-provider backend.
///
/// `fetch` returns the rendered payload on success. Empty result sets are
/// success (the payload is the capability's "No ... found" message);
/// upstream failures are typed errors so the router can fall back.
#[async_trait]
pub trait Vendor: Send + Sync {
    /// Registry name of this vendor
    fn name(&self) -> &'static str;

    /// Capabilities this vendor implements, in registration order
    fn capabilities(&self) -> &'static [Capability];

    /// Serve one request
    async fn fetch(&self, request: &DataRequest) -> Result<String>;
}

/// Retrieval timestamp used in CSV header comments
pub(crate) fn retrieval_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
