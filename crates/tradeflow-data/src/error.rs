//! Error types for the market data layer

use crate::capability::Capability;
use thiserror::Error;

/// Result type alias for data-layer operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised by the registry, router, platform client, and vendor adapters
#[derive(Debug, Error)]
pub enum DataError {
    /// Capability name is not declared by any tool category
    #[error("method '{0}' not found in any tool category")]
    CapabilityNotFound(String),

    /// The OpenBB platform endpoint cannot be used at all.
    /// This is the one initialization error that propagates to callers.
    #[error("OpenBB platform unavailable: {0}")]
    PlatformUnavailable(String),

    /// A vendor was asked for a capability it does not implement
    #[error("vendor '{vendor}' does not implement {capability}")]
    Unsupported {
        vendor: String,
        capability: Capability,
    },

    /// No vendor is registered for the capability
    #[error("no vendor registered for {0}")]
    NoVendor(Capability),

    /// Upstream provider failure surfaced at the adapter boundary
    #[error("{vendor}: {message}")]
    Provider { vendor: String, message: String },

    /// Malformed caller input (dates, frequencies, filing kinds, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Remote API returned an unusable response
    #[error("API error: {0}")]
    Api(String),

    /// Network or HTTP error
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
