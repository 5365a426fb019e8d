//! Vendor router
//!
//! Resolves a request's capability to its category, reads the configured
//! vendor preference, and tries candidate vendors in order until one
//! succeeds. Fallback lives here, not in the adapters: adapters return
//! typed errors and the router decides what to do with them.

use crate::capability::DataRequest;
use crate::config::VendorConfig;
use crate::error::{DataError, Result};
use crate::registry::VendorRegistry;
use tracing::{debug, warn};

/// Routes requests to the first vendor that can serve them
pub struct VendorRouter {
    registry: VendorRegistry,
    config: VendorConfig,
}

impl VendorRouter {
    pub fn new(registry: VendorRegistry, config: VendorConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &VendorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    /// Route one request through the candidate chain.
    ///
    /// The configured vendor (capability override first, then category
    /// default) is tried first; every other registered vendor follows in
    /// registration order. On vendor failure the router logs and advances;
    /// if every candidate fails the last error propagates.
    pub async fn route(&self, request: &DataRequest) -> Result<String> {
        let capability = request.capability();
        let preferred = self.config.preferred_for(capability);
        let candidates = self.registry.candidates(capability, preferred);

        if candidates.is_empty() {
            return Err(DataError::NoVendor(capability));
        }

        debug!(
            capability = %capability,
            category = %capability.category(),
            preferred = preferred.unwrap_or("<none>"),
            candidates = candidates.len(),
            "routing request"
        );

        let mut last_error = None;
        for vendor in candidates {
            match vendor.fetch(request).await {
                Ok(payload) => {
                    debug!(vendor = vendor.name(), capability = %capability, "vendor call succeeded");
                    return Ok(payload);
                }
                Err(e) => {
                    warn!(
                        vendor = vendor.name(),
                        capability = %capability,
                        error = %e,
                        "vendor call failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(DataError::NoVendor(capability)))
    }
}
