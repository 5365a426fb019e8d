//! Vendor registry
//!
//! Maps each capability to the ordered list of vendors implementing it.
//! The registry is an explicitly constructed value: build it once at
//! startup and hand it to the router. Tests build alternate registries
//! with stub vendors.

use crate::capability::Capability;
use crate::platform::PlatformHandle;
use crate::vendors::{OpenBbVendor, Vendor, YahooVendor};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Capability -> ordered vendor implementations
#[derive(Default)]
pub struct VendorRegistry {
    methods: HashMap<Capability, Vec<Arc<dyn Vendor>>>,
}

impl std::fmt::Debug for VendorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for capability in Capability::ALL {
            if let Some(vendors) = self.methods.get(capability) {
                map.entry(
                    &capability.name(),
                    &vendors.iter().map(|v| v.name()).collect::<Vec<_>>(),
                );
            }
        }
        map.finish()
    }
}

impl VendorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The production vendor set: Yahoo Finance first for the capabilities
    /// it covers, OpenBB after it and for everything else.
    pub fn standard(platform: PlatformHandle) -> Self {
        let mut registry = Self::new();
        registry.register_vendor(Arc::new(YahooVendor::new()));
        registry.register_vendor(Arc::new(OpenBbVendor::new(platform)));
        registry
    }

    /// Register one vendor for one capability. Registration order defines
    /// the fallback order after the configured vendor.
    pub fn register(&mut self, capability: Capability, vendor: Arc<dyn Vendor>) {
        debug!(vendor = vendor.name(), capability = %capability, "registering vendor");
        self.methods.entry(capability).or_default().push(vendor);
    }

    /// Register a vendor for everything it implements
    pub fn register_vendor(&mut self, vendor: Arc<dyn Vendor>) {
        for capability in vendor.capabilities() {
            self.register(*capability, Arc::clone(&vendor));
        }
    }

    /// Names of the vendors registered for a capability, in order
    pub fn vendors_for(&self, capability: Capability) -> Vec<&'static str> {
        self.methods
            .get(&capability)
            .map(|vendors| vendors.iter().map(|v| v.name()).collect())
            .unwrap_or_default()
    }

    /// Whether exactly one vendor serves the capability
    pub fn is_exclusive(&self, capability: Capability) -> bool {
        self.methods
            .get(&capability)
            .is_some_and(|vendors| vendors.len() == 1)
    }

    /// Ordered candidate list for a capability: the preferred vendor first
    /// when it is registered for this capability, then the remaining
    /// vendors in registration order. A preferred vendor without an
    /// implementation is silently skipped.
    pub fn candidates(
        &self,
        capability: Capability,
        preferred: Option<&str>,
    ) -> Vec<Arc<dyn Vendor>> {
        let Some(registered) = self.methods.get(&capability) else {
            return Vec::new();
        };

        let mut ordered: Vec<Arc<dyn Vendor>> = Vec::with_capacity(registered.len());
        if let Some(name) = preferred {
            if let Some(vendor) = registered.iter().find(|v| v.name() == name) {
                ordered.push(Arc::clone(vendor));
            }
        }
        for vendor in registered {
            if ordered.iter().all(|chosen| chosen.name() != vendor.name()) {
                ordered.push(Arc::clone(vendor));
            }
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::DataRequest;
    use crate::error::{DataError, Result};
    use async_trait::async_trait;

    pub(crate) struct StubVendor {
        pub name: &'static str,
        pub capabilities: &'static [Capability],
    }

    #[async_trait]
    impl Vendor for StubVendor {
        fn name(&self) -> &'static str {
            self.name
        }

        fn capabilities(&self) -> &'static [Capability] {
            self.capabilities
        }

        async fn fetch(&self, _request: &DataRequest) -> Result<String> {
            Ok(format!("payload from {}", self.name))
        }
    }

    fn registry_with(names: &[&'static str]) -> VendorRegistry {
        let mut registry = VendorRegistry::new();
        for name in names {
            registry.register(
                Capability::StockData,
                Arc::new(StubVendor {
                    name,
                    capabilities: &[Capability::StockData],
                }),
            );
        }
        registry
    }

    #[test]
    fn test_candidates_follow_registration_order() {
        let registry = registry_with(&["alpha", "beta", "gamma"]);
        let names: Vec<_> = registry
            .candidates(Capability::StockData, None)
            .iter()
            .map(|v| v.name())
            .collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_preferred_vendor_moves_to_front() {
        let registry = registry_with(&["alpha", "beta", "gamma"]);
        let names: Vec<_> = registry
            .candidates(Capability::StockData, Some("beta"))
            .iter()
            .map(|v| v.name())
            .collect();
        assert_eq!(names, ["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_unknown_preferred_vendor_is_skipped() {
        let registry = registry_with(&["alpha", "beta"]);
        let names: Vec<_> = registry
            .candidates(Capability::StockData, Some("missing"))
            .iter()
            .map(|v| v.name())
            .collect();
        assert_eq!(names, ["alpha", "beta"]);
    }

    #[test]
    fn test_exclusive_capability_has_single_candidate() {
        let registry = registry_with(&["alpha"]);
        assert!(registry.is_exclusive(Capability::StockData));
        assert_eq!(registry.candidates(Capability::StockData, None).len(), 1);
    }

    #[test]
    fn test_unregistered_capability_has_no_candidates() {
        let registry = registry_with(&["alpha"]);
        assert!(registry.candidates(Capability::SecFilings, None).is_empty());
        assert!(registry.vendors_for(Capability::SecFilings).is_empty());
    }

    #[test]
    fn test_register_vendor_covers_all_its_capabilities() {
        let mut registry = VendorRegistry::new();
        registry.register_vendor(Arc::new(StubVendor {
            name: "multi",
            capabilities: &[Capability::News, Capability::GlobalNews],
        }));
        assert_eq!(registry.vendors_for(Capability::News), ["multi"]);
        assert_eq!(registry.vendors_for(Capability::GlobalNews), ["multi"]);
        assert!(registry.vendors_for(Capability::StockData).is_empty());
    }

    #[test]
    fn test_standard_registry_wiring() {
        let registry = VendorRegistry::standard(PlatformHandle::new());

        // Multi-vendor capabilities keep Yahoo first, OpenBB as fallback
        assert_eq!(
            registry.vendors_for(Capability::StockData),
            ["yfinance", "openbb"]
        );
        assert_eq!(
            registry.vendors_for(Capability::Indicators),
            ["yfinance", "openbb"]
        );
        assert_eq!(registry.vendors_for(Capability::News), ["yfinance", "openbb"]);

        // Exclusive capabilities
        assert_eq!(registry.vendors_for(Capability::SecFilings), ["openbb"]);
        assert_eq!(
            registry.vendors_for(Capability::EconomicIndicators),
            ["openbb"]
        );
        assert_eq!(
            registry.vendors_for(Capability::MarketOverview),
            ["openbb"]
        );
        assert!(registry.is_exclusive(Capability::EconomicIndicators));

        // Every capability is served by someone
        for capability in Capability::ALL {
            assert!(
                !registry.vendors_for(*capability).is_empty(),
                "no vendor for {capability}"
            );
        }
    }
}
