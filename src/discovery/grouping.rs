//! Keyed accumulation of discovered services
//!
//! The grouped scan buckets included services by their `dockermi.key` label
//! instead of producing one flat sequence. A service without a key is excluded
//! even when its order/active labels pass, unless a default key is configured
//! to backfill it.

use crate::compose::{ACTIVE_LABEL, KEY_LABEL, ORDER_LABEL};
use crate::discovery::policy::{self, Inclusion};
use crate::discovery::record::ServiceRecord;
use crate::discovery::scanner::{DiscoveryError, ServiceScanner};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

impl ServiceScanner {
    /// Scans the tree and buckets included services by grouping key.
    ///
    /// Within each group records keep discovery order; sorting happens when a
    /// group's script is synthesized. The inclusion criteria are the flat
    /// scan's, plus a non-empty resolved grouping key.
    pub fn scan_grouped(&self) -> Result<BTreeMap<String, Vec<ServiceRecord>>, DiscoveryError> {
        let force = self.options().force_include;
        let default_key = self.options().default_group_key.clone();

        info!(
            root = %self.root().display(),
            default_key = default_key.as_deref().unwrap_or(""),
            "Scanning for service descriptors by grouping key"
        );

        let mut groups: BTreeMap<String, Vec<ServiceRecord>> = BTreeMap::new();

        self.for_each_service(|descriptor, name, labels| {
            let order = labels.get(ORDER_LABEL).map(String::as_str);
            let active = labels.get(ACTIVE_LABEL).map(String::as_str);
            let key = labels
                .get(KEY_LABEL)
                .map(String::as_str)
                .filter(|key| !key.is_empty())
                .or(default_key.as_deref());

            match policy::evaluate(order, active, force) {
                Inclusion::Include => match key {
                    Some(key) => {
                        debug!(
                            service = name,
                            key,
                            descriptor = %descriptor.display(),
                            "Grouping service"
                        );
                        groups.entry(key.to_string()).or_default().push(ServiceRecord {
                            order: order.unwrap_or_default().to_string(),
                            name: name.to_string(),
                            compose_file: descriptor.to_path_buf(),
                        });
                    }
                    None => warn!(
                        service = name,
                        descriptor = %descriptor.display(),
                        "Service has no 'dockermi.key' label and no default key is configured, skipping"
                    ),
                },
                Inclusion::SkipInactive => warn!(
                    service = name,
                    descriptor = %descriptor.display(),
                    "Service is inactive (dockermi.active is not \"true\"), skipping"
                ),
                Inclusion::SkipMissingLabels => warn!(
                    service = name,
                    descriptor = %descriptor.display(),
                    "Service is missing 'dockermi.order' or 'dockermi.active' labels, skipping"
                ),
            }
        })?;

        info!(groups = groups.len(), "Grouped descriptor scan completed");

        Ok(groups)
    }
}
