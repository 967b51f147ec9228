//! Service discovery: records, inclusion policy, scanning and grouping

pub mod grouping;
pub mod policy;
pub mod record;
pub mod scanner;

pub use policy::{evaluate, Inclusion};
pub use record::{OrderKey, ServiceRecord};
pub use scanner::{DiscoveryError, ServiceScanner, DESCRIPTOR_FILE_NAMES};
