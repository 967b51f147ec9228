//! dockermi - orchestration script generation for labeled docker-compose services
//!
//! This library discovers docker-compose files scattered across a directory
//! tree, filters the declared services by their `dockermi.*` labels, and
//! compiles the survivors into an executable shell script that starts them in
//! ascending label order and stops them in the exact reverse.
//!
//! # Core Concepts
//!
//! - **Descriptor**: a `docker-compose.yml`/`.yaml` file declaring services;
//!   only the metadata labels dockermi reads are interpreted
//! - **Inclusion policy**: a service participates when it carries both the
//!   `dockermi.order` and `dockermi.active` labels and is active, unless the
//!   force switch resurrects it
//! - **Grouping key**: the optional `dockermi.key` label buckets services into
//!   independently scripted groups
//! - **Synthesis**: deterministic script generation; regenerating from the
//!   same records is byte-identical
//!
//! # Example Usage
//!
//! ```no_run
//! use dockermi::{ServiceScanner, write_script, DEFAULT_COMPOSE_COMMAND};
//!
//! fn generate(root: &str) -> anyhow::Result<()> {
//!     let scanner = ServiceScanner::new(root)?;
//!     let records = scanner.scan()?;
//!
//!     if !records.is_empty() {
//!         let script = scanner.root().join("dockermi.sh");
//!         write_script(&script, &records, DEFAULT_COMPOSE_COMMAND)?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`compose`]: typed descriptor model and strict loader
//! - [`discovery`]: records, inclusion policy, scanning and grouping
//! - [`script`]: orchestration script synthesis
//! - [`cli`]: command definitions and handlers for the binary

// Public modules
pub mod cli;
pub mod compose;
pub mod config;
pub mod discovery;
pub mod script;
pub mod util;

// Re-export key types for convenient access
pub use compose::{
    load_compose_file, ComposeError, ComposeFile, LabelSpec, ServiceEntry, ACTIVE_LABEL,
    KEY_LABEL, ORDER_LABEL,
};
pub use config::{ConfigError, DockermiConfig, ScanOptions};
pub use discovery::{
    DiscoveryError, Inclusion, OrderKey, ServiceRecord, ServiceScanner, DESCRIPTOR_FILE_NAMES,
};
pub use script::{render_script, write_script, ScriptError, DEFAULT_COMPOSE_COMMAND};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_dockermi() {
        assert_eq!(NAME, "dockermi");
    }
}
