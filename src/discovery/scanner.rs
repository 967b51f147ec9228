//! Recursive descriptor discovery
//!
//! Walks a directory tree, loads every descriptor file it finds, and applies
//! the inclusion policy to each declared service. Traversal is fail-fast: the
//! first filesystem or parse error aborts the whole scan and no partial result
//! escapes. Skipped services are reported as warnings, never as errors.

use crate::compose::{load_compose_file, ACTIVE_LABEL, ORDER_LABEL};
use crate::config::ScanOptions;
use crate::discovery::policy::{self, Inclusion};
use crate::discovery::record::ServiceRecord;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File names recognized as service descriptors.
///
/// Matching is by exact name rather than `.yml` extension so unrelated YAML
/// files in the tree are never parsed.
pub const DESCRIPTOR_FILE_NAMES: [&str; 2] = ["docker-compose.yml", "docker-compose.yaml"];

/// Errors raised during descriptor discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("scan root does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("scan root is not a directory: {}", path.display())]
    RootNotDirectory { path: PathBuf },

    #[error("failed to canonicalize scan root {}", path.display())]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory traversal failed")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Compose(#[from] crate::compose::ComposeError),
}

/// Discovers services declared in descriptor files under a root directory.
#[derive(Debug)]
pub struct ServiceScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl ServiceScanner {
    /// Creates a scanner for `root` with default options.
    ///
    /// The root must exist and be a directory; it is canonicalized so every
    /// emitted record carries an absolute descriptor path.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, DiscoveryError> {
        let root = root.into();

        if !root.exists() {
            return Err(DiscoveryError::RootNotFound { path: root });
        }
        if !root.is_dir() {
            return Err(DiscoveryError::RootNotDirectory { path: root });
        }

        let root = root
            .canonicalize()
            .map_err(|source| DiscoveryError::Canonicalize {
                path: root.clone(),
                source,
            })?;

        debug!(root = %root.display(), "ServiceScanner initialized");

        Ok(Self {
            root,
            options: ScanOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scans the tree and returns the included services in discovery order.
    ///
    /// Final ordering is the synthesizer's job; records come back in the order
    /// the traversal found them (directories sorted by file name, services
    /// within one descriptor in name order) so repeated scans of an unchanged
    /// tree produce identical sequences.
    pub fn scan(&self) -> Result<Vec<ServiceRecord>, DiscoveryError> {
        let start = Instant::now();
        let force = self.options.force_include;

        info!(
            root = %self.root.display(),
            force,
            "Scanning for service descriptors"
        );

        let mut records = Vec::new();

        self.for_each_service(|descriptor, name, labels| {
            let order = labels.get(ORDER_LABEL).map(String::as_str);
            let active = labels.get(ACTIVE_LABEL).map(String::as_str);

            match policy::evaluate(order, active, force) {
                Inclusion::Include => {
                    debug!(
                        service = name,
                        descriptor = %descriptor.display(),
                        order = order.unwrap_or(""),
                        "Including service"
                    );
                    records.push(ServiceRecord {
                        order: order.unwrap_or_default().to_string(),
                        name: name.to_string(),
                        compose_file: descriptor.to_path_buf(),
                    });
                }
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

        info!(
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Descriptor scan completed"
        );

        Ok(records)
    }

    /// Walks the tree and invokes `visit` for every service declared in a
    /// descriptor file, with its normalized labels.
    ///
    /// Traversal is sorted by file name so discovery order is stable across
    /// runs. Any walk or load error aborts the iteration.
    pub(crate) fn for_each_service<F>(&self, mut visit: F) -> Result<(), DiscoveryError>
    where
        F: FnMut(&Path, &str, &BTreeMap<String, String>),
    {
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;

            if !entry.file_type().is_file() {
                continue;
            }

            let is_descriptor = entry
                .file_name()
                .to_str()
                .is_some_and(|name| DESCRIPTOR_FILE_NAMES.contains(&name));
            if !is_descriptor {
                continue;
            }

            let descriptor = entry.path();
            debug!(descriptor = %descriptor.display(), "Parsing descriptor");
            let doc = load_compose_file(descriptor)?;

            for (name, service) in &doc.services {
                if name.is_empty() {
                    warn!(
                        descriptor = %descriptor.display(),
                        "Descriptor declares a service with an empty name, skipping"
                    );
                    continue;
                }

                let labels = service
                    .as_ref()
                    .map(|entry| entry.normalized_labels())
                    .unwrap_or_default();

                visit(descriptor, name, &labels);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_descriptor(dir: &Path, subdir: &str, content: &str) {
        let target = dir.join(subdir);
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("docker-compose.yml"), content).unwrap();
    }

    fn create_test_tree() -> TempDir {
        let dir = TempDir::new().unwrap();

        write_descriptor(
            dir.path(),
            "web",
            r#"
services:
  web:
    image: nginx:latest
    labels:
      - "dockermi.order=10"
      - "dockermi.active=true"
"#,
        );

        write_descriptor(
            dir.path(),
            "db",
            r#"
services:
  db:
    image: postgres:16
    labels:
      dockermi.order: "05"
      dockermi.active: "true"
  backup:
    labels:
      dockermi.order: "90"
      dockermi.active: "false"
  adhoc:
    image: busybox
"#,
        );

        dir
    }

    #[test]
    fn test_scanner_rejects_missing_root() {
        let err = ServiceScanner::new("/nonexistent/path").unwrap_err();
        assert!(matches!(err, DiscoveryError::RootNotFound { .. }));
    }

    #[test]
    fn test_scanner_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("docker-compose.yml");
        fs::write(&file, "services: {}\n").unwrap();

        let err = ServiceScanner::new(&file).unwrap_err();
        assert!(matches!(err, DiscoveryError::RootNotDirectory { .. }));
    }

    #[test]
    fn test_scan_includes_only_labeled_active_services() {
        let dir = create_test_tree();
        let scanner = ServiceScanner::new(dir.path()).unwrap();

        let records = scanner.scan().unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["db", "web"]);
    }

    #[test]
    fn test_scan_records_carry_descriptor_paths() {
        let dir = create_test_tree();
        let scanner = ServiceScanner::new(dir.path()).unwrap();

        let records = scanner.scan().unwrap();
        for record in &records {
            assert!(record.compose_file.is_absolute());
            assert!(record.compose_file.ends_with(format!(
                "{}/docker-compose.yml",
                record.name
            )));
        }
    }

    #[test]
    fn test_force_resurrects_unlabeled_services() {
        let dir = create_test_tree();
        let scanner = ServiceScanner::new(dir.path()).unwrap().with_options(ScanOptions {
            force_include: true,
            ..ScanOptions::default()
        });

        let records = scanner.scan().unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["adhoc", "backup", "db", "web"]);

        let adhoc = records.iter().find(|r| r.name == "adhoc").unwrap();
        assert!(adhoc.order.is_empty());
    }

    #[test]
    fn test_scan_of_tree_without_descriptors_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/config.yml"), "services:\n  ghost: {}\n").unwrap();

        let scanner = ServiceScanner::new(dir.path()).unwrap();
        let records = scanner.scan().unwrap();

        // config.yml is not an exact descriptor name and must not be parsed.
        assert!(records.is_empty());
    }

    #[test]
    fn test_scan_matches_yaml_extension_variant() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("docker-compose.yaml"),
            "services:\n  web:\n    labels:\n      dockermi.order: \"1\"\n      dockermi.active: \"true\"\n",
        )
        .unwrap();

        let scanner = ServiceScanner::new(dir.path()).unwrap();
        let records = scanner.scan().unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_malformed_descriptor_aborts_scan() {
        let dir = create_test_tree();
        write_descriptor(dir.path(), "broken", "services: [not: closed\n");

        let scanner = ServiceScanner::new(dir.path()).unwrap();
        let err = scanner.scan().unwrap_err();

        assert!(matches!(err, DiscoveryError::Compose(_)));
    }

    #[test]
    fn test_discovery_order_is_stable() {
        let dir = create_test_tree();
        let scanner = ServiceScanner::new(dir.path()).unwrap();

        let first = scanner.scan().unwrap();
        let second = scanner.scan().unwrap();

        assert_eq!(first, second);
    }
}
