//! Descriptor document model and loader

pub mod document;
pub mod loader;

pub use document::{ComposeFile, LabelSpec, ServiceEntry, ACTIVE_LABEL, KEY_LABEL, ORDER_LABEL};
pub use loader::{load_compose_file, ComposeError};
