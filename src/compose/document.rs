//! Typed model of a docker-compose descriptor
//!
//! Only the parts of the compose format that dockermi reads are modeled: the
//! top-level `services` mapping, and per service the `image`, `ports`, and
//! `labels` entries. Everything else in the document is ignored. Labels come in
//! two representations in the wild (a sequence of `"key=value"` strings or a
//! direct mapping) and both normalize to the same key/value map.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Label selecting the start priority of a service (stop order is the reverse).
pub const ORDER_LABEL: &str = "dockermi.order";

/// Label gating whether a service participates in script generation.
pub const ACTIVE_LABEL: &str = "dockermi.active";

/// Label bucketing services into independently scripted groups.
pub const KEY_LABEL: &str = "dockermi.key";

/// A parsed docker-compose document, reduced to the fields dockermi reads.
///
/// A document without a `services` section deserializes to an empty map; that
/// is not an error, it simply contributes no services.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposeFile {
    /// Service name to definition. A service declared with an empty body
    /// (`web:` with nothing under it) is `None`.
    #[serde(default)]
    pub services: BTreeMap<String, Option<ServiceEntry>>,
}

/// One service block inside a descriptor. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceEntry {
    /// Container image, carried for fidelity with the descriptor contract.
    pub image: Option<String>,

    /// Port declarations as written. Compose allows strings, bare numbers and
    /// long-syntax mappings here; dockermi carries them but does not use them.
    pub ports: Vec<serde_yaml::Value>,

    /// Raw label section in either representation, if present.
    pub labels: Option<LabelSpec>,
}

impl ServiceEntry {
    /// Normalized key/value view of this service's labels.
    pub fn normalized_labels(&self) -> BTreeMap<String, String> {
        self.labels
            .as_ref()
            .map(LabelSpec::normalize)
            .unwrap_or_default()
    }

    /// Scalar port declarations rendered as strings, preserving order.
    pub fn port_strings(&self) -> Vec<String> {
        self.ports.iter().filter_map(scalar_to_string).collect()
    }
}

/// The two label representations compose accepts.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelSpec {
    /// `- "key=value"` list form.
    Sequence(Vec<String>),
    /// `key: value` mapping form.
    Mapping(BTreeMap<String, serde_yaml::Value>),
}

impl LabelSpec {
    /// Normalizes either representation to a key/value map.
    ///
    /// Sequence entries split on the first `=` only, with surrounding
    /// whitespace trimmed from both sides; entries without a `=` are dropped.
    /// Mapping values keep their string form (`true` and `1` render as "true"
    /// and "1"); non-scalar values are dropped. Duplicate keys are
    /// last-write-wins.
    pub fn normalize(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        match self {
            LabelSpec::Sequence(entries) => {
                for entry in entries {
                    if let Some((key, value)) = entry.split_once('=') {
                        labels.insert(key.trim().to_string(), value.trim().to_string());
                    }
                }
            }
            LabelSpec::Mapping(entries) => {
                for (key, value) in entries {
                    if let Some(value) = scalar_to_string(value) {
                        labels.insert(key.clone(), value);
                    }
                }
            }
        }
        labels
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
