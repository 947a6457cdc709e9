// GraphML Migrate - GraphML to Cypher graph migration
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Migration config: what to rename, loaded from JSON or YAML.

use crate::error::{ConfigError, Result};
use gml_core::{is_blank_name, TopologyReport};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

/// Renames for one node label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelMapping {
    /// New label; absent keeps the source label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_label: Option<String>,
    /// Source property name to target property name.
    pub property_mappings: BTreeMap<String, String>,
}

/// Renames for one relationship type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeMapping {
    /// New type; absent keeps the source type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    /// Source property name to target property name.
    pub property_mappings: BTreeMap<String, String>,
}

/// Label, type and property renames applied between parsing and loading.
///
/// Labels and types without an entry pass through unchanged, as do
/// properties without an entry. Unknown top-level fields are ignored.
///
/// ```
/// use gml_mapping::MigrationConfig;
///
/// let config = MigrationConfig::from_json_str(r#"{
///     "node_labels": {
///         "Person": { "target_label": "Employee", "property_mappings": { "name": "full_name" } }
///     },
///     "property_transformations": {}
/// }"#)?;
/// assert_eq!(config.node_labels["Person"].target_label.as_deref(), Some("Employee"));
/// assert!(config.relationship_types.is_empty());
/// # Ok::<(), gml_mapping::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Mappings by source label.
    pub node_labels: BTreeMap<String, LabelMapping>,
    /// Mappings by source relationship type.
    pub relationship_types: BTreeMap<String, TypeMapping>,
}

impl MigrationConfig {
    /// Identity mapping for every label and type in `topology`.
    pub fn template(topology: &TopologyReport) -> Self {
        Self {
            node_labels: topology
                .labels()
                .map(|label| {
                    let mapping = LabelMapping {
                        target_label: Some(label.to_string()),
                        property_mappings: BTreeMap::new(),
                    };
                    (label.to_string(), mapping)
                })
                .collect(),
            relationship_types: topology
                .types()
                .map(|rel_type| {
                    let mapping = TypeMapping {
                        target_type: Some(rel_type.to_string()),
                        property_mappings: BTreeMap::new(),
                    };
                    (rel_type.to_string(), mapping)
                })
                .collect(),
        }
    }

    /// Parse a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ConfigError::Unreadable {
            path: "<json>".into(),
            message: e.to_string(),
        })
    }

    /// Parse a YAML config.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Unreadable {
            path: "<yaml>".into(),
            message: e.to_string(),
        })
    }

    /// Load and validate a config file. `.yaml`/`.yml` files are read as
    /// YAML, everything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |message: String| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message,
        };

        let text = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let config: Self = if is_yaml {
            serde_yaml::from_str(&text).map_err(|e| unreadable(e.to_string()))?
        } else {
            serde_json::from_str(&text).map_err(|e| unreadable(e.to_string()))?
        };

        config.validate()?;
        debug!(
            path = %path.display(),
            labels = config.node_labels.len(),
            types = config.relationship_types.len(),
            "loaded migration config"
        );
        Ok(config)
    }

    /// Reject empty names and renames that collapse two properties into one.
    pub fn validate(&self) -> Result<()> {
        for (label, mapping) in &self.node_labels {
            check_target("node label", label, mapping.target_label.as_deref())?;
            check_properties("node label", label, &mapping.property_mappings)?;
        }
        for (rel_type, mapping) in &self.relationship_types {
            check_target("relationship type", rel_type, mapping.target_type.as_deref())?;
            check_properties("relationship type", rel_type, &mapping.property_mappings)?;
        }
        Ok(())
    }

    /// True if applying this config changes nothing.
    pub fn is_identity(&self) -> bool {
        self.node_labels.iter().all(|(label, m)| {
            m.target_label.as_deref().map_or(true, |t| t == label)
                && m.property_mappings.iter().all(|(from, to)| from == to)
        }) && self.relationship_types.iter().all(|(rel_type, m)| {
            m.target_type.as_deref().map_or(true, |t| t == rel_type)
                && m.property_mappings.iter().all(|(from, to)| from == to)
        })
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let unwritable = |message: String| ConfigError::Unwritable {
            path: path.to_path_buf(),
            message,
        };
        let json = self.to_json_pretty().map_err(|e| unwritable(e.to_string()))?;
        std::fs::write(path, json + "\n").map_err(|e| unwritable(e.to_string()))
    }
}

fn check_target(scope: &'static str, name: &str, target: Option<&str>) -> Result<()> {
    match target {
        Some(t) if is_blank_name(t) => Err(ConfigError::invalid(scope, name, "empty target name")),
        _ => Ok(()),
    }
}

fn check_properties(scope: &'static str, name: &str, mappings: &BTreeMap<String, String>) -> Result<()> {
    let mut sources_by_target: HashMap<&str, &str> = HashMap::new();
    for (from, to) in mappings {
        if is_blank_name(from) || is_blank_name(to) {
            return Err(ConfigError::invalid(scope, name, "empty property name"));
        }
        if let Some(other) = sources_by_target.insert(to.as_str(), from.as_str()) {
            return Err(ConfigError::invalid(
                scope,
                name,
                format!("properties '{}' and '{}' both map to '{}'", other, from, to),
            ));
        }
    }
    Ok(())
}
