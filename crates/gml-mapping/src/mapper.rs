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

//! Apply a [`MigrationConfig`] to a graph document.

use crate::config::MigrationConfig;
use crate::error::{ConfigError, Result};
use gml_core::{Edge, GraphDocument, Node, Properties};
use std::collections::BTreeMap;
use tracing::debug;

/// Produce a remapped copy of `doc`.
///
/// The input is never modified. Labels, types and properties without a
/// mapping are copied as they are. Fails with
/// [`ConfigError::InvalidMapping`] if the config does not validate or if a
/// rename would overwrite another property on the same node or edge.
///
/// ```
/// use gml_core::{GraphDocument, Node};
/// use gml_mapping::{apply_config, MigrationConfig};
///
/// let doc = GraphDocument::new(vec![Node::new("a").with_label("Person").with_property("name", "Ada")], vec![]);
/// let config = MigrationConfig::from_json_str(
///     r#"{"node_labels": {"Person": {"target_label": "Employee", "property_mappings": {"name": "full_name"}}}}"#,
/// )?;
///
/// let mapped = apply_config(&doc, &config)?;
/// assert_eq!(mapped.nodes()[0].label, "Employee");
/// assert!(mapped.nodes()[0].properties.contains_key("full_name"));
/// assert_eq!(doc.nodes()[0].label, "Person");
/// # Ok::<(), gml_mapping::ConfigError>(())
/// ```
pub fn apply_config(doc: &GraphDocument, config: &MigrationConfig) -> Result<GraphDocument> {
    config.validate()?;

    let mut relabeled = 0usize;
    let nodes = doc
        .nodes()
        .iter()
        .map(|node| {
            let Some(mapping) = config.node_labels.get(&node.label) else {
                return Ok(node.clone());
            };
            let label = mapping.target_label.clone().unwrap_or_else(|| node.label.clone());
            if label != node.label {
                relabeled += 1;
            }
            Ok(Node {
                id: node.id.clone(),
                label,
                properties: rename("node", &node.id, &node.properties, &mapping.property_mappings)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut retyped = 0usize;
    let edges = doc
        .edges()
        .iter()
        .map(|edge| {
            let Some(mapping) = config.relationship_types.get(&edge.rel_type) else {
                return Ok(edge.clone());
            };
            let rel_type = mapping.target_type.clone().unwrap_or_else(|| edge.rel_type.clone());
            if rel_type != edge.rel_type {
                retyped += 1;
            }
            Ok(Edge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                rel_type,
                properties: rename("edge", &edge.id, &edge.properties, &mapping.property_mappings)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(relabeled, retyped, "applied migration config");
    Ok(GraphDocument::new(nodes, edges))
}

fn rename(
    scope: &'static str,
    id: &str,
    properties: &Properties,
    mappings: &BTreeMap<String, String>,
) -> Result<Properties> {
    if mappings.is_empty() {
        return Ok(properties.clone());
    }

    let mut renamed = Properties::new();
    for (name, value) in properties {
        let target = mappings.get(name).unwrap_or(name);
        if renamed.insert(target.clone(), value.clone()).is_some() {
            return Err(ConfigError::invalid(
                scope,
                id,
                format!("renaming onto '{}' would overwrite an existing property", target),
            ));
        }
    }
    Ok(renamed)
}
