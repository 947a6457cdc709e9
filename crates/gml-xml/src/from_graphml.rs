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

//! GraphML to canonical graph conversion.

use crate::error::{ParseError, Result};
use gml_core::{
    is_blank_name, AttributeKey, Edge, GraphDocument, KeyScope, KeyType, Node, Properties,
    PropertyValue, TopologyReport, DEFAULT_NODE_LABEL, DEFAULT_RELATIONSHIP_TYPE,
};
use roxmltree::{Document as XmlDocument, Node as XmlNode};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Property name that becomes a node label or a relationship type.
pub const LABEL_PROPERTY: &str = "label";

/// Property name that becomes a relationship type when no label is present.
pub const TYPE_PROPERTY: &str = "type";

/// Output of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedGraph {
    /// The canonical graph.
    pub document: GraphDocument,
    /// Topology computed from `document`.
    pub topology: TopologyReport,
}

#[derive(Clone, Copy)]
enum Owner {
    Node,
    Edge,
}

impl Owner {
    fn admits(self, scope: KeyScope) -> bool {
        match self {
            Owner::Node => scope.admits_nodes(),
            Owner::Edge => scope.admits_edges(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Owner::Node => "node",
            Owner::Edge => "edge",
        }
    }
}

/// Read and parse a GraphML file.
pub fn parse_graphml_file(path: impl AsRef<Path>) -> Result<ParsedGraph> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| ParseError::io(path, &e))?;
    parse_graphml(&text)
}

/// Parse a GraphML document.
///
/// Nodes and edges keep document order; nested graphs are flattened into the
/// single output document. Any error aborts the parse and no partial document
/// is returned.
pub fn parse_graphml(text: &str) -> Result<ParsedGraph> {
    let xml = XmlDocument::parse(text).map_err(|e| {
        let pos = e.pos();
        ParseError::malformed(e.to_string()).at(pos.row, pos.col)
    })?;

    let root = xml.root_element();
    if root.tag_name().name() != "graphml" {
        return Err(ParseError::malformed(format!(
            "expected <graphml> root element, found <{}>",
            root.tag_name().name()
        )));
    }
    if !root.descendants().any(|n| is_element(&n, "graph")) {
        return Err(ParseError::malformed("document contains no <graph> element"));
    }

    let keys = collect_keys(&xml, root)?;

    let mut nodes = Vec::new();
    let mut node_ids = HashSet::new();
    for el in root.descendants().filter(|n| is_element(n, "node")) {
        let node = parse_node(&xml, el, &keys)?;
        if !node_ids.insert(node.id.clone()) {
            return Err(with_pos(&xml, el, ParseError::duplicate_id("node", &node.id)));
        }
        nodes.push(node);
    }

    let mut edges = Vec::new();
    let mut edge_ids = HashSet::new();
    for (ordinal, el) in root
        .descendants()
        .filter(|n| is_element(n, "edge"))
        .enumerate()
    {
        let edge = parse_edge(&xml, el, ordinal, &keys)?;
        for (endpoint, node_id) in [("source", &edge.source), ("target", &edge.target)] {
            if !node_ids.contains(node_id.as_str()) {
                return Err(with_pos(
                    &xml,
                    el,
                    ParseError::dangling_reference(&edge.id, endpoint, node_id),
                ));
            }
        }
        if !edge_ids.insert(edge.id.clone()) {
            return Err(with_pos(&xml, el, ParseError::duplicate_id("edge", &edge.id)));
        }
        edges.push(edge);
    }

    let document = GraphDocument::new(nodes, edges);
    let topology = TopologyReport::from_document(&document);
    debug!(
        keys = keys.len(),
        nodes = topology.node_count,
        edges = topology.edge_count,
        "parsed GraphML document"
    );

    Ok(ParsedGraph { document, topology })
}

/// Collect `<key>` declarations.
///
/// A repeated key id replaces the earlier declaration (last wins); the format
/// itself places no uniqueness constraint on key ids.
fn collect_keys(xml: &XmlDocument<'_>, root: XmlNode<'_, '_>) -> Result<BTreeMap<String, AttributeKey>> {
    let mut keys = BTreeMap::new();

    for el in root.children().filter(|n| is_element(n, "key")) {
        let id = el
            .attribute("id")
            .ok_or_else(|| with_pos(xml, el, ParseError::malformed("<key> without id attribute")))?;

        let scope = KeyScope::from_graphml(el.attribute("for")).ok_or_else(|| {
            with_pos(
                xml,
                el,
                ParseError::malformed(format!(
                    "key '{}' has unsupported scope '{}'",
                    id,
                    el.attribute("for").unwrap_or_default()
                )),
            )
        })?;

        let value_type = KeyType::from_graphml(el.attribute("attr.type")).ok_or_else(|| {
            with_pos(
                xml,
                el,
                ParseError::malformed(format!(
                    "key '{}' has unsupported type '{}'",
                    id,
                    el.attribute("attr.type").unwrap_or_default()
                )),
            )
        })?;

        let name = el.attribute("attr.name").unwrap_or(id);
        let mut key = AttributeKey::new(id, scope, name, value_type);

        if let Some(default_el) = el.children().find(|n| is_element(n, "default")) {
            let text = default_el.text().unwrap_or_default();
            let value = value_type.coerce(text).ok_or_else(|| {
                with_pos(
                    xml,
                    default_el,
                    ParseError::type_coercion(id, "<default>", &value_type.to_string(), text),
                )
            })?;
            key = key.with_default(value);
        }

        if keys.insert(id.to_string(), key).is_some() {
            debug!(key = id, "key redeclared, later declaration wins");
        }
    }

    Ok(keys)
}

fn parse_node(
    xml: &XmlDocument<'_>,
    el: XmlNode<'_, '_>,
    keys: &BTreeMap<String, AttributeKey>,
) -> Result<Node> {
    let id = el
        .attribute("id")
        .ok_or_else(|| with_pos(xml, el, ParseError::malformed("<node> without id attribute")))?;

    let mut properties = resolve_data(xml, el, id, Owner::Node, keys)?;
    // Only `label` names a node. A node's `type` is never a fallback label
    // and stays an ordinary property.
    let label = take_label(&mut properties, LABEL_PROPERTY)
        .unwrap_or_else(|| DEFAULT_NODE_LABEL.to_string());

    Ok(Node {
        id: id.to_string(),
        label,
        properties,
    })
}

fn parse_edge(
    xml: &XmlDocument<'_>,
    el: XmlNode<'_, '_>,
    ordinal: usize,
    keys: &BTreeMap<String, AttributeKey>,
) -> Result<Edge> {
    let id = el
        .attribute("id")
        .map(str::to_string)
        .unwrap_or_else(|| format!("e{}", ordinal));

    let source = el.attribute("source").ok_or_else(|| {
        with_pos(xml, el, ParseError::malformed(format!("edge '{}' has no source", id)))
    })?;
    let target = el.attribute("target").ok_or_else(|| {
        with_pos(xml, el, ParseError::malformed(format!("edge '{}' has no target", id)))
    })?;

    let mut properties = resolve_data(xml, el, &id, Owner::Edge, keys)?;
    // `label` wins over `type`; a `type` entry next to a label stays a property.
    let rel_type = take_label(&mut properties, LABEL_PROPERTY)
        .or_else(|| take_label(&mut properties, TYPE_PROPERTY))
        .unwrap_or_else(|| DEFAULT_RELATIONSHIP_TYPE.to_string());

    Ok(Edge {
        id,
        source: source.to_string(),
        target: target.to_string(),
        rel_type,
        properties,
    })
}

/// Resolve the `<data>` children of a node or edge into typed properties,
/// then fill in key defaults for keys the element does not mention.
fn resolve_data(
    xml: &XmlDocument<'_>,
    el: XmlNode<'_, '_>,
    element_id: &str,
    owner: Owner,
    keys: &BTreeMap<String, AttributeKey>,
) -> Result<Properties> {
    let mut properties = Properties::new();
    let mut seen = HashSet::new();

    for data in el.children().filter(|n| is_element(n, "data")) {
        let key_id = data.attribute("key").ok_or_else(|| {
            with_pos(
                xml,
                data,
                ParseError::malformed(format!(
                    "<data> without key attribute on {} '{}'",
                    owner.name(),
                    element_id
                )),
            )
        })?;

        let key = keys
            .get(key_id)
            .filter(|k| owner.admits(k.scope))
            .ok_or_else(|| {
                with_pos(
                    xml,
                    data,
                    ParseError::undeclared_key(key_id, element_id, owner.name()),
                )
            })?;

        let text = data.text().unwrap_or_default();
        let value = key.value_type.coerce(text).ok_or_else(|| {
            with_pos(
                xml,
                data,
                ParseError::type_coercion(key_id, element_id, &key.value_type.to_string(), text),
            )
        })?;

        seen.insert(key_id);
        properties.insert(key.name.clone(), value);
    }

    for key in keys.values() {
        if !owner.admits(key.scope) || seen.contains(key.id.as_str()) {
            continue;
        }
        if let Some(default) = &key.default {
            properties
                .entry(key.name.clone())
                .or_insert_with(|| default.clone());
        }
    }

    Ok(properties)
}

/// Remove a label-like property, ignoring blank values (including ones made
/// only of invisible characters, which would escape to an empty name).
fn take_label(properties: &mut Properties, name: &str) -> Option<String> {
    match properties.remove(name) {
        Some(PropertyValue::String(s)) if is_blank_name(&s) => None,
        Some(value) => Some(value.to_string()),
        None => None,
    }
}

fn is_element(node: &XmlNode<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn with_pos(xml: &XmlDocument<'_>, node: XmlNode<'_, '_>, err: ParseError) -> ParseError {
    let pos = xml.text_pos_at(node.range().start);
    err.at(pos.row, pos.col)
}
