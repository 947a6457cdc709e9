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

//! Nodes, edges and the document that owns them.

use crate::value::PropertyValue;
use std::collections::{BTreeMap, HashMap};

/// Label given to nodes that carry no label data.
pub const DEFAULT_NODE_LABEL: &str = "Node";

/// Relationship type given to edges that carry no label/type data.
pub const DEFAULT_RELATIONSHIP_TYPE: &str = "RELATES_TO";

/// Control, zero-width and bidirectional formatting characters. They are
/// dropped from labels and types before they reach a query.
pub fn is_invisible_char(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}'
                | '\u{200C}'
                | '\u{200D}'
                | '\u{FEFF}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2066}'..='\u{2069}'
                | '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
        )
}

/// True if `name` has no visible content: empty, whitespace, or only
/// invisible characters. Such a label or type is replaced by the default.
pub fn is_blank_name(name: &str) -> bool {
    name.chars().all(|c| c.is_whitespace() || is_invisible_char(c))
}

/// Property map shared by nodes and edges.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Document id, unique within a run.
    pub id: String,
    /// Node label.
    pub label: String,
    /// Typed properties.
    pub properties: Properties,
}

impl Node {
    /// Create a node with the default label and no properties.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: DEFAULT_NODE_LABEL.to_string(),
            properties: Properties::new(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// A directed graph edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Document id, unique within a run.
    pub id: String,
    /// Id of the source node.
    pub source: String,
    /// Id of the target node.
    pub target: String,
    /// Relationship type.
    pub rel_type: String,
    /// Typed properties.
    pub properties: Properties,
}

impl Edge {
    /// Create an edge with the default relationship type and no properties.
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            rel_type: DEFAULT_RELATIONSHIP_TYPE.to_string(),
            properties: Properties::new(),
        }
    }

    /// Set the relationship type.
    pub fn with_type(mut self, rel_type: impl Into<String>) -> Self {
        self.rel_type = rel_type.into();
        self
    }

    /// Add a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// The complete set of nodes and edges parsed from one input.
///
/// Order follows the source document and is preserved by every stage so that
/// batching is reproducible. The document is never mutated after construction;
/// remapping produces a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphDocument {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<String, usize>,
}

impl GraphDocument {
    /// Build a document from nodes and edges in document order.
    ///
    /// Referential integrity is the producer's responsibility; see
    /// [`GraphDocument::dangling_edges`].
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        Self {
            nodes,
            edges,
            index,
        }
    }

    /// Nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in document order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Label of the node with the given id.
    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.node(id).map(|n| n.label.as_str())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check whether the document has neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Edges whose source or target is not a node of this document.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| !self.index.contains_key(&e.source) || !self.index.contains_key(&e.target))
            .collect()
    }

    /// Consume the document, returning its nodes and edges.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}
