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

//! Structural summary of a graph document.

use crate::document::GraphDocument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Counts and distinct label/type sets of a [`GraphDocument`].
///
/// Map keys are the distinct sets; iteration order is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopologyReport {
    /// Total number of nodes.
    pub node_count: usize,
    /// Total number of edges.
    pub edge_count: usize,
    /// Node count per label.
    pub node_labels: BTreeMap<String, usize>,
    /// Edge count per relationship type.
    pub relationship_types: BTreeMap<String, usize>,
}

impl TopologyReport {
    /// Compute the report in a single pass over the document.
    pub fn from_document(doc: &GraphDocument) -> Self {
        let mut report = Self {
            node_count: doc.node_count(),
            edge_count: doc.edge_count(),
            ..Self::default()
        };
        for node in doc.nodes() {
            *report.node_labels.entry(node.label.clone()).or_insert(0) += 1;
        }
        for edge in doc.edges() {
            *report
                .relationship_types
                .entry(edge.rel_type.clone())
                .or_insert(0) += 1;
        }
        report
    }

    /// Distinct node labels, sorted.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.node_labels.keys().map(String::as_str)
    }

    /// Distinct relationship types, sorted.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.relationship_types.keys().map(String::as_str)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes: {}", self.node_count)?;
        writeln!(f, "Relationships: {}", self.edge_count)?;
        writeln!(f, "Node labels: {}", self.labels().collect::<Vec<_>>().join(", "))?;
        write!(
            f,
            "Relationship types: {}",
            self.types().collect::<Vec<_>>().join(", ")
        )
    }
}
