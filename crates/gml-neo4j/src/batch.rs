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

//! Batch planning and statement building.
//!
//! Nodes are keyed by label and edges by `(type, source label, target
//! label)` so that every statement names its labels and type literally and
//! carries nothing but data in `$rows`. A batch holds a run of consecutive
//! same-key entities of at most `batch_size` rows, so batches are submitted
//! in document order. Batch indices run across runs within a phase.

use crate::cypher::{
    escape_identifier, escape_label, escape_relationship_type, CypherStatement, CypherValue,
    ROWS_PARAM,
};
use gml_core::{Edge, GraphDocument, Node, DEFAULT_NODE_LABEL};
use std::collections::{BTreeMap, HashSet};

/// A chunk of same-label nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBatch<'a> {
    /// Zero-based index within the node phase.
    pub index: usize,
    /// Shared label.
    pub label: &'a str,
    /// Nodes in document order.
    pub nodes: Vec<&'a Node>,
}

/// A chunk of edges sharing type and endpoint labels.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeBatch<'a> {
    /// Zero-based index within the edge phase.
    pub index: usize,
    /// Shared relationship type.
    pub rel_type: &'a str,
    /// Label of every source node.
    pub source_label: &'a str,
    /// Label of every target node.
    pub target_label: &'a str,
    /// Edges in document order.
    pub edges: Vec<&'a Edge>,
}

/// Split `items` into maximal runs of consecutive equal keys.
fn runs_in_order<K, T>(items: impl IntoIterator<Item = (K, T)>) -> Vec<(K, Vec<T>)>
where
    K: Eq + Copy,
{
    let mut runs: Vec<(K, Vec<T>)> = Vec::new();
    for (key, item) in items {
        if let Some((last, run)) = runs.last_mut() {
            if *last == key {
                run.push(item);
                continue;
            }
        }
        runs.push((key, vec![item]));
    }
    runs
}

/// Distinct node labels in order of first appearance.
pub fn distinct_labels(doc: &GraphDocument) -> Vec<&str> {
    let mut seen = HashSet::new();
    doc.nodes()
        .iter()
        .map(|n| n.label.as_str())
        .filter(|label| seen.insert(*label))
        .collect()
}

/// Plan the node phase.
pub fn plan_node_batches(doc: &GraphDocument, batch_size: usize) -> Vec<NodeBatch<'_>> {
    let size = batch_size.max(1);
    let mut batches = Vec::new();
    for (label, nodes) in runs_in_order(doc.nodes().iter().map(|n| (n.label.as_str(), n))) {
        for chunk in nodes.chunks(size) {
            batches.push(NodeBatch {
                index: batches.len(),
                label,
                nodes: chunk.to_vec(),
            });
        }
    }
    batches
}

/// Plan the edge phase.
///
/// Endpoint labels are looked up in `doc`; an endpoint missing from the
/// document falls back to the default label, which the loader rules out
/// before planning.
pub fn plan_edge_batches(doc: &GraphDocument, batch_size: usize) -> Vec<EdgeBatch<'_>> {
    let size = batch_size.max(1);
    let keyed = doc.edges().iter().map(|e| {
        let source = doc.label_of(&e.source).unwrap_or(DEFAULT_NODE_LABEL);
        let target = doc.label_of(&e.target).unwrap_or(DEFAULT_NODE_LABEL);
        ((e.rel_type.as_str(), source, target), e)
    });

    let mut batches = Vec::new();
    for ((rel_type, source_label, target_label), edges) in runs_in_order(keyed) {
        for chunk in edges.chunks(size) {
            batches.push(EdgeBatch {
                index: batches.len(),
                rel_type,
                source_label,
                target_label,
                edges: chunk.to_vec(),
            });
        }
    }
    batches
}

/// `CREATE INDEX ... IF NOT EXISTS` on `label.id_property`.
pub fn index_statement(label: &str, id_property: &str) -> CypherStatement {
    // Index names keep the label case; lowercasing would merge `Person` and `person`.
    let name = escape_identifier(&format!("{}_{}", label, id_property.trim_matches('_')));
    CypherStatement::index(format!(
        "CREATE INDEX {} IF NOT EXISTS FOR (n{}) ON (n.{})",
        name,
        escape_label(label),
        escape_identifier(id_property)
    ))
    .with_comment(format!("id index for {}", label))
}

impl NodeBatch<'_> {
    /// Idempotent upsert for this batch.
    pub fn statement(&self, id_property: &str) -> CypherStatement {
        let rows: Vec<CypherValue> = self
            .nodes
            .iter()
            .map(|node| {
                let mut row = BTreeMap::new();
                row.insert("id".to_string(), CypherValue::from(node.id.as_str()));
                row.insert("properties".to_string(), CypherValue::from(&node.properties));
                CypherValue::Map(row)
            })
            .collect();

        CypherStatement::upsert_nodes(format!(
            "UNWIND ${rows} AS row\nMERGE (n{label} {{{id}: row.id}})\nSET n += row.properties",
            rows = ROWS_PARAM,
            label = escape_label(self.label),
            id = escape_identifier(id_property),
        ))
        .with_param(ROWS_PARAM, rows)
        .with_comment(format!(
            "{} nodes, batch {} ({} rows)",
            self.label,
            self.index,
            self.nodes.len()
        ))
    }
}

impl EdgeBatch<'_> {
    /// Idempotent upsert for this batch.
    pub fn statement(&self, id_property: &str) -> CypherStatement {
        let rows: Vec<CypherValue> = self
            .edges
            .iter()
            .map(|edge| {
                let mut row = BTreeMap::new();
                row.insert("id".to_string(), CypherValue::from(edge.id.as_str()));
                row.insert("source".to_string(), CypherValue::from(edge.source.as_str()));
                row.insert("target".to_string(), CypherValue::from(edge.target.as_str()));
                row.insert("properties".to_string(), CypherValue::from(&edge.properties));
                CypherValue::Map(row)
            })
            .collect();

        let id = escape_identifier(id_property);
        CypherStatement::upsert_relationships(format!(
            "UNWIND ${rows} AS row\n\
             MATCH (s{source} {{{id}: row.source}})\n\
             MATCH (t{target} {{{id}: row.target}})\n\
             MERGE (s)-[r{rel} {{{id}: row.id}}]->(t)\n\
             SET r += row.properties",
            rows = ROWS_PARAM,
            source = escape_label(self.source_label),
            target = escape_label(self.target_label),
            rel = escape_relationship_type(self.rel_type),
            id = id,
        ))
        .with_param(ROWS_PARAM, rows)
        .with_comment(format!(
            "{} relationships ({} -> {}), batch {} ({} rows)",
            self.rel_type,
            self.source_label,
            self.target_label,
            self.index,
            self.edges.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> GraphDocument {
        GraphDocument::new(
            vec![
                Node::new("a").with_label("Person"),
                Node::new("c").with_label("Company"),
                Node::new("b").with_label("Person").with_property("age", 41i64),
            ],
            vec![
                Edge::new("e0", "a", "c").with_type("WORKS_AT"),
                Edge::new("e1", "a", "b").with_type("KNOWS"),
                Edge::new("e2", "b", "c").with_type("WORKS_AT"),
            ],
        )
    }

    fn ids<'a>(batch: &NodeBatch<'a>) -> Vec<&'a str> {
        batch.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_batches_follow_document_order() {
        let doc = doc();
        let batches = plan_node_batches(&doc, 10);
        assert_eq!(
            batches.iter().map(|b| (b.label, ids(b))).collect::<Vec<_>>(),
            vec![
                ("Person", vec!["a"]),
                ("Company", vec!["c"]),
                ("Person", vec!["b"]),
            ]
        );
        assert_eq!(distinct_labels(&doc), vec!["Person", "Company"]);
    }

    #[test]
    fn test_consecutive_same_label_nodes_share_a_batch() {
        let doc = GraphDocument::new(
            vec![
                Node::new("a").with_label("Person"),
                Node::new("b").with_label("Person"),
                Node::new("c").with_label("Person"),
                Node::new("x").with_label("Company"),
            ],
            vec![],
        );
        let batches = plan_node_batches(&doc, 2);
        assert_eq!(
            batches.iter().map(|b| (b.index, b.label, ids(b))).collect::<Vec<_>>(),
            vec![
                (0, "Person", vec!["a", "b"]),
                (1, "Person", vec!["c"]),
                (2, "Company", vec!["x"]),
            ]
        );
    }

    #[test]
    fn test_zero_batch_size_does_not_panic() {
        let doc = GraphDocument::new(vec![Node::new("a"), Node::new("b")], vec![]);
        assert_eq!(plan_node_batches(&doc, 0).len(), 2);
    }

    #[test]
    fn test_edge_batches_key_on_type_and_endpoint_labels() {
        let doc = doc();
        let batches = plan_edge_batches(&doc, 500);
        assert_eq!(
            batches
                .iter()
                .map(|b| (b.index, b.rel_type, b.source_label, b.target_label, b.edges.len()))
                .collect::<Vec<_>>(),
            vec![
                (0, "WORKS_AT", "Person", "Company", 1),
                (1, "KNOWS", "Person", "Person", 1),
                (2, "WORKS_AT", "Person", "Company", 1),
            ]
        );
    }

    #[test]
    fn test_node_statement_shape() {
        let doc = doc();
        let stmt = plan_node_batches(&doc, 500)[2].statement("_graphml_id");
        assert_eq!(
            stmt.query,
            "UNWIND $rows AS row\nMERGE (n:Person {_graphml_id: row.id})\nSET n += row.properties"
        );
        let rows = stmt.rows();
        assert_eq!(rows.len(), 1);
        let row = rows[0].as_map().unwrap();
        assert_eq!(row["id"], CypherValue::from("b"));
        assert_eq!(row["properties"].as_map().unwrap()["age"], CypherValue::Int(41));
    }

    #[test]
    fn test_edge_statement_matches_endpoints_by_label() {
        let doc = doc();
        let stmt = plan_edge_batches(&doc, 500)[0].statement("_graphml_id");
        assert!(stmt.query.contains("MATCH (s:Person {_graphml_id: row.source})"));
        assert!(stmt.query.contains("MATCH (t:Company {_graphml_id: row.target})"));
        assert!(stmt.query.contains("MERGE (s)-[r:WORKS_AT {_graphml_id: row.id}]->(t)"));
        assert_eq!(stmt.rows().len(), 1);
    }

    #[test]
    fn test_hostile_label_stays_quoted() {
        let doc = GraphDocument::new(vec![Node::new("x").with_label("A`) DETACH DELETE (m")], vec![]);
        let stmt = plan_node_batches(&doc, 10)[0].statement("_graphml_id");
        assert!(stmt.query.contains("(n:`A``) DETACH DELETE (m` {"));
    }

    #[test]
    fn test_values_are_parameters_not_text() {
        let doc = GraphDocument::new(
            vec![Node::new("x").with_property("bio", "'}) DELETE n //")],
            vec![],
        );
        let stmt = plan_node_batches(&doc, 10)[0].statement("_graphml_id");
        assert!(!stmt.query.contains("DELETE"));
    }

    #[test]
    fn test_index_statement() {
        let stmt = index_statement("Person", "_graphml_id");
        assert_eq!(
            stmt.query,
            "CREATE INDEX Person_graphml_id IF NOT EXISTS FOR (n:Person) ON (n._graphml_id)"
        );
    }

    #[test]
    fn test_index_names_differ_by_label_case() {
        let upper = index_statement("Person", "_graphml_id");
        let lower = index_statement("person", "_graphml_id");
        assert_ne!(upper.query, lower.query);
        assert!(lower.query.starts_with("CREATE INDEX person_graphml_id "));
    }

    #[test]
    fn test_index_name_quotes_unusual_labels() {
        let stmt = index_statement("Legal Entity", "_graphml_id");
        assert!(stmt
            .query
            .starts_with("CREATE INDEX `Legal Entity_graphml_id` IF NOT EXISTS"));
    }
}
