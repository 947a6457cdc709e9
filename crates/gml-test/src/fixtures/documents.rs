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

//! Canonical GraphML inputs.

use super::builders::GraphmlBuilder;
use gml_core::{Edge, GraphDocument, Node};

/// Two people who know each other and work at the same company.
///
/// Parses to 3 nodes (`Person` x2, `Company`) and 3 relationships
/// (`KNOWS`, `WORKS_AT` x2).
pub fn scenario() -> String {
    GraphmlBuilder::new()
        .key("d0", "node", "label", "string")
        .key("d1", "node", "name", "string")
        .key("d2", "node", "age", "int")
        .key("d3", "edge", "label", "string")
        .key("d4", "edge", "since", "int")
        .node("alice", &[("d0", "Person"), ("d1", "Alice"), ("d2", "36")])
        .node("bob", &[("d0", "Person"), ("d1", "Bob"), ("d2", "41")])
        .node("acme", &[("d0", "Company"), ("d1", "Acme Corp")])
        .edge_with_id("e0", "alice", "bob", &[("d3", "KNOWS"), ("d4", "2015")])
        .edge_with_id("e1", "alice", "acme", &[("d3", "WORKS_AT"), ("d4", "2019")])
        .edge_with_id("e2", "bob", "acme", &[("d3", "WORKS_AT")])
        .build()
}

/// The document [`scenario`] parses to.
pub fn scenario_document() -> GraphDocument {
    GraphDocument::new(
        vec![
            Node::new("alice")
                .with_label("Person")
                .with_property("name", "Alice")
                .with_property("age", 36i64),
            Node::new("bob")
                .with_label("Person")
                .with_property("name", "Bob")
                .with_property("age", 41i64),
            Node::new("acme")
                .with_label("Company")
                .with_property("name", "Acme Corp"),
        ],
        vec![
            Edge::new("e0", "alice", "bob")
                .with_type("KNOWS")
                .with_property("since", 2015i64),
            Edge::new("e1", "alice", "acme")
                .with_type("WORKS_AT")
                .with_property("since", 2019i64),
            Edge::new("e2", "bob", "acme").with_type("WORKS_AT"),
        ],
    )
}

/// Nodes and edges without labels or types.
pub fn unlabeled() -> String {
    GraphmlBuilder::new()
        .key("w", "edge", "weight", "double")
        .node("n0", &[])
        .node("n1", &[])
        .node("n2", &[])
        .edge("n0", "n1", &[("w", "0.5")])
        .edge("n1", "n2", &[])
        .build()
}

/// One key per GraphML value type, including `long` and `float`, declared
/// for `all`.
pub fn typed_values() -> String {
    GraphmlBuilder::new()
        .key("s", "all", "title", "string")
        .key("i", "all", "count", "int")
        .key("l", "all", "big", "long")
        .key("f", "all", "ratio", "float")
        .key("d", "all", "score", "double")
        .key("b", "all", "active", "boolean")
        .node(
            "n0",
            &[
                ("s", "  padded  "),
                ("i", " 42 "),
                ("l", "9000000000"),
                ("f", "0.25"),
                ("d", "-1e3"),
                ("b", "TRUE"),
            ],
        )
        .node("n1", &[("b", "false")])
        .edge_with_id("e0", "n0", "n1", &[("i", "7"), ("b", "True")])
        .build()
}

/// Keys with `<default>` values; `n1` overrides the default.
pub fn with_defaults() -> String {
    GraphmlBuilder::new()
        .key_with_default("color", "node", "color", "string", "grey")
        .key_with_default("rank", "node", "rank", "int", "1")
        .key_with_default("w", "edge", "weight", "double", "1.0")
        .node("n0", &[])
        .node("n1", &[("color", "red")])
        .edge("n0", "n1", &[])
        .build()
}

/// An `int` key carrying non-numeric text on node `n0`.
pub fn type_coercion() -> String {
    GraphmlBuilder::new()
        .key("age", "node", "age", "int")
        .node("n0", &[("age", "old")])
        .build()
}

/// An edge whose target is not a node.
pub fn dangling() -> String {
    GraphmlBuilder::new()
        .node("n0", &[])
        .edge_with_id("e0", "n0", "ghost", &[])
        .build()
}

/// `count` people linked in a `KNOWS` chain.
pub fn people(count: usize) -> String {
    let ids: Vec<String> = (0..count).map(|i| format!("p{}", i)).collect();
    let mut builder = GraphmlBuilder::new()
        .key("label", "node", "label", "string")
        .key("rel", "edge", "label", "string");
    for id in &ids {
        builder = builder.node(id, &[("label", "Person")]);
    }
    for pair in ids.windows(2) {
        builder = builder.edge(&pair[0], &pair[1], &[("rel", "KNOWS")]);
    }
    builder.build()
}
