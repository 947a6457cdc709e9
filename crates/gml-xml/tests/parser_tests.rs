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

//! Integration tests for GraphML parsing.

use gml_core::{PropertyValue, DEFAULT_NODE_LABEL, DEFAULT_RELATIONSHIP_TYPE};
use gml_test::fixtures::{self, builders::GraphmlBuilder, errors};
use gml_xml::{parse_graphml, parse_graphml_file, ParseErrorKind};
use proptest::prelude::*;
use std::io::Write;

#[test]
fn test_scenario_parses_to_expected_document() {
    let parsed = parse_graphml(&fixtures::scenario()).unwrap();
    assert_eq!(parsed.document, fixtures::scenario_document());
    assert_eq!(
        parsed.topology.to_string(),
        "Nodes: 3\nRelationships: 3\nNode labels: Company, Person\nRelationship types: KNOWS, WORKS_AT"
    );
}

#[test]
fn test_unlabeled_elements_get_defaults() {
    let parsed = parse_graphml(&fixtures::unlabeled()).unwrap();
    let doc = &parsed.document;
    assert!(doc.nodes().iter().all(|n| n.label == DEFAULT_NODE_LABEL));
    assert!(doc.edges().iter().all(|e| e.rel_type == DEFAULT_RELATIONSHIP_TYPE));
    assert_eq!(
        doc.edges().iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
        vec!["e0", "e1"]
    );
    assert_eq!(
        doc.edges()[0].properties.get("weight"),
        Some(&PropertyValue::Double(0.5))
    );
}

#[test]
fn test_every_value_type_is_coerced() {
    let parsed = parse_graphml(&fixtures::typed_values()).unwrap();
    let props = &parsed.document.nodes()[0].properties;
    assert_eq!(props["title"], PropertyValue::from("  padded  "));
    assert_eq!(props["count"], PropertyValue::Int(42));
    assert_eq!(props["big"], PropertyValue::Int(9_000_000_000));
    assert_eq!(props["ratio"], PropertyValue::Double(0.25));
    assert_eq!(props["score"], PropertyValue::Double(-1000.0));
    assert_eq!(props["active"], PropertyValue::Bool(true));

    let edge = &parsed.document.edges()[0].properties;
    assert_eq!(edge["count"], PropertyValue::Int(7));
    assert_eq!(edge["active"], PropertyValue::Bool(true));
}

#[test]
fn test_defaults_fill_missing_data() {
    let parsed = parse_graphml(&fixtures::with_defaults()).unwrap();
    let nodes = parsed.document.nodes();
    assert_eq!(nodes[0].properties["color"], PropertyValue::from("grey"));
    assert_eq!(nodes[0].properties["rank"], PropertyValue::Int(1));
    assert_eq!(nodes[1].properties["color"], PropertyValue::from("red"));
    assert_eq!(nodes[1].properties["rank"], PropertyValue::Int(1));
    assert_eq!(
        parsed.document.edges()[0].properties["weight"],
        PropertyValue::Double(1.0)
    );
}

#[test]
fn test_type_coercion_names_key_and_element() {
    let err = parse_graphml(&fixtures::type_coercion()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TypeCoercion);
    assert_eq!(err.key.as_deref(), Some("age"));
    assert_eq!(err.element.as_deref(), Some("n0"));
    assert!(err.position.is_some());
}

#[test]
fn test_dangling_reference_names_edge() {
    let err = parse_graphml(&fixtures::dangling()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::DanglingReference);
    assert_eq!(err.element.as_deref(), Some("e0"));
    assert!(err.message.contains("ghost"));
}

#[test]
fn test_invalid_samples_fail_with_expected_kind() {
    for (name, text, kind) in errors::invalid_graphml_samples() {
        match parse_graphml(text) {
            Ok(_) => panic!("sample '{}' should not parse", name),
            Err(err) => assert_eq!(err.kind.to_string(), kind, "sample '{}': {}", name, err),
        }
    }
}

#[test]
fn test_last_key_declaration_wins() {
    let xml = GraphmlBuilder::new()
        .key("d0", "node", "weight", "string")
        .key("d0", "node", "weight", "int")
        .node("a", &[("d0", "12")])
        .build();
    let parsed = parse_graphml(&xml).unwrap();
    assert_eq!(parsed.document.nodes()[0].properties["weight"], PropertyValue::Int(12));
}

#[test]
fn test_edge_label_beats_type() {
    let xml = GraphmlBuilder::new()
        .key("l", "edge", "label", "string")
        .key("t", "edge", "type", "string")
        .node("a", &[])
        .edge("a", "a", &[("l", "LIKES"), ("t", "social")])
        .edge("a", "a", &[("t", "FOLLOWS")])
        .build();
    let parsed = parse_graphml(&xml).unwrap();
    let edges = parsed.document.edges();
    assert_eq!(edges[0].rel_type, "LIKES");
    assert_eq!(edges[0].properties["type"], PropertyValue::from("social"));
    assert_eq!(edges[1].rel_type, "FOLLOWS");
    assert!(edges[1].properties.is_empty());
}

#[test]
fn test_node_type_stays_a_property() {
    let xml = GraphmlBuilder::new()
        .key("t", "node", "type", "string")
        .node("a", &[("t", "Person")])
        .build();
    let parsed = parse_graphml(&xml).unwrap();
    let node = &parsed.document.nodes()[0];
    assert_eq!(node.label, DEFAULT_NODE_LABEL);
    assert_eq!(node.properties["type"], PropertyValue::from("Person"));
}

#[test]
fn test_key_for_all_applies_to_nodes_and_edges() {
    let xml = GraphmlBuilder::new()
        .bare_key("note")
        .node("a", &[("note", "n")])
        .edge("a", "a", &[("note", "e")])
        .build();
    let parsed = parse_graphml(&xml).unwrap();
    assert_eq!(parsed.document.nodes()[0].properties["note"], PropertyValue::from("n"));
    assert_eq!(parsed.document.edges()[0].properties["note"], PropertyValue::from("e"));
}

#[test]
fn test_nested_graphs_are_flattened() {
    let xml = r#"<graphml>
  <graph id="outer">
    <node id="a">
      <graph id="inner"><node id="a.1"/></graph>
    </node>
    <node id="b"/>
    <edge source="a.1" target="b"/>
  </graph>
</graphml>"#;
    let parsed = parse_graphml(xml).unwrap();
    assert_eq!(
        parsed.document.nodes().iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
        vec!["a", "a.1", "b"]
    );
    assert_eq!(parsed.document.edge_count(), 1);
}

#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(fixtures::scenario().as_bytes()).unwrap();
    let parsed = parse_graphml_file(file.path()).unwrap();
    assert_eq!(parsed.topology.node_count, 3);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_graphml_file(dir.path().join("absent.graphml")).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Io);
}

#[test]
fn test_all_fixtures_parse() {
    for (name, xml) in fixtures::all() {
        assert!(parse_graphml(&xml).is_ok(), "fixture '{}' failed to parse", name);
    }
}

proptest! {
    /// Parsing the same bytes twice yields the same document.
    #[test]
    fn prop_parse_is_deterministic(count in 0usize..30) {
        let xml = fixtures::people(count);
        let first = parse_graphml(&xml).unwrap();
        let second = parse_graphml(&xml).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Unlabeled nodes always land in the default label, whatever their data.
    #[test]
    fn prop_unlabeled_nodes_are_default(names in prop::collection::vec("[a-z]{1,8}", 1..20)) {
        let mut builder = GraphmlBuilder::new().key("n", "node", "name", "string");
        for (i, name) in names.iter().enumerate() {
            builder = builder.node(&format!("v{}", i), &[("n", name.as_str())]);
        }
        let parsed = parse_graphml(&builder.build()).unwrap();
        prop_assert_eq!(parsed.topology.node_labels.len(), 1);
        prop_assert_eq!(parsed.topology.node_labels[DEFAULT_NODE_LABEL], names.len());
    }

    /// Counts always match the number of declared elements.
    #[test]
    fn prop_topology_counts(count in 1usize..40) {
        let parsed = parse_graphml(&fixtures::people(count)).unwrap();
        prop_assert_eq!(parsed.topology.node_count, count);
        prop_assert_eq!(parsed.topology.edge_count, count - 1);
        prop_assert_eq!(parsed.topology.node_labels["Person"], count);
    }
}

#[test]
fn test_yed_export_with_graphml_and_port_keys() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:y="http://www.yworks.com/xml/graphml">
  <key for="graphml" id="d0" yfiles.type="resources"/>
  <key for="port" id="d1" yfiles.type="portgraphics"/>
  <key for="port" id="d2" yfiles.type="portgeometry"/>
  <key attr.name="label" attr.type="string" for="node" id="d3"/>
  <key for="node" id="d4" yfiles.type="nodegraphics"/>
  <key for="edge" id="d5" yfiles.type="edgegraphics"/>
  <key for="hyperedge" id="d6" attr.name="weight" attr.type="double"/>
  <graph edgedefault="directed" id="G">
    <node id="n0">
      <data key="d3">Person</data>
      <data key="d4"><y:ShapeNode><y:NodeLabel>Ada</y:NodeLabel></y:ShapeNode></data>
    </node>
    <node id="n1"><data key="d3">Person</data></node>
    <edge id="e0" source="n0" target="n1"><data key="d5"><y:PolyLineEdge/></data></edge>
  </graph>
  <data key="d0"><y:Resources/></data>
</graphml>"#;
    let parsed = parse_graphml(xml).unwrap();
    assert_eq!(parsed.topology.node_count, 2);
    assert_eq!(parsed.topology.edge_count, 1);
    assert_eq!(parsed.topology.labels().collect::<Vec<_>>(), vec!["Person"]);
    assert_eq!(parsed.document.edges()[0].rel_type, DEFAULT_RELATIONSHIP_TYPE);
}

#[test]
fn test_port_key_referenced_from_node_is_undeclared() {
    let xml = r#"<graphml>
  <key for="port" id="p" attr.name="side" attr.type="string"/>
  <graph><node id="a"><data key="p">left</data></node></graph>
</graphml>"#;
    let err = parse_graphml(xml).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UndeclaredKey);
    assert_eq!(err.key.as_deref(), Some("p"));
    assert_eq!(err.element.as_deref(), Some("a"));
}

#[test]
fn test_invisible_label_falls_back_to_default() {
    let xml = GraphmlBuilder::new()
        .key("l", "node", "label", "string")
        .key("r", "edge", "label", "string")
        .node("a", &[("l", "\u{200B}")])
        .node("b", &[("l", " \u{FEFF} ")])
        .edge("a", "b", &[("r", "\u{202E}")])
        .build();
    let parsed = parse_graphml(&xml).unwrap();
    for node in parsed.document.nodes() {
        assert_eq!(node.label, DEFAULT_NODE_LABEL);
        assert!(!node.properties.contains_key("label"));
    }
    assert_eq!(parsed.document.edges()[0].rel_type, DEFAULT_RELATIONSHIP_TYPE);
}
