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

//! Loader integration tests against the in-memory graph.

use gml_core::{Edge, GraphDocument, Node};
use gml_neo4j::{
    BatchLoader, ClientError, ConnectionParams, LoadAbort, LoadError, LoadOptions, LoadReport,
    Phase, StatementType,
};
use gml_test::fixtures;
use gml_test::{Fault, InMemoryGraph};
use std::time::Duration;

fn scenario() -> GraphDocument {
    fixtures::scenario_document()
}

fn load(graph: &InMemoryGraph, doc: &GraphDocument, options: LoadOptions) -> Result<LoadReport, LoadAbort> {
    let connector = graph.connector();
    let loader = BatchLoader::connect(&connector, &ConnectionParams::default(), options).map_err(|error| {
        LoadAbort {
            error,
            report: LoadReport::default(),
        }
    })?;
    Ok(loader
        .create_indexes(doc)
        .load_nodes(doc)?
        .load_edges(doc)?
        .finish())
}

#[test]
fn test_scenario_loads_completely() {
    let graph = InMemoryGraph::new();
    let doc = scenario();
    let report = load(&graph, &doc, LoadOptions::default()).unwrap();

    assert_eq!(report.nodes_loaded, 3);
    assert_eq!(report.relationships_loaded, 3);
    assert!(report.indexes_skipped.is_empty());
    assert!(graph.matches_document(&doc));
    assert_eq!(
        graph.snapshot().indexes.into_iter().collect::<Vec<_>>(),
        vec!["Company".to_string(), "Person".to_string()]
    );
    assert_eq!((graph.connects(), graph.closes()), (1, 1));
}

#[test]
fn test_second_load_is_a_no_op() {
    let graph = InMemoryGraph::new();
    let doc = scenario();
    load(&graph, &doc, LoadOptions::default()).unwrap();
    let first = graph.snapshot();

    load(&graph, &doc, LoadOptions::default()).unwrap();
    assert_eq!(graph.snapshot(), first);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.relationship_count(), 3);
}

#[test]
fn test_every_node_batch_precedes_every_edge_batch() {
    let graph = InMemoryGraph::new();
    let doc = people_chain(12);
    load(&graph, &doc, LoadOptions::default().with_batch_size(5)).unwrap();

    let log = graph.statements();
    let last_node = log
        .iter()
        .rposition(|t| *t == StatementType::UpsertNodes)
        .unwrap();
    let first_edge = log
        .iter()
        .position(|t| *t == StatementType::UpsertRelationships)
        .unwrap();
    assert!(last_node < first_edge);
    assert_eq!(
        log.iter().filter(|t| **t == StatementType::UpsertNodes).count(),
        3
    );
    assert_eq!(graph.relationship_count(), 11);
}

#[test]
fn test_batch_size_one_still_loads_everything() {
    let graph = InMemoryGraph::new();
    let doc = scenario();
    let report = load(&graph, &doc, LoadOptions::default().with_batch_size(1).without_indexes()).unwrap();
    assert_eq!((report.node_batches, report.edge_batches), (3, 3));
    assert!(graph.matches_document(&doc));
}

#[test]
fn test_refused_connection_writes_nothing() {
    let graph = InMemoryGraph::new();
    graph.refuse_connections();
    let abort = load(&graph, &scenario(), LoadOptions::default()).unwrap_err();

    assert!(matches!(
        abort.error,
        LoadError::Connection {
            source: ClientError::Connection(_),
            ..
        }
    ));
    assert!(graph.statements().is_empty());
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn test_edge_batch_failure_keeps_nodes_and_reports_counts() {
    let graph = InMemoryGraph::new();
    // indexes: 2 calls, nodes: 2 batches, then the first edge batch
    graph.fail_call(4, Fault::Reject("constraint violated".into()));
    let abort = load(&graph, &scenario(), LoadOptions::default()).unwrap_err();

    assert_eq!(abort.report.nodes_loaded, 3);
    assert_eq!(abort.report.relationships_loaded, 0);
    assert_eq!(abort.error.batch(), Some((Phase::Edges, 0)));
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.relationship_count(), 0);
    assert_eq!(graph.closes(), 1);

    let failure = abort.failure().unwrap();
    assert!(failure.message.contains("constraint violated"));
}

#[test]
fn test_timeout_is_reported_as_timeout() {
    let graph = InMemoryGraph::new();
    graph.fail_call(1, Fault::Timeout(Duration::from_secs(30)));
    let abort = load(
        &graph,
        &scenario(),
        LoadOptions::default().with_batch_size(2).without_indexes(),
    )
    .unwrap_err();

    assert!(matches!(
        abort.error,
        LoadError::Timeout {
            phase: Phase::Nodes,
            batch_index: 1,
            ..
        }
    ));
    assert_eq!(abort.report.nodes_loaded, 2);
    assert_eq!(graph.closes(), 1);
}

#[test]
fn test_index_failures_are_not_fatal() {
    let graph = InMemoryGraph::new();
    graph.reject_indexes();
    let doc = scenario();
    let report = load(&graph, &doc, LoadOptions::default()).unwrap();

    assert_eq!(
        report.indexes_skipped,
        vec!["Person".to_string(), "Company".to_string()]
    );
    assert!(graph.matches_document(&doc));
}

#[test]
fn test_without_indexes_sends_no_index_statement() {
    let graph = InMemoryGraph::new();
    load(&graph, &scenario(), LoadOptions::default().without_indexes()).unwrap();
    assert!(!graph.statements().contains(&StatementType::Index));
}

#[test]
fn test_custom_id_property_is_used() {
    let graph = InMemoryGraph::new();
    let doc = GraphDocument::new(
        vec![Node::new("a").with_property("_graphml_id", "kept")],
        vec![],
    );
    let report = load(&graph, &doc, LoadOptions::default().with_id_property("gid")).unwrap();
    assert_eq!(report.nodes_loaded, 1);
    assert!(graph.matches_document(&doc));
}

#[test]
fn test_reserved_property_aborts_before_writes() {
    let graph = InMemoryGraph::new();
    let doc = GraphDocument::new(
        vec![Node::new("a"), Node::new("b")],
        vec![Edge::new("e0", "a", "b").with_property("gid", 1i64)],
    );
    let abort = load(
        &graph,
        &doc,
        LoadOptions::default().with_id_property("gid").without_indexes(),
    )
    .unwrap_err();

    assert!(matches!(abort.error, LoadError::ReservedProperty { entity: "edge", .. }));
    assert!(graph.statements().is_empty());
    assert_eq!(graph.closes(), 1);
}

#[test]
fn test_drop_mid_pipeline_closes_once() {
    let graph = InMemoryGraph::new();
    let doc = scenario();
    {
        let _nodes_only = BatchLoader::connect(&graph.connector(), &ConnectionParams::default(), LoadOptions::default())
            .unwrap()
            .create_indexes(&doc)
            .load_nodes(&doc)
            .unwrap();
    }
    assert_eq!(graph.closes(), 1);
    assert_eq!(graph.relationship_count(), 0);
}

/// `count` Person nodes in a KNOWS chain.
fn people_chain(count: usize) -> GraphDocument {
    let nodes = (0..count)
        .map(|i| Node::new(format!("p{}", i)).with_label("Person"))
        .collect();
    let edges = (1..count)
        .map(|i| {
            Edge::new(format!("e{}", i - 1), format!("p{}", i - 1), format!("p{}", i)).with_type("KNOWS")
        })
        .collect();
    GraphDocument::new(nodes, edges)
}
