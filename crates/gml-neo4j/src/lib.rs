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

//! Batched, idempotent loading of a graph document into Neo4j.
//!
//! Nodes and relationships are upserted with `UNWIND $rows ... MERGE`, keyed on
//! an id property that stores the GraphML id, so loading the same document
//! twice leaves the database unchanged.
//!
//! # Components
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`BatchLoader`] | typestate driver: indexes, nodes, edges, close |
//! | [`GraphClient`] / [`Connector`] | database seam |
//! | [`BoltConnector`] | Neo4j over Bolt (feature `bolt`) |
//! | [`ScriptConnector`] | writes a `.cypher` script instead of executing |
//! | [`LoadOptions`] | batch size, index creation, id property |
//!
//! # Example
//!
//! ```
//! use gml_core::{Edge, GraphDocument, Node};
//! use gml_neo4j::{BatchLoader, LoadOptions, ScriptConnector, ConnectionParams};
//!
//! let dir = tempfile::tempdir()?;
//! let connector = ScriptConnector::new(dir.path().join("load.cypher"));
//! let doc = GraphDocument::new(
//!     vec![Node::new("a").with_label("Person"), Node::new("b").with_label("Person")],
//!     vec![Edge::new("e0", "a", "b").with_type("KNOWS")],
//! );
//!
//! let report = BatchLoader::connect(&connector, &ConnectionParams::default(), LoadOptions::default())?
//!     .create_indexes(&doc)
//!     .load_nodes(&doc)?
//!     .load_edges(&doc)?
//!     .finish();
//! assert_eq!(report.nodes_loaded, 2);
//! assert_eq!(report.relationships_loaded, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

pub mod batch;
#[cfg(feature = "bolt")]
pub mod bolt;
pub mod client;
pub mod config;
pub mod cypher;
pub mod error;
pub mod loader;
pub mod script;

pub use batch::{plan_edge_batches, plan_node_batches, EdgeBatch, NodeBatch};
#[cfg(feature = "bolt")]
pub use bolt::{BoltClient, BoltConnector};
pub use client::{
    ConnectionParams, Connector, GraphClient, Session, DEFAULT_GRAPH, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_TIMEOUT,
};
pub use config::{LoadOptions, LoadOptionsBuilder, DEFAULT_BATCH_SIZE, DEFAULT_ID_PROPERTY};
pub use cypher::{CypherStatement, CypherValue, StatementType};
pub use error::{ClientError, LoadError, Phase, Result};
pub use loader::{
    BatchFailure, BatchLoader, Connected, EdgesLoaded, IndexesReady, LoadAbort, LoadReport,
    NodesLoaded,
};
pub use script::{ScriptClient, ScriptConnector};
