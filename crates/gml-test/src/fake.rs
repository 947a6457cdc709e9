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

//! In-memory stand-in for a Cypher database.
//!
//! Understands exactly the statements the loader emits: id indexes, batched
//! node MERGE and batched relationship MERGE with MATCHed endpoints. Upserts
//! are keyed the way the database keys them, `(label, id)` for nodes and
//! `(type, id)` between the same endpoints for relationships, so running a
//! load twice leaves the store unchanged. A relationship whose endpoint has
//! not been loaded is silently skipped, as `MATCH` would.
//!
//! Faults can be injected per call to exercise abort paths.

use gml_core::GraphDocument;
use gml_neo4j::{
    ClientError, ConnectionParams, Connector, CypherStatement, CypherValue, GraphClient,
    StatementType,
};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

/// Property map as stored.
pub type StoredProperties = BTreeMap<String, CypherValue>;

/// A stored node.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredNode {
    /// Node label.
    pub label: String,
    /// Node properties (without the id property).
    pub properties: StoredProperties,
}

/// A stored relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRelationship {
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Relationship properties (without the id property).
    pub properties: StoredProperties,
}

/// Point-in-time copy of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    /// Nodes by `(label, id)`.
    pub nodes: BTreeMap<(String, String), StoredNode>,
    /// Relationships by `(type, id)`.
    pub relationships: BTreeMap<(String, String), StoredRelationship>,
    /// Labels with an id index.
    pub indexes: BTreeSet<String>,
}

/// A failure to inject.
#[derive(Debug, Clone, PartialEq)]
pub enum Fault {
    /// The database rejects the statement.
    Reject(String),
    /// The statement times out.
    Timeout(Duration),
}

impl Fault {
    fn into_error(self) -> ClientError {
        match self {
            Fault::Reject(message) => ClientError::Query(message),
            Fault::Timeout(after) => ClientError::Timeout(after),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    store: GraphSnapshot,
    log: Vec<StatementType>,
    faults: BTreeMap<usize, Fault>,
    reject_indexes: bool,
    refuse_connections: bool,
    connects: usize,
    closes: usize,
}

/// Shared handle to an in-memory graph.
///
/// Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    state: Arc<Mutex<State>>,
}

impl InMemoryGraph {
    /// Empty graph accepting connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector opening clients on this graph.
    pub fn connector(&self) -> InMemoryConnector {
        InMemoryConnector {
            graph: self.clone(),
        }
    }

    /// Refuse every connection attempt.
    pub fn refuse_connections(&self) -> &Self {
        self.state.lock().refuse_connections = true;
        self
    }

    /// Fail the `call`-th statement (zero-based, counted across clients).
    pub fn fail_call(&self, call: usize, fault: Fault) -> &Self {
        self.state.lock().faults.insert(call, fault);
        self
    }

    /// Reject every index statement.
    pub fn reject_indexes(&self) -> &Self {
        self.state.lock().reject_indexes = true;
        self
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> GraphSnapshot {
        self.state.lock().store.clone()
    }

    /// Number of stored nodes.
    pub fn node_count(&self) -> usize {
        self.state.lock().store.nodes.len()
    }

    /// Number of stored relationships.
    pub fn relationship_count(&self) -> usize {
        self.state.lock().store.relationships.len()
    }

    /// Node by label and id.
    pub fn node(&self, label: &str, id: &str) -> Option<StoredNode> {
        self.state
            .lock()
            .store
            .nodes
            .get(&(label.to_string(), id.to_string()))
            .cloned()
    }

    /// Relationship by type and id.
    pub fn relationship(&self, rel_type: &str, id: &str) -> Option<StoredRelationship> {
        self.state
            .lock()
            .store
            .relationships
            .get(&(rel_type.to_string(), id.to_string()))
            .cloned()
    }

    /// Types of the statements executed so far, in order. Failed
    /// statements are included.
    pub fn statements(&self) -> Vec<StatementType> {
        self.state.lock().log.clone()
    }

    /// Successful connection attempts.
    pub fn connects(&self) -> usize {
        self.state.lock().connects
    }

    /// Client closes.
    pub fn closes(&self) -> usize {
        self.state.lock().closes
    }

    /// True if the store holds exactly the nodes and edges of `doc`.
    pub fn matches_document(&self, doc: &GraphDocument) -> bool {
        let state = self.state.lock();
        let store = &state.store;
        store.nodes.len() == doc.node_count()
            && store.relationships.len() == doc.edge_count()
            && doc.nodes().iter().all(|n| {
                store
                    .nodes
                    .get(&(n.label.clone(), n.id.clone()))
                    .is_some_and(|s| s.properties == to_stored(&n.properties))
            })
            && doc.edges().iter().all(|e| {
                store
                    .relationships
                    .get(&(e.rel_type.clone(), e.id.clone()))
                    .is_some_and(|s| {
                        s.source == e.source
                            && s.target == e.target
                            && s.properties == to_stored(&e.properties)
                    })
            })
    }

    fn execute(&self, statement: &CypherStatement) -> Result<(), ClientError> {
        let mut state = self.state.lock();
        let call = state.log.len();
        state.log.push(statement.statement_type);

        if let Some(fault) = state.faults.remove(&call) {
            return Err(fault.into_error());
        }

        match statement.statement_type {
            StatementType::Index => {
                if state.reject_indexes {
                    return Err(ClientError::Query("index creation not permitted".into()));
                }
                let label = name_between(&statement.query, "FOR (n", ")")?;
                state.store.indexes.insert(label);
                Ok(())
            }
            StatementType::UpsertNodes => {
                let label = name_between(&statement.query, "MERGE (n", " {")?;
                for row in statement.rows() {
                    let (id, props) = row_fields(row, "id")?;
                    state
                        .store
                        .nodes
                        .entry((label.clone(), id))
                        .or_insert_with(|| StoredNode {
                            label: label.clone(),
                            properties: StoredProperties::new(),
                        })
                        .properties
                        .extend(props);
                }
                Ok(())
            }
            StatementType::UpsertRelationships => {
                let source_label = name_between(&statement.query, "MATCH (s", " {")?;
                let target_label = name_between(&statement.query, "MATCH (t", " {")?;
                let rel_type = name_between(&statement.query, "-[r", " {")?;
                for row in statement.rows() {
                    let (id, props) = row_fields(row, "id")?;
                    let (source, _) = row_fields(row, "source")?;
                    let (target, _) = row_fields(row, "target")?;
                    let store = &mut state.store;
                    let endpoints_exist = store.nodes.contains_key(&(source_label.clone(), source.clone()))
                        && store.nodes.contains_key(&(target_label.clone(), target.clone()));
                    if !endpoints_exist {
                        continue;
                    }
                    store
                        .relationships
                        .entry((rel_type.clone(), id))
                        .or_insert_with(|| StoredRelationship {
                            source,
                            target,
                            properties: StoredProperties::new(),
                        })
                        .properties
                        .extend(props);
                }
                Ok(())
            }
            StatementType::Query => Ok(()),
        }
    }
}

/// Opens [`InMemoryClient`]s.
#[derive(Debug, Clone)]
pub struct InMemoryConnector {
    graph: InMemoryGraph,
}

impl Connector for InMemoryConnector {
    type Client = InMemoryClient;

    fn connect(&self, params: &ConnectionParams) -> Result<InMemoryClient, ClientError> {
        let mut state = self.graph.state.lock();
        if state.refuse_connections {
            return Err(ClientError::Connection(format!(
                "{} refused the connection",
                params.endpoint()
            )));
        }
        state.connects += 1;
        Ok(InMemoryClient {
            graph: self.graph.clone(),
        })
    }
}

/// A session on an [`InMemoryGraph`].
#[derive(Debug)]
pub struct InMemoryClient {
    graph: InMemoryGraph,
}

impl GraphClient for InMemoryClient {
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), ClientError> {
        self.graph.execute(statement)
    }

    fn close(&mut self) {
        self.graph.state.lock().closes += 1;
    }
}

fn to_stored(props: &gml_core::Properties) -> StoredProperties {
    props
        .iter()
        .map(|(k, v)| (k.clone(), CypherValue::from(v)))
        .collect()
}

/// Text between `start` and `end`, as an unescaped label or type name.
fn name_between(query: &str, start: &str, end: &str) -> Result<String, ClientError> {
    let unsupported = || ClientError::Query(format!("unsupported statement: {}", query));
    let from = query.find(start).ok_or_else(unsupported)? + start.len();
    let len = query[from..].find(end).ok_or_else(unsupported)?;
    let raw = query[from..from + len].trim_start_matches(':');
    Ok(match raw.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        Some(inner) => inner.replace("``", "`"),
        None => raw.to_string(),
    })
}

/// The string field `name` of a row, plus the row's properties.
fn row_fields(row: &CypherValue, name: &str) -> Result<(String, StoredProperties), ClientError> {
    let bad_row = || ClientError::Query(format!("row without string '{}'", name));
    let map = row.as_map().ok_or_else(bad_row)?;
    let value = map.get(name).and_then(CypherValue::as_str).ok_or_else(bad_row)?;
    let props = map
        .get("properties")
        .and_then(CypherValue::as_map)
        .cloned()
        .unwrap_or_default();
    Ok((value.to_string(), props))
}
