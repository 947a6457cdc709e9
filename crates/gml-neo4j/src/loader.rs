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

//! Typestate batch loader.
//!
//! ```text
//! BatchLoader<C, Connected>
//!     -> create_indexes -> BatchLoader<C, IndexesReady>
//!     -> load_nodes     -> BatchLoader<C, NodesLoaded>
//!     -> load_edges     -> BatchLoader<C, EdgesLoaded>
//!     -> finish         -> LoadReport
//! ```
//!
//! Every step consumes the loader, so edges cannot be written before nodes
//! and nothing can be written after `finish`. A failing step returns a
//! [`LoadAbort`] with the counts committed so far; the connection is closed
//! before the abort is returned.

use crate::batch::{distinct_labels, index_statement, plan_edge_batches, plan_node_batches};
use crate::client::{ConnectionParams, Connector, GraphClient, Session};
use crate::config::LoadOptions;
use crate::error::{LoadError, Phase};
use gml_core::{is_blank_name, GraphDocument};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::{debug, error, info, warn};

/// Session open, nothing written.
#[derive(Debug)]
pub struct Connected;
/// Index bootstrap done (or skipped).
#[derive(Debug)]
pub struct IndexesReady;
/// Every node batch committed.
#[derive(Debug)]
pub struct NodesLoaded;
/// Every edge batch committed.
#[derive(Debug)]
pub struct EdgesLoaded;

/// Counts of what has been committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Nodes upserted.
    pub nodes_loaded: usize,
    /// Relationships upserted.
    pub relationships_loaded: usize,
    /// Node batches committed.
    pub node_batches: usize,
    /// Edge batches committed.
    pub edge_batches: usize,
    /// Labels whose index creation failed.
    pub indexes_skipped: Vec<String>,
}

/// A failed batch, as reported in results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Phase of the batch.
    pub phase: Phase,
    /// Zero-based index within the phase.
    pub batch_index: usize,
    /// Rendered error.
    pub message: String,
}

/// A load that stopped early.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadAbort {
    /// Why it stopped.
    pub error: LoadError,
    /// What was committed before it stopped.
    pub report: LoadReport,
}

impl LoadAbort {
    /// Failure record for the aborting batch, if a batch caused it.
    pub fn failure(&self) -> Option<BatchFailure> {
        self.error.batch().map(|(phase, batch_index)| BatchFailure {
            phase,
            batch_index,
            message: self.error.to_string(),
        })
    }
}

impl std::fmt::Display for LoadAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} nodes and {} relationships committed)",
            self.error, self.report.nodes_loaded, self.report.relationships_loaded
        )
    }
}

impl std::error::Error for LoadAbort {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Writes one document through a [`GraphClient`], in phases.
pub struct BatchLoader<C: GraphClient, S> {
    session: Session<C>,
    options: LoadOptions,
    report: LoadReport,
    state: PhantomData<S>,
}

impl<C: GraphClient> BatchLoader<C, Connected> {
    /// Open a session through `connector`.
    pub fn connect<K>(connector: &K, params: &ConnectionParams, options: LoadOptions) -> Result<Self, LoadError>
    where
        K: Connector<Client = C>,
    {
        info!(endpoint = %params.endpoint(), "connecting");
        let client = connector.connect(params).map_err(|source| {
            error!(endpoint = %params.endpoint(), error = %source, "connection failed");
            LoadError::Connection {
                endpoint: params.endpoint(),
                source,
            }
        })?;
        Ok(Self::from_client(client, options))
    }

    /// Wrap a client that is already open.
    pub fn from_client(client: C, options: LoadOptions) -> Self {
        Self {
            session: Session::new(client),
            options,
            report: LoadReport::default(),
            state: PhantomData,
        }
    }

    /// Ensure an id index per distinct label.
    ///
    /// Does nothing when indexes are disabled. A failed index is logged and
    /// recorded in [`LoadReport::indexes_skipped`]; loading continues.
    pub fn create_indexes(mut self, doc: &GraphDocument) -> BatchLoader<C, IndexesReady> {
        if !self.options.create_indexes {
            debug!("index creation disabled");
            return self.transition();
        }

        for label in distinct_labels(doc) {
            let statement = index_statement(label, &self.options.id_property);
            match self.session.execute(&statement) {
                Ok(()) => debug!(label, "index ready"),
                Err(err) => {
                    warn!(label, error = %err, "index creation failed, continuing without it");
                    self.report.indexes_skipped.push(label.to_string());
                }
            }
        }
        self.transition()
    }
}

impl<C: GraphClient> BatchLoader<C, IndexesReady> {
    /// Upsert every node, batch by batch.
    ///
    /// The document is checked first: a blank label or type, an edge pointing
    /// at a missing node, or a property named like the id property fails
    /// before any batch is sent.
    pub fn load_nodes(mut self, doc: &GraphDocument) -> Result<BatchLoader<C, NodesLoaded>, LoadAbort> {
        if let Err(err) = check_document(doc, &self.options.id_property) {
            return Err(self.abort(err));
        }

        let batches = plan_node_batches(doc, self.options.effective_batch_size());
        info!(nodes = doc.node_count(), batches = batches.len(), "loading nodes");

        for batch in &batches {
            let statement = batch.statement(&self.options.id_property);
            if let Err(err) = self.session.execute(&statement) {
                return Err(self.abort(LoadError::from_batch(Phase::Nodes, batch.index, err)));
            }
            self.report.nodes_loaded += batch.nodes.len();
            self.report.node_batches += 1;
            debug!(
                batch = batch.index,
                label = batch.label,
                rows = batch.nodes.len(),
                "node batch committed"
            );
        }
        Ok(self.transition())
    }
}

impl<C: GraphClient> BatchLoader<C, NodesLoaded> {
    /// Upsert every edge, batch by batch.
    pub fn load_edges(mut self, doc: &GraphDocument) -> Result<BatchLoader<C, EdgesLoaded>, LoadAbort> {
        let batches = plan_edge_batches(doc, self.options.effective_batch_size());
        info!(relationships = doc.edge_count(), batches = batches.len(), "loading relationships");

        for batch in &batches {
            let statement = batch.statement(&self.options.id_property);
            if let Err(err) = self.session.execute(&statement) {
                return Err(self.abort(LoadError::from_batch(Phase::Edges, batch.index, err)));
            }
            self.report.relationships_loaded += batch.edges.len();
            self.report.edge_batches += 1;
            debug!(
                batch = batch.index,
                rel_type = batch.rel_type,
                rows = batch.edges.len(),
                "edge batch committed"
            );
        }
        Ok(self.transition())
    }
}

impl<C: GraphClient> BatchLoader<C, EdgesLoaded> {
    /// Close the session and return the final counts.
    pub fn finish(mut self) -> LoadReport {
        self.session.close();
        info!(
            nodes = self.report.nodes_loaded,
            relationships = self.report.relationships_loaded,
            "load complete"
        );
        std::mem::take(&mut self.report)
    }
}

impl<C: GraphClient, S> BatchLoader<C, S> {
    /// Counts committed so far.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Options in effect.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn transition<T>(self) -> BatchLoader<C, T> {
        BatchLoader {
            session: self.session,
            options: self.options,
            report: self.report,
            state: PhantomData,
        }
    }

    fn abort(mut self, error: LoadError) -> LoadAbort {
        error!(
            error = %error,
            nodes = self.report.nodes_loaded,
            relationships = self.report.relationships_loaded,
            "load aborted"
        );
        self.session.close();
        LoadAbort {
            error,
            report: std::mem::take(&mut self.report),
        }
    }
}

fn check_document(doc: &GraphDocument, id_property: &str) -> Result<(), LoadError> {
    for node in doc.nodes() {
        if is_blank_name(&node.label) {
            return Err(LoadError::BlankName {
                entity: "node",
                id: node.id.clone(),
                name: "label",
            });
        }
        if node.properties.contains_key(id_property) {
            return Err(LoadError::ReservedProperty {
                entity: "node",
                id: node.id.clone(),
                property: id_property.to_string(),
            });
        }
    }
    for edge in doc.edges() {
        if is_blank_name(&edge.rel_type) {
            return Err(LoadError::BlankName {
                entity: "edge",
                id: edge.id.clone(),
                name: "relationship type",
            });
        }
        if edge.properties.contains_key(id_property) {
            return Err(LoadError::ReservedProperty {
                entity: "edge",
                id: edge.id.clone(),
                property: id_property.to_string(),
            });
        }
        for endpoint in [&edge.source, &edge.target] {
            if doc.node(endpoint).is_none() {
                return Err(LoadError::UnknownEndpoint {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
    }
    Ok(())
}
