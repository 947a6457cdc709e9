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

//! Error types for loading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a [`GraphClient`](crate::GraphClient) or
/// [`Connector`](crate::Connector).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The database could not be reached or refused the session.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The database rejected a statement.
    #[error("query failed: {0}")]
    Query(String),

    /// The statement did not complete within the configured timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Load phase a batch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Node upserts.
    Nodes,
    /// Relationship upserts.
    Edges,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nodes => "node",
            Self::Edges => "edge",
        })
    }
}

/// Error type for loading a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// Opening the connection failed; nothing was written.
    #[error("cannot connect to {endpoint}: {source}")]
    Connection {
        /// `host:port/graph` of the target.
        endpoint: String,
        /// Underlying client failure.
        source: ClientError,
    },

    /// A batch was rejected. Earlier batches stay committed.
    #[error("{phase} batch {batch_index} failed: {source}")]
    BatchWrite {
        /// Phase of the failed batch.
        phase: Phase,
        /// Zero-based batch index within the phase.
        batch_index: usize,
        /// Underlying client failure.
        source: ClientError,
    },

    /// A batch exceeded the per-statement timeout.
    #[error("{phase} batch {batch_index} timed out after {timeout:?}")]
    Timeout {
        /// Phase of the batch.
        phase: Phase,
        /// Zero-based batch index within the phase.
        batch_index: usize,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// A property name collides with the id property.
    #[error("{entity} '{id}' has property '{property}', which is reserved for the GraphML id")]
    ReservedProperty {
        /// `node` or `edge`.
        entity: &'static str,
        /// Offending element id.
        id: String,
        /// The reserved property name.
        property: String,
    },

    /// A label or relationship type is empty or only invisible characters.
    #[error("{entity} '{id}' has a blank {name}")]
    BlankName {
        /// `node` or `edge`.
        entity: &'static str,
        /// Offending element id.
        id: String,
        /// `label` or `relationship type`.
        name: &'static str,
    },

    /// An edge names an endpoint that is not in the document.
    #[error("edge '{edge}' references unknown node '{node}'")]
    UnknownEndpoint {
        /// Offending edge id.
        edge: String,
        /// Missing node id.
        node: String,
    },
}

impl LoadError {
    /// Classify a client failure during a batch.
    pub fn from_batch(phase: Phase, batch_index: usize, err: ClientError) -> Self {
        match err {
            ClientError::Timeout(timeout) => Self::Timeout {
                phase,
                batch_index,
                timeout,
            },
            source => Self::BatchWrite {
                phase,
                batch_index,
                source,
            },
        }
    }

    /// Phase and batch index, for batch-level failures.
    pub fn batch(&self) -> Option<(Phase, usize)> {
        match self {
            Self::BatchWrite {
                phase, batch_index, ..
            }
            | Self::Timeout {
                phase, batch_index, ..
            } => Some((*phase, *batch_index)),
            _ => None,
        }
    }

    /// True if no statement was sent before the error.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::ReservedProperty { .. }
                | Self::BlankName { .. }
                | Self::UnknownEndpoint { .. }
        )
    }
}

/// Result type alias for loading.
pub type Result<T> = std::result::Result<T, LoadError>;
