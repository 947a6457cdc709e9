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

//! Migration outcome.

use gml_neo4j::{BatchFailure, LoadAbort, LoadReport};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a migration run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationResult {
    /// Nodes upserted.
    pub nodes_loaded: usize,
    /// Relationships upserted.
    pub relationships_loaded: usize,
    /// Target graph space.
    pub graph: String,
    /// Batches that failed; at most one, since a failure stops the run.
    pub failures: Vec<BatchFailure>,
    /// Labels whose id index could not be created.
    pub indexes_skipped: Vec<String>,
}

impl MigrationResult {
    pub(crate) fn from_report(graph: &str, report: LoadReport) -> Self {
        Self {
            nodes_loaded: report.nodes_loaded,
            relationships_loaded: report.relationships_loaded,
            graph: graph.to_string(),
            failures: Vec::new(),
            indexes_skipped: report.indexes_skipped,
        }
    }

    pub(crate) fn from_abort(graph: &str, abort: &LoadAbort) -> Self {
        Self {
            failures: abort.failure().into_iter().collect(),
            ..Self::from_report(graph, abort.report.clone())
        }
    }

    /// True if every batch was committed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for MigrationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes and {} relationships loaded into '{}'",
            self.nodes_loaded, self.relationships_loaded, self.graph
        )?;
        if !self.indexes_skipped.is_empty() {
            write!(f, " (no index for: {})", self.indexes_skipped.join(", "))?;
        }
        Ok(())
    }
}
