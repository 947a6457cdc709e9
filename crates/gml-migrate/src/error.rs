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

//! Error types for migration runs.

use crate::result::MigrationResult;
use gml_mapping::ConfigError;
use gml_neo4j::LoadError;
use gml_xml::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for a migration run; keeps the failing stage's own error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MigrateError {
    /// The GraphML input could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The migration config could not be loaded or applied.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Loading stopped; `partial` holds what was committed.
    #[error(
        "load error: {source} ({} nodes and {} relationships committed)",
        .partial.nodes_loaded,
        .partial.relationships_loaded
    )]
    Load {
        /// Why loading stopped.
        source: LoadError,
        /// What was committed before the failure.
        partial: Box<MigrationResult>,
    },

    /// A report or template could not be written.
    #[error("cannot write '{}': {message}", .path.display())]
    Output {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },
}

impl MigrateError {
    /// Committed counts, for load failures.
    pub fn partial(&self) -> Option<&MigrationResult> {
        match self {
            Self::Load { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

/// Result type alias for migration runs.
pub type Result<T> = std::result::Result<T, MigrateError>;
