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

//! Error types for migration configs.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for loading, validating and applying a [`MigrationConfig`](crate::MigrationConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A mapping is inconsistent, or applying it would lose data.
    #[error("invalid mapping for {scope} '{name}': {reason}")]
    InvalidMapping {
        /// `node label`, `relationship type`, `node` or `edge`.
        scope: &'static str,
        /// Label, type or element id at fault.
        name: String,
        /// What is wrong.
        reason: String,
    },

    /// The config file could not be read or parsed.
    #[error("cannot read config '{}': {message}", .path.display())]
    Unreadable {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// A generated file could not be written.
    #[error("cannot write '{}': {message}", .path.display())]
    Unwritable {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(scope: &'static str, name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMapping {
            scope,
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
