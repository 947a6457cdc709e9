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

//! Error types for the command-line tool.

use gml_migrate::MigrateError;
use thiserror::Error;

/// Error type for a command-line run.
#[derive(Error, Debug)]
pub enum CliError {
    /// The migration itself failed.
    #[error(transparent)]
    Migrate(#[from] MigrateError),

    /// The log subscriber could not be installed.
    #[error("cannot initialize logging: {0}")]
    Logging(String),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
