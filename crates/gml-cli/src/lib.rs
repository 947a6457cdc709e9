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

//! Command-line front end for GraphML to Neo4j migration.
//!
//! The `graphml-migrate` binary always prints a topology summary first, then
//! runs one mode:
//!
//! - **--generate-topology FILE**: write the topology report as JSON
//! - **--generate-config FILE**: write an identity mapping template
//! - **--analyze-only**: stop after the summary
//! - **--emit-cypher FILE**: render the load as a Cypher script
//! - default: load into Neo4j over Bolt
//!
//! Logs go to stderr, filtered by `RUST_LOG` or `-v`.

pub mod cli;
pub mod error;
pub mod report;

pub use cli::{Cli, Mode};
pub use error::{CliError, Result};
