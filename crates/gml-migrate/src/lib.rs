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

//! GraphML to Neo4j migration.
//!
//! [`Migrator`] ties the pipeline together:
//!
//! 1. parse the GraphML input ([`gml_xml`])
//! 2. apply an optional label/type/property config ([`gml_mapping`])
//! 3. upsert nodes, then relationships, in batches ([`gml_neo4j`])
//!
//! It also serves the analysis modes: [`Migrator::analyze`],
//! [`Migrator::write_topology_report`] and
//! [`Migrator::write_config_template`] parse the input but never connect.
//!
//! ```
//! use gml_migrate::Migrator;
//! use gml_neo4j::ScriptConnector;
//!
//! let dir = tempfile::tempdir()?;
//! let input = dir.path().join("graph.graphml");
//! std::fs::write(&input, r#"<graphml>
//!   <key id="l" for="node" attr.name="label" attr.type="string"/>
//!   <graph edgedefault="directed">
//!     <node id="a"><data key="l">Person</data></node>
//!     <node id="b"><data key="l">Person</data></node>
//!     <edge source="a" target="b"/>
//!   </graph>
//! </graphml>"#)?;
//!
//! let connector = ScriptConnector::new(dir.path().join("load.cypher"));
//! let result = Migrator::new(&input).run(&connector)?;
//! assert_eq!(result.nodes_loaded, 2);
//! assert_eq!(result.relationships_loaded, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod migrator;
pub mod result;

pub use error::{MigrateError, Result};
pub use migrator::{Migrator, Stage};
pub use result::MigrationResult;
