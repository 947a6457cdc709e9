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

//! Shared test support for the GraphML migration crates.
//!
//! - [`fixtures`]: canonical GraphML inputs, invalid samples and a builder
//! - [`fake`]: an in-memory graph database implementing the loader's client
//!   contract
//!
//! ```rust
//! use gml_test::{fake::InMemoryGraph, fixtures};
//!
//! let xml = fixtures::scenario();
//! assert!(xml.contains("alice"));
//!
//! let graph = InMemoryGraph::new();
//! assert_eq!(graph.node_count(), 0);
//! ```

pub mod fake;
pub mod fixtures;

pub use fake::{Fault, InMemoryClient, InMemoryConnector, InMemoryGraph};
pub use fixtures::builders::GraphmlBuilder;
