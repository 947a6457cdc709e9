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

//! Canonical property-graph model.
//!
//! Everything downstream of the GraphML parser works on these types:
//!
//! | Type | Role |
//! |------|------|
//! | [`AttributeKey`] | one `<key>` declaration (scope, target name, type, default) |
//! | [`PropertyValue`] | typed scalar stored on nodes and edges |
//! | [`Node`] / [`Edge`] | graph entities, labelled / typed |
//! | [`GraphDocument`] | all entities of one input, in document order |
//! | [`TopologyReport`] | derived counts and distinct labels/types |
//!
//! ```rust
//! use gml_core::{Edge, GraphDocument, Node, TopologyReport};
//!
//! let doc = GraphDocument::new(
//!     vec![Node::new("a").with_label("Person"), Node::new("b")],
//!     vec![Edge::new("e0", "a", "b").with_type("KNOWS")],
//! );
//! let topology = TopologyReport::from_document(&doc);
//! assert_eq!(topology.node_count, 2);
//! assert_eq!(topology.labels().collect::<Vec<_>>(), vec!["Node", "Person"]);
//! ```

#![deny(missing_docs)]

pub mod document;
pub mod key;
pub mod topology;
pub mod value;

pub use document::{
    is_blank_name, is_invisible_char, Edge, GraphDocument, Node, Properties, DEFAULT_NODE_LABEL,
    DEFAULT_RELATIONSHIP_TYPE,
};
pub use key::{AttributeKey, KeyScope, KeyType};
pub use topology::TopologyReport;
pub use value::PropertyValue;
