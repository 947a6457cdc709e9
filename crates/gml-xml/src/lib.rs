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

//! GraphML parsing.
//!
//! Reads a GraphML document into a [`gml_core::GraphDocument`] plus its
//! [`gml_core::TopologyReport`].
//!
//! # Resolution rules
//!
//! | GraphML | Canonical model |
//! |---------|-----------------|
//! | `<key id attr.name attr.type for>` | [`gml_core::AttributeKey`]; repeated ids: last declaration wins |
//! | `<key><default>` | value applied to elements lacking that key |
//! | `<node id>` | [`gml_core::Node`], label from the `label` property, else `Node` |
//! | `<edge id source target>` | [`gml_core::Edge`], type from `label`, else `type`, else `RELATES_TO` |
//! | `<edge>` without id | id `e{n}`, `n` = position among edges |
//! | nested `<graph>` | flattened |
//!
//! # Example
//!
//! ```rust
//! use gml_xml::parse_graphml;
//!
//! let xml = r#"<?xml version="1.0"?>
//! <graphml xmlns="http://graphml.graphdrawing.org/xmlns">
//!   <key id="d0" for="node" attr.name="label" attr.type="string"/>
//!   <key id="d1" for="node" attr.name="age" attr.type="int"/>
//!   <graph edgedefault="directed">
//!     <node id="alice"><data key="d0">Person</data><data key="d1">36</data></node>
//!     <node id="bob"/>
//!     <edge source="alice" target="bob"/>
//!   </graph>
//! </graphml>"#;
//!
//! let parsed = parse_graphml(xml)?;
//! assert_eq!(parsed.document.nodes()[0].label, "Person");
//! assert_eq!(parsed.document.nodes()[1].label, "Node");
//! assert_eq!(parsed.topology.edge_count, 1);
//! # Ok::<(), gml_xml::ParseError>(())
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod from_graphml;

pub use error::{ParseError, ParseErrorKind, Result};
pub use from_graphml::{
    parse_graphml, parse_graphml_file, ParsedGraph, LABEL_PROPERTY, TYPE_PROPERTY,
};
