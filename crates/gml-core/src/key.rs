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

//! Attribute key declarations.

use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which element kind an attribute key applies to (`for` attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyScope {
    /// `for="node"`
    Node,
    /// `for="edge"`
    Edge,
    /// `for="graph"`; never resolves for nodes or edges.
    Graph,
    /// `for="all"`; applies to nodes and edges alike.
    All,
    /// `for="graphml"`, the document root (yEd resources live here).
    #[serde(rename = "graphml")]
    GraphMl,
    /// `for="hyperedge"`
    Hyperedge,
    /// `for="port"`
    Port,
    /// `for="endpoint"`
    Endpoint,
}

impl KeyScope {
    /// Parse the value of a GraphML `for` attribute.
    ///
    /// A missing attribute means `all` per the GraphML schema. Scopes other
    /// than `node`, `edge` and `all` are accepted but never resolve for a
    /// node or edge.
    pub fn from_graphml(value: Option<&str>) -> Option<Self> {
        match value {
            None => Some(Self::All),
            Some("node") => Some(Self::Node),
            Some("edge") => Some(Self::Edge),
            Some("graph") => Some(Self::Graph),
            Some("all") => Some(Self::All),
            Some("graphml") => Some(Self::GraphMl),
            Some("hyperedge") => Some(Self::Hyperedge),
            Some("port") => Some(Self::Port),
            Some("endpoint") => Some(Self::Endpoint),
            Some(_) => None,
        }
    }

    /// Whether a key with this scope may be referenced from nodes.
    pub fn admits_nodes(self) -> bool {
        matches!(self, Self::Node | Self::All)
    }

    /// Whether a key with this scope may be referenced from edges.
    pub fn admits_edges(self) -> bool {
        matches!(self, Self::Edge | Self::All)
    }
}

impl fmt::Display for KeyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Graph => "graph",
            Self::All => "all",
            Self::GraphMl => "graphml",
            Self::Hyperedge => "hyperedge",
            Self::Port => "port",
            Self::Endpoint => "endpoint",
        };
        f.write_str(s)
    }
}

/// Declared value type of an attribute key (`attr.type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Text, passed through unchanged.
    #[default]
    String,
    /// Signed integer (`int` or `long`).
    Int,
    /// Floating point (`double` or `float`).
    Double,
    /// `true` / `false`, case-insensitive.
    Boolean,
}

impl KeyType {
    /// Parse the value of a GraphML `attr.type` attribute.
    ///
    /// `long` folds into [`KeyType::Int`] and `float` into [`KeyType::Double`].
    /// A missing attribute means `string`.
    pub fn from_graphml(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("string") => Some(Self::String),
            Some("int") | Some("long") => Some(Self::Int),
            Some("double") | Some("float") => Some(Self::Double),
            Some("boolean") => Some(Self::Boolean),
            Some(_) => None,
        }
    }

    /// Coerce raw element text into a value of this type.
    ///
    /// Numeric and boolean text is trimmed before parsing; strings are kept
    /// verbatim. Returns `None` when the text does not represent the type.
    pub fn coerce(self, text: &str) -> Option<PropertyValue> {
        match self {
            Self::String => Some(PropertyValue::String(text.to_string())),
            Self::Int => text.trim().parse::<i64>().ok().map(PropertyValue::Int),
            Self::Double => text.trim().parse::<f64>().ok().map(PropertyValue::Double),
            Self::Boolean => {
                let t = text.trim();
                if t.eq_ignore_ascii_case("true") {
                    Some(PropertyValue::Bool(true))
                } else if t.eq_ignore_ascii_case("false") {
                    Some(PropertyValue::Bool(false))
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Double => "double",
            Self::Boolean => "boolean",
        };
        f.write_str(s)
    }
}

/// One `<key>` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeKey {
    /// Key id referenced by `<data key="...">`.
    pub id: String,
    /// Element kinds this key applies to.
    pub scope: KeyScope,
    /// Target property name (`attr.name`, falling back to the id).
    pub name: String,
    /// Declared value type.
    pub value_type: KeyType,
    /// Coerced `<default>` value, applied where an element has no entry.
    pub default: Option<PropertyValue>,
}

impl AttributeKey {
    /// Create a key without a default value.
    pub fn new(
        id: impl Into<String>,
        scope: KeyScope,
        name: impl Into<String>,
        value_type: KeyType,
    ) -> Self {
        Self {
            id: id.into(),
            scope,
            name: name.into(),
            value_type,
            default: None,
        }
    }

    /// Attach a default value.
    pub fn with_default(mut self, value: PropertyValue) -> Self {
        self.default = Some(value);
        self
    }
}
