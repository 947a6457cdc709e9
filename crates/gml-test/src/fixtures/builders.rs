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

//! Fluent GraphML writer for test inputs.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// GraphML namespace written on the root element.
pub const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

#[derive(Debug, Clone)]
struct PendingKey {
    id: String,
    scope: Option<String>,
    name: Option<String>,
    value_type: Option<String>,
    default: Option<String>,
}

#[derive(Debug, Clone)]
struct PendingElement {
    id: Option<String>,
    endpoints: Option<(String, String)>,
    data: Vec<(String, String)>,
}

/// Builds a GraphML document as text.
///
/// # Examples
///
/// ```
/// use gml_test::fixtures::builders::GraphmlBuilder;
///
/// let xml = GraphmlBuilder::new()
///     .key("d0", "node", "label", "string")
///     .node("a", &[("d0", "Person")])
///     .node("b", &[])
///     .edge("a", "b", &[])
///     .build();
/// assert!(xml.contains(r#"<node id="a">"#));
/// assert!(xml.contains(r#"<edge source="a" target="b"/>"#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphmlBuilder {
    keys: Vec<PendingKey>,
    nodes: Vec<PendingElement>,
    edges: Vec<PendingElement>,
}

impl GraphmlBuilder {
    /// Start an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key with `for`, `attr.name` and `attr.type`.
    pub fn key(mut self, id: &str, scope: &str, name: &str, value_type: &str) -> Self {
        self.keys.push(PendingKey {
            id: id.to_string(),
            scope: Some(scope.to_string()),
            name: Some(name.to_string()),
            value_type: Some(value_type.to_string()),
            default: None,
        });
        self
    }

    /// Declare a key carrying a `<default>` value.
    pub fn key_with_default(
        mut self,
        id: &str,
        scope: &str,
        name: &str,
        value_type: &str,
        default: &str,
    ) -> Self {
        self = self.key(id, scope, name, value_type);
        if let Some(key) = self.keys.last_mut() {
            key.default = Some(default.to_string());
        }
        self
    }

    /// Declare a key with only an id, leaving every attribute implicit.
    pub fn bare_key(mut self, id: &str) -> Self {
        self.keys.push(PendingKey {
            id: id.to_string(),
            scope: None,
            name: None,
            value_type: None,
            default: None,
        });
        self
    }

    /// Add a node with `(key id, text)` data entries.
    pub fn node(mut self, id: &str, data: &[(&str, &str)]) -> Self {
        self.nodes.push(PendingElement {
            id: Some(id.to_string()),
            endpoints: None,
            data: owned(data),
        });
        self
    }

    /// Add an edge without an id attribute.
    pub fn edge(mut self, source: &str, target: &str, data: &[(&str, &str)]) -> Self {
        self.edges.push(PendingElement {
            id: None,
            endpoints: Some((source.to_string(), target.to_string())),
            data: owned(data),
        });
        self
    }

    /// Add an edge with an explicit id.
    pub fn edge_with_id(mut self, id: &str, source: &str, target: &str, data: &[(&str, &str)]) -> Self {
        self = self.edge(source, target, data);
        if let Some(edge) = self.edges.last_mut() {
            edge.id = Some(id.to_string());
        }
        self
    }

    /// Render the document.
    pub fn try_build(&self) -> quick_xml::Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("graphml").with_attributes([("xmlns", GRAPHML_NS)]),
        ))?;

        for key in &self.keys {
            let mut elem = BytesStart::new("key");
            elem.push_attribute(("id", key.id.as_str()));
            if let Some(scope) = &key.scope {
                elem.push_attribute(("for", scope.as_str()));
            }
            if let Some(name) = &key.name {
                elem.push_attribute(("attr.name", name.as_str()));
            }
            if let Some(value_type) = &key.value_type {
                elem.push_attribute(("attr.type", value_type.as_str()));
            }
            match &key.default {
                Some(default) => {
                    writer.write_event(Event::Start(elem))?;
                    write_text_element(&mut writer, "default", &[], default)?;
                    writer.write_event(Event::End(BytesEnd::new("key")))?;
                }
                None => writer.write_event(Event::Empty(elem))?,
            }
        }

        writer.write_event(Event::Start(
            BytesStart::new("graph").with_attributes([("id", "G"), ("edgedefault", "directed")]),
        ))?;
        for node in &self.nodes {
            write_element(&mut writer, "node", node)?;
        }
        for edge in &self.edges {
            write_element(&mut writer, "edge", edge)?;
        }
        writer.write_event(Event::End(BytesEnd::new("graph")))?;
        writer.write_event(Event::End(BytesEnd::new("graphml")))?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Render the document.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory writer fails, which only happens on allocation
    /// failure.
    pub fn build(&self) -> String {
        match self.try_build() {
            Ok(xml) => xml,
            Err(e) => panic!("failed to render GraphML fixture: {}", e),
        }
    }
}

fn owned(data: &[(&str, &str)]) -> Vec<(String, String)> {
    data.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    element: &PendingElement,
) -> quick_xml::Result<()> {
    let mut elem = BytesStart::new(tag);
    if let Some(id) = &element.id {
        elem.push_attribute(("id", id.as_str()));
    }
    if let Some((source, target)) = &element.endpoints {
        elem.push_attribute(("source", source.as_str()));
        elem.push_attribute(("target", target.as_str()));
    }

    if element.data.is_empty() {
        return writer.write_event(Event::Empty(elem));
    }
    writer.write_event(Event::Start(elem))?;
    for (key, text) in &element.data {
        write_text_element(writer, "data", &[("key", key.as_str())], text)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(
        BytesStart::new(tag).with_attributes(attributes.iter().copied()),
    ))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))
}
