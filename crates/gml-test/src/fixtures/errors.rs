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

//! Invalid GraphML inputs.

/// `(name, graphml_text, expected_error_kind)` triples.
///
/// Kinds use the parser's `snake_case` spelling, e.g. `malformed_xml`.
pub fn invalid_graphml_samples() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("empty", "", "malformed_xml"),
        ("not_xml", "graph { a -> b }", "malformed_xml"),
        (
            "unclosed_tag",
            r#"<graphml><graph><node id="a"></graph></graphml>"#,
            "malformed_xml",
        ),
        ("wrong_root", r#"<gexf><graph/></gexf>"#, "malformed_xml"),
        ("no_graph", r#"<graphml/>"#, "malformed_xml"),
        (
            "node_without_id",
            r#"<graphml><graph><node/></graph></graphml>"#,
            "malformed_xml",
        ),
        (
            "edge_without_target",
            r#"<graphml><graph><node id="a"/><edge source="a"/></graph></graphml>"#,
            "malformed_xml",
        ),
        (
            "undeclared_key",
            r#"<graphml><graph><node id="a"><data key="nope">x</data></node></graph></graphml>"#,
            "undeclared_key",
        ),
        (
            "edge_key_on_node",
            r#"<graphml><key id="w" for="edge" attr.name="w" attr.type="double"/><graph><node id="a"><data key="w">1</data></node></graph></graphml>"#,
            "undeclared_key",
        ),
        (
            "port_key_on_node",
            r#"<graphml><key id="p" for="port" attr.name="side"/><graph><node id="a"><data key="p">left</data></node></graph></graphml>"#,
            "undeclared_key",
        ),
        (
            "bad_int",
            r#"<graphml><key id="k" for="node" attr.name="n" attr.type="int"/><graph><node id="a"><data key="k">1.5</data></node></graph></graphml>"#,
            "type_coercion",
        ),
        (
            "bad_boolean",
            r#"<graphml><key id="k" for="node" attr.name="b" attr.type="boolean"/><graph><node id="a"><data key="k">yes</data></node></graph></graphml>"#,
            "type_coercion",
        ),
        (
            "bad_default",
            r#"<graphml><key id="k" for="node" attr.name="n" attr.type="double"><default>many</default></key><graph/></graphml>"#,
            "type_coercion",
        ),
        (
            "dangling_source",
            r#"<graphml><graph><node id="a"/><edge source="x" target="a"/></graph></graphml>"#,
            "dangling_reference",
        ),
        (
            "duplicate_node",
            r#"<graphml><graph><node id="a"/><node id="a"/></graph></graphml>"#,
            "duplicate_id",
        ),
        (
            "duplicate_edge",
            r#"<graphml><graph><node id="a"/><edge id="e" source="a" target="a"/><edge id="e" source="a" target="a"/></graph></graphml>"#,
            "duplicate_id",
        ),
    ]
}
