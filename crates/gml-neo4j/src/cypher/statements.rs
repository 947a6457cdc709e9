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

//! Cypher statements and parameter values.

use gml_core::{Properties, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::escape::{escape_identifier, quote_string};

/// A Cypher parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CypherValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// List value.
    List(Vec<CypherValue>),
    /// Map value.
    Map(BTreeMap<String, CypherValue>),
}

impl From<bool> for CypherValue {
    fn from(v: bool) -> Self {
        CypherValue::Bool(v)
    }
}

impl From<i64> for CypherValue {
    fn from(v: i64) -> Self {
        CypherValue::Int(v)
    }
}

impl From<f64> for CypherValue {
    fn from(v: f64) -> Self {
        CypherValue::Float(v)
    }
}

impl From<String> for CypherValue {
    fn from(v: String) -> Self {
        CypherValue::String(v)
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_string())
    }
}

impl<T: Into<CypherValue>> From<Vec<T>> for CypherValue {
    fn from(v: Vec<T>) -> Self {
        CypherValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<&PropertyValue> for CypherValue {
    fn from(v: &PropertyValue) -> Self {
        match v {
            PropertyValue::Bool(b) => CypherValue::Bool(*b),
            PropertyValue::Int(i) => CypherValue::Int(*i),
            PropertyValue::Double(d) => CypherValue::Float(*d),
            PropertyValue::String(s) => CypherValue::String(s.clone()),
        }
    }
}

impl From<&Properties> for CypherValue {
    fn from(props: &Properties) -> Self {
        CypherValue::Map(
            props
                .iter()
                .map(|(k, v)| (k.clone(), CypherValue::from(v)))
                .collect(),
        )
    }
}

impl CypherValue {
    /// Render as Cypher literal syntax.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            CypherValue::Null => "null".to_string(),
            CypherValue::Bool(b) => b.to_string(),
            CypherValue::Int(i) => i.to_string(),
            CypherValue::Float(f) => {
                if f.is_nan() {
                    "0.0/0.0".to_string()
                } else if f.is_infinite() {
                    if *f > 0.0 { "1.0/0.0" } else { "-1.0/0.0" }.to_string()
                } else {
                    let s = f.to_string();
                    if s.contains('.') || s.contains('e') || s.contains('E') {
                        s
                    } else {
                        format!("{}.0", s)
                    }
                }
            }
            CypherValue::String(s) => quote_string(s),
            CypherValue::List(items) => {
                let inner: Vec<String> = items.iter().map(|v| v.to_cypher_literal()).collect();
                format!("[{}]", inner.join(", "))
            }
            CypherValue::Map(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", escape_identifier(k), v.to_cypher_literal()))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
        }
    }

    /// String payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CypherValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// List payload, if any.
    pub fn as_list(&self) -> Option<&[CypherValue]> {
        match self {
            CypherValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map payload, if any.
    pub fn as_map(&self) -> Option<&BTreeMap<String, CypherValue>> {
        match self {
            CypherValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// The kind of write a statement performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementType {
    /// Lookup index on a label's id property.
    Index,
    /// Batched node MERGE.
    UpsertNodes,
    /// Batched relationship MERGE.
    UpsertRelationships,
    /// Anything else, e.g. a connectivity check.
    Query,
}

/// A single Cypher statement with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherStatement {
    /// The Cypher query text.
    pub query: String,
    /// Named parameters, referenced as `$name` in the query.
    pub parameters: BTreeMap<String, CypherValue>,
    /// Kind of statement.
    pub statement_type: StatementType,
    /// Optional comment, emitted as `// ...` in scripts.
    pub comment: Option<String>,
}

impl CypherStatement {
    /// Create a new statement.
    pub fn new(query: impl Into<String>, statement_type: StatementType) -> Self {
        Self {
            query: query.into(),
            parameters: BTreeMap::new(),
            statement_type,
            comment: None,
        }
    }

    /// Index creation statement.
    pub fn index(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::Index)
    }

    /// Node upsert statement.
    pub fn upsert_nodes(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::UpsertNodes)
    }

    /// Relationship upsert statement.
    pub fn upsert_relationships(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::UpsertRelationships)
    }

    /// General query.
    pub fn query(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::Query)
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Rows carried in the `$rows` parameter of a batched statement.
    pub fn rows(&self) -> &[CypherValue] {
        self.parameters
            .get(ROWS_PARAM)
            .and_then(CypherValue::as_list)
            .unwrap_or(&[])
    }

    /// Render with parameter values inlined as literals.
    ///
    /// Longer parameter names are substituted first so `$rows` never
    /// clobbers a `$rowsize`.
    pub fn render_inline(&self) -> String {
        let mut names: Vec<&String> = self.parameters.keys().collect();
        names.sort_by_key(|n| std::cmp::Reverse(n.len()));

        let mut result = self.query.clone();
        for name in names {
            let literal = self.parameters[name].to_cypher_literal();
            result = result.replace(&format!("${}", name), &literal);
        }
        result
    }

    /// Render as a standalone, directly executable script entry.
    pub fn format(&self, include_comment: bool) -> String {
        let mut out = String::new();
        if include_comment {
            if let Some(comment) = &self.comment {
                out.push_str("// ");
                out.push_str(comment);
                out.push('\n');
            }
        }
        out.push_str(&self.render_inline());
        out.push(';');
        out
    }
}

/// Name of the list parameter that carries batch rows.
pub const ROWS_PARAM: &str = "rows";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(CypherValue::Null.to_cypher_literal(), "null");
        assert_eq!(CypherValue::Bool(false).to_cypher_literal(), "false");
        assert_eq!(CypherValue::Int(-4).to_cypher_literal(), "-4");
        assert_eq!(CypherValue::Float(2.0).to_cypher_literal(), "2.0");
        assert_eq!(CypherValue::Float(f64::NAN).to_cypher_literal(), "0.0/0.0");
        assert_eq!(CypherValue::from("it's").to_cypher_literal(), "'it\\'s'");
    }

    #[test]
    fn test_map_keys_are_escaped() {
        let mut map = BTreeMap::new();
        map.insert("first name".to_string(), CypherValue::from("Ada"));
        map.insert("age".to_string(), CypherValue::Int(36));
        assert_eq!(
            CypherValue::Map(map).to_cypher_literal(),
            "{age: 36, `first name`: 'Ada'}"
        );
    }

    #[test]
    fn test_from_property_value() {
        assert_eq!(CypherValue::from(&PropertyValue::Int(3)), CypherValue::Int(3));
        assert_eq!(
            CypherValue::from(&PropertyValue::Double(0.5)),
            CypherValue::Float(0.5)
        );
        assert_eq!(
            CypherValue::from(&PropertyValue::from("x")),
            CypherValue::String("x".into())
        );
    }

    #[test]
    fn test_rows_accessor() {
        let stmt = CypherStatement::upsert_nodes("UNWIND $rows AS row RETURN row")
            .with_param(ROWS_PARAM, vec![CypherValue::Int(1), CypherValue::Int(2)]);
        assert_eq!(stmt.rows().len(), 2);
        assert!(CypherStatement::query("RETURN 1").rows().is_empty());
    }

    #[test]
    fn test_render_inline_prefers_longer_names() {
        let stmt = CypherStatement::query("RETURN $rows, $rowsize")
            .with_param("rows", vec![CypherValue::Int(1)])
            .with_param("rowsize", CypherValue::Int(9));
        assert_eq!(stmt.render_inline(), "RETURN [1], 9");
    }

    #[test]
    fn test_format_with_comment() {
        let stmt = CypherStatement::index("CREATE INDEX x")
            .with_comment("index for Person");
        assert_eq!(stmt.format(true), "// index for Person\nCREATE INDEX x;");
        assert_eq!(stmt.format(false), "CREATE INDEX x;");
    }
}
