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

//! Error types for GraphML parsing.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// The kind of error that occurred during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// XML syntax error or a document that is not GraphML.
    MalformedXml,
    /// A `<data>` element references a key that is not declared for its scope.
    UndeclaredKey,
    /// Data text does not parse as the key's declared type.
    TypeCoercion,
    /// An edge endpoint names a node that does not exist.
    DanglingReference,
    /// Two nodes (or two edges) share an id.
    DuplicateId,
    /// The input file could not be read.
    Io,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MalformedXml => "malformed_xml",
            Self::UndeclaredKey => "undeclared_key",
            Self::TypeCoercion => "type_coercion",
            Self::DanglingReference => "dangling_reference",
            Self::DuplicateId => "duplicate_id",
            Self::Io => "io",
        };
        f.write_str(s)
    }
}

/// An error that occurred while parsing a GraphML document.
///
/// Carries the offending key id and element id where they apply, so callers
/// can report exactly which declaration or entity is at fault.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}{}: {message}", .position.map(|(l, c)| format!(" at {}:{}", l, c)).unwrap_or_default())]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Offending key id, if any.
    pub key: Option<String>,
    /// Offending node/edge id, if any.
    pub element: Option<String>,
    /// 1-based line and column, if known.
    pub position: Option<(u32, u32)>,
}

impl ParseError {
    /// Create a new error.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            key: None,
            element: None,
            position: None,
        }
    }

    /// Attach a source position.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Some((line, column));
        self
    }

    /// XML syntax or structure problem.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::MalformedXml, message)
    }

    /// Data entry referencing an unknown key.
    pub fn undeclared_key(key: &str, element: &str, scope: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            element: Some(element.to_string()),
            ..Self::new(
                ParseErrorKind::UndeclaredKey,
                format!("{} '{}' references undeclared key '{}'", scope, element, key),
            )
        }
    }

    /// Value that does not match the declared key type.
    pub fn type_coercion(key: &str, element: &str, expected: &str, text: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            element: Some(element.to_string()),
            ..Self::new(
                ParseErrorKind::TypeCoercion,
                format!(
                    "value '{}' of key '{}' on '{}' is not a valid {}",
                    text, key, element, expected
                ),
            )
        }
    }

    /// Edge endpoint naming a missing node.
    pub fn dangling_reference(edge: &str, endpoint: &str, node: &str) -> Self {
        Self {
            element: Some(edge.to_string()),
            ..Self::new(
                ParseErrorKind::DanglingReference,
                format!("edge '{}' {} '{}' is not a declared node", edge, endpoint, node),
            )
        }
    }

    /// Repeated node or edge id.
    pub fn duplicate_id(scope: &str, id: &str) -> Self {
        Self {
            element: Some(id.to_string()),
            ..Self::new(
                ParseErrorKind::DuplicateId,
                format!("duplicate {} id '{}'", scope, id),
            )
        }
    }

    /// Input file could not be read.
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::new(
            ParseErrorKind::Io,
            format!("cannot read '{}': {}", path.display(), err),
        )
    }
}

/// Result type alias for parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
