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

//! Typed scalar property values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed scalar stored on a node or edge.
///
/// GraphML declares one of four value types per attribute key; every data
/// entry is coerced into the matching variant at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer (GraphML `int` and `long`).
    Int(i64),
    /// 64-bit float (GraphML `double` and `float`).
    Double(f64),
    /// String value, passed through verbatim.
    String(String),
}

impl PropertyValue {
    /// Try to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a float. Integers widen.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(n) => Some(*n),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of the declared type this value satisfies.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::String(_) => "string",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Double(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(PropertyValue::from("x").as_str(), Some("x"));
        assert_eq!(PropertyValue::from(7i64).as_int(), Some(7));
        assert_eq!(PropertyValue::from(7i64).as_double(), Some(7.0));
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::from(1.5).as_int(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyValue::Int(-3).to_string(), "-3");
        assert_eq!(PropertyValue::Bool(false).to_string(), "false");
        assert_eq!(PropertyValue::Double(2.5).to_string(), "2.5");
        assert_eq!(PropertyValue::from("Acme").to_string(), "Acme");
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&PropertyValue::Int(42)).unwrap();
        assert_eq!(json, "42");
        let json = serde_json::to_string(&PropertyValue::from("a")).unwrap();
        assert_eq!(json, "\"a\"");
    }

    #[test]
    fn test_type_name() {
        assert_eq!(PropertyValue::Double(0.0).type_name(), "double");
        assert_eq!(PropertyValue::Bool(true).type_name(), "boolean");
    }
}
