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

//! Cypher escaping for labels, relationship types and literals.
//!
//! Labels and relationship types come straight from GraphML data and cannot
//! be passed as query parameters, so every one of them goes through
//! [`escape_label`] or [`escape_relationship_type`] before it reaches a query.

use gml_core::is_invisible_char;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string for use inside a single-quoted Cypher literal.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// ```
/// # use gml_neo4j::cypher::escape_string;
/// assert!(matches!(escape_string("plain"), std::borrow::Cow::Borrowed(_)));
/// assert_eq!(escape_string("it's"), "it\\'s");
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string as a Cypher literal.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// True if `s` can appear in a query without backticks.
///
/// Plain identifiers start with an ASCII letter or underscore and continue
/// with ASCII alphanumerics or underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// NFC-normalize a string.
///
/// ```
/// # use gml_neo4j::cypher::normalize_unicode;
/// assert_eq!(normalize_unicode("cafe\u{0301}"), "caf\u{00E9}");
/// ```
pub fn normalize_unicode(s: &str) -> String {
    s.nfc().collect()
}

/// Normalize, strip invisible characters and backtick-quote when needed.
fn sanitize(s: &str) -> String {
    let cleaned: String = normalize_unicode(s)
        .chars()
        .filter(|c| !is_invisible_char(*c))
        .collect();

    if is_valid_identifier(&cleaned) && !is_cypher_keyword(&cleaned) {
        cleaned
    } else {
        format!("`{}`", cleaned.replace('`', "``"))
    }
}

/// Escape a variable, property or index name.
///
/// ```
/// # use gml_neo4j::cypher::escape_identifier;
/// assert_eq!(escape_identifier("name"), "name");
/// assert_eq!(escape_identifier("first name"), "`first name`");
/// assert_eq!(escape_identifier("MATCH"), "`MATCH`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    sanitize(s)
}

/// Escape a node label, including the leading `:`.
///
/// ```
/// # use gml_neo4j::cypher::escape_label;
/// assert_eq!(escape_label("Person"), ":Person");
/// assert_eq!(escape_label("Legal Entity"), ":`Legal Entity`");
/// ```
pub fn escape_label(s: &str) -> String {
    format!(":{}", sanitize(s))
}

/// Escape a relationship type, including the leading `:`.
///
/// ```
/// # use gml_neo4j::cypher::escape_relationship_type;
/// assert_eq!(escape_relationship_type("WORKS_AT"), ":WORKS_AT");
/// assert_eq!(escape_relationship_type("works-at"), ":`works-at`");
/// ```
pub fn escape_relationship_type(s: &str) -> String {
    format!(":{}", sanitize(s))
}

fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL"
            | "AND"
            | "ANY"
            | "AS"
            | "ASC"
            | "ASCENDING"
            | "BY"
            | "CALL"
            | "CASE"
            | "CONTAINS"
            | "COUNT"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DESCENDING"
            | "DETACH"
            | "DISTINCT"
            | "DROP"
            | "ELSE"
            | "END"
            | "ENDS"
            | "EXISTS"
            | "FALSE"
            | "FOREACH"
            | "IN"
            | "INDEX"
            | "IS"
            | "LIMIT"
            | "MATCH"
            | "MERGE"
            | "NOT"
            | "NULL"
            | "ON"
            | "OPTIONAL"
            | "OR"
            | "ORDER"
            | "REMOVE"
            | "RETURN"
            | "SET"
            | "SKIP"
            | "STARTS"
            | "THEN"
            | "TRUE"
            | "UNION"
            | "UNWIND"
            | "WHEN"
            | "WHERE"
            | "WITH"
            | "XOR"
            | "YIELD"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_string_specials() {
        assert_eq!(escape_string("a\\b"), "a\\\\b");
        assert_eq!(escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_string("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_string("nul\x00"), "nul\\u0000");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("O'Brien"), "'O\\'Brien'");
        assert_eq!(quote_string(""), "''");
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("Person"));
        assert!(is_valid_identifier("_graphml_id"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1st"));
        assert!(!is_valid_identifier("has space"));
    }

    #[test]
    fn test_label_with_backtick_is_doubled() {
        assert_eq!(escape_label("a`b"), ":`a``b`");
    }

    #[test]
    fn test_keywords_are_quoted() {
        assert_eq!(escape_label("Match"), ":`Match`");
        assert_eq!(escape_relationship_type("MERGE"), ":`MERGE`");
        assert_eq!(escape_identifier("index"), "`index`");
    }

    #[test]
    fn test_invisible_characters_removed() {
        assert_eq!(escape_label("Per\u{200B}son"), ":Person");
        assert_eq!(escape_relationship_type("KNO\u{202E}WS"), ":KNOWS");
        assert_eq!(escape_identifier("na\u{0000}me"), "name");
    }

    #[test]
    fn test_composed_and_decomposed_labels_match() {
        assert_eq!(escape_label("Caf\u{00E9}"), escape_label("Cafe\u{0301}"));
    }
}
