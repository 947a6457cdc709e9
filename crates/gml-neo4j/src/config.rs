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

//! Load options.

use serde::{Deserialize, Serialize};

/// Default number of rows per batched statement.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Default property that stores the GraphML id on nodes and relationships.
pub const DEFAULT_ID_PROPERTY: &str = "_graphml_id";

/// Options controlling how a document is written to the database.
///
/// # Examples
///
/// ```
/// use gml_neo4j::LoadOptions;
///
/// let options = LoadOptions::default()
///     .with_batch_size(1000)
///     .without_indexes();
/// assert_eq!(options.batch_size, 1000);
/// assert!(!options.create_indexes);
/// assert_eq!(options.id_property, "_graphml_id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Maximum rows per batched statement. Zero is treated as one.
    pub batch_size: usize,

    /// Create one id index per distinct node label before loading.
    pub create_indexes: bool,

    /// Property that stores the GraphML id and serves as the MERGE key.
    pub id_property: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            create_indexes: true,
            id_property: DEFAULT_ID_PROPERTY.to_string(),
        }
    }
}

impl LoadOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder.
    pub fn builder() -> LoadOptionsBuilder {
        LoadOptionsBuilder::default()
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Skip index creation.
    pub fn without_indexes(mut self) -> Self {
        self.create_indexes = false;
        self
    }

    /// Set the id property name.
    pub fn with_id_property(mut self, name: impl Into<String>) -> Self {
        self.id_property = name.into();
        self
    }

    /// Batch size actually used for chunking.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}

/// Builder for [`LoadOptions`]; unset fields take the defaults.
#[derive(Debug, Default)]
pub struct LoadOptionsBuilder {
    batch_size: Option<usize>,
    create_indexes: Option<bool>,
    id_property: Option<String>,
}

impl LoadOptionsBuilder {
    /// Set the batch size.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Enable or disable index creation.
    pub fn create_indexes(mut self, create: bool) -> Self {
        self.create_indexes = Some(create);
        self
    }

    /// Set the id property name.
    pub fn id_property(mut self, name: impl Into<String>) -> Self {
        self.id_property = Some(name.into());
        self
    }

    /// Build the options.
    pub fn build(self) -> LoadOptions {
        let defaults = LoadOptions::default();
        LoadOptions {
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            create_indexes: self.create_indexes.unwrap_or(defaults.create_indexes),
            id_property: self.id_property.unwrap_or(defaults.id_property),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::default();
        assert_eq!(options.batch_size, 500);
        assert!(options.create_indexes);
        assert_eq!(options.id_property, DEFAULT_ID_PROPERTY);
    }

    #[test]
    fn test_builder_partial() {
        let options = LoadOptions::builder().id_property("gid").build();
        assert_eq!(options.id_property, "gid");
        assert_eq!(options.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_zero_batch_size_is_one() {
        assert_eq!(LoadOptions::default().with_batch_size(0).effective_batch_size(), 1);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let options: LoadOptions = serde_json::from_str(r#"{"batch_size": 10}"#).unwrap();
        assert_eq!(options.batch_size, 10);
        assert!(options.create_indexes);
    }
}
