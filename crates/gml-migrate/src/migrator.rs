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

//! Migration orchestration.

use crate::error::{MigrateError, Result};
use crate::result::MigrationResult;
use gml_core::{GraphDocument, TopologyReport};
use gml_mapping::{apply_config, ConfigError, MigrationConfig};
use gml_neo4j::{BatchLoader, ConnectionParams, Connector, LoadOptions};
use gml_xml::{parse_graphml, parse_graphml_file, ParsedGraph};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Where a [`Migrator`] is in its lifecycle.
///
/// ```text
/// Unparsed -> Parsed -> Configured -> Connected -> Loaded -> Closed
///     any stage -> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing read yet.
    Unparsed,
    /// Input parsed and analyzed.
    Parsed,
    /// Config applied (or none given).
    Configured,
    /// Database session open.
    Connected,
    /// Every batch committed.
    Loaded,
    /// Session released.
    Closed,
    /// A stage failed; see the returned error.
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unparsed => "unparsed",
            Self::Parsed => "parsed",
            Self::Configured => "configured",
            Self::Connected => "connected",
            Self::Loaded => "loaded",
            Self::Closed => "closed",
            Self::Failed => "failed",
        })
    }
}

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Text(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Text(_) => f.write_str("<inline>"),
        }
    }
}

#[derive(Debug, Clone)]
enum ConfigSource {
    File(PathBuf),
    Inline(MigrationConfig),
}

/// Drives one GraphML input through parse, remap and load.
///
/// The parse result is cached, so [`analyze`](Self::analyze), the report
/// writers and [`run`](Self::run) read the input once between them.
///
/// ```
/// use gml_migrate::{Migrator, Stage};
///
/// let mut migrator = Migrator::from_graphml(r#"<graphml>
///   <graph edgedefault="directed">
///     <node id="a"/><node id="b"/>
///     <edge source="a" target="b"/>
///   </graph>
/// </graphml>"#);
/// let parsed = migrator.analyze()?;
/// assert_eq!(parsed.topology.node_count, 2);
/// assert_eq!(migrator.stage(), Stage::Parsed);
/// # Ok::<(), gml_migrate::MigrateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Migrator {
    source: Source,
    config: Option<ConfigSource>,
    options: LoadOptions,
    params: ConnectionParams,
    parsed: Option<ParsedGraph>,
    stage: Stage,
}

impl Migrator {
    /// Migrator for a GraphML file.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self::with_source(Source::File(input.into()))
    }

    /// Migrator for GraphML text already in memory.
    pub fn from_graphml(text: impl Into<String>) -> Self {
        Self::with_source(Source::Text(text.into()))
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            config: None,
            options: LoadOptions::default(),
            params: ConnectionParams::default(),
            parsed: None,
            stage: Stage::Unparsed,
        }
    }

    /// Remap with an in-memory config.
    pub fn with_config(mut self, config: MigrationConfig) -> Self {
        self.config = Some(ConfigSource::Inline(config));
        self
    }

    /// Remap with a JSON or YAML config file, read when the run starts.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(ConfigSource::File(path.into()));
        self
    }

    /// Set batching and index options.
    pub fn with_load_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the target database.
    pub fn with_connection(mut self, params: ConnectionParams) -> Self {
        self.params = params;
        self
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Target database.
    pub fn connection(&self) -> &ConnectionParams {
        &self.params
    }

    /// Batching and index options.
    pub fn load_options(&self) -> &LoadOptions {
        &self.options
    }

    /// Parse the input, or return the cached parse. Never connects.
    pub fn analyze(&mut self) -> Result<&ParsedGraph> {
        let parsed = match self.parsed.take() {
            Some(parsed) => parsed,
            None => self.parse()?,
        };
        Ok(self.parsed.insert(parsed))
    }

    /// Write the topology report as JSON and return it.
    pub fn write_topology_report(&mut self, path: impl AsRef<Path>) -> Result<TopologyReport> {
        let path = path.as_ref();
        let topology = self.analyze()?.topology.clone();
        let json = topology
            .to_json_pretty()
            .map_err(|e| output_error(path, e))?;
        std::fs::write(path, json + "\n").map_err(|e| output_error(path, e))?;
        info!(path = %path.display(), "wrote topology report");
        Ok(topology)
    }

    /// Write an identity config covering every label and type in the input.
    pub fn write_config_template(&mut self, path: impl AsRef<Path>) -> Result<MigrationConfig> {
        let path = path.as_ref();
        let template = MigrationConfig::template(&self.analyze()?.topology);
        template.write_json(path).map_err(|e| match e {
            ConfigError::Unwritable { path, message } => MigrateError::Output { path, message },
            other => MigrateError::Config(other),
        })?;
        info!(path = %path.display(), "wrote config template");
        Ok(template)
    }

    /// Parse, remap and load into the database `connector` reaches.
    ///
    /// On a load failure the error carries the counts committed before it.
    /// Loading is idempotent, so a failed run can simply be repeated.
    pub fn run<K: Connector>(&mut self, connector: &K) -> Result<MigrationResult> {
        let document = self.configured_document()?;
        let graph = self.params.graph.clone();

        let loader = match BatchLoader::connect(connector, &self.params, self.options.clone()) {
            Ok(loader) => loader,
            Err(source) => {
                let partial = MigrationResult {
                    graph,
                    ..MigrationResult::default()
                };
                return Err(self.fail(MigrateError::Load {
                    source,
                    partial: Box::new(partial),
                }));
            }
        };
        self.transition(Stage::Connected);

        let loaded = loader
            .create_indexes(&document)
            .load_nodes(&document)
            .and_then(|loader| loader.load_edges(&document));
        match loaded {
            Ok(loader) => {
                self.transition(Stage::Loaded);
                let result = MigrationResult::from_report(&graph, loader.finish());
                self.transition(Stage::Closed);
                info!(
                    nodes = result.nodes_loaded,
                    relationships = result.relationships_loaded,
                    graph = %result.graph,
                    "migration complete"
                );
                Ok(result)
            }
            Err(abort) => {
                let partial = MigrationResult::from_abort(&graph, &abort);
                Err(self.fail(MigrateError::Load {
                    source: abort.error,
                    partial: Box::new(partial),
                }))
            }
        }
    }

    fn parse(&mut self) -> Result<ParsedGraph> {
        info!(input = %self.source, "parsing GraphML");
        let parsed = match &self.source {
            Source::File(path) => parse_graphml_file(path),
            Source::Text(text) => parse_graphml(text),
        };
        let parsed = parsed.map_err(|e| self.fail(e.into()))?;
        info!(
            nodes = parsed.topology.node_count,
            edges = parsed.topology.edge_count,
            "analyzed GraphML"
        );
        self.transition(Stage::Parsed);
        Ok(parsed)
    }

    fn configured_document(&mut self) -> Result<GraphDocument> {
        let document = self.analyze()?.document.clone();
        let config = match &self.config {
            None => Ok(None),
            Some(ConfigSource::Inline(config)) => config.validate().map(|_| Some(config.clone())),
            Some(ConfigSource::File(path)) => MigrationConfig::from_path(path).map(Some),
        };
        let mapped = config.and_then(|config| match config {
            Some(config) => apply_config(&document, &config),
            None => Ok(document),
        });
        let document = mapped.map_err(|e| self.fail(e.into()))?;
        self.transition(Stage::Configured);
        Ok(document)
    }

    fn transition(&mut self, next: Stage) {
        info!(from = %self.stage, to = %next, "migration stage");
        self.stage = next;
    }

    fn fail(&mut self, err: MigrateError) -> MigrateError {
        error!(stage = %self.stage, error = %err, "migration failed");
        self.stage = Stage::Failed;
        err
    }
}

fn output_error(path: &Path, err: impl fmt::Display) -> MigrateError {
    MigrateError::Output {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gml_test::{fixtures, InMemoryGraph};

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Unparsed.to_string(), "unparsed");
        assert_eq!(Stage::Failed.to_string(), "failed");
    }

    #[test]
    fn test_analyze_is_cached() {
        let mut migrator = Migrator::from_graphml(fixtures::scenario());
        let first = migrator.analyze().unwrap().clone();
        let second = migrator.analyze().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(migrator.stage(), Stage::Parsed);
    }

    #[test]
    fn test_parse_failure_marks_failed() {
        let mut migrator = Migrator::from_graphml("<graphml><graph>");
        let err = migrator.analyze().unwrap_err();
        assert!(matches!(err, MigrateError::Parse(_)));
        assert_eq!(migrator.stage(), Stage::Failed);
    }

    #[test]
    fn test_run_walks_every_stage() {
        let graph = InMemoryGraph::new();
        let mut migrator = Migrator::from_graphml(fixtures::scenario());
        let result = migrator.run(&graph.connector()).unwrap();
        assert_eq!(migrator.stage(), Stage::Closed);
        assert_eq!(result.nodes_loaded, 3);
        assert_eq!(result.relationships_loaded, 3);
        assert_eq!(graph.closes(), 1);
    }

    #[test]
    fn test_invalid_inline_config_fails_before_connecting() {
        let graph = InMemoryGraph::new();
        let config = MigrationConfig::from_json_str(
            r#"{"node_labels": {"Person": {"target_label": " "}}}"#,
        )
        .unwrap();
        let mut migrator = Migrator::from_graphml(fixtures::scenario()).with_config(config);
        let err = migrator.run(&graph.connector()).unwrap_err();
        assert!(matches!(err, MigrateError::Config(_)));
        assert_eq!(graph.connects(), 0);
        assert_eq!(migrator.stage(), Stage::Failed);
    }
}
