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

//! Command-line arguments and dispatch.

use crate::error::Result;
use crate::report;
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use gml_migrate::Migrator;
use gml_neo4j::{
    BoltConnector, ConnectionParams, LoadOptions, ScriptConnector, DEFAULT_BATCH_SIZE,
    DEFAULT_GRAPH, DEFAULT_HOST, DEFAULT_ID_PROPERTY, DEFAULT_PORT,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Migrate a GraphML file into Neo4j.
///
/// # Examples
///
/// ```bash
/// # Print the topology and stop
/// graphml-migrate graph.graphml --analyze-only
///
/// # Write an editable mapping template
/// graphml-migrate graph.graphml --generate-config migration.json
///
/// # Load with the edited mapping
/// graphml-migrate graph.graphml --config migration.json --username neo4j --password secret
/// ```
#[derive(Debug, Parser)]
#[command(name = "graphml-migrate")]
#[command(author, version, about = "Migrate GraphML files to Neo4j", long_about = None)]
pub struct Cli {
    /// Path to the GraphML file
    pub input: PathBuf,

    /// Migration config (JSON, or YAML for .yaml/.yml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Neo4j host
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Neo4j Bolt port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Neo4j username
    #[arg(long)]
    pub username: Option<String>,

    /// Neo4j password
    #[arg(long)]
    pub password: Option<String>,

    /// Target database
    #[arg(long, default_value = DEFAULT_GRAPH)]
    pub graph_name: String,

    /// Only analyze the topology; do not load
    #[arg(long)]
    pub analyze_only: bool,

    /// Write a config template and exit
    #[arg(long, value_name = "OUTPUT_FILE")]
    pub generate_config: Option<PathBuf>,

    /// Write a topology report and exit
    #[arg(long, value_name = "OUTPUT_FILE")]
    pub generate_topology: Option<PathBuf>,

    /// Skip id index creation
    #[arg(long)]
    pub no_indexes: bool,

    /// Rows per UNWIND batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub batch_size: usize,

    /// Property that stores the GraphML id
    #[arg(long, default_value = DEFAULT_ID_PROPERTY)]
    pub id_property: String,

    /// Per-statement timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Write the Cypher statements to FILE instead of connecting
    #[arg(long, value_name = "FILE")]
    pub emit_cypher: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a run does after the analysis summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Write the topology report.
    GenerateTopology(PathBuf),
    /// Write a config template.
    GenerateConfig(PathBuf),
    /// Stop after the summary.
    AnalyzeOnly,
    /// Render the load as a Cypher script.
    EmitCypher(PathBuf),
    /// Load into Neo4j over Bolt.
    Load,
}

impl Cli {
    /// Selected mode. The report modes take precedence over loading, in the
    /// order topology, config, analyze-only.
    pub fn mode(&self) -> Mode {
        if let Some(path) = &self.generate_topology {
            Mode::GenerateTopology(path.clone())
        } else if let Some(path) = &self.generate_config {
            Mode::GenerateConfig(path.clone())
        } else if self.analyze_only {
            Mode::AnalyzeOnly
        } else if let Some(path) = &self.emit_cypher {
            Mode::EmitCypher(path.clone())
        } else {
            Mode::Load
        }
    }

    /// Target database from the connection flags.
    pub fn connection_params(&self) -> ConnectionParams {
        let mut params = ConnectionParams::new(&self.host, self.port)
            .with_graph(&self.graph_name)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        params.username = self.username.clone();
        params.password = self.password.clone();
        params
    }

    /// Loader options from the batching flags.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::builder()
            .batch_size(self.batch_size)
            .create_indexes(!self.no_indexes)
            .id_property(&self.id_property)
            .build()
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Run the selected mode.
    pub fn execute(&self) -> Result<()> {
        let params = self.connection_params();
        let mut migrator = Migrator::new(&self.input)
            .with_load_options(self.load_options())
            .with_connection(params.clone());
        if let Some(config) = &self.config {
            migrator = migrator.with_config_file(config);
        }

        report::print_analysis(&migrator.analyze()?.topology);

        let mode = self.mode();
        debug!(?mode, "selected mode");
        match mode {
            Mode::GenerateTopology(path) => {
                migrator.write_topology_report(&path)?;
                report::print_saved("Topology report", &path);
            }
            Mode::GenerateConfig(path) => {
                migrator.write_config_template(&path)?;
                report::print_saved("Configuration template", &path);
            }
            Mode::AnalyzeOnly => report::print_analyze_only(),
            Mode::EmitCypher(path) => {
                println!();
                println!("Writing Cypher for graph '{}' to {}...", params.graph, path.display());
                let result = migrator.run(&ScriptConnector::new(&path))?;
                report::print_result(&result);
            }
            Mode::Load => {
                println!();
                println!("Connecting to Neo4j at {}...", params.endpoint());
                let result = migrator.run(&BoltConnector)?;
                report::print_result(&result);
            }
        }
        Ok(())
    }
}
