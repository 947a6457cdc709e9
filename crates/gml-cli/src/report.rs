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

//! Console output.

use colored::Colorize;
use gml_core::TopologyReport;
use gml_migrate::MigrationResult;
use std::path::Path;

/// Print the topology summary shown before every mode.
pub fn print_analysis(topology: &TopologyReport) {
    println!();
    println!("{}", "GraphML Analysis:".bold());
    for line in topology.to_string().lines() {
        println!("  {}", line);
    }
}

/// Print where a generated file went.
pub fn print_saved(what: &str, path: &Path) {
    println!();
    println!("{} saved to {}", what, path.display());
}

/// Print the closing line of analyze-only mode.
pub fn print_analyze_only() {
    println!();
    println!("Analyze-only mode. Exiting without loading to Neo4j.");
}

/// Print the counts of a finished migration.
pub fn print_result(result: &MigrationResult) {
    println!();
    println!("{}", "Migration completed successfully!".green().bold());
    println!("  Nodes loaded: {}", result.nodes_loaded);
    println!("  Relationships loaded: {}", result.relationships_loaded);
    println!("  Graph: {}", result.graph);
    if !result.indexes_skipped.is_empty() {
        println!(
            "  {} {}",
            "Indexes skipped:".yellow(),
            result.indexes_skipped.join(", ")
        );
    }
}
