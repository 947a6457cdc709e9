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

//! Command-line integration tests.

use assert_cmd::Command;
use gml_test::fixtures;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn migrate_cmd() -> Command {
    Command::cargo_bin("graphml-migrate").expect("Failed to find graphml-migrate binary")
}

fn write_input(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("input.graphml");
    fs::write(&path, content).expect("Failed to write input");
    path
}

#[test]
fn test_help_output() {
    migrate_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--analyze-only"))
        .stdout(predicate::str::contains("--emit-cypher"));
}

#[test]
fn test_missing_input_argument_fails() {
    migrate_cmd().assert().failure();
}

#[test]
fn test_analyze_only_prints_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::scenario());

    migrate_cmd()
        .arg(&input)
        .arg("--analyze-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("GraphML Analysis:"))
        .stdout(predicate::str::contains("  Nodes: 3\n"))
        .stdout(predicate::str::contains("  Relationships: 3\n"))
        .stdout(predicate::str::contains("  Node labels: Company, Person\n"))
        .stdout(predicate::str::contains("  Relationship types: KNOWS, WORKS_AT\n"))
        .stdout(predicate::str::contains("Analyze-only mode"));
}

#[test]
fn test_analyze_only_with_default_labels() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::unlabeled());

    migrate_cmd()
        .arg(&input)
        .arg("--analyze-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("  Node labels: Node\n"))
        .stdout(predicate::str::contains("  Relationship types: RELATES_TO\n"));
}

#[test]
fn test_generate_config_writes_template() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::scenario());
    let output = dir.path().join("migration.json");

    migrate_cmd()
        .arg(&input)
        .arg("--generate-config")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration template saved to"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("\"node_labels\""));
    assert!(content.contains("\"target_label\": \"Person\""));
    assert!(content.contains("\"target_type\": \"WORKS_AT\""));
}

#[test]
fn test_generate_topology_writes_report() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::scenario());
    let output = dir.path().join("topology.json");

    migrate_cmd()
        .arg(&input)
        .arg("--generate-topology")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Topology report saved to"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("\"node_count\": 3"));
    assert!(content.contains("\"edge_count\": 3"));
}

#[test]
fn test_generated_config_drives_emitted_script() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::scenario());
    let config = dir.path().join("migration.yaml");
    fs::write(&config, "node_labels:\n  Company:\n    target_label: Organization\n").unwrap();
    let script = dir.path().join("load.cypher");

    migrate_cmd()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--emit-cypher")
        .arg(&script)
        .arg("--graph-name")
        .arg("social")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migration completed successfully!"))
        .stdout(predicate::str::contains("  Nodes loaded: 3\n"))
        .stdout(predicate::str::contains("  Relationships loaded: 3\n"))
        .stdout(predicate::str::contains("  Graph: social\n"));

    let content = fs::read_to_string(&script).unwrap();
    assert!(content.starts_with("// target graph: social"));
    assert!(content.contains("MERGE (n:Organization {_graphml_id: row.id})"));
    assert!(!content.contains("(n:Company"));
}

#[test]
fn test_emit_cypher_honours_load_flags() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::scenario());
    let script = dir.path().join("load.cypher");

    migrate_cmd()
        .arg(&input)
        .args(["--no-indexes", "--id-property", "gid", "--emit-cypher"])
        .arg(&script)
        .assert()
        .success();

    let content = fs::read_to_string(&script).unwrap();
    assert!(!content.contains("CREATE INDEX"));
    assert!(content.contains("{gid: row.id}"));
}

#[test]
fn test_malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "<graphml><graph>");

    migrate_cmd()
        .arg(&input)
        .arg("--analyze-only")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: parse error: malformed_xml"));
}

#[test]
fn test_dangling_edge_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::dangling());

    migrate_cmd()
        .arg(&input)
        .arg("--analyze-only")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dangling_reference"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    migrate_cmd()
        .arg(dir.path().join("absent.graphml"))
        .arg("--analyze-only")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.graphml"));
}

#[test]
fn test_invalid_config_fails_before_loading() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::scenario());
    let config = dir.path().join("bad.json");
    fs::write(&config, "{ not json").unwrap();
    let script = dir.path().join("load.cypher");

    migrate_cmd()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--emit-cypher")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: config error"));
    assert!(!script.exists());
}

#[test]
fn test_zero_batch_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::scenario());

    migrate_cmd()
        .arg(&input)
        .args(["--batch-size", "0", "--analyze-only"])
        .assert()
        .failure();
}

#[test]
fn test_unreachable_database_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &fixtures::scenario());

    migrate_cmd()
        .arg(&input)
        .args(["--host", "127.0.0.1", "--port", "1", "--timeout-secs", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Connecting to Neo4j at 127.0.0.1:1/neo4j"))
        .stderr(predicate::str::contains("Error: load error: cannot connect to 127.0.0.1:1/neo4j"));
}
