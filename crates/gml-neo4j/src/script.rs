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

//! Offline client that writes statements to a Cypher script.
//!
//! Parameters are inlined as escaped literals, so the file can be reviewed
//! and replayed with `cypher-shell -f`.

use crate::client::{ConnectionParams, Connector, GraphClient};
use crate::cypher::CypherStatement;
use crate::error::ClientError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Creates a [`ScriptClient`] writing to a fixed path.
#[derive(Debug, Clone)]
pub struct ScriptConnector {
    path: PathBuf,
}

impl ScriptConnector {
    /// Write the script to `path`, replacing any existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Connector for ScriptConnector {
    type Client = ScriptClient;

    fn connect(&self, params: &ConnectionParams) -> Result<ScriptClient, ClientError> {
        let file = File::create(&self.path).map_err(|e| {
            ClientError::Connection(format!("cannot create '{}': {}", self.path.display(), e))
        })?;
        let mut out = BufWriter::new(file);
        writeln!(out, "// target graph: {}", params.graph)
            .and_then(|()| out.flush())
            .map_err(|e| {
                ClientError::Connection(format!("cannot write '{}': {}", self.path.display(), e))
            })?;
        debug!(path = %self.path.display(), "writing cypher script");
        Ok(ScriptClient {
            out,
            statements: 0,
        })
    }
}

/// Appends each executed statement to the script file.
pub struct ScriptClient {
    out: BufWriter<File>,
    statements: usize,
}

impl ScriptClient {
    /// Statements written so far.
    pub fn statements(&self) -> usize {
        self.statements
    }
}

impl GraphClient for ScriptClient {
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), ClientError> {
        // Flushed per statement so a full disk fails the batch, not the close.
        writeln!(self.out, "\n{}", statement.format(true))
            .and_then(|()| self.out.flush())
            .map_err(|e| ClientError::Query(format!("cannot write cypher script: {}", e)))?;
        self.statements += 1;
        Ok(())
    }

    fn close(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "failed to flush cypher script");
        }
    }
}
