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

//! Database client contract.
//!
//! The loader talks to the database only through [`Connector`] and
//! [`GraphClient`], so the Bolt driver, the script writer and test fakes are
//! interchangeable.

use crate::cypher::CypherStatement;
use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Default Bolt host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default Bolt port.
pub const DEFAULT_PORT: u16 = 7687;
/// Default graph space (database name).
pub const DEFAULT_GRAPH: &str = "neo4j";
/// Default per-statement timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to connect.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionParams {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Optional user name.
    pub username: Option<String>,
    /// Optional password. Never printed.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Target graph space.
    pub graph: String,
    /// Per-statement timeout.
    pub timeout: Duration,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: None,
            password: None,
            graph: DEFAULT_GRAPH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ConnectionParams {
    /// Parameters for `host:port` with defaults elsewhere.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Set credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the target graph space.
    pub fn with_graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = graph.into();
        self
    }

    /// Set the per-statement timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `host:port/graph`, for messages.
    pub fn endpoint(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.graph)
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("graph", &self.graph)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// An open session with a graph database.
pub trait GraphClient {
    /// Execute one statement with its parameters.
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), ClientError>;

    /// Release the session. Called exactly once by [`Session`].
    fn close(&mut self);
}

/// Opens [`GraphClient`] sessions.
pub trait Connector {
    /// Client type produced.
    type Client: GraphClient;

    /// Open a session described by `params`.
    fn connect(&self, params: &ConnectionParams) -> Result<Self::Client, ClientError>;
}

/// Scoped ownership of a client: closes it on [`close`](Session::close) or
/// on drop, whichever comes first, and never twice.
pub struct Session<C: GraphClient> {
    client: Option<C>,
}

impl<C: GraphClient> Session<C> {
    /// Take ownership of an open client.
    pub fn new(client: C) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Execute through the owned client.
    pub fn execute(&mut self, statement: &CypherStatement) -> Result<(), ClientError> {
        match self.client.as_mut() {
            Some(client) => client.execute(statement),
            None => Err(ClientError::Connection("session already closed".to_string())),
        }
    }

    /// True until the client has been closed.
    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    /// Close the client if still open.
    pub fn close(&mut self) {
        if let Some(mut client) = self.client.take() {
            debug!("closing database session");
            client.close();
        }
    }
}

impl<C: GraphClient> Drop for Session<C> {
    fn drop(&mut self) {
        self.close();
    }
}
