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

//! Neo4j over Bolt, via `neo4rs`.
//!
//! The loader is synchronous; each client owns a current-thread runtime and
//! blocks on one statement at a time, bounded by the connection timeout.

use crate::client::{ConnectionParams, Connector, GraphClient};
use crate::cypher::{CypherStatement, CypherValue};
use crate::error::ClientError;
use neo4rs::{BoltNull, BoltType, ConfigBuilder, Graph, Query};
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Opens [`BoltClient`] sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoltConnector;

/// A Bolt session.
pub struct BoltClient {
    runtime: Runtime,
    graph: Graph,
    timeout: Duration,
}

impl Connector for BoltConnector {
    type Client = BoltClient;

    fn connect(&self, params: &ConnectionParams) -> Result<BoltClient, ClientError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let mut builder = ConfigBuilder::default()
            .uri(format!("{}:{}", params.host, params.port))
            .db(params.graph.as_str());
        if let Some(user) = &params.username {
            builder = builder.user(user.as_str());
        }
        if let Some(password) = &params.password {
            builder = builder.password(password.as_str());
        }
        let config = builder
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let graph = {
            let _guard = runtime.enter();
            Graph::connect(config).map_err(|e| ClientError::Connection(e.to_string()))?
        };

        let client = BoltClient {
            runtime,
            graph,
            timeout: params.timeout,
        };
        // The pool connects lazily; run a trivial query so a bad endpoint fails here.
        client
            .run(Query::new("RETURN 1".to_string()))
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        debug!(endpoint = %params.endpoint(), "bolt session open");
        Ok(client)
    }
}

impl BoltClient {
    fn run(&self, query: Query) -> Result<(), ClientError> {
        let outcome = self
            .runtime
            .block_on(tokio::time::timeout(self.timeout, self.graph.run(query)));
        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ClientError::Query(e.to_string())),
            Err(_) => Err(ClientError::Timeout(self.timeout)),
        }
    }
}

impl GraphClient for BoltClient {
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), ClientError> {
        let mut query = Query::new(statement.query.clone());
        for (name, value) in &statement.parameters {
            query = query.param(name.as_str(), to_bolt(value));
        }
        self.run(query)
    }

    fn close(&mut self) {
        debug!("bolt session closed");
    }
}

fn to_bolt(value: &CypherValue) -> BoltType {
    match value {
        CypherValue::Null => BoltType::Null(BoltNull),
        CypherValue::Bool(b) => BoltType::from(*b),
        CypherValue::Int(i) => BoltType::from(*i),
        CypherValue::Float(f) => BoltType::from(*f),
        CypherValue::String(s) => BoltType::from(s.as_str()),
        CypherValue::List(items) => items.iter().map(to_bolt).collect::<Vec<BoltType>>().into(),
        CypherValue::Map(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), to_bolt(v)))
            .collect::<HashMap<String, BoltType>>()
            .into(),
    }
}
