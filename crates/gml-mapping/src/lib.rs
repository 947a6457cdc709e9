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

//! Configuration-driven remapping of labels, relationship types and
//! property names.
//!
//! A [`MigrationConfig`] is usually generated from a topology report with
//! [`MigrationConfig::template`], edited by hand, then loaded with
//! [`MigrationConfig::from_path`] and applied with [`apply_config`].

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod mapper;

pub use config::{LabelMapping, MigrationConfig, TypeMapping};
pub use error::{ConfigError, Result};
pub use mapper::apply_config;
