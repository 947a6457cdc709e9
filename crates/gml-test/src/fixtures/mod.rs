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

//! GraphML test fixtures.
//!
//! - **documents**: valid inputs, plus the expected model for the scenario
//! - **errors**: invalid inputs with the error kind each must produce
//! - **builders**: [`GraphmlBuilder`](builders::GraphmlBuilder) for custom inputs

pub mod builders;
mod documents;
pub mod errors;

pub use documents::*;

/// Every valid fixture, by name.
pub fn all() -> Vec<(&'static str, String)> {
    vec![
        ("scenario", scenario()),
        ("unlabeled", unlabeled()),
        ("typed_values", typed_values()),
        ("with_defaults", with_defaults()),
        ("people", people(25)),
    ]
}
