// Copyright (c) 2026 VectorSync
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use prometheus::{IntCounter, Registry};
use thiserror::Error;

/// Metrics errors.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus")]
    Prom,
}

/// Metrics container for a running VectorSync node.
#[derive(Clone)]
pub struct Metrics {
    /// Registry.
    pub registry: Registry,

    /// Successful local publications.
    pub publish_total: IntCounter,
    /// Round rollovers triggered by sequence-number ceiling.
    pub round_rollovers_total: IntCounter,
    /// Fetch interests expressed by the orchestrator, including retries.
    pub fetch_interests_total: IntCounter,
    /// Interests/data rejected with `bad_format`.
    pub bad_format_total: IntCounter,
    /// Publications rejected with `no_space`.
    pub no_space_total: IntCounter,
}

impl Metrics {
    /// Create and register metrics.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let publish_total = IntCounter::new("vsync_publish_total", "Successful local publications")
            .map_err(|_| MetricsError::Prom)?;
        let round_rollovers_total =
            IntCounter::new("vsync_round_rollovers_total", "Round rollovers triggered by sequence ceiling")
                .map_err(|_| MetricsError::Prom)?;
        let fetch_interests_total =
            IntCounter::new("vsync_fetch_interests_total", "Fetch interests expressed, including retries")
                .map_err(|_| MetricsError::Prom)?;
        let bad_format_total = IntCounter::new("vsync_bad_format_total", "Packets rejected with bad_format")
            .map_err(|_| MetricsError::Prom)?;
        let no_space_total = IntCounter::new("vsync_no_space_total", "Publications rejected with no_space")
            .map_err(|_| MetricsError::Prom)?;

        registry.register(Box::new(publish_total.clone())).map_err(|_| MetricsError::Prom)?;
        registry.register(Box::new(round_rollovers_total.clone())).map_err(|_| MetricsError::Prom)?;
        registry.register(Box::new(fetch_interests_total.clone())).map_err(|_| MetricsError::Prom)?;
        registry.register(Box::new(bad_format_total.clone())).map_err(|_| MetricsError::Prom)?;
        registry.register(Box::new(no_space_total.clone())).map_err(|_| MetricsError::Prom)?;

        Ok(Self {
            registry,
            publish_total,
            round_rollovers_total,
            fetch_interests_total,
            bad_format_total,
            no_space_total,
        })
    }
}
