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

//! VectorSync - dataset synchronization over Named Data Networking.
//!
//! This crate provides:
//! - A bit-exact NDN TLV wire codec (names, interests, signed data)
//! - Version-vector algebra and the per-peer last-data-index table
//! - A bounded observation log for round-boundary gap recovery
//! - The protocol state machine (`publish`, `on_sync_interest`, `on_data`)
//! - A fetch orchestrator with a default retry-once timeout policy
//! - A deterministic in-process runtime for tests and the CLI demo
//! - Prometheus metrics and TOML-driven configuration

/// Wire codec: NDN name, interest and data (en/de)coding.
pub mod codec;
/// Protocol-wide constants and their documented defaults.
pub mod constants;
/// Version-vector algebra (merge, self-advance with round rollover).
pub mod vv;
/// Bounded per-round observation log for gap recovery.
pub mod obslog;
/// Bounded FIFO cache of recently published items, keyed by (round, seq).
pub mod pubcache;
/// Node/roster/protocol configuration, loaded from TOML.
pub mod config;
/// The protocol engine's error surface (`bad_format` / `no_space`).
pub mod error;
/// Collaborator interface to the network, plus an in-process test runtime.
pub mod runtime;
/// Fetch orchestrator: issues and tracks recovery interests.
pub mod fetch;
/// Prometheus metrics for a running node.
pub mod metrics;
/// The protocol state machine (`VSyncNode`).
pub mod state;

pub use config::VsyncConfig;
pub use error::VsyncError;
pub use metrics::Metrics;
pub use state::VSyncNode;
