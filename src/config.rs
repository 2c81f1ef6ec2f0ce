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

//! Node configuration, loaded from a TOML document.

use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

use crate::constants::{DEFAULT_MAX_SEQ_NUM, DEFAULT_OBSERVATION_WINDOW, TIME_SEC_MS};

/// Errors encountered while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file was read but failed to parse as TOML.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// The parsed config failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration document for a VectorSync node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VsyncConfig {
    /// This node's settings.
    pub node: NodeSettings,
    /// The group roster this node synchronizes with.
    pub roster: RosterConfig,
    /// Protocol tuning knobs.
    #[serde(default)]
    pub protocol: ProtocolConfig,
}

/// Identity and signing settings for this node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeSettings {
    /// Human-readable node name, also used as its NDN name component.
    pub name: String,
    /// Index of this node within the roster's `peer_prefixes` list.
    pub index: usize,
    /// Optional HMAC key, hex-encoded. When absent, data is signed with a
    /// plain SHA-256 digest instead of HMAC.
    #[serde(default)]
    pub hmac_key_hex: Option<String>,
}

/// The fixed group of peers a node synchronizes with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RosterConfig {
    /// NDN name prefixes of every peer in the group, in index order.
    pub peer_prefixes: Vec<String>,
    /// Shared sync prefix all group members publish interests under.
    pub sync_prefix: String,
}

/// Protocol tuning knobs, all defaulted to the values recovered from the
/// original implementation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Sequence-number ceiling before a round rolls over.
    pub max_seq_num: u8,
    /// Number of rounds of history kept in the observation log.
    pub observation_window: usize,
    /// Default interest lifetime, in milliseconds.
    pub interest_lifetime_ms: u32,
    /// Retry lifetime used when a fetch interest times out, in milliseconds.
    pub retry_lifetime_ms: u32,
    /// Interval between this node's own publications, in milliseconds.
    pub publish_interval_ms: u32,
    /// Default payload size for the demo CLI's publish loop, in bytes.
    pub bytes_per_pkt: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_seq_num: DEFAULT_MAX_SEQ_NUM,
            observation_window: DEFAULT_OBSERVATION_WINDOW,
            interest_lifetime_ms: TIME_SEC_MS,
            retry_lifetime_ms: 20 * TIME_SEC_MS,
            publish_interval_ms: 500,
            bytes_per_pkt: 10,
        }
    }
}

impl VsyncConfig {
    /// Load and validate configuration from a TOML file at `path`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_string(), source })?;
        let cfg: VsyncConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_string(), source })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate cross-field invariants that `serde` alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster.peer_prefixes.is_empty() {
            return Err(ConfigError::Invalid("roster.peer_prefixes must not be empty".into()));
        }
        if self.node.index >= self.roster.peer_prefixes.len() {
            return Err(ConfigError::Invalid(format!(
                "node.index {} out of range for roster of size {}",
                self.node.index,
                self.roster.peer_prefixes.len()
            )));
        }
        if self.protocol.max_seq_num == 0 {
            return Err(ConfigError::Invalid("protocol.max_seq_num must be non-zero".into()));
        }
        if self.protocol.observation_window == 0 {
            return Err(ConfigError::Invalid("protocol.observation_window must be non-zero".into()));
        }
        Ok(())
    }

    /// Decode `node.hmac_key_hex`, if present.
    pub fn hmac_key(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        match &self.node.hmac_key_hex {
            Some(hex_str) => hex::decode(hex_str)
                .map(Some)
                .map_err(|e| ConfigError::Invalid(format!("node.hmac_key_hex is not valid hex: {e}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_toml() -> &'static str {
        r#"
        [node]
        name = "alice"
        index = 0

        [roster]
        peer_prefixes = ["/alice", "/bob"]
        sync_prefix = "/vsync"
        "#
    }

    #[test]
    fn parses_minimal_config_with_defaults() {
        let cfg: VsyncConfig = toml::from_str(sample_toml()).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.protocol.max_seq_num, DEFAULT_MAX_SEQ_NUM);
        assert_eq!(cfg.protocol.observation_window, DEFAULT_OBSERVATION_WINDOW);
    }

    #[test]
    fn rejects_out_of_range_node_index() {
        let mut cfg: VsyncConfig = toml::from_str(sample_toml()).unwrap();
        cfg.node.index = 5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_empty_roster() {
        let mut cfg: VsyncConfig = toml::from_str(sample_toml()).unwrap();
        cfg.roster.peer_prefixes.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn decodes_hmac_key_hex() {
        let mut cfg: VsyncConfig = toml::from_str(sample_toml()).unwrap();
        cfg.node.hmac_key_hex = Some("deadbeef".to_string());
        assert_eq!(cfg.hmac_key().unwrap(), Some(vec![0xde, 0xad, 0xbe, 0xef]));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        write!(file, "{}", sample_toml()).unwrap();

        let cfg = VsyncConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.node.name, "alice");
        assert_eq!(cfg.roster.peer_prefixes, vec!["/alice", "/bob"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(VsyncConfig::load("/nonexistent/vsync.toml"), Err(ConfigError::Read { .. })));
    }
}
