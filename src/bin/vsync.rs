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

//! VectorSync node entrypoint: loads a roster/protocol config, drives a
//! demo publish loop on a timer, and logs every sync interest and data
//! item it sees.

use std::time::Duration;

use tracing::{info, warn};

use vectorsync::codec::parse_data;
use vectorsync::config::VsyncConfig;
use vectorsync::metrics::Metrics;
use vectorsync::pubcache::PublicationCache;
use vectorsync::runtime::FakeRuntime;
use vectorsync::VSyncNode;

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .compact()
        .try_init();

    let config_path = env("VSYNC_CONFIG", "./vsync.toml");
    let cfg = match VsyncConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("failed to load {config_path}: {e}");
            std::process::exit(1);
        }
    };

    let metrics = match Metrics::new() {
        Ok(m) => m,
        Err(_) => {
            eprintln!("metrics init failed");
            std::process::exit(1);
        }
    };

    info!(node = %cfg.node.name, index = cfg.node.index, "vsync node starting");

    let mut runtime = FakeRuntime::new();
    let mut node = VSyncNode::from_config(&cfg);
    let cache_capacity = (cfg.protocol.observation_window * cfg.protocol.max_seq_num as usize).max(1);
    let mut cache = PublicationCache::new(cache_capacity);

    let publish_interval = Duration::from_millis(cfg.protocol.publish_interval_ms as u64);
    let mut ticker = tokio::time::interval(publish_interval);

    loop {
        ticker.tick().await;
        runtime.advance(cfg.protocol.publish_interval_ms as u64);

        let payload = vec![0u8; cfg.protocol.bytes_per_pkt];
        match node.publish(&mut runtime, &metrics, None, &payload) {
            Ok(data_wire) => {
                if let Ok(parsed) = parse_data(&data_wire) {
                    if let (Ok(round_c), Ok(seq_c)) = (parsed.name.component_at(1), parsed.name.component_at(2)) {
                        if let (Ok(round), Ok(seq)) =
                            (vectorsync::codec::component_as_u32(round_c), vectorsync::codec::component_as_u8(seq_c))
                        {
                            cache.insert(round, seq, data_wire.clone());
                        }
                    }
                }
                info!(round = node.round(), vv = ?node.vv(), bytes = data_wire.len(), cached = cache.len(), "published");
            }
            Err(e) => {
                warn!(?e, "publish failed");
            }
        }

        for expired in runtime.take_expired() {
            warn!(bytes = expired.wire.len(), "sync/fetch interest expired without a reply");
        }
    }
}
