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

//! The protocol state machine: the per-node controller owning the local
//! version vector, current round, last-data-index table and observation
//! log, and exposing the three operations that drive synchronization —
//! `publish`, `on_sync_interest`, `on_data`.

use tracing::{info, warn};

use crate::codec::{
    build_data, build_interest, component_as_u32, component_as_u8, parse_data, parse_interest_name,
    varnum, MetaInfo, Name, SignatureKind,
};
use crate::config::VsyncConfig;
use crate::constants::FIRST_SEQ_NUM;
use crate::error::VsyncError;
use crate::fetch::{DataCb, FetchOrchestrator, TimeoutCb};
use crate::metrics::Metrics;
use crate::obslog::ObservationLog;
use crate::runtime::NdnRuntime;
use crate::vv;

/// Owns all mutable protocol state for one node: the no-global-singletons
/// replacement for `handle`/`node` in the original embedded demo.
pub struct VSyncNode {
    self_idx: usize,
    roster: Vec<Vec<u8>>,
    sync_prefix: Vec<u8>,
    round: u32,
    vv: Vec<u8>,
    ldi: Vec<(u32, u8)>,
    obslog: ObservationLog,
    max_seq_num: u8,
    interest_lifetime_ms: u32,
    fetch: FetchOrchestrator,
}

impl VSyncNode {
    /// Construct a node for `self_idx` within `roster` (peer data
    /// prefixes, position = `NodeId`), synchronizing under `sync_prefix`.
    pub fn new(
        self_idx: usize,
        roster: Vec<Vec<u8>>,
        sync_prefix: Vec<u8>,
        max_seq_num: u8,
        observation_window: usize,
        interest_lifetime_ms: u32,
        retry_lifetime_ms: u32,
    ) -> Self {
        let n = roster.len();
        Self {
            self_idx,
            roster,
            sync_prefix,
            round: 0,
            vv: vec![0u8; n],
            ldi: vec![(0u32, 0u8); n],
            obslog: ObservationLog::new(observation_window, n),
            max_seq_num,
            interest_lifetime_ms,
            fetch: FetchOrchestrator::new(interest_lifetime_ms, retry_lifetime_ms),
        }
    }

    /// Construct a node from a validated [`VsyncConfig`].
    pub fn from_config(cfg: &VsyncConfig) -> Self {
        let roster = cfg
            .roster
            .peer_prefixes
            .iter()
            .map(|s| s.trim_start_matches('/').as_bytes().to_vec())
            .collect();
        let sync_prefix = cfg.roster.sync_prefix.trim_start_matches('/').as_bytes().to_vec();
        Self::new(
            cfg.node.index,
            roster,
            sync_prefix,
            cfg.protocol.max_seq_num,
            cfg.protocol.observation_window,
            cfg.protocol.interest_lifetime_ms,
            cfg.protocol.retry_lifetime_ms,
        )
    }

    /// Current round.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Current local version vector.
    pub fn vv(&self) -> &[u8] {
        &self.vv
    }

    /// `(round, seq)` high-water mark known for `peer`.
    pub fn ldi(&self, peer: usize) -> (u32, u8) {
        self.ldi[peer]
    }

    /// Number of fetches issued but not yet answered or finally timed out.
    pub fn pending_fetches(&self) -> usize {
        self.fetch.pending_count()
    }

    fn peer_index_by_prefix(&self, prefix: &[u8]) -> Option<usize> {
        self.roster.iter().position(|p| p.as_slice() == prefix)
    }

    fn data_name(&self, peer: usize, round: u32, seq: u8) -> Name {
        let mut name = Name::new();
        name.append_bytes(&self.roster[peer]);
        name.append_u32_be(round);
        name.append_u8(seq);
        name
    }

    /// Publish `payload` as the next item in our own sequence, broadcast
    /// the resulting sync interest, and return the signed data packet.
    ///
    /// Per the resolved ordering question, `round`/`vv`/`ldi` only advance
    /// once the signed packet has been built and the sync interest has
    /// been accepted by the runtime; on any failure, state is unchanged.
    pub fn publish(
        &mut self,
        runtime: &mut dyn NdnRuntime,
        metrics: &Metrics,
        content_type: Option<u8>,
        payload: &[u8],
    ) -> Result<Vec<u8>, VsyncError> {
        let mut candidate_vv = self.vv.clone();
        let mut candidate_round = self.round;
        let (cand_round, cand_seq) =
            vv::advance_self(&mut candidate_vv, &mut candidate_round, self.self_idx, self.max_seq_num);
        let rolled_over = cand_round != self.round;

        let mut body = Vec::new();
        if cand_seq == FIRST_SEQ_NUM {
            let (prev_round, prev_seq) = self.ldi[self.self_idx];
            varnum::encode(prev_round as u64, &mut body);
            varnum::encode(prev_seq as u64, &mut body);
        }
        body.extend_from_slice(payload);

        let mut name = Name::new();
        name.append_bytes(&self.roster[self.self_idx]);
        name.append_u32_be(cand_round);
        name.append_u8(cand_seq);

        let meta = MetaInfo { content_type };
        let data_wire = build_data(&name, &meta, &body, SignatureKind::DigestSha256, None)?;

        let mut sync_name = Name::new();
        sync_name.append_bytes(&self.sync_prefix);
        sync_name.append_u32_be(cand_round);
        sync_name.append_bytes(&candidate_vv);
        let interest_wire = build_interest(&sync_name, self.interest_lifetime_ms);
        runtime.express_interest(interest_wire, self.interest_lifetime_ms)?;

        self.vv = candidate_vv;
        self.round = cand_round;
        self.ldi[self.self_idx] = (cand_round, cand_seq);
        self.obslog.record(cand_round, self.self_idx, cand_seq);

        metrics.publish_total.inc();
        if rolled_over {
            metrics.round_rollovers_total.inc();
            info!(round = self.round, "round rollover on publish");
        }

        Ok(data_wire)
    }

    /// Ingest a peer's sync interest: fold their round/vv into ours and
    /// issue the fetches needed to close any gap this reveals.
    pub fn on_sync_interest(
        &mut self,
        interest_wire: &[u8],
        runtime: &mut dyn NdnRuntime,
        metrics: &Metrics,
        on_data_cb: Option<DataCb>,
        on_timeout_cb: Option<TimeoutCb>,
    ) -> Result<(), VsyncError> {
        let name = parse_interest_name(interest_wire)?;
        if name.len() != 3 {
            metrics.bad_format_total.inc();
            return Err(VsyncError::BadFormat("sync interest name must have 3 components"));
        }
        let r_peer = component_as_u32(name.component_at(1)?)?;
        let vv_peer = name.component_at(2)?;
        if vv_peer.len() != self.roster.len() {
            metrics.bad_format_total.inc();
            return Err(VsyncError::BadFormat("version vector size mismatch"));
        }
        let vv_peer = vv_peer.to_vec();

        if r_peer > self.round {
            if r_peer > self.round + 1 {
                info!(from = self.round, to = r_peer, "multi-round gap, issuing recovery sweep");
                for rr in self.round..(r_peer - 1) {
                    for peer in 0..self.roster.len() {
                        let name = self.data_name(peer, rr + 1, FIRST_SEQ_NUM);
                        self.fetch.fetch(runtime, metrics, name, on_data_cb.clone(), on_timeout_cb.clone())?;
                    }
                }
            }
            self.round = r_peer;
            self.vv.iter_mut().for_each(|v| *v = 0);
        }

        let old_vv = self.vv.clone();
        vv::merge_in_place(&mut self.vv, &vv_peer);

        for peer in 0..self.roster.len() {
            let lo = old_vv[peer];
            let hi = vv_peer[peer];
            if hi > lo {
                for s in (lo + 1)..=hi {
                    let name = self.data_name(peer, r_peer, s);
                    self.fetch.fetch(runtime, metrics, name, on_data_cb.clone(), on_timeout_cb.clone())?;
                }
            }
        }

        Ok(())
    }

    /// Ingest a data packet: update `LDI`/observation log, and — for the
    /// first item of a round — use the piggyback to fetch any of that
    /// author's items we missed around the round boundary. Returns a view
    /// of the user payload (piggyback stripped), borrowed from `data_wire`.
    pub fn on_data<'a>(
        &mut self,
        data_wire: &'a [u8],
        runtime: &mut dyn NdnRuntime,
        metrics: &Metrics,
        on_data_cb: Option<DataCb>,
        on_timeout_cb: Option<TimeoutCb>,
    ) -> Result<&'a [u8], VsyncError> {
        let parsed = parse_data(data_wire)?;
        if parsed.name.len() != 3 {
            metrics.bad_format_total.inc();
            return Err(VsyncError::BadFormat("data name must have 3 components"));
        }
        let prefix = parsed.name.component_at(0)?;
        let round = component_as_u32(parsed.name.component_at(1)?)?;
        let seq = component_as_u8(parsed.name.component_at(2)?)?;
        let peer = self.peer_index_by_prefix(prefix).ok_or_else(|| {
            metrics.bad_format_total.inc();
            VsyncError::BadFormat("unknown peer prefix")
        })?;

        let mut content = parsed.content;
        if seq == FIRST_SEQ_NUM {
            let (pg_round, consumed) = varnum::decode(content)?;
            content = &content[consumed..];
            let (pg_seq, consumed) = varnum::decode(content)?;
            content = &content[consumed..];
            let pg_round = pg_round as u32;
            let pg_seq = pg_seq as u8;

            if pg_round <= self.ldi[peer].0 {
                let known = self.obslog.query(pg_round, peer).unwrap_or(0);
                if pg_seq > known {
                    for s in (known + 1)..=pg_seq {
                        let name = self.data_name(peer, pg_round, s);
                        self.fetch.fetch(runtime, metrics, name, on_data_cb.clone(), on_timeout_cb.clone())?;
                    }
                }
            }
        }

        if (round, seq) > self.ldi[peer] {
            self.ldi[peer] = (round, seq);
        } else if (round, seq) < self.ldi[peer] {
            warn!(peer, round, seq, "late data, LDI unchanged");
        }
        self.obslog.record(round, peer, seq);

        Ok(content)
    }
}
