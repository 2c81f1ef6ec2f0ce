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

//! Observation log: a ring of `W` per-round version vectors, keyed by
//! `round mod W`, used to recognize "I already know about this round, I
//! just missed item k" when a peer's piggyback points further back than
//! our current high-water mark.

/// One ring slot: the round it was last written for, plus the per-peer
/// high-water marks observed in that round.
#[derive(Clone, Debug)]
struct Slot {
    round: Option<u32>,
    vv: Vec<u8>,
}

/// Ring buffer of `W` per-round version vectors over `N` peers.
#[derive(Clone, Debug)]
pub struct ObservationLog {
    window: usize,
    num_peers: usize,
    slots: Vec<Slot>,
}

impl ObservationLog {
    /// Create a log with the given window size `W` and peer count `N`.
    pub fn new(window: usize, num_peers: usize) -> Self {
        assert!(window > 0, "observation window must be non-zero");
        Self {
            window,
            num_peers,
            slots: vec![Slot { round: None, vv: vec![0u8; num_peers] }; window],
        }
    }

    /// Record that peer `i` was observed at `(round, seq)`. Slots are
    /// displaced silently when `round` wraps back onto a stale slot.
    pub fn record(&mut self, round: u32, peer: usize, seq: u8) {
        let idx = (round as usize) % self.window;
        let slot = &mut self.slots[idx];
        if slot.round != Some(round) {
            slot.round = Some(round);
            slot.vv.iter_mut().for_each(|v| *v = 0);
        }
        slot.vv[peer] = slot.vv[peer].max(seq);
    }

    /// Query the highest sequence number recorded for peer `i` in `round`.
    /// Returns `None` if the engine has no trustworthy information for
    /// that exact round (never seen, or since displaced by the ring).
    pub fn query(&self, round: u32, peer: usize) -> Option<u8> {
        let idx = (round as usize) % self.window;
        let slot = &self.slots[idx];
        if slot.round == Some(round) {
            Some(slot.vv[peer])
        } else {
            None
        }
    }

    /// Window size `W`.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Peer count `N`.
    pub fn num_peers(&self) -> usize {
        self.num_peers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_queries_within_window() {
        let mut log = ObservationLog::new(8, 2);
        log.record(3, 1, 5);
        assert_eq!(log.query(3, 1), Some(5));
        assert_eq!(log.query(3, 0), Some(0));
    }

    #[test]
    fn unseen_round_is_no_information() {
        let log = ObservationLog::new(8, 2);
        assert_eq!(log.query(0, 0), None);
    }

    #[test]
    fn last_write_wins_is_max_not_overwrite() {
        let mut log = ObservationLog::new(8, 2);
        log.record(1, 0, 3);
        log.record(1, 0, 2);
        assert_eq!(log.query(1, 0), Some(3));
        log.record(1, 0, 9);
        assert_eq!(log.query(1, 0), Some(9));
    }

    #[test]
    fn stale_round_is_displaced_silently() {
        let mut log = ObservationLog::new(8, 2);
        log.record(0, 0, 7);
        assert_eq!(log.query(0, 0), Some(7));
        // round 8 maps to the same slot as round 0 and displaces it.
        log.record(8, 0, 1);
        assert_eq!(log.query(0, 0), None);
        assert_eq!(log.query(8, 0), Some(1));
    }

    #[test]
    fn every_observed_seq_is_a_lower_bound_invariant() {
        let mut log = ObservationLog::new(8, 3);
        let observations = [(0u32, 0usize, 2u8), (0, 1, 4), (0, 0, 1), (1, 2, 9)];
        for &(round, peer, seq) in &observations {
            log.record(round, peer, seq);
        }
        for &(round, peer, seq) in &observations {
            assert!(log.query(round, peer).unwrap() >= seq);
        }
    }
}
