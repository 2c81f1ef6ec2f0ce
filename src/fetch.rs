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

//! Fetch orchestrator: issues the interests needed to retrieve missing
//! items discovered by the protocol state machine, hooking caller-supplied
//! data and timeout callbacks into the runtime. Grounded on
//! `ndn_sync_send_interest`/`ndn_app_express_interest`'s
//! `(name, on_data_cb, lifetime, on_timeout_cb)` shape.

use std::cell::RefCell;
use std::rc::Rc;

use crate::codec::{build_interest, Name};
use crate::error::VsyncError;
use crate::metrics::Metrics;
use crate::runtime::NdnRuntime;

/// Invoked when data matching a fetch's name arrives.
pub trait FetchDataCallback {
    /// Handle the content delivered for this fetch.
    fn on_data(&mut self, content: &[u8]);
}

/// Invoked when a fetch's interest times out without a matching reply.
pub trait FetchTimeoutCallback {
    /// Observe the timeout. The orchestrator applies the default retry
    /// policy regardless of what this callback does; it exists for
    /// callers that want to log or count timeouts.
    fn on_timeout(&mut self, name: &Name);
}

/// Shared, single-threaded handle to a data callback.
pub type DataCb = Rc<RefCell<dyn FetchDataCallback>>;
/// Shared, single-threaded handle to a timeout callback.
pub type TimeoutCb = Rc<RefCell<dyn FetchTimeoutCallback>>;

struct PendingFetch {
    name: Name,
    on_data: Option<DataCb>,
    on_timeout: Option<TimeoutCb>,
    retried: bool,
}

/// Issues fetch interests and tracks them until a matching data packet
/// arrives or the retry budget (one retry, per spec) is exhausted.
pub struct FetchOrchestrator {
    lifetime_ms: u32,
    retry_lifetime_ms: u32,
    pending: Vec<PendingFetch>,
}

impl FetchOrchestrator {
    /// Create an orchestrator using `lifetime_ms` for the initial interest
    /// and `retry_lifetime_ms` for the single default retry.
    pub fn new(lifetime_ms: u32, retry_lifetime_ms: u32) -> Self {
        Self { lifetime_ms, retry_lifetime_ms, pending: Vec::new() }
    }

    /// Express an interest for `name`, registering optional callbacks for
    /// its eventual data or timeout.
    pub fn fetch(
        &mut self,
        runtime: &mut dyn NdnRuntime,
        metrics: &Metrics,
        name: Name,
        on_data: Option<DataCb>,
        on_timeout: Option<TimeoutCb>,
    ) -> Result<(), VsyncError> {
        let wire = build_interest(&name, self.lifetime_ms);
        runtime.express_interest(wire, self.lifetime_ms).map_err(|_| {
            metrics.no_space_total.inc();
            VsyncError::NoSpace
        })?;
        metrics.fetch_interests_total.inc();
        self.pending.push(PendingFetch { name, on_data, on_timeout, retried: false });
        Ok(())
    }

    /// Deliver `content` to the callback registered for `name`, if any,
    /// and stop tracking that fetch. A no-op if nothing is pending for
    /// `name` (duplicates across independent triggers are not
    /// deduplicated at this layer, per spec §4.5).
    pub fn deliver(&mut self, name: &Name, content: &[u8]) {
        if let Some(pos) = self.pending.iter().position(|p| &p.name == name) {
            let pending = self.pending.remove(pos);
            if let Some(cb) = pending.on_data {
                cb.borrow_mut().on_data(content);
            }
        }
    }

    /// Apply the default timeout policy for `name`: re-express once with
    /// `retry_lifetime_ms`, then give up. A no-op if nothing is pending
    /// for `name`.
    pub fn handle_timeout(
        &mut self,
        runtime: &mut dyn NdnRuntime,
        metrics: &Metrics,
        name: &Name,
    ) -> Result<(), VsyncError> {
        let pos = match self.pending.iter().position(|p| &p.name == name) {
            Some(pos) => pos,
            None => return Ok(()),
        };
        if let Some(cb) = self.pending[pos].on_timeout.clone() {
            cb.borrow_mut().on_timeout(name);
        }
        if self.pending[pos].retried {
            self.pending.remove(pos);
            return Ok(());
        }
        let wire = build_interest(name, self.retry_lifetime_ms);
        runtime.express_interest(wire, self.retry_lifetime_ms).map_err(|_| {
            metrics.no_space_total.inc();
            VsyncError::NoSpace
        })?;
        metrics.fetch_interests_total.inc();
        self.pending[pos].retried = true;
        Ok(())
    }

    /// Number of fetches still awaiting data or a final timeout.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::FakeRuntime;

    struct RecordingDataCb {
        received: Vec<Vec<u8>>,
    }
    impl FetchDataCallback for RecordingDataCb {
        fn on_data(&mut self, content: &[u8]) {
            self.received.push(content.to_vec());
        }
    }

    struct CountingTimeoutCb {
        count: usize,
    }
    impl FetchTimeoutCallback for CountingTimeoutCb {
        fn on_timeout(&mut self, _name: &Name) {
            self.count += 1;
        }
    }

    #[test]
    fn delivered_data_reaches_callback_and_clears_pending() {
        let mut rt = FakeRuntime::new();
        let metrics = Metrics::new().unwrap();
        let mut orch = FetchOrchestrator::new(1000, 20_000);
        let name = Name::from_uri("/alice/0/1");
        let cb = Rc::new(RefCell::new(RecordingDataCb { received: Vec::new() }));
        orch.fetch(&mut rt, &metrics, name.clone(), Some(cb.clone()), None).unwrap();
        assert_eq!(orch.pending_count(), 1);

        orch.deliver(&name, b"hello");
        assert_eq!(cb.borrow().received, vec![b"hello".to_vec()]);
        assert_eq!(orch.pending_count(), 0);
    }

    #[test]
    fn timeout_retries_once_then_gives_up() {
        let mut rt = FakeRuntime::new();
        let metrics = Metrics::new().unwrap();
        let mut orch = FetchOrchestrator::new(1000, 20_000);
        let name = Name::from_uri("/alice/0/1");
        let timeout_cb = Rc::new(RefCell::new(CountingTimeoutCb { count: 0 }));
        orch.fetch(&mut rt, &metrics, name.clone(), None, Some(timeout_cb.clone())).unwrap();

        orch.handle_timeout(&mut rt, &metrics, &name).unwrap();
        assert_eq!(orch.pending_count(), 1);
        assert_eq!(timeout_cb.borrow().count, 1);

        orch.handle_timeout(&mut rt, &metrics, &name).unwrap();
        assert_eq!(orch.pending_count(), 0);
        assert_eq!(timeout_cb.borrow().count, 2);
    }

    #[test]
    fn fetch_propagates_no_space() {
        let mut rt = FakeRuntime::with_capacity(0);
        let metrics = Metrics::new().unwrap();
        let mut orch = FetchOrchestrator::new(1000, 20_000);
        let name = Name::from_uri("/alice/0/1");
        assert_eq!(orch.fetch(&mut rt, &metrics, name, None, None), Err(VsyncError::NoSpace));
    }
}
