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

//! The NDN application runtime: the collaborator interface a protocol
//! engine calls out to for interest expression and timer scheduling, plus
//! an in-process deterministic implementation used by the CLI demo and
//! tests. Grounded on the event-loop shape of a libp2p transport task,
//! reduced to the single-threaded, lock-free, cooperative model the
//! protocol requires (spec §5): no background thread ever touches node
//! state concurrently with the engine.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A pending interest expressed by the engine, with the wire name it
/// carries and the lifetime after which it should be considered timed
/// out if no matching data arrived.
#[derive(Clone, Debug)]
pub struct PendingInterest {
    /// Wire-encoded Interest packet.
    pub wire: Vec<u8>,
    /// Virtual time (milliseconds) at which this interest expires.
    pub expires_at_ms: u64,
}

/// Signalled when the runtime has no room to accept more outstanding
/// work (an expressed interest or a put data). Maps onto the protocol
/// engine's `no_space` outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoSpace;

/// Collaborator interface the protocol engine uses to talk to the
/// network. Implementations own delivery; the engine only ever calls
/// these methods and never touches a socket directly.
pub trait NdnRuntime {
    /// Express an Interest packet with the given lifetime, in milliseconds.
    fn express_interest(&mut self, wire: Vec<u8>, lifetime_ms: u32) -> Result<(), NoSpace>;

    /// Publish a Data packet (e.g. in response to a matching interest, or
    /// as a freshly produced publication broadcast to the network).
    fn put_data(&mut self, wire: Vec<u8>) -> Result<(), NoSpace>;

    /// Current virtual or wall-clock time, in milliseconds.
    fn now_ms(&self) -> u64;
}

/// In-process, single-threaded deterministic runtime. Time is advanced
/// explicitly by the caller via [`FakeRuntime::advance`] rather than
/// reading the OS clock, so tests and the CLI demo are reproducible.
#[derive(Clone)]
pub struct FakeRuntime {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    now_ms: u64,
    outstanding: VecDeque<PendingInterest>,
    sent_data: Vec<Vec<u8>>,
    max_outstanding: Option<usize>,
}

impl FakeRuntime {
    /// Create a new runtime starting at virtual time zero, with no
    /// capacity limit.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                now_ms: 0,
                outstanding: VecDeque::new(),
                sent_data: Vec::new(),
                max_outstanding: None,
            })),
        }
    }

    /// Create a runtime that refuses `express_interest` once
    /// `max_outstanding` interests are pending, for exercising `no_space`
    /// propagation in tests.
    pub fn with_capacity(max_outstanding: usize) -> Self {
        let rt = Self::new();
        rt.inner.borrow_mut().max_outstanding = Some(max_outstanding);
        rt
    }

    /// Advance virtual time by `delta_ms` milliseconds.
    pub fn advance(&self, delta_ms: u64) {
        self.inner.borrow_mut().now_ms += delta_ms;
    }

    /// Drain interests that have expired as of the current virtual time.
    pub fn take_expired(&self) -> Vec<PendingInterest> {
        let mut inner = self.inner.borrow_mut();
        let now = inner.now_ms;
        let mut expired = Vec::new();
        inner.outstanding.retain(|p| {
            if p.expires_at_ms <= now {
                expired.push(p.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Every Data packet ever published through this runtime, in order.
    pub fn sent_data(&self) -> Vec<Vec<u8>> {
        self.inner.borrow().sent_data.clone()
    }

    /// Wire bytes of every interest still outstanding, in expression
    /// order, without removing them. Test-only inspection hook.
    pub fn pending_wires(&self) -> Vec<Vec<u8>> {
        self.inner.borrow().outstanding.iter().map(|p| p.wire.clone()).collect()
    }

    /// Interests still awaiting a matching Data packet.
    pub fn outstanding_count(&self) -> usize {
        self.inner.borrow().outstanding.len()
    }
}

impl Default for FakeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl NdnRuntime for FakeRuntime {
    fn express_interest(&mut self, wire: Vec<u8>, lifetime_ms: u32) -> Result<(), NoSpace> {
        let mut inner = self.inner.borrow_mut();
        if let Some(max) = inner.max_outstanding {
            if inner.outstanding.len() >= max {
                return Err(NoSpace);
            }
        }
        let expires_at_ms = inner.now_ms + lifetime_ms as u64;
        inner.outstanding.push_back(PendingInterest { wire, expires_at_ms });
        Ok(())
    }

    fn put_data(&mut self, wire: Vec<u8>) -> Result<(), NoSpace> {
        self.inner.borrow_mut().sent_data.push(wire);
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }
}
