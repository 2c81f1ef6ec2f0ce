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

//! The protocol engine's error surface: exactly the `bad_format` /
//! `no_space` kinds named by the protocol contract, plus `Ok` for the
//! `ok` case.

use thiserror::Error;

/// Errors the protocol state machine and fetch orchestrator can return.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VsyncError {
    /// TLV parse failure, wrong component count/size, or unknown peer
    /// prefix. The triggering event is dropped; state is untouched.
    #[error("bad format: {0}")]
    BadFormat(&'static str),
    /// A downstream interest-send (or allocation) failed. State may be
    /// partially advanced: updates that preceded the failing send are
    /// retained.
    #[error("no space")]
    NoSpace,
}

impl From<crate::codec::CodecError> for VsyncError {
    fn from(_: crate::codec::CodecError) -> Self {
        VsyncError::BadFormat("codec error")
    }
}

impl From<crate::runtime::NoSpace> for VsyncError {
    fn from(_: crate::runtime::NoSpace) -> Self {
        VsyncError::NoSpace
    }
}
