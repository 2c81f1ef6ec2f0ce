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

//! Protocol-wide constants. `MAX_SEQ_NUM` and `OBSERVATION_WINDOW` are
//! configuration, not compile-time constants, per the Open Question
//! resolution in `DESIGN.md` — these are the documented defaults.

/// First sequence number within a round.
pub const FIRST_SEQ_NUM: u8 = 1;

/// Maximum number of nodes in a group.
pub const MAX_NODE_NUM: usize = 16;

/// Default ceiling for `SeqNum` before a round rolls over.
pub const DEFAULT_MAX_SEQ_NUM: u8 = 15;

/// Default size of the observation log ring (rounds of history kept).
pub const DEFAULT_OBSERVATION_WINDOW: usize = 8;

/// Default interest lifetime, in milliseconds.
pub const TIME_SEC_MS: u32 = 1000;

/// Default retry lifetime for a timed-out fetch interest, in milliseconds.
pub const RETRY_LIFETIME_MS: u32 = 20 * TIME_SEC_MS;

/// Single NDN name component that all sync interests share as a prefix.
pub const SYNC_PREFIX_COMPONENT: &str = "vsync";
