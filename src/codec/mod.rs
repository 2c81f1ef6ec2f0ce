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

//! Wire codec adapter: the thin façade over NDN TLV encoding that the
//! protocol engine needs — name construction/parsing, the varnum and
//! minimal-width integer codecs, and signed data/interest packet
//! assembly. Type codes are fixed by the NDN TLV specification and are
//! reproduced bit-exactly (see [`tlv`] and the `TLV_*` constants below).

pub mod data;
pub mod interest;
pub mod intcodec;
pub mod name;
pub mod tlv;
pub mod varnum;

pub use data::{build_data, parse_data, MetaInfo, SignatureKind};
pub use interest::{build_interest, parse_interest_lifetime_ms, parse_interest_name};
pub use name::{component_as_u32, component_as_u8, Name};

use thiserror::Error;

/// Codec adapter errors. All map onto the protocol engine's `bad_format`
/// outcome (spec §7) when surfaced through the state machine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Input ended before a TLV field could be fully read.
    #[error("truncated TLV input")]
    Truncated,
    /// Varnum prefix byte 255 (8-byte width) is not supported on this wire.
    #[error("unsupported varnum width")]
    UnsupportedVarNumWidth,
    /// Integer field width was not one of {1, 2, 4}.
    #[error("bad integer width")]
    BadIntegerWidth,
    /// `component_at` index was out of bounds.
    #[error("name component index out of range")]
    ComponentOutOfRange,
    /// A fixed-width component (round/seq) had the wrong byte length.
    #[error("name component has unexpected size")]
    BadComponentSize,
    /// A TLV block had a type code other than the one expected here.
    #[error("unexpected TLV type")]
    UnexpectedTlvType,
    /// Unknown `SignatureType` value.
    #[error("unknown signature type")]
    UnknownSignatureType,
    /// `HMAC_SHA256` was requested without a key.
    #[error("missing HMAC key")]
    MissingHmacKey,
    /// Signature value had the wrong length for its declared type.
    #[error("bad signature value length")]
    BadSignatureLength,
}

// NDN TLV type codes (fixed by the NDN packet format specification).
pub(crate) const TLV_INTEREST: u8 = 0x05;
pub(crate) const TLV_DATA: u8 = 0x06;
pub(crate) const TLV_NAME: u8 = 0x07;
pub(crate) const TLV_NAME_COMPONENT: u8 = 0x08;
pub(crate) const TLV_NONCE: u8 = 0x0A;
pub(crate) const TLV_INTERESTLIFETIME: u8 = 0x0C;
pub(crate) const TLV_METAINFO: u8 = 0x14;
pub(crate) const TLV_CONTENT: u8 = 0x15;
pub(crate) const TLV_SIGNATUREINFO: u8 = 0x16;
pub(crate) const TLV_SIGNATUREVALUE: u8 = 0x17;
pub(crate) const TLV_CONTENTTYPE: u8 = 0x18;
pub(crate) const TLV_SIGNATURETYPE: u8 = 0x1B;

/// `SignatureType` values carried inside `SignatureInfo` (NDN-assigned).
pub(crate) const SIG_TYPE_DIGEST_SHA256: u32 = 0;
pub(crate) const SIG_TYPE_HMAC_SHA256: u32 = 4;
