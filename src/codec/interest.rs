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

//! Interest packet assembly/parsing: `Interest ::= Name Nonce InterestLifetime`.
//!
//! The nonce and lifetime fields are not part of the distilled protocol
//! contract but are required for a bit-exact NDN interest — recovered from
//! `sys/net/ndn/encoding/interest.c` in the original implementation.

use super::{intcodec, name::Name, tlv, CodecError, TLV_INTEREST, TLV_INTERESTLIFETIME, TLV_NONCE};
use ring::rand::{SecureRandom, SystemRandom};

/// Build a wire-encoded Interest carrying `name` with the given lifetime.
pub fn build_interest(name: &Name, lifetime_ms: u32) -> Vec<u8> {
    let mut value = name.encode();

    let mut nonce = [0u8; 4];
    // A failure here (OS RNG unavailable) still yields a valid, if
    // predictable, interest; nonce collisions only affect dedup at the
    // runtime layer, not protocol correctness.
    let _ = SystemRandom::new().fill(&mut nonce);
    tlv::write(TLV_NONCE, &nonce, &mut value);

    let lifetime_bytes = intcodec::encode_min_width(lifetime_ms);
    tlv::write(TLV_INTERESTLIFETIME, &lifetime_bytes, &mut value);

    let mut out = Vec::new();
    tlv::write(TLV_INTEREST, &value, &mut out);
    out
}

/// Extract the `Name` from a wire-encoded Interest.
pub fn parse_interest_name(block: &[u8]) -> Result<Name, CodecError> {
    let (_typ, value) = tlv::read_exact(block, TLV_INTEREST)?;
    let (name_type, name_value, consumed) = tlv::read(value)?;
    if name_type != super::TLV_NAME as u64 {
        return Err(CodecError::UnexpectedTlvType);
    }
    Name::decode(&value[..consumed])
}

/// Extract the `InterestLifetime` (in milliseconds) from a wire-encoded Interest.
pub fn parse_interest_lifetime_ms(block: &[u8]) -> Result<u32, CodecError> {
    let (_typ, value) = tlv::read_exact(block, TLV_INTEREST)?;
    let mut rest = value;
    while !rest.is_empty() {
        let (typ, field, consumed) = tlv::read(rest)?;
        if typ == TLV_INTERESTLIFETIME as u64 {
            return intcodec::decode_exact(field);
        }
        rest = &rest[consumed..];
    }
    Err(CodecError::UnexpectedTlvType)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrips_through_interest() {
        let mut n = Name::from_uri("/vsync");
        n.append_u32_be(0);
        n.append_bytes(&[1, 0]);

        let wire = build_interest(&n, 1000);
        let parsed = parse_interest_name(&wire).unwrap();
        assert_eq!(parsed, n);
        assert_eq!(parse_interest_lifetime_ms(&wire).unwrap(), 1000);
    }

    #[test]
    fn rejects_non_interest_block() {
        let n = Name::from_uri("/alice");
        let wire = n.encode();
        assert!(parse_interest_name(&wire).is_err());
    }
}
