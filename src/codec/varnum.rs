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

//! NDN variable-length-number codec: the TLV length/type prefix format.
//!
//! One byte for values <= 252; a leading byte of 253 followed by two
//! big-endian bytes for values <= 0xFFFF; a leading byte of 254 followed by
//! four big-endian bytes for values <= 0xFFFF_FFFF.

use super::CodecError;

const SHORT_MAX: u64 = 252;
const U16_PREFIX: u8 = 253;
const U32_PREFIX: u8 = 254;

/// Encode `value` as an NDN varnum, appending to `out`.
pub fn encode(value: u64, out: &mut Vec<u8>) {
    if value <= SHORT_MAX {
        out.push(value as u8);
    } else if value <= u16::MAX as u64 {
        out.push(U16_PREFIX);
        out.extend_from_slice(&(value as u16).to_be_bytes());
    } else {
        out.push(U32_PREFIX);
        out.extend_from_slice(&(value as u32).to_be_bytes());
    }
}

/// Decode a varnum from the front of `buf`. Returns `(value, bytes_consumed)`.
pub fn decode(buf: &[u8]) -> Result<(u64, usize), CodecError> {
    let first = *buf.first().ok_or(CodecError::Truncated)?;
    match first {
        0..=252 => Ok((first as u64, 1)),
        253 => {
            let rest = buf.get(1..3).ok_or(CodecError::Truncated)?;
            let mut b = [0u8; 2];
            b.copy_from_slice(rest);
            Ok((u16::from_be_bytes(b) as u64, 3))
        }
        254 => {
            let rest = buf.get(1..5).ok_or(CodecError::Truncated)?;
            let mut b = [0u8; 4];
            b.copy_from_slice(rest);
            Ok((u32::from_be_bytes(b) as u64, 5))
        }
        255 => Err(CodecError::UnsupportedVarNumWidth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(v: u64) {
        let mut buf = Vec::new();
        encode(v, &mut buf);
        let (decoded, consumed) = decode(&buf).unwrap();
        assert_eq!(decoded, v);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn boundaries_roundtrip() {
        for v in [0, 1, 252, 253, 254, 255, 0xFFFF, 0x1_0000, 0xFFFF_FFFF] {
            roundtrip(v);
        }
    }

    #[test]
    fn truncated_input_fails() {
        assert!(decode(&[]).is_err());
        assert!(decode(&[253, 0]).is_err());
        assert!(decode(&[254, 0, 0, 0]).is_err());
    }

    #[test]
    fn width_matches_value_range() {
        let mut buf = Vec::new();
        encode(252, &mut buf);
        assert_eq!(buf.len(), 1);
        buf.clear();
        encode(253, &mut buf);
        assert_eq!(buf.len(), 3);
        buf.clear();
        encode(0x1_0000, &mut buf);
        assert_eq!(buf.len(), 5);
    }
}
