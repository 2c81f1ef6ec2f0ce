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

//! Minimal-width big-endian integer codec, used for TLV fields (e.g.
//! `InterestLifetime`) whose width is chosen rather than fixed.

use super::CodecError;

/// Encode `value` in the narrowest of {1, 2, 4} bytes that holds it.
pub fn encode_min_width(value: u32) -> Vec<u8> {
    if value <= u8::MAX as u32 {
        vec![value as u8]
    } else if value <= u16::MAX as u32 {
        (value as u16).to_be_bytes().to_vec()
    } else {
        value.to_be_bytes().to_vec()
    }
}

/// Decode a big-endian integer occupying exactly `buf.len()` bytes.
pub fn decode_exact(buf: &[u8]) -> Result<u32, CodecError> {
    match buf.len() {
        1 => Ok(buf[0] as u32),
        2 => {
            let mut b = [0u8; 2];
            b.copy_from_slice(buf);
            Ok(u16::from_be_bytes(b) as u32)
        }
        4 => {
            let mut b = [0u8; 4];
            b.copy_from_slice(buf);
            Ok(u32::from_be_bytes(b))
        }
        _ => Err(CodecError::BadIntegerWidth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_minimum_width() {
        assert_eq!(encode_min_width(0).len(), 1);
        assert_eq!(encode_min_width(255).len(), 1);
        assert_eq!(encode_min_width(256).len(), 2);
        assert_eq!(encode_min_width(65535).len(), 2);
        assert_eq!(encode_min_width(65536).len(), 4);
    }

    #[test]
    fn roundtrips() {
        for v in [0u32, 1, 255, 256, 65535, 65536, 0xFFFF_FFFF] {
            let enc = encode_min_width(v);
            assert_eq!(decode_exact(&enc).unwrap(), v);
        }
    }

    #[test]
    fn rejects_odd_width() {
        assert!(decode_exact(&[0u8; 3]).is_err());
        assert!(decode_exact(&[]).is_err());
    }
}
