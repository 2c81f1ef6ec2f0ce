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

//! Generic `TYPE LENGTH VALUE` framing shared by every NDN block: both
//! `TYPE` and `LENGTH` are varnums (see [`super::varnum`]).

use super::{varnum, CodecError};

/// Append a `type`/`value` pair as a TLV block.
pub fn write(typ: u8, value: &[u8], out: &mut Vec<u8>) {
    varnum::encode(typ as u64, out);
    varnum::encode(value.len() as u64, out);
    out.extend_from_slice(value);
}

/// Read one TLV block from the front of `buf`.
///
/// Returns `(type, value, bytes_consumed)`. `value` borrows from `buf`.
pub fn read(buf: &[u8]) -> Result<(u64, &[u8], usize), CodecError> {
    let (typ, type_len) = varnum::decode(buf)?;
    let after_type = &buf[type_len..];
    let (len, len_len) = varnum::decode(after_type)?;
    let value_start = type_len + len_len;
    let value_end = value_start
        .checked_add(len as usize)
        .ok_or(CodecError::Truncated)?;
    if value_end > buf.len() {
        return Err(CodecError::Truncated);
    }
    Ok((typ, &buf[value_start..value_end], value_end))
}

/// Read one TLV block and assert its type equals `expected`.
pub fn read_exact(buf: &[u8], expected: u8) -> Result<(u64, &[u8]), CodecError> {
    let (typ, value, _consumed) = read(buf)?;
    if typ != expected as u64 {
        return Err(CodecError::UnexpectedTlvType);
    }
    Ok((typ, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_roundtrip() {
        let mut out = Vec::new();
        write(0x08, b"alice", &mut out);
        let (typ, value, consumed) = read(&out).unwrap();
        assert_eq!(typ, 0x08);
        assert_eq!(value, b"alice");
        assert_eq!(consumed, out.len());
    }

    #[test]
    fn rejects_wrong_type() {
        let mut out = Vec::new();
        write(0x08, b"alice", &mut out);
        assert!(read_exact(&out, 0x07).is_err());
    }

    #[test]
    fn rejects_length_overrun() {
        let mut out = Vec::new();
        write(0x08, b"alice", &mut out);
        out.truncate(out.len() - 1);
        assert!(read(&out).is_err());
    }
}
