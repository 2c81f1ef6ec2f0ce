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

//! NDN name construction and parsing: `Name ::= TYPE(0x07) LENGTH NameComponent*`,
//! `NameComponent ::= TYPE(0x08) LENGTH bytes`.

use super::{tlv, CodecError, TLV_NAME, TLV_NAME_COMPONENT};

/// An NDN name: an ordered sequence of opaque components.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Name {
    components: Vec<Vec<u8>>,
}

impl Name {
    /// Empty name.
    pub fn new() -> Self {
        Self { components: Vec::new() }
    }

    /// Build a name from a `"/a/b/c"` URI string. Empty segments (leading
    /// slash, trailing slash, repeated slashes) are skipped.
    pub fn from_uri(uri: &str) -> Self {
        let components = uri
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| s.as_bytes().to_vec())
            .collect();
        Self { components }
    }

    /// Build a name from already-split raw components.
    pub fn from_components(components: Vec<Vec<u8>>) -> Self {
        Self { components }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True if the name has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Append a component carrying `value` as 4 big-endian bytes.
    pub fn append_u32_be(&mut self, value: u32) {
        self.components.push(value.to_be_bytes().to_vec());
    }

    /// Append a component carrying `value` as a single byte.
    pub fn append_u8(&mut self, value: u8) {
        self.components.push(vec![value]);
    }

    /// Append an arbitrary byte blob as a new component.
    pub fn append_bytes(&mut self, blob: &[u8]) {
        self.components.push(blob.to_vec());
    }

    /// View the `i`-th component. Negative indices count from the end
    /// (`-1` is the last component), matching the adapter's `component_at`.
    pub fn component_at(&self, i: isize) -> Result<&[u8], CodecError> {
        let n = self.components.len() as isize;
        let idx = if i < 0 { n + i } else { i };
        if idx < 0 || idx >= n {
            return Err(CodecError::ComponentOutOfRange);
        }
        Ok(&self.components[idx as usize])
    }

    /// Encode as a `Name` TLV block.
    pub fn encode(&self) -> Vec<u8> {
        let mut value = Vec::new();
        for c in &self.components {
            tlv::write(TLV_NAME_COMPONENT, c, &mut value);
        }
        let mut out = Vec::new();
        tlv::write(TLV_NAME, &value, &mut out);
        out
    }

    /// Parse a `Name` TLV block.
    pub fn decode(block: &[u8]) -> Result<Self, CodecError> {
        let (typ, value) = tlv::read_exact(block, TLV_NAME)?;
        debug_assert_eq!(typ, TLV_NAME);
        let mut components = Vec::new();
        let mut rest = value;
        while !rest.is_empty() {
            let (ctype, cval, consumed) = tlv::read(rest)?;
            if ctype != TLV_NAME_COMPONENT as u64 {
                return Err(CodecError::UnexpectedTlvType);
            }
            components.push(cval.to_vec());
            rest = &rest[consumed..];
        }
        Ok(Self { components })
    }
}

/// Decode a `uint32` component (must be exactly 4 bytes, big-endian).
pub fn component_as_u32(component: &[u8]) -> Result<u32, CodecError> {
    if component.len() != 4 {
        return Err(CodecError::BadComponentSize);
    }
    let mut b = [0u8; 4];
    b.copy_from_slice(component);
    Ok(u32::from_be_bytes(b))
}

/// Decode a `uint8` component (must be exactly 1 byte).
pub fn component_as_u8(component: &[u8]) -> Result<u8, CodecError> {
    if component.len() != 1 {
        return Err(CodecError::BadComponentSize);
    }
    Ok(component[0])
}
