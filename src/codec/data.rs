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

//! Data packet assembly/parsing:
//! `Data ::= Name MetaInfo Content SignatureInfo SignatureValue`.
//!
//! The signed portion is the concatenation of the Name, MetaInfo, Content
//! and SignatureInfo sub-TLVs, signed with `DIGEST_SHA256` or
//! `HMAC_SHA256` (both 32 bytes).

use super::{
    intcodec, name::Name, tlv, CodecError, SIG_TYPE_DIGEST_SHA256, SIG_TYPE_HMAC_SHA256, TLV_CONTENT,
    TLV_CONTENTTYPE, TLV_DATA, TLV_METAINFO, TLV_NAME, TLV_SIGNATUREINFO, TLV_SIGNATURETYPE,
    TLV_SIGNATUREVALUE,
};
use ring::hmac;

/// `MetaInfo` content, simplified to what the publisher path needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaInfo {
    /// NDN `ContentType` field, if set.
    pub content_type: Option<u8>,
}

impl MetaInfo {
    fn encode(&self) -> Vec<u8> {
        let mut value = Vec::new();
        if let Some(ct) = self.content_type {
            tlv::write(TLV_CONTENTTYPE, &intcodec::encode_min_width(ct as u32), &mut value);
        }
        let mut out = Vec::new();
        tlv::write(TLV_METAINFO, &value, &mut out);
        out
    }

    fn decode(block: &[u8]) -> Result<Self, CodecError> {
        let (_typ, value) = tlv::read_exact(block, TLV_METAINFO)?;
        let mut content_type = None;
        let mut rest = value;
        while !rest.is_empty() {
            let (typ, field, consumed) = tlv::read(rest)?;
            if typ == TLV_CONTENTTYPE as u64 {
                content_type = Some(intcodec::decode_exact(field)? as u8);
            }
            rest = &rest[consumed..];
        }
        Ok(Self { content_type })
    }
}

/// Signature kinds the adapter can produce and verify.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureKind {
    /// `SignatureType = 0`: plain SHA-256 digest of the signed portion.
    DigestSha256,
    /// `SignatureType = 4`: HMAC-SHA-256 over the signed portion.
    HmacSha256,
}

impl SignatureKind {
    fn wire_value(self) -> u32 {
        match self {
            SignatureKind::DigestSha256 => SIG_TYPE_DIGEST_SHA256,
            SignatureKind::HmacSha256 => SIG_TYPE_HMAC_SHA256,
        }
    }

    fn from_wire_value(v: u32) -> Result<Self, CodecError> {
        match v {
            SIG_TYPE_DIGEST_SHA256 => Ok(SignatureKind::DigestSha256),
            SIG_TYPE_HMAC_SHA256 => Ok(SignatureKind::HmacSha256),
            _ => Err(CodecError::UnknownSignatureType),
        }
    }
}

fn signature_info(kind: SignatureKind) -> Vec<u8> {
    let mut value = Vec::new();
    tlv::write(TLV_SIGNATURETYPE, &intcodec::encode_min_width(kind.wire_value()), &mut value);
    let mut out = Vec::new();
    tlv::write(TLV_SIGNATUREINFO, &value, &mut out);
    out
}

fn sign(kind: SignatureKind, hmac_key: Option<&[u8]>, signed_portion: &[u8]) -> Result<[u8; 32], CodecError> {
    match kind {
        SignatureKind::DigestSha256 => {
            let digest = ring::digest::digest(&ring::digest::SHA256, signed_portion);
            let mut out = [0u8; 32];
            out.copy_from_slice(digest.as_ref());
            Ok(out)
        }
        SignatureKind::HmacSha256 => {
            let key_bytes = hmac_key.ok_or(CodecError::MissingHmacKey)?;
            let key = hmac::Key::new(hmac::HMAC_SHA256, key_bytes);
            let tag = hmac::sign(&key, signed_portion);
            let mut out = [0u8; 32];
            out.copy_from_slice(tag.as_ref());
            Ok(out)
        }
    }
}

/// Construct a signed Data packet.
pub fn build_data(
    name: &Name,
    meta: &MetaInfo,
    content: &[u8],
    kind: SignatureKind,
    hmac_key: Option<&[u8]>,
) -> Result<Vec<u8>, CodecError> {
    let name_block = name.encode();
    let meta_block = meta.encode();
    let mut content_block = Vec::new();
    tlv::write(TLV_CONTENT, content, &mut content_block);
    let sig_info_block = signature_info(kind);

    let mut signed_portion = Vec::with_capacity(
        name_block.len() + meta_block.len() + content_block.len() + sig_info_block.len(),
    );
    signed_portion.extend_from_slice(&name_block);
    signed_portion.extend_from_slice(&meta_block);
    signed_portion.extend_from_slice(&content_block);
    signed_portion.extend_from_slice(&sig_info_block);

    let sig_value = sign(kind, hmac_key, &signed_portion)?;
    let mut sig_value_block = Vec::new();
    tlv::write(TLV_SIGNATUREVALUE, &sig_value, &mut sig_value_block);

    let mut value = signed_portion;
    value.extend_from_slice(&sig_value_block);

    let mut out = Vec::new();
    tlv::write(TLV_DATA, &value, &mut out);
    Ok(out)
}

/// A parsed Data packet, with `content` borrowing from the original buffer.
pub struct ParsedData<'a> {
    /// The data name.
    pub name: Name,
    /// The signature kind declared in `SignatureInfo`.
    pub signature_kind: SignatureKind,
    /// The signed portion, for callers that want to verify the signature.
    pub signed_portion: &'a [u8],
    /// The signature value (32 bytes).
    pub signature: &'a [u8],
    /// Content bytes, borrowed from the input buffer.
    pub content: &'a [u8],
}

/// Parse a Data packet, returning views into `block`.
pub fn parse_data(block: &[u8]) -> Result<ParsedData<'_>, CodecError> {
    let (_typ, value) = tlv::read_exact(block, TLV_DATA)?;

    let (name_type, _name_value, name_consumed) = tlv::read(value)?;
    if name_type != TLV_NAME as u64 {
        return Err(CodecError::UnexpectedTlvType);
    }
    let name = Name::decode(&value[..name_consumed])?;
    let mut rest = &value[name_consumed..];

    let (meta_type, meta_value, meta_consumed) = tlv::read(rest)?;
    if meta_type != TLV_METAINFO as u64 {
        return Err(CodecError::UnexpectedTlvType);
    }
    let _meta = MetaInfo::decode(&rest[..meta_consumed])?;
    let _ = meta_value;
    rest = &rest[meta_consumed..];

    let (content_type, content, content_consumed) = tlv::read(rest)?;
    if content_type != TLV_CONTENT as u64 {
        return Err(CodecError::UnexpectedTlvType);
    }
    let signed_portion_end_offset = name_consumed + meta_consumed + content_consumed;
    rest = &rest[content_consumed..];

    let (sig_info_type, sig_info_value, sig_info_consumed) = tlv::read(rest)?;
    if sig_info_type != TLV_SIGNATUREINFO as u64 {
        return Err(CodecError::UnexpectedTlvType);
    }
    let kind = parse_signature_kind(sig_info_value)?;
    let signed_portion = &value[..signed_portion_end_offset + sig_info_consumed];
    rest = &rest[sig_info_consumed..];

    let (sig_value_type, signature, _sig_value_consumed) = tlv::read(rest)?;
    if sig_value_type != TLV_SIGNATUREVALUE as u64 {
        return Err(CodecError::UnexpectedTlvType);
    }
    if signature.len() != 32 {
        return Err(CodecError::BadSignatureLength);
    }

    Ok(ParsedData { name, signature_kind: kind, signed_portion, signature, content })
}

fn parse_signature_kind(sig_info_value: &[u8]) -> Result<SignatureKind, CodecError> {
    let (typ, field, _consumed) = tlv::read(sig_info_value)?;
    if typ != TLV_SIGNATURETYPE as u64 {
        return Err(CodecError::UnexpectedTlvType);
    }
    SignatureKind::from_wire_value(intcodec::decode_exact(field)?)
}

/// Verify a parsed Data packet's signature. Separate from `parse_data`
/// because the protocol state machine itself never needs to verify
/// (spec §4.4 only extracts name/content); callers that do want
/// authentication call this explicitly.
pub fn verify_signature(parsed: &ParsedData<'_>, hmac_key: Option<&[u8]>) -> Result<bool, CodecError> {
    let expected = sign(parsed.signature_kind, hmac_key, parsed.signed_portion)?;
    Ok(ring::constant_time::verify_slices_are_equal(&expected, parsed.signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_sha256_roundtrip() {
        let mut name = Name::from_uri("/alice");
        name.append_u32_be(0);
        name.append_u8(1);
        let meta = MetaInfo { content_type: Some(0) };
        let wire = build_data(&name, &meta, b"hello", SignatureKind::DigestSha256, None).unwrap();

        let parsed = parse_data(&wire).unwrap();
        assert_eq!(parsed.name, name);
        assert_eq!(parsed.content, b"hello");
        assert!(verify_signature(&parsed, None).unwrap());
    }

    #[test]
    fn hmac_sha256_roundtrip_and_tamper_detection() {
        let name = Name::from_uri("/bob/0/1");
        let meta = MetaInfo::default();
        let key = b"shared-secret-key";
        let wire = build_data(&name, &meta, b"payload", SignatureKind::HmacSha256, Some(key)).unwrap();

        let parsed = parse_data(&wire).unwrap();
        assert!(verify_signature(&parsed, Some(key)).unwrap());
        assert!(!verify_signature(&parsed, Some(b"wrong-key")).unwrap());
    }

    #[test]
    fn missing_hmac_key_is_rejected() {
        let name = Name::from_uri("/alice/0/1");
        let meta = MetaInfo::default();
        assert!(build_data(&name, &meta, b"x", SignatureKind::HmacSha256, None).is_err());
    }
}
