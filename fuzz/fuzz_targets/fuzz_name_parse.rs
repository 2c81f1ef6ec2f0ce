// Copyright (c) 2026 VectorSync
// Licensed under the Apache-2.0 License.

#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Best-effort: ensure name decoding never panics on arbitrary TLV bytes.
    let _ = vectorsync::codec::Name::decode(data);
});
